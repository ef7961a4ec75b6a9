//! Raw-to-RLA encode command.

use super::{parse_attr, parse_format, parse_format_list, parse_origin, parse_window};
use crate::EncodeArgs;
use anyhow::{Context, Result, bail};
use rla_core::ImageSpec;
use rla_io::rla::{RlaOutput, RlaWriterOptions};
use rla_io::{ImageOutput, OpenMode};
use tracing::{debug, info, trace};

/// Builds the image spec described by the command line.
fn build_spec(args: &EncodeArgs) -> Result<ImageSpec> {
    let format = parse_format(&args.format)?;
    let mut spec = ImageSpec::new(args.width, args.height, args.channels, format);

    if let Some(list) = &args.channel_formats {
        let formats = parse_format_list(list)?;
        if formats.len() != args.channels as usize {
            bail!(
                "--channel-formats lists {} formats for {} channels",
                formats.len(),
                args.channels
            );
        }
        spec.channel_formats = formats;
    }

    if let Some(origin) = &args.origin {
        let (x, y) = parse_origin(origin)?;
        spec.data_window = match spec.data_window.translate(x, y) {
            Some(window) => window,
            None => bail!("--origin {x},{y} moves the data window out of range"),
        };
    }
    spec.display_window = match &args.full {
        Some(full) => parse_window(full)?,
        None => spec.data_window,
    };

    for attr in &args.attrs {
        let (key, value) = parse_attr(attr)?;
        debug!(key = %key, value = ?value, "attribute");
        spec.attributes.insert(key, value);
    }
    Ok(spec)
}

/// Runs the encode command.
pub fn run(args: EncodeArgs, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "encode::run");

    let spec = build_spec(&args)?;
    let data = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read: {}", args.input.display()))?;

    let expected = spec.scanline_bytes() * spec.height() as usize;
    if data.len() != expected {
        bail!(
            "{} holds {} bytes, a {} image needs {}",
            args.input.display(),
            data.len(),
            spec,
            expected
        );
    }

    info!(
        input = %args.input.display(),
        output = %args.output.display(),
        spec = %spec,
        "Encoding RLA"
    );

    let mut options = RlaWriterOptions::default();
    if let Some(program) = &args.program {
        options.program_name = program.clone();
    }
    let mut out = RlaOutput::with_options(options);
    out.open(&args.output, &spec, OpenMode::Create)
        .with_context(|| format!("Failed to create: {}", args.output.display()))?;
    out.write_image(None, &data)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;
    out.close()
        .with_context(|| format!("Failed to finalize: {}", args.output.display()))?;

    if verbose > 0 {
        println!("{} -> {} ({})", args.input.display(), args.output.display(), spec);
    }
    Ok(())
}
