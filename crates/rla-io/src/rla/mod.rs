//! Wavefront RLA format writer.
//!
//! RLA is the run-length-less "raster" format of Wavefront's Advanced
//! Visualizer: a fixed 740-byte big-endian header, a table of per-row file
//! offsets, then the scanlines themselves, stored bottom row first.
//!
//! # Layout
//!
//! ```text
//! +--------------------+  0
//! | header (740 bytes) |
//! +--------------------+  740
//! | offset table       |  height x u32, entry 0 = bottom row
//! +--------------------+  740 + 4 * height
//! | scanline records   |  in the order they were written
//! +--------------------+
//! ```
//!
//! Each scanline record holds, per channel, a big-endian `u16` byte count
//! followed by that channel's samples. Data is stored uncompressed.
//!
//! # Channels
//!
//! Channels are split into up to three groups (see [`channels::classify`]):
//! color (1 or 3), matte, and aux. Integer groups are written as `CT_BYTE`,
//! float groups as `CT_FLOAT`, with the bit depth of the group's format.
//!
//! # Example
//!
//! ```rust,ignore
//! use rla_io::rla::{RlaOutput, RlaWriterOptions};
//! use rla_io::{ImageOutput, OpenMode};
//! use rla_core::{DataFormat, ImageSpec};
//!
//! let mut spec = ImageSpec::rgba(320, 240);
//! spec.set_attr("oiio:ColorSpace", "Linear");
//!
//! let mut out = RlaOutput::with_options(RlaWriterOptions {
//!     program_name: "my-renderer".into(),
//!     ..Default::default()
//! });
//! out.open("beauty.rla".as_ref(), &spec, OpenMode::Create)?;
//! out.write_image(Some(DataFormat::U8), &pixels)?;
//! out.close()?;
//! ```

pub mod channels;
pub mod endian;
pub mod header;
pub mod scanline;
pub mod serialize;
pub mod text;

use crate::{FormatCapability, ImageOutput, IoError, IoResult, OpenMode};
use chrono::{Local, NaiveDateTime};
use header::HeaderRecord;
use rla_core::{DataFormat, ImageSpec};
use scanline::ScanlineEncoder;
use serialize::{HEADER_SIZE, OFFSET_ENTRY_SIZE};
use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// RLA writer options.
#[derive(Debug, Clone)]
pub struct RlaWriterOptions {
    /// Written to the `ProgramName` header field.
    pub program_name: String,
    /// Fixed `DateCreated` timestamp. `None` uses the local clock at open.
    pub created: Option<NaiveDateTime>,
}

impl Default for RlaWriterOptions {
    fn default() -> Self {
        Self {
            program_name: concat!("rla-io ", env!("CARGO_PKG_VERSION")).to_string(),
            created: None,
        }
    }
}

/// State of the open file.
struct OpenFile {
    writer: BufWriter<File>,
    spec: ImageSpec,
    /// Offset table, bottom row first.
    offsets: Vec<u32>,
    /// Current end of file.
    position: u64,
    /// Set once a row write fails; the file position is unknown after that.
    failed: bool,
}

/// Wavefront RLA writer.
///
/// One image per file, scanlines only. Rows may arrive in any order; their
/// offsets are collected and written into the table on [`close`](ImageOutput::close).
pub struct RlaOutput {
    options: RlaWriterOptions,
    file: Option<OpenFile>,
    encoder: ScanlineEncoder,
}

impl Default for RlaOutput {
    fn default() -> Self {
        Self::with_options(RlaWriterOptions::default())
    }
}

impl RlaOutput {
    /// Creates a writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer with custom options.
    pub fn with_options(options: RlaWriterOptions) -> Self {
        Self {
            options,
            file: None,
            encoder: ScanlineEncoder::default(),
        }
    }

    /// Options in effect.
    pub fn options(&self) -> &RlaWriterOptions {
        &self.options
    }

    /// Returns `true` while a file is open.
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }
}

impl std::fmt::Debug for RlaOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RlaOutput")
            .field("options", &self.options)
            .field("open", &self.file.as_ref().map(|open| open.spec.to_string()))
            .finish()
    }
}

/// Rejects specs the RLA header cannot describe.
fn validate(spec: &ImageSpec) -> IoResult<()> {
    if spec.width() < 1 || spec.height() < 1 {
        return Err(IoError::InvalidGeometry {
            width: spec.width(),
            height: spec.height(),
        });
    }
    if spec.is_3d() {
        return Err(IoError::UnsupportedDepth(spec.depth));
    }
    if spec.channels == 0 {
        return Err(IoError::InvalidChannels("image has no channels".into()));
    }
    if spec.channels > i16::MAX as u16 {
        return Err(IoError::InvalidChannels(format!(
            "{} channels do not fit the header",
            spec.channels
        )));
    }
    spec.check_channel_formats()
        .map_err(|e| IoError::InvalidChannels(e.to_string()))
}

impl ImageOutput for RlaOutput {
    fn format_name(&self) -> &'static str {
        "rla"
    }

    fn supports(&self, _capability: FormatCapability) -> bool {
        false
    }

    fn open(&mut self, path: &Path, spec: &ImageSpec, mode: OpenMode) -> IoResult<()> {
        if let Some(capability) = mode.required_capability() {
            if !self.supports(capability) {
                return Err(IoError::UnsupportedMode(format!(
                    "{} does not support {mode}",
                    self.format_name()
                )));
            }
        }
        self.close()?;

        validate(spec)?;
        let layout = channels::classify(spec.channels as usize, &spec.channel_formats, spec.format);
        let created = self
            .options
            .created
            .unwrap_or_else(|| Local::now().naive_local());
        let header = HeaderRecord::from_spec(
            spec,
            &layout,
            &path.to_string_lossy(),
            &self.options.program_name,
            &created,
        )?;

        let file = File::create(path).map_err(|source| IoError::CannotCreate {
            path: path.to_path_buf(),
            source,
        })?;
        let mut writer = BufWriter::new(file);

        let offsets = vec![0u32; spec.height() as usize];
        serialize::write_header(&mut writer, &header.normalize())?;
        serialize::write_offset_table(&mut writer, &offsets)?;

        debug!(
            path = %path.display(),
            spec = %spec,
            data_window = %spec.data_window,
            overscan = spec.has_overscan(),
            color = layout.color.count,
            matte = layout.matte.count,
            aux = layout.aux.count,
            "opened RLA output"
        );

        self.encoder = ScanlineEncoder::new(spec);
        self.file = Some(OpenFile {
            writer,
            spec: spec.clone(),
            position: (HEADER_SIZE + offsets.len() * OFFSET_ENTRY_SIZE) as u64,
            offsets,
            failed: false,
        });
        Ok(())
    }

    fn write_scanline(
        &mut self,
        y: i32,
        z: i32,
        format: Option<DataFormat>,
        data: &[u8],
        xstride: Option<usize>,
    ) -> IoResult<()> {
        let open = self.file.as_mut().ok_or(IoError::NotOpen)?;
        if open.failed {
            return Err(IoError::EncodeError(
                "an earlier scanline write failed, the file is unusable".into(),
            ));
        }
        let window = open.spec.data_window;
        if z != 0 || !window.contains_row(y) {
            return Err(IoError::ScanlineOutOfRange {
                y,
                z,
                first: window.y,
                last: window.max_y(),
            });
        }

        let stride = open.spec.auto_stride(xstride, format);
        self.encoder.stage(format, data, stride)?;
        let record = self.encoder.encode()?;

        let offset = u32::try_from(open.position).map_err(|_| {
            IoError::EncodeError(format!("scanline offset {} exceeds 32 bits", open.position))
        })?;
        if let Err(e) = open.writer.write_all(record) {
            open.failed = true;
            return Err(e.into());
        }

        let local = (y as i64 - window.y as i64) as usize;
        let entry = open.offsets.len() - 1 - local;
        open.offsets[entry] = offset;
        open.position += record.len() as u64;

        trace!(y, entry, offset, bytes = record.len(), "wrote scanline");
        Ok(())
    }

    fn close(&mut self) -> IoResult<()> {
        let Some(mut open) = self.file.take() else {
            return Ok(());
        };
        self.encoder.clear();

        open.writer.seek(SeekFrom::Start(HEADER_SIZE as u64))?;
        serialize::write_offset_table(&mut open.writer, &open.offsets)?;
        open.writer.flush()?;

        debug!(rows = open.offsets.len(), bytes = open.position, "closed RLA output");
        Ok(())
    }

    fn spec(&self) -> Option<&ImageSpec> {
        self.file.as_ref().map(|open| &open.spec)
    }
}

impl Drop for RlaOutput {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "failed to close RLA output");
        }
    }
}
