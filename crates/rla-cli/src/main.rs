//! rla - Wavefront RLA encoder CLI
//!
//! Encodes raw interleaved sample dumps into RLA files.

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "rla")]
#[command(author, version, about = "Wavefront RLA encoder")]
#[command(long_about = "
Encodes raw pixel data into Wavefront RLA images.

Input is an interleaved, host-endian sample dump with one sample per
channel per pixel, top row first.

Examples:
  rla encode beauty.raw beauty.rla --width 640 --height 480 --channels 4
  rla encode depth.raw depth.rla --width 640 --height 480 --channels 1 --format float
  rla encode mixed.raw out.rla --width 64 --height 64 --channels 5 \\
      --channel-formats float,float,float,half,u16
  rla encode plate.raw plate.rla --width 1920 --height 1080 --channels 3 \\
      --full 2048,1152,-64,-36 --attr oiio:ColorSpace=Linear --attr rla:FrameNumber=1001
  rla formats                           # List output formats
  RUST_LOG=rla_io=trace rla encode ...  # Per-scanline logging
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a raw sample dump as RLA
    #[command(visible_alias = "e")]
    Encode(EncodeArgs),

    /// List registered output formats
    Formats,
}

#[derive(Args)]
struct EncodeArgs {
    /// Raw input samples
    input: PathBuf,

    /// Output image
    output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    width: u32,

    /// Image height in pixels
    #[arg(long)]
    height: u32,

    /// Channels per pixel
    #[arg(short, long)]
    channels: u16,

    /// Sample format of every channel: u8, u16, u32, half, float
    #[arg(short = 'd', long, default_value = "u8")]
    format: String,

    /// Per-channel sample formats, comma separated (overrides --format)
    #[arg(long)]
    channel_formats: Option<String>,

    /// Data window origin as X,Y
    #[arg(long, allow_hyphen_values = true)]
    origin: Option<String>,

    /// Display window as W,H,X,Y (defaults to the data window)
    #[arg(long, allow_hyphen_values = true)]
    full: Option<String>,

    /// Header attribute as KEY=VALUE (repeatable)
    #[arg(short, long = "attr")]
    attrs: Vec<String>,

    /// ProgramName header field
    #[arg(long)]
    program: Option<String>,
}

/// Installs the log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Encode(args) => commands::encode::run(args, cli.verbose),
        Commands::Formats => commands::formats::run(cli.verbose),
    }
}
