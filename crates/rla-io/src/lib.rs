//! # rla-io
//!
//! Scanline image writers behind a common [`ImageOutput`] interface.
//!
//! - **RLA** - Wavefront Advanced Visualizer raster format
//!
//! # Architecture
//!
//! - [`ImageOutput`] - object-safe trait every writer implements
//!   (open / write_scanline / close)
//! - [`registry::OutputRegistry`] - built-in writers by name or extension
//! - [`create_output`] - writer for a path, chosen by extension
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use rla_core::{DataFormat, ImageSpec};
//! use rla_io::{create_output, OpenMode};
//!
//! let path = std::path::Path::new("frame.0001.rla");
//! let spec = ImageSpec::rgba(1920, 1080);
//!
//! let mut out = create_output(path)?;
//! out.open(path, &spec, OpenMode::Create)?;
//! for y in 0..1080 {
//!     out.write_scanline(y, 0, Some(DataFormat::F32), &rows[y as usize], None)?;
//! }
//! out.close()?;
//! ```
//!
//! # Feature Flags
//!
//! - `rla` - Wavefront RLA writer (default)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod traits;
pub mod registry;

#[cfg(feature = "rla")]
pub mod rla;

pub use error::{IoError, IoResult};
pub use traits::{FormatCapability, ImageOutput, OpenMode};

use std::path::Path;

/// Creates an unopened writer for `path`, chosen by file extension.
///
/// # Example
///
/// ```rust,ignore
/// let mut out = rla_io::create_output("beauty.rla".as_ref())?;
/// assert_eq!(out.format_name(), "rla");
/// ```
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] if no registered writer handles
/// the extension.
pub fn create_output(path: &Path) -> IoResult<Box<dyn ImageOutput>> {
    registry::OutputRegistry::global().create_for_path(path)
}
