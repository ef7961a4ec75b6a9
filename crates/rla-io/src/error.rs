//! Error types for I/O operations.
//!
//! Every failure of an [`ImageOutput`](crate::ImageOutput) is reported as an
//! [`IoError`] carrying a human-readable message.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error while writing, seeking or flushing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Output file could not be created.
    #[error("could not open file \"{}\": {source}", path.display())]
    CannotCreate {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },

    /// Open mode other than simple creation.
    #[error("unsupported open mode: {0}")]
    UnsupportedMode(String),

    /// Image resolution below 1x1.
    #[error("image resolution must be at least 1x1, you asked for {width} x {height}")]
    InvalidGeometry {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Volumetric images are not supported.
    #[error("volume images are not supported (depth {0} > 1)")]
    UnsupportedDepth(u32),

    /// Channel count or channel format list is unusable.
    #[error("invalid channels: {0}")]
    InvalidChannels(String),

    /// Window coordinates do not fit the 16-bit header fields.
    #[error("geometry overflow: {0}")]
    GeometryOverflow(String),

    /// Scanline written before `open` or after `close`.
    #[error("no image is open")]
    NotOpen,

    /// Scanline row or layer outside the image.
    #[error("scanline y={y} z={z} outside rows {first}..={last}")]
    ScanlineOutOfRange {
        /// Requested row.
        y: i32,
        /// Requested layer.
        z: i32,
        /// First valid row.
        first: i32,
        /// Last valid row.
        last: i64,
    },

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Sample conversion failed.
    #[error("conversion error: {0}")]
    Conversion(#[from] rla_core::Error),

    /// Unsupported format.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
