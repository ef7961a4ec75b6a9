//! Error types for rla-core operations.
//!
//! The [`Error`] enum covers failures while interpreting caller-supplied
//! pixel buffers, mostly during sample conversion in [`crate::convert`].
//!
//! # Usage
//!
//! ```rust
//! use rla_core::{Error, Result};
//!
//! fn check_len(expected: usize, actual: usize) -> Result<()> {
//!     if actual < expected {
//!         return Err(Error::BufferTooSmall { expected, actual });
//!     }
//!     Ok(())
//! }
//! assert!(check_len(4, 2).is_err());
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by core image operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A pixel buffer is shorter than its layout requires.
    #[error("buffer too small: need {expected} bytes, got {actual}")]
    BufferTooSmall {
        /// Bytes required by the layout
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// Channel count disagrees with the number of channel formats.
    #[error("channel mismatch: expected {expected} channels, got {actual}")]
    ChannelMismatch {
        /// Expected channel count
        expected: usize,
        /// Actual channel count
        actual: usize,
    },

    /// Pixel stride is smaller than one pixel.
    #[error("invalid stride {stride}: a pixel needs at least {min} bytes")]
    InvalidStride {
        /// Stride that was supplied
        stride: usize,
        /// Minimum valid stride
        min: usize,
    },
}
