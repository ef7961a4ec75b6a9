//! # rla-core
//!
//! Core types shared by the RLA writer crates.
//!
//! - [`ImageSpec`] / [`AttrValue`] - image description and attribute bag
//! - [`DataFormat`] - per-channel sample formats
//! - [`Rect`] - display and data windows
//! - [`convert`] - scanline sample conversion
//!
//! ## Crate Structure
//!
//! ```text
//! rla-core (this crate)
//!    ^
//!    |
//!    +-- rla-io (ImageOutput trait, registry, RLA encoder)
//!          ^
//!          +-- rla-cli (`rla` binary)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod error;
pub mod format;
pub mod rect;
pub mod spec;

// Re-exports for convenience
pub use error::*;
pub use format::*;
pub use rect::*;
pub use spec::*;

/// Prelude module for convenient imports.
///
/// ```
/// use rla_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::convert::convert_scanline;
    pub use crate::error::{Error, Result};
    pub use crate::format::DataFormat;
    pub use crate::rect::Rect;
    pub use crate::spec::{AttrValue, ImageSpec};
}
