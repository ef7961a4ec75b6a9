//! I/O traits for image writers.
//!
//! [`ImageOutput`] is the object-safe interface every format writer
//! implements; the [`registry`](crate::registry) hands them out as
//! `Box<dyn ImageOutput>`.

use crate::{IoError, IoResult};
use rla_core::{DataFormat, ImageSpec};
use std::path::Path;

/// How [`ImageOutput::open`] should treat the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Create a new file holding a single image.
    #[default]
    Create,
    /// Append another subimage to an open file.
    AppendSubimage,
    /// Append another MIP level to the current subimage.
    AppendMipLevel,
}

impl std::fmt::Display for OpenMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::AppendSubimage => write!(f, "append subimage"),
            Self::AppendMipLevel => write!(f, "append MIP level"),
        }
    }
}

impl OpenMode {
    /// Capability a writer needs to accept this mode, if any.
    pub fn required_capability(self) -> Option<FormatCapability> {
        match self {
            Self::Create => None,
            Self::AppendSubimage => Some(FormatCapability::MultiImage),
            Self::AppendMipLevel => Some(FormatCapability::MipMap),
        }
    }
}

/// Optional writer capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatCapability {
    /// Multiple subimages in one file.
    MultiImage,
    /// MIP-mapped levels.
    MipMap,
}

/// Trait for scanline-oriented image writers.
///
/// Lifecycle: [`open`](Self::open) writes the file header, then each row is
/// handed to [`write_scanline`](Self::write_scanline), then
/// [`close`](Self::close) finalizes and releases the file.
///
/// # Example
///
/// ```rust,ignore
/// use rla_io::{ImageOutput, OpenMode};
/// use rla_io::rla::RlaOutput;
/// use rla_core::{DataFormat, ImageSpec};
///
/// let spec = ImageSpec::rgb(64, 64);
/// let mut out = RlaOutput::new();
/// out.open("frame.rla".as_ref(), &spec, OpenMode::Create)?;
/// for y in 0..64 {
///     out.write_scanline(y, 0, Some(DataFormat::U8), &row(y), None)?;
/// }
/// out.close()?;
/// ```
pub trait ImageOutput {
    /// Short format name (e.g., "rla").
    fn format_name(&self) -> &'static str;

    /// Whether an optional capability is supported.
    fn supports(&self, _capability: FormatCapability) -> bool {
        false
    }

    /// Creates `path` and writes everything that precedes pixel data.
    ///
    /// An already-open file is closed first.
    fn open(&mut self, path: &Path, spec: &ImageSpec, mode: OpenMode) -> IoResult<()>;

    /// Encodes and writes one row.
    ///
    /// - `y` - absolute row inside the data window
    /// - `z` - layer, 0 for 2D images
    /// - `format` - format of every sample in `data`; `None` means `data`
    ///   already uses the image's native per-channel formats
    /// - `xstride` - bytes between pixels; `None` means contiguous
    fn write_scanline(
        &mut self,
        y: i32,
        z: i32,
        format: Option<DataFormat>,
        data: &[u8],
        xstride: Option<usize>,
    ) -> IoResult<()>;

    /// Finalizes and releases the file. Closing when nothing is open is a
    /// no-op returning `Ok(())`.
    fn close(&mut self) -> IoResult<()>;

    /// Spec of the currently open image.
    fn spec(&self) -> Option<&ImageSpec>;

    /// Writes a whole contiguous image, top row first.
    fn write_image(&mut self, format: Option<DataFormat>, data: &[u8]) -> IoResult<()> {
        let spec = self.spec().ok_or(IoError::NotOpen)?;
        let first = spec.data_window.y;
        let rows = spec.height() as usize;
        let row_bytes = spec.width() as usize * spec.auto_stride(None, format);

        let needed = row_bytes * rows;
        if data.len() < needed {
            return Err(rla_core::Error::BufferTooSmall {
                expected: needed,
                actual: data.len(),
            }
            .into());
        }

        for (i, row) in data.chunks_exact(row_bytes.max(1)).take(rows).enumerate() {
            self.write_scanline(first + i as i32, 0, format, row, None)?;
        }
        Ok(())
    }
}
