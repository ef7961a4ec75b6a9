//! Image specification and metadata.
//!
//! [`ImageSpec`] describes everything a writer needs before pixel data
//! arrives: windows, depth, channel layout and sample formats, plus a
//! string-keyed attribute bag.
//!
//! # Display vs Data Window
//!
//! The display window is the full logical frame; the data window is where
//! pixels actually exist. Either may have a non-zero (even negative) origin.
//!
//! ```text
//! ┌─────────────────────────────┐
//! │        Display Window       │
//! │   ┌───────────────────┐     │
//! │   │    Data Window    │     │
//! │   │   (actual pixels) │     │
//! │   └───────────────────┘     │
//! └─────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust
//! use rla_core::{DataFormat, ImageSpec, Rect};
//!
//! let mut spec = ImageSpec::new(1920, 1080, 4, DataFormat::F16);
//! spec.display_window = Rect::new(0, 0, 2048, 1080);
//! spec.set_attr("ImageDescription", "plate");
//! spec.set_attr("rla:WhitePoint", [0.3127_f64, 0.3290]);
//!
//! assert_eq!(spec.width(), 1920);
//! assert_eq!(spec.get_float_array("rla:WhitePoint").map(|v| v.len()), Some(2));
//! ```

use crate::format::DataFormat;
use crate::{Error, Rect, Result};
use std::collections::HashMap;

/// Attribute value that can be stored in image metadata.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// String value
    String(String),
    /// Float array (also used for 2- and 3-component vectors)
    FloatArray(Vec<f64>),
}

impl AttrValue {
    /// Returns this value as an integer, if applicable.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Float(v) => Some(*v as i64),
            _ => None,
        }
    }

    /// Returns this value as a float, if applicable.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns this value as a string, if applicable.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns this value as a float slice, if it is a float array.
    pub fn as_float_array(&self) -> Option<&[f64]> {
        match self {
            Self::FloatArray(v) => Some(v),
            _ => None,
        }
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> Self {
        Self::Int(v as i64)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f32> for AttrValue {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Vec<f64>> for AttrValue {
    fn from(v: Vec<f64>) -> Self {
        Self::FloatArray(v)
    }
}

impl<const N: usize> From<[f64; N]> for AttrValue {
    fn from(v: [f64; N]) -> Self {
        Self::FloatArray(v.to_vec())
    }
}

impl<const N: usize> From<[f32; N]> for AttrValue {
    fn from(v: [f32; N]) -> Self {
        Self::FloatArray(v.iter().map(|&x| x as f64).collect())
    }
}

/// Image specification describing geometry, channel layout and metadata.
///
/// Modeled after OpenImageIO's `ImageSpec`:
/// - the data window carries the pixel-data origin and size
/// - the display window carries the full-resolution origin and size
/// - `channel_formats` optionally overrides `format` per channel
///
/// # Example
///
/// ```rust
/// use rla_core::{DataFormat, ImageSpec};
///
/// let mut spec = ImageSpec::rgba(64, 32);
/// spec.channel_formats = vec![DataFormat::F16, DataFormat::F16, DataFormat::F16, DataFormat::U8];
///
/// assert_eq!(spec.pixel_bytes(), 7);
/// assert_eq!(spec.scanline_bytes(), 64 * 7);
/// ```
#[derive(Debug, Clone)]
pub struct ImageSpec {
    /// Data window - region containing actual pixel data
    pub data_window: Rect,
    /// Display window - full-resolution frame
    pub display_window: Rect,
    /// Image depth (1 for 2D images, >1 for volumes)
    pub depth: u32,
    /// Number of channels per pixel
    pub channels: u16,
    /// Uniform data type for all channels
    pub format: DataFormat,
    /// Optional per-channel data types; empty means `format` for all channels
    pub channel_formats: Vec<DataFormat>,
    /// Optional channel names (e.g., ["R", "G", "B", "A"])
    pub channel_names: Vec<String>,
    /// Arbitrary metadata attributes
    pub attributes: HashMap<String, AttrValue>,
}

impl ImageSpec {
    /// Creates a new specification; data and display windows both cover
    /// `width x height` at the origin.
    pub fn new(width: u32, height: u32, channels: u16, format: DataFormat) -> Self {
        let window = Rect::from_size(width, height);
        Self {
            data_window: window,
            display_window: window,
            depth: 1,
            channels,
            format,
            channel_formats: Vec::new(),
            channel_names: Vec::new(),
            attributes: HashMap::new(),
        }
    }

    /// Creates a spec for an 8-bit RGB image.
    #[inline]
    pub fn rgb(width: u32, height: u32) -> Self {
        let mut spec = Self::new(width, height, 3, DataFormat::U8);
        spec.channel_names = vec!["R".into(), "G".into(), "B".into()];
        spec
    }

    /// Creates a spec for an 8-bit RGBA image.
    #[inline]
    pub fn rgba(width: u32, height: u32) -> Self {
        let mut spec = Self::new(width, height, 4, DataFormat::U8);
        spec.channel_names = vec!["R".into(), "G".into(), "B".into(), "A".into()];
        spec
    }

    /// Creates a spec for an 8-bit single-channel image.
    #[inline]
    pub fn gray(width: u32, height: u32) -> Self {
        let mut spec = Self::new(width, height, 1, DataFormat::U8);
        spec.channel_names = vec!["Y".into()];
        spec
    }

    /// Data window width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.data_window.width
    }

    /// Data window height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.data_window.height
    }

    /// Returns the format of channel `index`.
    ///
    /// Falls back to the uniform `format` when no per-channel list is set.
    pub fn channel_format(&self, index: usize) -> DataFormat {
        self.channel_formats.get(index).copied().unwrap_or(self.format)
    }

    /// Native formats of every channel, in order.
    pub fn native_formats(&self) -> Vec<DataFormat> {
        (0..self.channels as usize).map(|c| self.channel_format(c)).collect()
    }

    /// Bytes of one pixel in native per-channel formats.
    pub fn pixel_bytes(&self) -> usize {
        (0..self.channels as usize)
            .map(|c| self.channel_format(c).bytes_per_channel())
            .sum()
    }

    /// Bytes of one scanline in native per-channel formats.
    #[inline]
    pub fn scanline_bytes(&self) -> usize {
        self.width() as usize * self.pixel_bytes()
    }

    /// Resolves an optional pixel stride.
    ///
    /// `None` means contiguous pixels of `format` (or native formats when
    /// `format` is `None`).
    pub fn auto_stride(&self, xstride: Option<usize>, format: Option<DataFormat>) -> usize {
        xstride.unwrap_or_else(|| match format {
            Some(f) => self.channels as usize * f.bytes_per_channel(),
            None => self.pixel_bytes(),
        })
    }

    /// Sets an attribute value.
    ///
    /// ```rust
    /// use rla_core::ImageSpec;
    ///
    /// let mut spec = ImageSpec::rgb(16, 16);
    /// spec.set_attr("rla:FrameNumber", 12);
    /// spec.set_attr("oiio:Gamma", 2.2);
    /// assert_eq!(spec.get_int("rla:FrameNumber"), Some(12));
    /// ```
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Gets an attribute value by key.
    pub fn get_attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    /// Gets an attribute as a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get_attr(key).and_then(|v| v.as_str())
    }

    /// Gets an attribute as an integer.
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get_attr(key).and_then(|v| v.as_int())
    }

    /// Gets an attribute as a float.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get_attr(key).and_then(|v| v.as_float())
    }

    /// Gets an attribute as a float array.
    pub fn get_float_array(&self, key: &str) -> Option<&[f64]> {
        self.get_attr(key).and_then(|v| v.as_float_array())
    }

    /// Returns `true` if data and display windows differ.
    #[inline]
    pub fn has_overscan(&self) -> bool {
        self.data_window != self.display_window
    }

    /// Returns `true` if this is a volumetric image.
    #[inline]
    pub fn is_3d(&self) -> bool {
        self.depth > 1
    }

    /// Checks that `channel_formats` is empty or has one entry per channel.
    pub fn check_channel_formats(&self) -> Result<()> {
        if self.channel_formats.is_empty() || self.channel_formats.len() == self.channels as usize {
            Ok(())
        } else {
            Err(Error::ChannelMismatch {
                expected: self.channels as usize,
                actual: self.channel_formats.len(),
            })
        }
    }
}

impl Default for ImageSpec {
    fn default() -> Self {
        Self::rgba(0, 0)
    }
}

impl std::fmt::Display for ImageSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{}x{} {} {}ch",
            self.width(),
            self.height(),
            self.depth,
            self.format,
            self.channels
        )
    }
}
