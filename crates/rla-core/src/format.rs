//! Per-channel sample formats.
//!
//! [`DataFormat`] is the runtime storage type of one channel sample, both for
//! caller-supplied pixel buffers and for the native on-disk encoding of an
//! image.
//!
//! # Usage
//!
//! ```rust
//! use rla_core::DataFormat;
//!
//! assert_eq!(DataFormat::F16.bytes_per_channel(), 2);
//! assert_eq!(DataFormat::F32.bits(), 32);
//! assert!(DataFormat::F16.is_float());
//! assert_eq!(DataFormat::from_name("half"), Some(DataFormat::F16));
//! ```

/// Runtime pixel data format.
///
/// Represents the storage type of a single channel sample. Only byte-aligned
/// types are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DataFormat {
    /// 8-bit unsigned integer.
    #[default]
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 16-bit half-precision float.
    F16,
    /// 32-bit single-precision float.
    F32,
}

impl DataFormat {
    /// Number of bytes per channel.
    #[inline]
    pub const fn bytes_per_channel(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::F16 => 2,
            Self::F32 => 4,
        }
    }

    /// Number of bits per channel.
    #[inline]
    pub const fn bits(&self) -> u32 {
        self.bytes_per_channel() as u32 * 8
    }

    /// Whether this is a floating-point format.
    #[inline]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::F16 | Self::F32)
    }

    /// Whether this is an integer format.
    #[inline]
    pub const fn is_integer(&self) -> bool {
        !self.is_float()
    }

    /// Short name for display.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::F16 => "f16",
            Self::F32 => "f32",
        }
    }

    /// Parses a format name.
    ///
    /// Accepts the short names returned by [`DataFormat::name`] plus the
    /// common aliases `uint8`, `uint16`, `uint32`, `half` and `float`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "u8" | "uint8" => Some(Self::U8),
            "u16" | "uint16" => Some(Self::U16),
            "u32" | "uint32" => Some(Self::U32),
            "f16" | "half" => Some(Self::F16),
            "f32" | "float" => Some(Self::F32),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
