//! Scanline sample conversion.
//!
//! Adapts one row of caller-supplied samples (any [`DataFormat`], any pixel
//! stride, host byte order) to a target per-channel layout.
//!
//! Integer formats are treated as normalized: `0..=MAX` maps to `0.0..=1.0`.
//! Float-to-integer conversion clamps to `[0, 1]` and rounds.
//!
//! # Example
//!
//! ```rust
//! use rla_core::DataFormat;
//! use rla_core::convert::convert_scanline;
//! use std::borrow::Cow;
//!
//! // Two RGB pixels already in the native layout: nothing to do.
//! let row = [1u8, 2, 3, 4, 5, 6];
//! let native = [DataFormat::U8; 3];
//! let out = convert_scanline(&row, Some(DataFormat::U8), 3, 2, &native)?;
//! assert!(matches!(out, Cow::Borrowed(_)));
//!
//! // Float input is converted.
//! let floats: Vec<u8> = [1.0f32, 0.0, 0.5].iter().flat_map(|v| v.to_ne_bytes()).collect();
//! let out = convert_scanline(&floats, Some(DataFormat::F32), 12, 1, &native)?;
//! assert_eq!(&out[..], &[255, 0, 128]);
//! # Ok::<(), rla_core::Error>(())
//! ```

use crate::{DataFormat, Error, Result};
use half::f16;
use std::borrow::Cow;

/// Converts one scanline into the `dst_formats` channel layout.
///
/// - `src_format` - format of every source sample; `None` means the source is
///   already in `dst_formats`.
/// - `xstride` - bytes between the starts of consecutive source pixels.
/// - `width` - number of pixels in the row.
///
/// Returns [`Cow::Borrowed`] when the source already matches the contiguous
/// native layout, so callers can detect the no-op case.
pub fn convert_scanline<'a>(
    src: &'a [u8],
    src_format: Option<DataFormat>,
    xstride: usize,
    width: usize,
    dst_formats: &[DataFormat],
) -> Result<Cow<'a, [u8]>> {
    let src_pixel: usize = match src_format {
        Some(f) => dst_formats.len() * f.bytes_per_channel(),
        None => dst_formats.iter().map(DataFormat::bytes_per_channel).sum(),
    };
    let dst_pixel: usize = dst_formats.iter().map(DataFormat::bytes_per_channel).sum();

    if xstride < src_pixel {
        return Err(Error::InvalidStride {
            stride: xstride,
            min: src_pixel,
        });
    }
    let needed = match width {
        0 => 0,
        w => (w - 1)
            .checked_mul(xstride)
            .and_then(|n| n.checked_add(src_pixel))
            .ok_or(Error::InvalidStride {
                stride: xstride,
                min: src_pixel,
            })?,
    };
    if src.len() < needed {
        return Err(Error::BufferTooSmall {
            expected: needed,
            actual: src.len(),
        });
    }

    let same_formats = src_format.is_none_or(|f| dst_formats.iter().all(|&d| d == f));
    if same_formats && xstride == dst_pixel {
        return Ok(Cow::Borrowed(&src[..width * dst_pixel]));
    }

    let mut out = Vec::with_capacity(width * dst_pixel);
    for x in 0..width {
        let mut offset = x * xstride;
        for &dst in dst_formats {
            let from = src_format.unwrap_or(dst);
            let size = from.bytes_per_channel();
            let sample = &src[offset..offset + size];
            if from == dst {
                out.extend_from_slice(sample);
            } else {
                write_sample(dst, read_sample(from, sample), &mut out);
            }
            offset += size;
        }
    }
    Ok(Cow::Owned(out))
}

/// Reads one host-order sample as a normalized `f64`.
pub fn read_sample(format: DataFormat, bytes: &[u8]) -> f64 {
    match format {
        DataFormat::U8 => bytes[0] as f64 / u8::MAX as f64,
        DataFormat::U16 => u16::from_ne_bytes([bytes[0], bytes[1]]) as f64 / u16::MAX as f64,
        DataFormat::U32 => {
            u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64 / u32::MAX as f64
        }
        DataFormat::F16 => f16::from_bits(u16::from_ne_bytes([bytes[0], bytes[1]])).to_f64(),
        DataFormat::F32 => f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]) as f64,
    }
}

/// Appends one normalized value as a host-order sample of `format`.
pub fn write_sample(format: DataFormat, value: f64, out: &mut Vec<u8>) {
    match format {
        DataFormat::U8 => out.push(quantize(value, u8::MAX as f64) as u8),
        DataFormat::U16 => {
            out.extend_from_slice(&(quantize(value, u16::MAX as f64) as u16).to_ne_bytes())
        }
        DataFormat::U32 => {
            out.extend_from_slice(&(quantize(value, u32::MAX as f64) as u32).to_ne_bytes())
        }
        DataFormat::F16 => out.extend_from_slice(&f16::from_f64(value).to_bits().to_ne_bytes()),
        DataFormat::F32 => out.extend_from_slice(&(value as f32).to_ne_bytes()),
    }
}

#[inline]
fn quantize(value: f64, max: f64) -> f64 {
    (value.clamp(0.0, 1.0) * max).round()
}
