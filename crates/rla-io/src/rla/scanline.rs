//! Per-row pixel encoding.
//!
//! A row goes through two owned, reused buffers:
//!
//! 1. `scratch` - the row converted to the image's native per-channel
//!    formats, interleaved, host byte order. Always a private copy, even
//!    when the caller's data needed no conversion.
//! 2. `record` - the on-disk row: for each channel, a big-endian `u16`
//!    byte count followed by that channel's samples in big-endian order.
//!
//! ```text
//! scratch: R G B A R G B A ...
//! record:  [len][R R R ...][len][G G G ...][len][B B B ...][len][A A A ...]
//! ```

use crate::{IoError, IoResult};
use byteorder::{BigEndian, WriteBytesExt};
use rla_core::convert::convert_scanline;
use rla_core::{DataFormat, ImageSpec};
use std::borrow::Cow;

/// Converts caller rows into RLA scanline records.
#[derive(Debug, Clone, Default)]
pub struct ScanlineEncoder {
    formats: Vec<DataFormat>,
    width: usize,
    scratch: Vec<u8>,
    record: Vec<u8>,
}

impl ScanlineEncoder {
    /// Creates an encoder for rows of `spec`. Buffers are allocated on the
    /// first row.
    pub fn new(spec: &ImageSpec) -> Self {
        Self {
            formats: spec.native_formats(),
            width: spec.width() as usize,
            scratch: Vec::new(),
            record: Vec::new(),
        }
    }

    /// Converts one caller row into the scratch buffer.
    ///
    /// `format` of `None` means `data` is already in native formats;
    /// `xstride` is the byte distance between pixels.
    pub fn stage(&mut self, format: Option<DataFormat>, data: &[u8], xstride: usize) -> IoResult<&[u8]> {
        match convert_scanline(data, format, xstride, self.width, &self.formats)? {
            Cow::Borrowed(row) => {
                self.scratch.clear();
                self.scratch.extend_from_slice(row);
            }
            Cow::Owned(row) => self.scratch = row,
        }
        Ok(&self.scratch)
    }

    /// Builds the on-disk record from the staged row.
    pub fn encode(&mut self) -> IoResult<&[u8]> {
        let pixel_bytes: usize = self.formats.iter().map(DataFormat::bytes_per_channel).sum();
        if self.scratch.len() != self.width * pixel_bytes {
            return Err(IoError::EncodeError(format!(
                "staged row has {} bytes, expected {}",
                self.scratch.len(),
                self.width * pixel_bytes
            )));
        }

        self.record.clear();
        let mut channel_offset = 0;
        for (channel, format) in self.formats.iter().enumerate() {
            let size = format.bytes_per_channel();
            let len = u16::try_from(self.width * size).map_err(|_| {
                IoError::EncodeError(format!(
                    "channel {channel} needs {} bytes, more than an RLA record holds",
                    self.width * size
                ))
            })?;
            self.record.write_u16::<BigEndian>(len)?;

            for x in 0..self.width {
                let start = x * pixel_bytes + channel_offset;
                let sample = &self.scratch[start..start + size];
                match size {
                    1 => self.record.push(sample[0]),
                    2 => self
                        .record
                        .write_u16::<BigEndian>(u16::from_ne_bytes([sample[0], sample[1]]))?,
                    _ => self.record.write_u32::<BigEndian>(u32::from_ne_bytes([
                        sample[0], sample[1], sample[2], sample[3],
                    ]))?,
                }
            }
            channel_offset += size;
        }
        Ok(&self.record)
    }

    /// The most recently staged row.
    pub fn scratch(&self) -> &[u8] {
        &self.scratch
    }

    /// Forgets the staged row, keeping capacity.
    pub fn clear(&mut self) {
        self.scratch.clear();
        self.record.clear();
    }
}
