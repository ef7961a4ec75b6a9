//! Big-endian normalization of header fields.
//!
//! RLA headers are big-endian on every platform. Once a [`HeaderRecord`] is
//! final, [`HeaderRecord::normalize`] byte-swaps every numeric field on
//! little-endian hosts and wraps the result in a [`DiskHeader`], which is
//! what the serializer accepts. Text fields are never touched.

use super::header::HeaderRecord;

/// In-place byte order reversal.
pub trait SwapEndian: Copy {
    /// Reverses the byte order of `self`.
    fn swap_endian(&mut self);
}

macro_rules! impl_swap_endian {
    ($($t:ty),*) => {
        $(
            impl SwapEndian for $t {
                #[inline]
                fn swap_endian(&mut self) {
                    *self = self.swap_bytes();
                }
            }
        )*
    };
}

impl_swap_endian!(i16, u16, i32, u32);

/// A header whose numeric fields are already in on-disk byte order.
///
/// Only obtainable through [`HeaderRecord::normalize`], and immutable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskHeader(HeaderRecord);

impl DiskHeader {
    /// Fields in on-disk order; emit their native bytes as-is.
    pub fn fields(&self) -> &HeaderRecord {
        &self.0
    }
}

impl HeaderRecord {
    /// Converts to on-disk byte order.
    pub fn normalize(mut self) -> DiskHeader {
        if cfg!(target_endian = "little") {
            self.swap_numeric_fields();
        }
        DiskHeader(self)
    }

    /// Byte-swaps every numeric field, unconditionally.
    ///
    /// Applying it twice restores the original record.
    pub fn swap_numeric_fields(&mut self) {
        self.window_left.swap_endian();
        self.window_right.swap_endian();
        self.window_bottom.swap_endian();
        self.window_top.swap_endian();
        self.active_left.swap_endian();
        self.active_right.swap_endian();
        self.active_bottom.swap_endian();
        self.active_top.swap_endian();
        self.frame_number.swap_endian();
        self.color_channel_type.swap_endian();
        self.num_of_color_channels.swap_endian();
        self.num_of_matte_channels.swap_endian();
        self.num_of_aux_channels.swap_endian();
        self.revision.swap_endian();
        self.job_number.swap_endian();
        self.field_rendered.swap_endian();
        self.num_of_channel_bits.swap_endian();
        self.matte_channel_type.swap_endian();
        self.num_of_matte_bits.swap_endian();
        self.aux_channel_type.swap_endian();
        self.num_of_aux_bits.swap_endian();
        self.next_offset.swap_endian();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rla::text::Text;

    #[test]
    fn test_swap_roundtrip() {
        for v in [0i16, 1, -1, 0x1234, i16::MIN, i16::MAX] {
            let mut x = v;
            x.swap_endian();
            x.swap_endian();
            assert_eq!(x, v);
        }
        let mut x = 0x1234_5678i32;
        x.swap_endian();
        assert_eq!(x, 0x7856_3412);
        x.swap_endian();
        assert_eq!(x, 0x1234_5678);
    }

    #[test]
    fn test_record_roundtrip_keeps_text() {
        let original = HeaderRecord {
            window_right: 639,
            window_top: 479,
            frame_number: 12,
            revision: 0xFFFE,
            next_offset: 99,
            gamma: Text::new("2.2"),
            ..HeaderRecord::default()
        };
        let mut swapped = original.clone();
        swapped.swap_numeric_fields();
        assert_eq!(swapped.window_right, 639i16.swap_bytes());
        assert_eq!(swapped.gamma, original.gamma);

        swapped.swap_numeric_fields();
        assert_eq!(swapped, original);
    }

    #[test]
    fn test_normalize_gives_big_endian_bytes() {
        let header = HeaderRecord {
            window_right: 0x0102,
            revision: 0xFFFE,
            next_offset: 740,
            ..HeaderRecord::default()
        };
        let disk = header.normalize();
        assert_eq!(disk.fields().window_right.to_ne_bytes(), [0x01, 0x02]);
        assert_eq!(disk.fields().revision.to_ne_bytes(), [0xFF, 0xFE]);
        assert_eq!(disk.fields().next_offset.to_ne_bytes(), 740i32.to_be_bytes());
    }
}
