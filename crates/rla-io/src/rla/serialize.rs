//! Field-by-field header emission.
//!
//! The header is never dumped as one block of memory: [`write_header`]
//! emits each field at its declared on-disk width in canonical order, so
//! in-memory layout and padding of [`HeaderRecord`](super::header::HeaderRecord)
//! never leak into the file.
//!
//! # Layout
//!
//! | Offset | Field | Width |
//! |--------|-------|-------|
//! | 0 | Window L/R/B/T, Active L/R/B/T | 8 x 2 |
//! | 16 | FrameNumber, ColorChannelType, Num{Color,Matte,Aux}Channels, Revision | 6 x 2 |
//! | 28 | Gamma | 16 |
//! | 44 | Red/Green/BlueChroma, WhitePoint | 4 x 24 |
//! | 140 | JobNumber | 2 |
//! | 142 | FileName, Description | 2 x 128 |
//! | 398 | ProgramName | 64 |
//! | 462 | MachineName, UserName | 2 x 32 |
//! | 526 | DateCreated | 20 |
//! | 546 | Aspect, AspectRatio | 2 x 24 |
//! | 594 | ColorChannel | 32 |
//! | 626 | FieldRendered | 2 |
//! | 628 | Time | 24 |
//! | 652 | Filter | 32 |
//! | 684 | NumOfChannelBits, MatteChannelType, NumOfMatteBits, AuxChannelType, NumOfAuxBits | 5 x 2 |
//! | 694 | AuxData | 32 |
//! | 726 | Reserved | 10 |
//! | 736 | NextOffset | 4 |

use super::endian::DiskHeader;
use crate::IoResult;
use byteorder::{BigEndian, NativeEndian, WriteBytesExt};
use std::io::Write;

/// Size of the serialized header in bytes.
pub const HEADER_SIZE: usize = 740;

/// Zero padding between `AuxData` and `NextOffset`.
pub const RESERVED_LEN: usize = 10;

/// Size of one scanline offset table entry.
pub const OFFSET_ENTRY_SIZE: usize = 4;

/// Writes all header fields in canonical order.
///
/// Numeric fields of a [`DiskHeader`] are already in on-disk order and are
/// emitted as their native bytes.
pub fn write_header<W: Write>(w: &mut W, header: &DiskHeader) -> IoResult<()> {
    let h = header.fields();

    w.write_i16::<NativeEndian>(h.window_left)?;
    w.write_i16::<NativeEndian>(h.window_right)?;
    w.write_i16::<NativeEndian>(h.window_bottom)?;
    w.write_i16::<NativeEndian>(h.window_top)?;
    w.write_i16::<NativeEndian>(h.active_left)?;
    w.write_i16::<NativeEndian>(h.active_right)?;
    w.write_i16::<NativeEndian>(h.active_bottom)?;
    w.write_i16::<NativeEndian>(h.active_top)?;
    w.write_i16::<NativeEndian>(h.frame_number)?;
    w.write_i16::<NativeEndian>(h.color_channel_type)?;
    w.write_i16::<NativeEndian>(h.num_of_color_channels)?;
    w.write_i16::<NativeEndian>(h.num_of_matte_channels)?;
    w.write_i16::<NativeEndian>(h.num_of_aux_channels)?;
    w.write_u16::<NativeEndian>(h.revision)?;
    w.write_all(h.gamma.as_bytes())?;
    w.write_all(h.red_chroma.as_bytes())?;
    w.write_all(h.green_chroma.as_bytes())?;
    w.write_all(h.blue_chroma.as_bytes())?;
    w.write_all(h.white_point.as_bytes())?;
    w.write_i16::<NativeEndian>(h.job_number)?;
    w.write_all(h.file_name.as_bytes())?;
    w.write_all(h.description.as_bytes())?;
    w.write_all(h.program_name.as_bytes())?;
    w.write_all(h.machine_name.as_bytes())?;
    w.write_all(h.user_name.as_bytes())?;
    w.write_all(h.date_created.as_bytes())?;
    w.write_all(h.aspect.as_bytes())?;
    w.write_all(h.aspect_ratio.as_bytes())?;
    w.write_all(h.color_channel.as_bytes())?;
    w.write_i16::<NativeEndian>(h.field_rendered)?;
    w.write_all(h.time.as_bytes())?;
    w.write_all(h.filter.as_bytes())?;
    w.write_i16::<NativeEndian>(h.num_of_channel_bits)?;
    w.write_i16::<NativeEndian>(h.matte_channel_type)?;
    w.write_i16::<NativeEndian>(h.num_of_matte_bits)?;
    w.write_i16::<NativeEndian>(h.aux_channel_type)?;
    w.write_i16::<NativeEndian>(h.num_of_aux_bits)?;
    w.write_all(h.aux_data.as_bytes())?;
    w.write_all(&[0u8; RESERVED_LEN])?;
    w.write_i32::<NativeEndian>(h.next_offset)?;
    Ok(())
}

/// Writes the scanline offset table, one big-endian `u32` per row.
///
/// At open time every entry is a zero placeholder; the real offsets are
/// written over it when the file is closed.
pub fn write_offset_table<W: Write>(w: &mut W, offsets: &[u32]) -> IoResult<()> {
    for &offset in offsets {
        w.write_u32::<BigEndian>(offset)?;
    }
    Ok(())
}
