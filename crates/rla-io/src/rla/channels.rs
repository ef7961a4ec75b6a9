//! Color / matte / auxiliary channel classification.
//!
//! RLA headers describe channels as three fixed groups, each with a single
//! sample type and bit depth. [`classify`] maps an ordered channel list onto
//! those groups.
//!
//! # Explicit per-channel formats
//!
//! ```text
//! formats:  f32 f32 f32 | u8 | u16 u16 f32
//!           └─ color ─┘  matte └─ aux ───┘   (aux typed by its first channel)
//! ```
//!
//! Color takes the leading run sharing channel 0's format (at most 3), matte
//! the maximal run that follows, aux everything else. Formats that change
//! again inside aux are not split out; the header has no room for a fourth
//! group.
//!
//! # Uniform format
//!
//! 1-2 channels: luminosity (+ matte). 3+: RGB, then one matte, then aux.

use rla_core::DataFormat;

/// On-disk channel type for integer samples (any byte multiple).
pub const CT_BYTE: i16 = 0;
/// On-disk channel type for floating-point samples.
pub const CT_FLOAT: i16 = 4;

/// One of the three RLA channel groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelGroup {
    /// Number of channels in the group.
    pub count: u16,
    /// Governing sample format; `None` leaves type and bits at zero.
    pub format: Option<DataFormat>,
}

impl ChannelGroup {
    fn new(count: usize, format: Option<DataFormat>) -> Self {
        Self {
            count: count as u16,
            format,
        }
    }

    /// RLA channel type code.
    pub fn channel_type(&self) -> i16 {
        match self.format {
            Some(f) if f.is_float() => CT_FLOAT,
            _ => CT_BYTE,
        }
    }

    /// Bits per sample, 0 when the group has no format.
    pub fn bits(&self) -> i16 {
        self.format.map_or(0, |f| f.bits() as i16)
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelLayout {
    /// Color channels (RGB or luminosity).
    pub color: ChannelGroup,
    /// Matte (alpha) channels.
    pub matte: ChannelGroup,
    /// Auxiliary channels.
    pub aux: ChannelGroup,
}

impl ChannelLayout {
    /// Total number of classified channels.
    pub fn total(&self) -> usize {
        self.color.count as usize + self.matte.count as usize + self.aux.count as usize
    }
}

/// Groups `channels` into color, matte and aux.
///
/// `channel_formats` must be empty (uniform `format`) or hold exactly
/// `channels` entries.
pub fn classify(channels: usize, channel_formats: &[DataFormat], format: DataFormat) -> ChannelLayout {
    if channel_formats.is_empty() {
        classify_uniform(channels, format)
    } else {
        classify_explicit(channel_formats)
    }
}

fn classify_explicit(formats: &[DataFormat]) -> ChannelLayout {
    let mut layout = ChannelLayout::default();
    let Some(&first) = formats.first() else {
        return layout;
    };

    let color = run_length(formats, first).min(3);
    layout.color = ChannelGroup::new(color, Some(first));

    let rest = &formats[color..];
    if let Some(&matte_format) = rest.first() {
        let matte = run_length(rest, matte_format);
        layout.matte = ChannelGroup::new(matte, Some(matte_format));

        let aux = &rest[matte..];
        if let Some(&aux_format) = aux.first() {
            layout.aux = ChannelGroup::new(aux.len(), Some(aux_format));
        }
    }
    layout
}

fn classify_uniform(channels: usize, format: DataFormat) -> ChannelLayout {
    let mut remaining = channels;
    let color = if remaining >= 3 { 3 } else { 1 };
    remaining = remaining.saturating_sub(color);

    let matte = remaining.min(1);
    remaining -= matte;

    ChannelLayout {
        color: ChannelGroup::new(color, Some(format)),
        matte: ChannelGroup::new(matte, Some(format)),
        aux: ChannelGroup::new(remaining, Some(format)),
    }
}

/// Length of the leading run of `formats` equal to `format`.
fn run_length(formats: &[DataFormat], format: DataFormat) -> usize {
    formats.iter().take_while(|&&f| f == format).count()
}
