//! RLA header record and its derivation from an [`ImageSpec`].
//!
//! [`HeaderRecord::from_spec`] fills every field of the Wavefront header
//! from image geometry, the channel classification and the image's
//! attributes. Values are in host byte order until
//! [`HeaderRecord::normalize`] turns the record into a [`DiskHeader`](super::endian::DiskHeader).
//!
//! # Coordinates
//!
//! RLA windows have a bottom-up origin, so the vertical extent is flipped:
//!
//! ```text
//! left   = x                 bottom = -y
//! right  = x + width - 1     top    = height - y - 1
//! ```

use super::channels::ChannelLayout;
use super::text::Text;
use crate::{IoError, IoResult};
use chrono::NaiveDateTime;
use rla_core::{ImageSpec, Rect};
use tracing::warn;

/// Header revision written by this encoder.
pub const REVISION: u16 = 0xFFFE;

/// Default red primary (NTSC).
pub const DEFAULT_RED_CHROMA: &str = "0.67 0.08";
/// Default green primary (NTSC).
pub const DEFAULT_GREEN_CHROMA: &str = "0.21 0.71";
/// Default blue primary (NTSC).
pub const DEFAULT_BLUE_CHROMA: &str = "0.14 0.33";
/// Default white point (NTSC).
pub const DEFAULT_WHITE_POINT: &str = "0.31 0.316";
/// Default color channel order.
pub const DEFAULT_COLOR_CHANNEL: &str = "rgb";

/// Attribute keys read from [`ImageSpec::attributes`].
pub mod attr {
    /// Frame number (int).
    pub const FRAME_NUMBER: &str = "rla:FrameNumber";
    /// Rendering job number (int).
    pub const JOB_NUMBER: &str = "rla:JobNumber";
    /// Red primary, 2 or 3 floats.
    pub const RED_CHROMA: &str = "rla:RedChroma";
    /// Green primary, 2 or 3 floats.
    pub const GREEN_CHROMA: &str = "rla:GreenChroma";
    /// Blue primary, 2 or 3 floats.
    pub const BLUE_CHROMA: &str = "rla:BlueChroma";
    /// White point, 2 or 3 floats.
    pub const WHITE_POINT: &str = "rla:WhitePoint";
    /// Machine that produced the image.
    pub const MACHINE_NAME: &str = "rla:MachineName";
    /// User that produced the image.
    pub const USER_NAME: &str = "rla:UserName";
    /// Descriptive aspect name.
    pub const ASPECT: &str = "rla:Aspect";
    /// Color channel order (e.g. "rgb").
    pub const COLOR_CHANNEL: &str = "rla:ColorChannel";
    /// Field-rendered flag (int).
    pub const FIELD_RENDERED: &str = "rla:FieldRendered";
    /// Render time text.
    pub const TIME: &str = "rla:Time";
    /// Filter name.
    pub const FILTER: &str = "rla:Filter";
    /// Auxiliary data descriptor.
    pub const AUX_DATA: &str = "rla:AuxData";
    /// Color space name; "Linear" and "GammaCorrected" are recognized.
    pub const COLOR_SPACE: &str = "oiio:ColorSpace";
    /// Gamma used with "GammaCorrected" (float).
    pub const GAMMA: &str = "oiio:Gamma";
    /// Free-text description.
    pub const DESCRIPTION: &str = "ImageDescription";
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Wavefront RLA header, field for field, in canonical order.
///
/// The `Reserved` block has no field here; it is always written as zeros.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub struct HeaderRecord {
    pub window_left: i16,
    pub window_right: i16,
    pub window_bottom: i16,
    pub window_top: i16,
    pub active_left: i16,
    pub active_right: i16,
    pub active_bottom: i16,
    pub active_top: i16,
    pub frame_number: i16,
    pub color_channel_type: i16,
    pub num_of_color_channels: i16,
    pub num_of_matte_channels: i16,
    pub num_of_aux_channels: i16,
    pub revision: u16,
    pub gamma: Text<16>,
    pub red_chroma: Text<24>,
    pub green_chroma: Text<24>,
    pub blue_chroma: Text<24>,
    pub white_point: Text<24>,
    pub job_number: i16,
    pub file_name: Text<128>,
    pub description: Text<128>,
    pub program_name: Text<64>,
    pub machine_name: Text<32>,
    pub user_name: Text<32>,
    pub date_created: Text<20>,
    pub aspect: Text<24>,
    pub aspect_ratio: Text<24>,
    pub color_channel: Text<32>,
    pub field_rendered: i16,
    pub time: Text<24>,
    pub filter: Text<32>,
    pub num_of_channel_bits: i16,
    pub matte_channel_type: i16,
    pub num_of_matte_bits: i16,
    pub aux_channel_type: i16,
    pub num_of_aux_bits: i16,
    pub aux_data: Text<32>,
    pub next_offset: i32,
}

impl HeaderRecord {
    /// Builds the header for `spec`.
    ///
    /// `file_name` and `program_name` go to the provenance fields verbatim,
    /// `created` is formatted into `DateCreated`. Fails if a window edge
    /// does not fit a signed 16-bit field.
    pub fn from_spec(
        spec: &ImageSpec,
        layout: &ChannelLayout,
        file_name: &str,
        program_name: &str,
        created: &NaiveDateTime,
    ) -> IoResult<Self> {
        let [window_left, window_right, window_bottom, window_top] =
            window_edges("display window", &spec.display_window)?;
        let [active_left, active_right, active_bottom, active_top] =
            window_edges("data window", &spec.data_window)?;

        let mut header = Self {
            window_left,
            window_right,
            window_bottom,
            window_top,
            active_left,
            active_right,
            active_bottom,
            active_top,
            frame_number: int_attr(spec, attr::FRAME_NUMBER, 0),
            color_channel_type: layout.color.channel_type(),
            num_of_color_channels: layout.color.count as i16,
            num_of_matte_channels: layout.matte.count as i16,
            num_of_aux_channels: layout.aux.count as i16,
            revision: REVISION,
            gamma: gamma_text(spec),
            red_chroma: chromaticity(spec, attr::RED_CHROMA, DEFAULT_RED_CHROMA),
            green_chroma: chromaticity(spec, attr::GREEN_CHROMA, DEFAULT_GREEN_CHROMA),
            blue_chroma: chromaticity(spec, attr::BLUE_CHROMA, DEFAULT_BLUE_CHROMA),
            white_point: chromaticity(spec, attr::WHITE_POINT, DEFAULT_WHITE_POINT),
            job_number: int_attr(spec, attr::JOB_NUMBER, 0),
            file_name: Text::new(file_name),
            program_name: Text::new(program_name),
            date_created: Text::new(&format_date_created(created)),
            aspect_ratio: Text::new(&format!(
                "{:.10}",
                spec.width() as f64 / spec.height() as f64
            )),
            color_channel: Text::new(
                spec.get_string(attr::COLOR_CHANNEL)
                    .unwrap_or(DEFAULT_COLOR_CHANNEL),
            ),
            field_rendered: int_attr(spec, attr::FIELD_RENDERED, 0),
            num_of_channel_bits: layout.color.bits(),
            matte_channel_type: layout.matte.channel_type(),
            num_of_matte_bits: layout.matte.bits(),
            aux_channel_type: layout.aux.channel_type(),
            num_of_aux_bits: layout.aux.bits(),
            next_offset: 0,
            ..Self::default()
        };

        copy_attr(spec, attr::DESCRIPTION, &mut header.description);
        copy_attr(spec, attr::MACHINE_NAME, &mut header.machine_name);
        copy_attr(spec, attr::USER_NAME, &mut header.user_name);
        copy_attr(spec, attr::ASPECT, &mut header.aspect);
        copy_attr(spec, attr::TIME, &mut header.time);
        copy_attr(spec, attr::FILTER, &mut header.filter);
        copy_attr(spec, attr::AUX_DATA, &mut header.aux_data);

        Ok(header)
    }
}

/// `[left, right, bottom, top]` of a window in RLA's bottom-up convention.
pub fn window_edges(name: &str, rect: &Rect) -> IoResult<[i16; 4]> {
    let x = rect.x as i64;
    let y = rect.y as i64;
    let edges = [
        x,
        rect.max_x(),
        -y,
        rect.height as i64 - y - 1,
    ];

    let mut out = [0i16; 4];
    for (dst, value) in out.iter_mut().zip(edges) {
        *dst = i16::try_from(value).map_err(|_| {
            IoError::GeometryOverflow(format!(
                "{name} {rect} has edge {value} outside the 16-bit range"
            ))
        })?;
    }
    Ok(out)
}

/// Formats `DateCreated`: `"%m  %d %H:%M %Y"` with the month number
/// replaced by its abbreviation, e.g. `"OCT 17 14:03 2026"`.
pub fn format_date_created(when: &NaiveDateTime) -> String {
    let mut text = when.format("%m  %d %H:%M %Y").to_string();
    let month = text.get(..2).and_then(|m| m.parse::<u32>().ok());
    if let Some(abbr) = month.and_then(month_abbreviation) {
        text.replace_range(..3, abbr);
    }
    text
}

/// Three-letter upper-case abbreviation of `month` (1-12).
pub fn month_abbreviation(month: u32) -> Option<&'static str> {
    let index = month.checked_sub(1)? as usize;
    MONTH_ABBREVIATIONS.get(index).copied()
}

/// Gamma text: "1.0" for linear data, the gamma attribute for gamma
/// corrected data, empty otherwise.
fn gamma_text(spec: &ImageSpec) -> Text<16> {
    let colorspace = spec.get_string(attr::COLOR_SPACE).unwrap_or("Unknown");
    if colorspace.eq_ignore_ascii_case("Linear") {
        Text::new("1.0")
    } else if colorspace.eq_ignore_ascii_case("GammaCorrected") {
        let gamma = spec.get_float(attr::GAMMA).unwrap_or(1.0);
        Text::new(&format!("{gamma:.10}"))
    } else {
        Text::empty()
    }
}

/// Chromaticity text from a 2- or 3-component float attribute, or `default`.
fn chromaticity(spec: &ImageSpec, key: &str, default: &str) -> Text<24> {
    match spec.get_float_array(key) {
        Some(values) if matches!(values.len(), 2 | 3) => {
            let parts: Vec<String> = values.iter().map(|v| format!("{v:.4}")).collect();
            Text::new(&parts.join(" "))
        }
        _ => Text::new(default),
    }
}

fn copy_attr<const N: usize>(spec: &ImageSpec, key: &str, field: &mut Text<N>) {
    if let Some(s) = spec.get_string(key).filter(|s| !s.is_empty()) {
        field.set(s);
    }
}

/// Integer attribute saturated to the 16-bit header field.
fn int_attr(spec: &ImageSpec, key: &str, default: i16) -> i16 {
    let Some(value) = spec.get_int(key) else {
        return default;
    };
    let clamped = value.clamp(i16::MIN as i64, i16::MAX as i64) as i16;
    if clamped as i64 != value {
        warn!(key, value, clamped, "attribute does not fit a 16-bit RLA field");
    }
    clamped
}
