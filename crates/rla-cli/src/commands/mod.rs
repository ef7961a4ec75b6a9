//! CLI command implementations

pub mod encode;
pub mod formats;

use anyhow::{Context, Result, bail};
use rla_core::{AttrValue, DataFormat, Rect};

/// Parses a sample format name.
pub fn parse_format(s: &str) -> Result<DataFormat> {
    DataFormat::from_name(s.trim()).with_context(|| {
        format!("Unknown sample format '{s}'. Options: u8, u16, u32, half, float")
    })
}

/// Parses a comma-separated list of sample formats.
pub fn parse_format_list(s: &str) -> Result<Vec<DataFormat>> {
    s.split(',').map(parse_format).collect()
}

/// Parses exactly `N` comma-separated integers.
fn parse_ints<const N: usize>(s: &str, what: &str) -> Result<[i64; N]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        bail!("Expected {} values for {}, got {}", N, what, parts.len());
    }
    let mut out = [0i64; N];
    for (dst, part) in out.iter_mut().zip(parts) {
        *dst = part
            .trim()
            .parse()
            .with_context(|| format!("Invalid {what} value '{part}'"))?;
    }
    Ok(out)
}

/// Parses an `X,Y` origin.
pub fn parse_origin(s: &str) -> Result<(i32, i32)> {
    let [x, y] = parse_ints::<2>(s, "origin")?;
    Ok((i32::try_from(x)?, i32::try_from(y)?))
}

/// Parses a `W,H,X,Y` window.
pub fn parse_window(s: &str) -> Result<Rect> {
    let [w, h, x, y] = parse_ints::<4>(s, "window")?;
    Ok(Rect::new(
        i32::try_from(x)?,
        i32::try_from(y)?,
        u32::try_from(w)?,
        u32::try_from(h)?,
    ))
}

/// Parses `KEY=VALUE`.
///
/// The value becomes an integer, a float, a float list (comma separated)
/// or, failing those, a string.
pub fn parse_attr(s: &str) -> Result<(String, AttrValue)> {
    let Some((key, value)) = s.split_once('=') else {
        bail!("Attribute '{s}' is not KEY=VALUE");
    };
    let key = key.trim();
    if key.is_empty() {
        bail!("Attribute '{s}' has an empty key");
    }
    Ok((key.to_string(), parse_attr_value(value)))
}

fn parse_attr_value(value: &str) -> AttrValue {
    if let Ok(i) = value.parse::<i64>() {
        return AttrValue::Int(i);
    }
    if let Ok(f) = value.parse::<f64>() {
        return AttrValue::Float(f);
    }
    if value.contains(',') {
        let floats: Result<Vec<f64>, _> = value.split(',').map(|p| p.trim().parse::<f64>()).collect();
        if let Ok(list) = floats {
            return AttrValue::FloatArray(list);
        }
    }
    AttrValue::String(value.to_string())
}
