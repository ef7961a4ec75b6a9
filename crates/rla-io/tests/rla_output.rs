//! Integration tests for the RLA writer, checked byte by byte on disk.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use rla_core::{DataFormat, ImageSpec, Rect};
use rla_io::rla::header::attr;
use rla_io::rla::serialize::HEADER_SIZE;
use rla_io::rla::{RlaOutput, RlaWriterOptions};
use rla_io::{IoError, ImageOutput, OpenMode, create_output};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn writer() -> RlaOutput {
    RlaOutput::with_options(RlaWriterOptions {
        program_name: "rla-io tests".into(),
        created: NaiveDate::from_ymd_opt(2026, 10, 17).and_then(|d| d.and_hms_opt(14, 3, 0)),
    })
}

fn temp_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

/// NUL-terminated text field at `offset`.
fn text_at(bytes: &[u8], offset: usize, len: usize) -> String {
    let field = &bytes[offset..offset + len];
    let end = field.iter().position(|&b| b == 0).unwrap_or(len);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

fn i16_at(bytes: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

fn write_spec(path: &Path, spec: &ImageSpec) -> Vec<u8> {
    let mut out = writer();
    out.open(path, spec, OpenMode::Create).unwrap();
    out.close().unwrap();
    std::fs::read(path).unwrap()
}

#[test]
fn open_failures_leave_no_file() {
    let dir = TempDir::new().unwrap();
    let mut out = writer();

    let cases: Vec<(&str, ImageSpec, OpenMode)> = vec![
        ("w0.rla", ImageSpec::rgb(0, 4), OpenMode::Create),
        ("h0.rla", ImageSpec::rgb(4, 0), OpenMode::Create),
        ("d2.rla", ImageSpec { depth: 2, ..ImageSpec::rgb(4, 4) }, OpenMode::Create),
        ("c0.rla", ImageSpec::new(4, 4, 0, DataFormat::U8), OpenMode::Create),
        ("append.rla", ImageSpec::rgb(4, 4), OpenMode::AppendSubimage),
        ("mip.rla", ImageSpec::rgb(4, 4), OpenMode::AppendMipLevel),
        ("wide.rla", ImageSpec::rgb(40_000, 4), OpenMode::Create),
    ];

    for (name, spec, mode) in cases {
        let path = temp_path(&dir, name);
        assert!(out.open(&path, &spec, mode).is_err(), "{name} should fail");
        assert!(!path.exists(), "{name} left a file behind");
        assert!(!out.is_open());
    }
}

#[test]
fn open_error_kinds() {
    let dir = TempDir::new().unwrap();
    let mut out = writer();
    let path = temp_path(&dir, "x.rla");

    let err = out.open(&path, &ImageSpec::rgb(0, 3), OpenMode::Create).unwrap_err();
    assert!(matches!(err, IoError::InvalidGeometry { width: 0, height: 3 }));
    assert!(err.to_string().contains("0 x 3"));

    let err = out
        .open(&path, &ImageSpec { depth: 4, ..ImageSpec::rgb(2, 2) }, OpenMode::Create)
        .unwrap_err();
    assert!(matches!(err, IoError::UnsupportedDepth(4)));

    let err = out.open(&path, &ImageSpec::rgb(2, 2), OpenMode::AppendSubimage).unwrap_err();
    assert!(matches!(err, IoError::UnsupportedMode(_)));
}

#[test]
fn open_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing").join("frame.rla");
    let err = writer().open(&path, &ImageSpec::rgb(2, 2), OpenMode::Create).unwrap_err();
    match err {
        IoError::CannotCreate { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_fields_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "header.rla");
    let mut spec = ImageSpec::rgba(4, 2);
    spec.set_attr(attr::FRAME_NUMBER, 42);
    spec.set_attr(attr::DESCRIPTION, "turntable");
    spec.set_attr(attr::USER_NAME, "lighting");

    let bytes = write_spec(&path, &spec);
    assert_eq!(bytes.len(), HEADER_SIZE + 2 * 4);

    // Windows: left, right, bottom, top
    assert_eq!(i16_at(&bytes, 0), 0);
    assert_eq!(i16_at(&bytes, 2), 3);
    assert_eq!(i16_at(&bytes, 4), 0);
    assert_eq!(i16_at(&bytes, 6), 1);
    assert_eq!(i16_at(&bytes, 10), 3);
    assert_eq!(i16_at(&bytes, 14), 1);

    assert_eq!(i16_at(&bytes, 16), 42);
    assert_eq!(i16_at(&bytes, 18), 0); // CT_BYTE
    assert_eq!(i16_at(&bytes, 20), 3);
    assert_eq!(i16_at(&bytes, 22), 1);
    assert_eq!(i16_at(&bytes, 24), 0);
    assert_eq!(&bytes[26..28], &[0xFF, 0xFE]);

    assert_eq!(text_at(&bytes, 44, 24), "0.67 0.08");
    assert_eq!(text_at(&bytes, 116, 24), "0.31 0.316");
    assert_eq!(text_at(&bytes, 142, 128), path.to_string_lossy());
    assert_eq!(text_at(&bytes, 270, 128), "turntable");
    assert_eq!(text_at(&bytes, 398, 64), "rla-io tests");
    assert_eq!(text_at(&bytes, 494, 32), "lighting");
    assert_eq!(text_at(&bytes, 526, 20), "OCT 17 14:03 2026");
    assert_eq!(text_at(&bytes, 570, 24), "2.0000000000");
    assert_eq!(text_at(&bytes, 594, 32), "rgb");

    assert_eq!(i16_at(&bytes, 684), 8);
    assert_eq!(i16_at(&bytes, 686), 0);
    assert_eq!(i16_at(&bytes, 688), 8);
    assert_eq!(i16_at(&bytes, 690), 0);
    assert_eq!(i16_at(&bytes, 692), 0);
    assert_eq!(u32_at(&bytes, 736), 0);
}

#[test]
fn float_channels_header() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "float.rla");
    let mut spec = ImageSpec::new(2, 2, 5, DataFormat::F32);
    spec.channel_formats = vec![
        DataFormat::F32,
        DataFormat::F32,
        DataFormat::F32,
        DataFormat::F16,
        DataFormat::U16,
    ];

    let bytes = write_spec(&path, &spec);
    assert_eq!(i16_at(&bytes, 18), 4); // CT_FLOAT
    assert_eq!(i16_at(&bytes, 20), 3);
    assert_eq!(i16_at(&bytes, 22), 1);
    assert_eq!(i16_at(&bytes, 24), 1);
    assert_eq!(i16_at(&bytes, 684), 32);
    assert_eq!(i16_at(&bytes, 686), 4);
    assert_eq!(i16_at(&bytes, 688), 16);
    assert_eq!(i16_at(&bytes, 690), 0);
    assert_eq!(i16_at(&bytes, 692), 16);
}

#[test]
fn gamma_from_colorspace() {
    let dir = TempDir::new().unwrap();

    let mut spec = ImageSpec::rgb(2, 2);
    spec.set_attr(attr::COLOR_SPACE, "Linear");
    let bytes = write_spec(&temp_path(&dir, "linear.rla"), &spec);
    assert_eq!(text_at(&bytes, 28, 16), "1.0");

    spec.set_attr(attr::COLOR_SPACE, "GammaCorrected");
    spec.set_attr(attr::GAMMA, 2.2);
    let bytes = write_spec(&temp_path(&dir, "gamma.rla"), &spec);
    assert_eq!(text_at(&bytes, 28, 16), "2.2000000000");

    spec.set_attr(attr::COLOR_SPACE, "sRGB");
    let bytes = write_spec(&temp_path(&dir, "srgb.rla"), &spec);
    assert!(bytes[28..44].iter().all(|&b| b == 0));
}

#[test]
fn chromaticity_attributes() {
    let dir = TempDir::new().unwrap();
    let mut spec = ImageSpec::rgb(2, 2);
    spec.set_attr(attr::WHITE_POINT, [0.3127, 0.3290]);
    spec.set_attr(attr::RED_CHROMA, [0.64, 0.33, 0.03]);

    let bytes = write_spec(&temp_path(&dir, "chroma.rla"), &spec);
    assert_eq!(text_at(&bytes, 44, 24), "0.6400 0.3300 0.0300");
    assert_eq!(text_at(&bytes, 68, 24), "0.21 0.71");
    assert_eq!(text_at(&bytes, 92, 24), "0.14 0.33");
    assert_eq!(text_at(&bytes, 116, 24), "0.3127 0.3290");
}

#[test]
fn aspect_ratio_text() {
    let dir = TempDir::new().unwrap();
    let bytes = write_spec(&temp_path(&dir, "aspect.rla"), &ImageSpec::rgb(1920, 1080));
    let ratio: f64 = text_at(&bytes, 570, 24).parse().unwrap();
    assert_relative_eq!(ratio, 1920.0 / 1080.0, epsilon = 1e-9);
}

#[test]
fn scanlines_and_offset_table() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "rows.rla");
    let spec = ImageSpec::gray(2, 3);

    let mut out = writer();
    out.open(&path, &spec, OpenMode::Create).unwrap();
    for y in 0..3 {
        let v = y as u8 * 10;
        out.write_scanline(y, 0, None, &[v, v + 1], None).unwrap();
    }
    out.close().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let data = HEADER_SIZE + 3 * 4;
    assert_eq!(bytes.len(), data + 3 * 4);

    // Entry 0 is the bottom row (y = 2).
    assert_eq!(u32_at(&bytes, HEADER_SIZE), (data + 8) as u32);
    assert_eq!(u32_at(&bytes, HEADER_SIZE + 4), (data + 4) as u32);
    assert_eq!(u32_at(&bytes, HEADER_SIZE + 8), data as u32);

    assert_eq!(&bytes[data..data + 4], &[0, 2, 0, 1]);
    assert_eq!(&bytes[data + 8..data + 12], &[0, 2, 20, 21]);
}

#[test]
fn unwritten_rows_keep_zero_offset() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "partial.rla");
    let mut spec = ImageSpec::gray(1, 3);
    spec.data_window = Rect::new(0, 10, 1, 3);

    let mut out = writer();
    out.open(&path, &spec, OpenMode::Create).unwrap();
    out.write_scanline(11, 0, None, &[7], None).unwrap();
    out.close().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(u32_at(&bytes, HEADER_SIZE), 0);
    assert_eq!(u32_at(&bytes, HEADER_SIZE + 4), (HEADER_SIZE + 12) as u32);
    assert_eq!(u32_at(&bytes, HEADER_SIZE + 8), 0);
}

#[test]
fn scanline_conversion_and_stride() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "convert.rla");
    let spec = ImageSpec::rgb(2, 1);

    // RGBA floats, alpha skipped by the stride.
    let pixels: Vec<u8> = [1.0f32, 0.0, 0.5, 9.0, 0.0, 1.0, 2.0, 9.0]
        .iter()
        .flat_map(|v| v.to_ne_bytes())
        .collect();

    let mut out = writer();
    out.open(&path, &spec, OpenMode::Create).unwrap();
    out.write_scanline(0, 0, Some(DataFormat::F32), &pixels, Some(16)).unwrap();
    out.close().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let data = HEADER_SIZE + 4;
    assert_eq!(
        &bytes[data..],
        &[0, 2, 255, 0, 0, 2, 0, 255, 0, 2, 128, 255]
    );
}

#[test]
fn oversized_stride_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "stride.rla");

    let mut out = writer();
    out.open(&path, &ImageSpec::rgb(3, 1), OpenMode::Create).unwrap();
    let err = out
        .write_scanline(0, 0, Some(DataFormat::U8), &[0; 64], Some(usize::MAX / 2 + 1))
        .unwrap_err();
    assert!(matches!(err, IoError::Conversion(_)));

    // The writer is still usable.
    out.write_scanline(0, 0, Some(DataFormat::U8), &[0; 9], None).unwrap();
    out.close().unwrap();
}

#[test]
fn scanline_out_of_range() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "range.rla");
    let mut spec = ImageSpec::gray(1, 2);
    spec.data_window = Rect::new(0, 5, 1, 2);

    let mut out = writer();
    out.open(&path, &spec, OpenMode::Create).unwrap();
    for (y, z) in [(4, 0), (7, 0), (5, 1), (-1, 0)] {
        let err = out.write_scanline(y, z, None, &[0], None).unwrap_err();
        assert!(matches!(err, IoError::ScanlineOutOfRange { first: 5, last: 6, .. }));
    }
    out.write_scanline(6, 0, None, &[0], None).unwrap();

    let err = out.write_scanline(5, 0, None, &[], None).unwrap_err();
    assert!(matches!(err, IoError::Conversion(_)));
}

#[test]
fn close_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "close.rla");

    let mut out = writer();
    assert!(out.close().is_ok());
    out.open(&path, &ImageSpec::rgb(1, 1), OpenMode::Create).unwrap();
    assert!(out.spec().is_some());
    assert!(out.close().is_ok());
    assert!(out.close().is_ok());
    assert!(out.spec().is_none());

    let err = out.write_scanline(0, 0, None, &[0, 0, 0], None).unwrap_err();
    assert!(matches!(err, IoError::NotOpen));
}

#[test]
fn reopen_finalizes_previous_file() {
    let dir = TempDir::new().unwrap();
    let first = temp_path(&dir, "first.rla");
    let second = temp_path(&dir, "second.rla");

    let mut out = writer();
    out.open(&first, &ImageSpec::gray(1, 1), OpenMode::Create).unwrap();
    out.write_scanline(0, 0, None, &[3], None).unwrap();
    out.open(&second, &ImageSpec::gray(1, 1), OpenMode::Create).unwrap();

    let bytes = std::fs::read(&first).unwrap();
    assert_eq!(u32_at(&bytes, HEADER_SIZE), (HEADER_SIZE + 4) as u32);
    assert_eq!(&bytes[HEADER_SIZE + 4..], &[0, 1, 3]);
}

#[test]
fn drop_finalizes_file() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "dropped.rla");
    {
        let mut out = writer();
        out.open(&path, &ImageSpec::gray(1, 1), OpenMode::Create).unwrap();
        out.write_scanline(0, 0, None, &[9], None).unwrap();
    }
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(u32_at(&bytes, HEADER_SIZE), (HEADER_SIZE + 4) as u32);
}

#[test]
fn write_image_through_registry() {
    let dir = TempDir::new().unwrap();
    let path = temp_path(&dir, "image.RLA");
    let spec = ImageSpec::rgb(2, 2);
    let pixels: Vec<u8> = (1..=12).collect();

    let mut out = create_output(&path).unwrap();
    assert_eq!(out.format_name(), "rla");
    out.open(&path, &spec, OpenMode::Create).unwrap();
    out.write_image(Some(DataFormat::U8), &pixels).unwrap();
    out.close().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let data = HEADER_SIZE + 8;
    let row = 3 * (2 + 2);
    assert_eq!(u32_at(&bytes, HEADER_SIZE), (data + row) as u32);
    assert_eq!(u32_at(&bytes, HEADER_SIZE + 4), data as u32);
    assert_eq!(&bytes[data..data + row], &[0, 2, 1, 4, 0, 2, 2, 5, 0, 2, 3, 6]);

    let mut out = create_output(&path).unwrap();
    out.open(&path, &spec, OpenMode::Create).unwrap();
    let err = out.write_image(None, &pixels[..6]).unwrap_err();
    assert!(matches!(err, IoError::Conversion(_)));
}

#[test]
fn unknown_extension() {
    let err = create_output(Path::new("frame.exr")).err().unwrap();
    assert!(matches!(err, IoError::UnsupportedFormat(_)));
}
