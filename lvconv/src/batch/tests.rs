use std::path::PathBuf;

use image::{Rgba, RgbaImage};

use lvconv_core::emit::HexCase;
use lvconv_core::error::{ConvertError, RenderError};
use lvconv_core::glyph::{RasterizedGlyph, Rasterizer, RenderMode};
use lvconv_core::ranges::GlyphCoverage;

use super::{AssetKind, convert_image, font_source_for, run_job};
use crate::config::{FontJob, FontSourceJob, ImageJob, JobConfig, OutputConfig};

/// Face covering `first..=last` with 2x2 solid glyphs.
struct BlockFace {
    first: u32,
    last: u32,
}

impl GlyphCoverage for BlockFace {
    fn has_glyph(&self, codepoint: u32) -> bool {
        (self.first..=self.last).contains(&codepoint)
    }
}

impl Rasterizer for BlockFace {
    fn name(&self) -> &str {
        "block.ttf"
    }

    fn rasterize(&mut self, _: u32, _: u32, _: RenderMode) -> Result<RasterizedGlyph, RenderError> {
        Ok(RasterizedGlyph {
            width: 2,
            height: 2,
            coverage: vec![0xFF; 4],
            advance: 3.0,
            left: 0,
            top: 2,
        })
    }
}

fn white_png(dir: &std::path::Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255])).save(&path).unwrap();
    path
}

fn output_to(dir: &std::path::Path) -> OutputConfig {
    OutputConfig {
        dir: Some(dir.join("out")),
        ..OutputConfig::default()
    }
}

#[test]
fn white_square_rgb888_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let job = ImageJob {
        path: white_png(dir.path(), "white.png"),
        format: "RGB888".into(),
        ..ImageJob::default()
    };
    let written = convert_image(&job, &output_to(dir.path())).unwrap();
    assert_eq!(written, dir.path().join("out").join("white.c"));

    let text = std::fs::read_to_string(&written).unwrap();
    assert_eq!(text.matches("0xFF").count(), 12);
    assert!(text.contains(".header.cf = LV_COLOR_FORMAT_RGB888,"));
    assert!(text.contains(".data_size = 4 * 3,"));
    assert!(text.contains("const lv_image_dsc_t white = {"));
}

#[test]
fn second_run_does_not_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let job = ImageJob {
        path: white_png(dir.path(), "w.png"),
        ..ImageJob::default()
    };
    let output = output_to(dir.path());
    let a = convert_image(&job, &output).unwrap();
    let b = convert_image(&job, &output).unwrap();
    assert_ne!(a, b);
    assert!(b.ends_with("w(1).c"));
}

#[test]
fn bad_format_fails_before_decoding() {
    let job = ImageJob {
        path: PathBuf::from("/nonexistent/missing.png"),
        format: "RGB332".into(),
        ..ImageJob::default()
    };
    let err = convert_image(&job, &OutputConfig::default()).unwrap_err();
    assert!(matches!(err, ConvertError::UnsupportedFormat(_)));
}

#[test]
fn failures_do_not_stop_siblings() {
    let dir = tempfile::tempdir().unwrap();
    let good = white_png(dir.path(), "good.png");
    let job = JobConfig {
        output: output_to(dir.path()),
        image: vec![
            ImageJob {
                path: dir.path().join("missing.png"),
                ..ImageJob::default()
            },
            ImageJob {
                path: good,
                ..ImageJob::default()
            },
        ],
        font: vec![FontJob {
            source: vec![FontSourceJob {
                path: dir.path().join("absent.ttf"),
                ..FontSourceJob::default()
            }],
            ..FontJob::default()
        }],
        ..JobConfig::default()
    };
    let report = run_job(&job);
    assert_eq!(report.outcomes.len(), 3);
    assert!(!report.is_success());
    assert_eq!(report.written().count(), 1);
    let failed: Vec<(AssetKind, &str)> = report.failures().map(|o| (o.kind, o.name.as_str())).collect();
    assert_eq!(failed, vec![(AssetKind::Image, "missing"), (AssetKind::Font, "absent")]);
    assert!(dir.path().join("out").join("good.c").exists());
}

#[test]
fn font_from_fake_faces() {
    let job = FontJob {
        name: Some("ui".into()),
        bpp: 1,
        source: vec![
            FontSourceJob {
                path: PathBuf::from("a.ttf"),
                ranges: "0x41-0x42".into(),
            },
            FontSourceJob {
                path: PathBuf::from("b.ttf"),
                ranges: "0x30".into(),
            },
        ],
        ..FontJob::default()
    };
    let mut a = BlockFace { first: 0x41, last: 0x5A };
    let mut b = BlockFace { first: 0x30, last: 0x39 };
    let mut faces: Vec<&mut dyn Rasterizer> = vec![&mut a, &mut b];
    let text = font_source_for(&job, &mut faces, HexCase::Upper).unwrap();

    assert!(text.contains("lv_font_t ui = {"));
    assert!(text.contains("    .cmap_num = 2,"));
    // Three 2x2 glyphs at 1bpp: two bytes each.
    assert_eq!(text.matches("    0xC0, 0xC0,\n").count(), 3);
    assert!(text.contains("{.bitmap_index = 4, .adv_w = 48, .box_w = 2, .box_h = 2, .ofs_x = 0, .ofs_y = 2}"));
}

#[test]
fn strict_font_aborts_on_gap() {
    let job = FontJob {
        source: vec![FontSourceJob {
            path: PathBuf::from("a.ttf"),
            ranges: "0x40-0x41".into(),
        }],
        strict: true,
        ..FontJob::default()
    };
    let mut a = BlockFace { first: 0x41, last: 0x41 };
    let mut faces: Vec<&mut dyn Rasterizer> = vec![&mut a];
    let err = font_source_for(&job, &mut faces, HexCase::Upper).unwrap_err();
    assert_eq!(err.to_string(), "block.ttf: no glyph for U+0040");
}
