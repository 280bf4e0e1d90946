//! Benchmarks for the packing hot paths.
//!
//! Sizes follow real assets:
//!
//! - **320x240**: small splash screen.
//! - **800x480**: full-screen 5" panel background.
//! - **1024x600**: full-screen 7" panel background.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use lvconv_core::emit::{IMAGE_LINE_WIDTH, format_hex_array};
use lvconv_core::pack::{self, Bpp};
use lvconv_core::{ChannelOrder, DecodedImage, HexCase, PixelFormat, encode_image};

const SIZES: [(u32, u32); 3] = [(320, 240), (800, 480), (1024, 600)];

/// Horizontal gradient with a vertical alpha ramp.
fn gradient(width: u32, height: u32) -> DecodedImage {
    let mut rgba = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.max(1)) as u8;
            let a = (y * 255 / height.max(1)) as u8;
            rgba.extend_from_slice(&[v, 255 - v, v / 2, a]);
        }
    }
    DecodedImage::new(width, height, rgba).unwrap()
}

/// Anti-aliased coverage shaped like a round glyph.
fn disc(size: usize) -> Vec<u8> {
    let c = size as f32 / 2.0;
    (0..size * size)
        .map(|i| {
            let (x, y) = ((i % size) as f32 + 0.5, (i / size) as f32 + 0.5);
            let d = ((x - c).powi(2) + (y - c).powi(2)).sqrt();
            ((c - d).clamp(0.0, 1.0) * 255.0) as u8
        })
        .collect()
}

fn bench_encode_image(c: &mut Criterion) {
    for format in [PixelFormat::Rgb565, PixelFormat::Rgb565A8, PixelFormat::Argb8888] {
        let mut group = c.benchmark_group(format!("encode_image/{format}"));
        for &(w, h) in &SIZES {
            let image = gradient(w, h);
            group.bench_with_input(BenchmarkId::from_parameter(format!("{w}x{h}")), &image, |b, image| {
                b.iter(|| encode_image(black_box(image), format, ChannelOrder::Rgb));
            });
        }
        group.finish();
    }
}

fn bench_hex_array(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_hex_array/rgb565");
    for &(w, h) in &SIZES {
        let values = encode_image(&gradient(w, h), PixelFormat::Rgb565, ChannelOrder::Rgb).elements();
        group.bench_with_input(BenchmarkId::from_parameter(format!("{w}x{h}")), &values, |b, values| {
            b.iter(|| format_hex_array(black_box(values), 4, IMAGE_LINE_WIDTH, HexCase::Upper));
        });
    }
    group.finish();
}

fn bench_pack_glyph(c: &mut Criterion) {
    let mut group = c.benchmark_group("pack_bitmap/48px");
    let coverage = disc(48);
    for bpp in [Bpp::One, Bpp::Two, Bpp::Four, Bpp::Eight] {
        group.bench_with_input(BenchmarkId::from_parameter(bpp.bits()), &coverage, |b, coverage| {
            let mut out = Vec::with_capacity(48 * 48);
            b.iter(|| {
                out.clear();
                pack::pack_bitmap(bpp, 48, 48, black_box(coverage), &mut out)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode_image, bench_hex_array, bench_pack_glyph);
criterion_main!(benches);
