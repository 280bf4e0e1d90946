use super::{ParsedImage, parse_image_source};
use crate::emit::{HexCase, image_source};
use crate::error::ConvertError;
use crate::image::{ChannelOrder, DecodedImage, PixelFormat, encode_image};

fn round_trip(format: PixelFormat, order: ChannelOrder, rgba: Vec<u8>) -> DecodedImage {
    let image = DecodedImage::new(2, 1, rgba).unwrap();
    let text = image_source("img", &encode_image(&image, format, order), HexCase::Upper);
    let parsed = parse_image_source(&text).unwrap();
    assert_eq!((parsed.width, parsed.height, parsed.format), (2, 1, format));
    parsed.to_rgba(order).unwrap()
}

#[test]
fn rgb888_both_orders() {
    let rgba = vec![10, 20, 30, 255, 40, 50, 60, 255];
    for order in [ChannelOrder::Rgb, ChannelOrder::Bgr] {
        let back = round_trip(PixelFormat::Rgb888, order, rgba.clone());
        assert_eq!(back.into_rgba(), rgba);
    }
}

#[test]
fn alpha_formats_are_exact() {
    let rgba = vec![1, 2, 3, 4, 250, 251, 252, 253];
    let back = round_trip(PixelFormat::Argb8888, ChannelOrder::Rgb, rgba.clone());
    assert_eq!(back.into_rgba(), rgba);

    let back = round_trip(PixelFormat::Xrgb8888, ChannelOrder::Rgb, rgba);
    assert_eq!(back.into_rgba(), vec![1, 2, 3, 255, 250, 251, 252, 255]);
}

#[test]
fn rgb565_keeps_high_bits() {
    let rgba = vec![0xFF, 0x00, 0xFF, 0x80, 0x08, 0x04, 0x10, 0xFF];
    let back = round_trip(PixelFormat::Rgb565, ChannelOrder::Rgb, rgba.clone());
    let got = back.into_rgba();
    for (i, (&a, &b)) in got.iter().zip(&rgba).enumerate() {
        match i % 4 {
            0 | 2 => assert_eq!(a & 0xF8, b & 0xF8),
            1 => assert_eq!(a & 0xFC, b & 0xFC),
            _ => assert_eq!(a, 0xFF),
        }
    }
}

#[test]
fn rgb565a8_keeps_alpha() {
    let rgba = vec![0xFF, 0xFF, 0xFF, 0x40, 0x00, 0x00, 0x00, 0x00];
    let back = round_trip(PixelFormat::Rgb565A8, ChannelOrder::Rgb, rgba.clone());
    assert_eq!(back.into_rgba(), rgba);
}

#[test]
fn missing_header_is_rejected() {
    let err = parse_image_source("uint8_t x[] = {0x00};").unwrap_err();
    assert!(matches!(err, ConvertError::MalformedSource(_)));
}

#[test]
fn element_count_must_match_header() {
    let parsed = ParsedImage {
        width: 2,
        height: 2,
        format: PixelFormat::Rgb888,
        data: vec![0; 5],
    };
    assert!(parsed.to_rgba(ChannelOrder::Rgb).is_err());
}

#[test]
fn missing_format_reads_as_rgb888() {
    let text = "uint8_t m[] = {\n0x01, 0x02, 0x03\n};\n.header.w = 1,\n.header.h = 1,\n";
    let parsed = parse_image_source(text).unwrap();
    assert_eq!(parsed.format, PixelFormat::Rgb888);
    assert_eq!(parsed.data, vec![1, 2, 3]);
}
