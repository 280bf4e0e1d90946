use super::image_source;
use crate::emit::HexCase;
use crate::image::{ChannelOrder, DecodedImage, PixelFormat, encode_image};

#[test]
fn white_square_rgb888() {
    let image = DecodedImage::filled(2, 2, [255, 255, 255, 255]).unwrap();
    let buffer = encode_image(&image, PixelFormat::Rgb888, ChannelOrder::Rgb);
    let text = image_source("logo", &buffer, HexCase::Upper);

    assert!(text.starts_with("#ifdef __has_include\n"));
    assert!(text.contains(
        "#ifndef LV_ATTRIBUTE_IMAGE_logo\n#define LV_ATTRIBUTE_IMAGE_logo\n#endif\n"
    ));
    assert!(text.contains(
        "const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMAGE_logo uint8_t logo_map[] = {\n"
    ));
    assert_eq!(text.matches("0xFF").count(), 12);
    assert!(text.contains("  .header.cf = LV_COLOR_FORMAT_RGB888,\n"));
    assert!(text.contains("  .header.w = 2,\n  .header.h = 2,\n"));
    assert!(text.contains("  .data_size = 4 * 3,\n"));
    assert!(text.ends_with("  .data = logo_map,\n};\n"));
}

#[test]
fn descriptor_fields_keep_their_order() {
    let image = DecodedImage::filled(3, 1, [0, 0, 0, 0]).unwrap();
    let buffer = encode_image(&image, PixelFormat::Argb8888, ChannelOrder::Rgb);
    let text = image_source("x", &buffer, HexCase::Upper);
    let fields = [".header.cf", ".header.magic", ".header.w", ".header.h", ".data_size", ".data ="];
    let positions: Vec<usize> = fields.iter().map(|f| text.find(f).unwrap()).collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn rgb565_uses_word_array() {
    let image = DecodedImage::filled(1, 1, [255, 0, 0, 255]).unwrap();
    let buffer = encode_image(&image, PixelFormat::Rgb565, ChannelOrder::Rgb);
    let text = image_source("red", &buffer, HexCase::Upper);
    assert!(text.contains("uint16_t red_map[] = {\n0x00F8\n};\n"));
    assert!(text.contains(".data_size = 1 * 2,"));
}

#[test]
fn name_is_made_a_c_identifier() {
    let image = DecodedImage::filled(1, 1, [0, 0, 0, 255]).unwrap();
    let buffer = encode_image(&image, PixelFormat::Xrgb8888, ChannelOrder::Rgb);
    let text = image_source("2-logo", &buffer, HexCase::Upper);
    assert!(text.contains("const lv_image_dsc_t _2_logo = {"));
}
