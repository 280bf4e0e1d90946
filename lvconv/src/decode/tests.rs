use image::{Rgb, RgbImage, Rgba, RgbaImage};

use lvconv_core::error::ConvertError;

use super::load_image;

#[test]
fn png_decodes_to_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dot.png");
    RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 40])).save(&path).unwrap();

    let decoded = load_image(&path).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (3, 2));
    assert!(decoded.pixels().all(|p| p == [10, 20, 30, 40]));
}

#[test]
fn bmp_is_accepted_case_insensitively() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("DOT.BMP");
    RgbImage::from_pixel(1, 1, Rgb([1, 2, 3]))
        .save_with_format(&path, image::ImageFormat::Bmp)
        .unwrap();
    let decoded = load_image(&path).unwrap();
    assert_eq!(decoded.pixels().next(), Some([1, 2, 3, 255]));
}

#[test]
fn unknown_extension_is_rejected() {
    let err = load_image(std::path::Path::new("photo.tiff")).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidInputFile { .. }));
}

#[test]
fn missing_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_image(&dir.path().join("absent.png")).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidInputFile { .. }));
}

#[test]
fn corrupt_data_names_the_decoder() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.png");
    std::fs::write(&path, b"definitely not a png").unwrap();
    let err = load_image(&path).unwrap_err();
    assert!(matches!(err, ConvertError::ExternalToolFailure { tool: "image decoder", .. }));
    assert!(err.to_string().contains("bad.png"));
}
