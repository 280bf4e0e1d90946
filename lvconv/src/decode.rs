//! Raster decoding through the `image` crate.

use std::path::Path;

use image::ImageFormat;

use lvconv_core::error::{ConvertError, Result};
use lvconv_core::image::DecodedImage;

/// Accepted image file extensions.
pub const IMAGE_EXTENSIONS: [&str; 6] = ["png", "bmp", "jpg", "jpeg", "gif", "ico"];

/// Decode `path` into RGBA. The extension picks the decoder.
pub fn load_image(path: &Path) -> Result<DecodedImage> {
    let invalid = |reason: String| ConvertError::InvalidInputFile {
        path: path.to_path_buf(),
        reason,
    };
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .filter(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
        .ok_or_else(|| invalid(format!("expected one of {}", IMAGE_EXTENSIONS.join(", "))))?;
    let format = ImageFormat::from_extension(&ext).ok_or_else(|| invalid(format!("no decoder for .{ext}")))?;
    let bytes = std::fs::read(path).map_err(|e| invalid(e.to_string()))?;
    decode_bytes(&bytes, format).map_err(|e| match e {
        ConvertError::ExternalToolFailure { tool, message } => ConvertError::ExternalToolFailure {
            tool,
            message: format!("{}: {message}", path.display()),
        },
        other => other,
    })
}

/// Decode an in-memory image of a known format.
pub fn decode_bytes(bytes: &[u8], format: ImageFormat) -> Result<DecodedImage> {
    let rgba = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ConvertError::ExternalToolFailure {
            tool: "image decoder",
            message: e.to_string(),
        })?
        .into_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    log::debug!("decoded {width}x{height} {format:?} image");
    DecodedImage::new(width, height, rgba.into_raw()).ok_or_else(|| ConvertError::ExternalToolFailure {
        tool: "image decoder",
        message: format!("{width}x{height} image has no pixels"),
    })
}

#[cfg(test)]
mod tests;
