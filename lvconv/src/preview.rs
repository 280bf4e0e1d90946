//! Re-rendering generated image sources for visual inspection.

use std::path::Path;

use image::RgbaImage;

use lvconv_core::error::{ConvertError, Result};
use lvconv_core::image::ChannelOrder;
use lvconv_core::verify;

/// Parse the image source at `source` and save its pixels as a PNG at `png`.
pub fn render_source(source: &Path, png: &Path, order: ChannelOrder) -> Result<()> {
    let text = std::fs::read_to_string(source).map_err(|e| ConvertError::InvalidInputFile {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    let parsed = verify::parse_image_source(&text)?;
    let decoded = parsed.to_rgba(order)?;
    let (w, h) = (decoded.width(), decoded.height());
    let buffer = RgbaImage::from_raw(w, h, decoded.into_rgba()).ok_or_else(|| {
        ConvertError::MalformedSource(format!("{w}x{h} pixel buffer has the wrong size"))
    })?;
    buffer
        .save_with_format(png, image::ImageFormat::Png)
        .map_err(|e| ConvertError::ExternalToolFailure {
            tool: "image encoder",
            message: format!("{}: {e}", png.display()),
        })?;
    log::info!("{}: {w}x{h} {} rendered to {}", source.display(), parsed.format, png.display());
    Ok(())
}
