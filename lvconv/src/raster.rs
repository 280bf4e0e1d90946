//! Glyph rasterization through swash.

use std::path::Path;

use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};

use lvconv_core::error::{ConvertError, RenderError, Result};
use lvconv_core::glyph::{RasterizedGlyph, Rasterizer, RenderMode};
use lvconv_core::ranges::GlyphCoverage;

/// Accepted font file extensions.
pub const FONT_EXTENSIONS: [&str; 2] = ["ttf", "otf"];

/// Coverage at or above this is ink in mono mode.
const MONO_THRESHOLD: u8 = 128;

/// A loaded font face. Owns the file bytes; swash `FontRef`s are created
/// per call from the stored offset and cache key.
pub struct SwashRasterizer {
    name: String,
    bytes: Vec<u8>,
    offset: u32,
    cache_key: CacheKey,
    scale_context: ScaleContext,
}

impl SwashRasterizer {
    /// Read and validate a `.ttf`/`.otf` file.
    pub fn open(path: &Path) -> Result<Self> {
        check_extension(path)?;
        let bytes = std::fs::read(path).map_err(|e| ConvertError::InvalidInputFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(path.display().to_string(), bytes)
    }

    /// Wrap in-memory font bytes; `name` is used in diagnostics.
    pub fn from_bytes(name: String, bytes: Vec<u8>) -> Result<Self> {
        let (offset, cache_key) = {
            let fr = FontRef::from_index(&bytes, 0).ok_or_else(|| ConvertError::ExternalToolFailure {
                tool: "font loader",
                message: format!("{name}: not a usable TrueType/OpenType font"),
            })?;
            (fr.offset, fr.key)
        };
        log::debug!("{name}: loaded {} bytes", bytes.len());
        Ok(Self {
            name,
            bytes,
            offset,
            cache_key,
            scale_context: ScaleContext::new(),
        })
    }

    fn font_ref(&self) -> FontRef<'_> {
        FontRef {
            data: &self.bytes,
            offset: self.offset,
            key: self.cache_key,
        }
    }
}

/// Reject anything that is not a `.ttf`/`.otf` path.
pub fn check_extension(path: &Path) -> Result<()> {
    let ok = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| FONT_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)));
    if ok {
        Ok(())
    } else {
        Err(ConvertError::InvalidInputFile {
            path: path.to_path_buf(),
            reason: "expected a .ttf or .otf font".into(),
        })
    }
}

impl GlyphCoverage for SwashRasterizer {
    fn has_glyph(&self, codepoint: u32) -> bool {
        self.font_ref().charmap().map(codepoint) != 0
    }
}

impl Rasterizer for SwashRasterizer {
    fn name(&self) -> &str {
        &self.name
    }

    fn rasterize(
        &mut self,
        codepoint: u32,
        px_size: u32,
        mode: RenderMode,
    ) -> Result<RasterizedGlyph, RenderError> {
        let fr = FontRef {
            data: &self.bytes,
            offset: self.offset,
            key: self.cache_key,
        };
        let glyph_id = fr.charmap().map(codepoint);
        if glyph_id == 0 {
            return Err(RenderError::Missing);
        }
        let size = px_size as f32;
        let advance = fr.glyph_metrics(&[]).scale(size).advance_width(glyph_id);

        let mut scaler = self.scale_context.builder(fr).size(size).hint(true).build();
        let Some(image) = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id)
        else {
            // Mapped but outline-less (space, for one): an empty box that still advances.
            return Ok(RasterizedGlyph {
                advance,
                ..RasterizedGlyph::default()
            });
        };

        let mut coverage = image.data;
        if mode == RenderMode::Mono {
            for sample in &mut coverage {
                *sample = if *sample >= MONO_THRESHOLD { 0xFF } else { 0 };
            }
        }
        Ok(RasterizedGlyph {
            width: image.placement.width,
            height: image.placement.height,
            coverage,
            advance,
            left: image.placement.left,
            top: image.placement.top,
        })
    }
}
