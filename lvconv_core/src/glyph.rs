//! Glyph bitmap encoder.
//!
//! Rasterizes each requested codepoint through a [`Rasterizer`], packs the
//! coverage rows at the requested [`Bpp`], and appends them to one shared
//! bitmap blob. Every glyph records the blob offset it starts at
//! (`bitmap_index`); the next glyph starts exactly where this one's packed,
//! row-padded bytes end.

use crate::error::{ConvertError, RenderError, Result};
use crate::pack::{self, Bpp};
use crate::ranges::{GlyphCoverage, Strictness};

/// Coverage target requested from the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Hard-edged mask (samples 0 or 255).
    Mono,
    /// Anti-aliased 8-bit coverage.
    Gray,
}

impl From<Bpp> for RenderMode {
    fn from(bpp: Bpp) -> Self {
        match bpp {
            Bpp::One => Self::Mono,
            Bpp::Two | Bpp::Four | Bpp::Eight => Self::Gray,
        }
    }
}

/// Output of one rasterization request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    /// Row-major 8-bit coverage, `width * height` samples.
    pub coverage: Vec<u8>,
    /// Horizontal advance in pixels.
    pub advance: f32,
    /// Left bearing in pixels.
    pub left: i32,
    /// Top bearing in pixels (distance from baseline up to the first row).
    pub top: i32,
}

/// A font face that can turn codepoints into coverage bitmaps.
pub trait Rasterizer: GlyphCoverage {
    /// Name used in diagnostics (usually the font path).
    fn name(&self) -> &str;

    fn rasterize(
        &mut self,
        codepoint: u32,
        px_size: u32,
        mode: RenderMode,
    ) -> Result<RasterizedGlyph, RenderError>;
}

/// One glyph ready for packing. Consumed by [`GlyphBitmapEncoder::push`].
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRecord {
    pub codepoint: u32,
    pub width: u32,
    pub height: u32,
    pub coverage: Vec<u8>,
    pub advance: f32,
    pub left: i32,
    pub top: i32,
}

impl GlyphRecord {
    /// Zero-size box with no advance, used for glyphs the font lacks.
    pub fn empty(codepoint: u32) -> Self {
        Self {
            codepoint,
            width: 0,
            height: 0,
            coverage: Vec::new(),
            advance: 0.0,
            left: 0,
            top: 0,
        }
    }

    pub fn from_raster(codepoint: u32, glyph: RasterizedGlyph) -> Result<Self, RenderError> {
        let expected = glyph.width as usize * glyph.height as usize;
        if glyph.coverage.len() < expected {
            return Err(RenderError::BadCoverage {
                expected,
                actual: glyph.coverage.len(),
            });
        }
        Ok(Self {
            codepoint,
            width: glyph.width,
            height: glyph.height,
            coverage: glyph.coverage,
            advance: glyph.advance,
            left: glyph.left,
            top: glyph.top,
        })
    }
}

/// Row of the glyph descriptor table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GlyphDescriptor {
    pub bitmap_index: u32,
    /// Advance in 1/16 pixel units.
    pub adv_w: u32,
    pub box_w: u16,
    pub box_h: u16,
    pub ofs_x: i16,
    pub ofs_y: i16,
}

/// A packed glyph and where it lives in the blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedGlyph {
    pub codepoint: u32,
    pub descriptor: GlyphDescriptor,
    pub packed_len: usize,
}

/// Accumulates packed glyphs into a shared blob.
#[derive(Debug, Clone)]
pub struct GlyphBitmapEncoder {
    bpp: Bpp,
    blob: Vec<u8>,
    glyphs: Vec<EncodedGlyph>,
}

impl GlyphBitmapEncoder {
    pub fn new(bpp: Bpp) -> Self {
        Self {
            bpp,
            blob: Vec::new(),
            glyphs: Vec::new(),
        }
    }

    pub const fn bpp(&self) -> Bpp {
        self.bpp
    }

    /// Offset the next glyph will start at.
    pub fn bitmap_index(&self) -> usize {
        self.blob.len()
    }

    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn glyphs(&self) -> &[EncodedGlyph] {
        &self.glyphs
    }

    /// Pack `record` onto the blob and return its table row.
    pub fn push(&mut self, record: GlyphRecord) -> GlyphDescriptor {
        let bitmap_index = self.blob.len();
        let (w, h) = (record.width as usize, record.height as usize);
        let packed_len = pack::pack_bitmap(self.bpp, w, h, &record.coverage, &mut self.blob);
        debug_assert_eq!(packed_len, self.bpp.packed_size(w, h));
        let descriptor = GlyphDescriptor {
            bitmap_index: bitmap_index as u32,
            adv_w: (record.advance.max(0.0) * 16.0).round() as u32,
            box_w: record.width as u16,
            box_h: record.height as u16,
            ofs_x: record.left as i16,
            ofs_y: record.top as i16,
        };
        self.glyphs.push(EncodedGlyph {
            codepoint: record.codepoint,
            descriptor,
            packed_len,
        });
        descriptor
    }

    pub fn into_parts(self) -> (Vec<u8>, Vec<EncodedGlyph>) {
        (self.blob, self.glyphs)
    }
}

/// Rasterize one codepoint into a record, keeping the failure per glyph.
pub fn render_glyph<R: Rasterizer + ?Sized>(
    raster: &mut R,
    codepoint: u32,
    px_size: u32,
    bpp: Bpp,
) -> Result<GlyphRecord, RenderError> {
    if !raster.has_glyph(codepoint) {
        return Err(RenderError::Missing);
    }
    let glyph = raster.rasterize(codepoint, px_size, RenderMode::from(bpp))?;
    GlyphRecord::from_raster(codepoint, glyph)
}

/// Reduce a per-glyph result under a strictness policy.
///
/// Lenient mode degrades a failure to an empty box; strict mode aborts.
pub fn settle_glyph(
    result: Result<GlyphRecord, RenderError>,
    codepoint: u32,
    strictness: Strictness,
    font: &str,
) -> Result<GlyphRecord> {
    match (result, strictness) {
        (Ok(record), _) => Ok(record),
        (Err(err), Strictness::Lenient) => {
            log::warn!("{font}: U+{codepoint:04X} {err}, emitting empty glyph");
            Ok(GlyphRecord::empty(codepoint))
        }
        (Err(err), Strictness::Strict) => {
            log::debug!("{font}: U+{codepoint:04X} {err}");
            Err(ConvertError::UnsupportedCodepoint {
                font: font.to_owned(),
                codepoint,
            })
        }
    }
}

/// Rasterize and pack `codepoints` in order onto `encoder`.
pub fn encode_glyphs<R, I>(
    raster: &mut R,
    codepoints: I,
    px_size: u32,
    strictness: Strictness,
    encoder: &mut GlyphBitmapEncoder,
) -> Result<()>
where
    R: Rasterizer + ?Sized,
    I: IntoIterator<Item = u32>,
{
    let bpp = encoder.bpp();
    for cp in codepoints {
        let result = render_glyph(raster, cp, px_size, bpp);
        let record = settle_glyph(result, cp, strictness, raster.name())?;
        encoder.push(record);
    }
    Ok(())
}
