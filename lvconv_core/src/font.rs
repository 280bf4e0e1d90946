//! Font descriptor assembler.
//!
//! Drives the glyph encoder over every font block in declaration order and
//! builds the three tables LVGL's `lv_font_fmt_txt_dsc_t` points at: the
//! packed bitmap blob, the glyph descriptor table (with the reserved glyph 0
//! row), and the codepoint map.

use std::collections::HashSet;

use crate::error::Result;
use crate::glyph::{self, EncodedGlyph, GlyphBitmapEncoder, GlyphDescriptor, Rasterizer};
use crate::pack::Bpp;
use crate::ranges::{self, CoverageReport, RangeSet, Strictness};

/// How codepoints that several blocks request are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DuplicatePolicy {
    /// Emit and map every occurrence, in declaration order.
    #[default]
    KeepAll,
    /// Emit only the first occurrence; later repeats are dropped.
    SkipRepeated,
}

/// Shape of the emitted codepoint map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CmapLayout {
    /// One contiguous-range entry per run of consecutive codepoints.
    #[default]
    Ranges,
    /// One explicit-list entry per block.
    Sparse,
}

/// LVGL cmap entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmapKind {
    Format0Tiny,
    SparseTiny,
}

impl CmapKind {
    pub const fn lvgl_name(self) -> &'static str {
        match self {
            Self::Format0Tiny => "LV_FONT_FMT_TXT_CMAP_FORMAT0_TINY",
            Self::SparseTiny => "LV_FONT_FMT_TXT_CMAP_SPARSE_TINY",
        }
    }
}

/// One row of the codepoint map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmapEntry {
    pub range_start: u32,
    pub range_length: u32,
    /// First glyph id (1-based) this entry maps to.
    pub glyph_id_start: u32,
    /// Codepoint offsets from `range_start`; empty for contiguous entries.
    pub unicode_list: Vec<u16>,
    pub kind: CmapKind,
}

/// Everything that shapes a font conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontOptions {
    /// C identifier of the public `lv_font_t`.
    pub name: String,
    /// Pixel size; also the emitted line height.
    pub px_size: u32,
    pub bpp: Bpp,
    pub strictness: Strictness,
    pub duplicates: DuplicatePolicy,
    pub cmap_layout: CmapLayout,
}

impl FontOptions {
    pub fn new(name: impl Into<String>, px_size: u32, bpp: Bpp) -> Self {
        Self {
            name: name.into(),
            px_size,
            bpp,
            strictness: Strictness::default(),
            duplicates: DuplicatePolicy::default(),
            cmap_layout: CmapLayout::default(),
        }
    }
}

/// One contributing font file and the ranges taken from it.
pub struct FontSource<'a> {
    pub raster: &'a mut dyn Rasterizer,
    pub ranges: RangeSet,
}

/// Assembled font, ready for the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFont {
    pub name: String,
    pub px_size: u32,
    pub bpp: Bpp,
    pub bitmap: Vec<u8>,
    /// Real glyphs in glyph-id order; glyph id = index + 1.
    pub glyphs: Vec<EncodedGlyph>,
    pub cmaps: Vec<CmapEntry>,
    pub line_height: u32,
    pub base_line: i32,
    /// Source names in declaration order.
    pub sources: Vec<String>,
    /// Coverage of each source's ranges, parallel to `sources`.
    pub coverage: Vec<CoverageReport>,
}

impl EncodedFont {
    /// Descriptor table including LVGL's reserved all-zero glyph 0.
    pub fn descriptor_table(&self) -> Vec<GlyphDescriptor> {
        std::iter::once(GlyphDescriptor::default())
            .chain(self.glyphs.iter().map(|g| g.descriptor))
            .collect()
    }

    /// Packed bytes of one glyph.
    pub fn glyph_bitmap(&self, glyph: &EncodedGlyph) -> &[u8] {
        let start = glyph.descriptor.bitmap_index as usize;
        &self.bitmap[start..start + glyph.packed_len]
    }
}

/// Build the font tables from `sources`, in order.
///
/// Coverage is checked per block before that block is encoded; under
/// [`Strictness::Strict`] the first uncovered codepoint aborts the batch.
pub fn assemble_font(sources: &mut [FontSource<'_>], options: &FontOptions) -> Result<EncodedFont> {
    let mut encoder = GlyphBitmapEncoder::new(options.bpp);
    let mut cmaps = Vec::new();
    let mut seen = HashSet::new();
    let mut names = Vec::with_capacity(sources.len());
    let mut coverage = Vec::with_capacity(sources.len());

    for source in sources.iter_mut() {
        let name = source.raster.name().to_owned();
        let report = ranges::check_coverage(&source.ranges, &*source.raster);
        for range in &report.ranges {
            if range.is_complete() {
                log::info!("{name}: {range}");
            } else {
                log::warn!("{name}: {range}");
            }
        }
        report.enforce(options.strictness, &name)?;

        let codepoints: Vec<u32> = source
            .ranges
            .codepoints()
            .filter(|&cp| match options.duplicates {
                DuplicatePolicy::KeepAll => true,
                DuplicatePolicy::SkipRepeated => seen.insert(cp),
            })
            .collect();

        let first_id = encoder.glyphs().len() as u32 + 1;
        glyph::encode_glyphs(
            &mut *source.raster,
            codepoints.iter().copied(),
            options.px_size,
            options.strictness,
            &mut encoder,
        )?;
        cmaps.extend(build_cmaps(&codepoints, first_id, options.cmap_layout));
        log::debug!(
            "{name}: {} glyphs, blob now {} bytes",
            codepoints.len(),
            encoder.bitmap_index()
        );

        names.push(name);
        coverage.push(report);
    }

    let (bitmap, glyphs) = encoder.into_parts();
    Ok(EncodedFont {
        name: options.name.clone(),
        px_size: options.px_size,
        bpp: options.bpp,
        bitmap,
        glyphs,
        cmaps,
        line_height: options.px_size,
        base_line: 0,
        sources: names,
        coverage,
    })
}

/// Map `codepoints` (glyph ids `first_id..`) into cmap entries.
pub fn build_cmaps(codepoints: &[u32], first_id: u32, layout: CmapLayout) -> Vec<CmapEntry> {
    let mut out: Vec<CmapEntry> = Vec::new();
    for (i, &cp) in codepoints.iter().enumerate() {
        let glyph_id = first_id + i as u32;
        let extends = out.last().is_some_and(|last| match layout {
            CmapLayout::Ranges => cp == last.range_start + last.range_length,
            CmapLayout::Sparse => {
                let prev = last.range_start + last.range_length - 1;
                cp > prev && cp - last.range_start <= u32::from(u16::MAX)
            }
        });
        match out.last_mut() {
            Some(last) if extends => {
                last.range_length = cp - last.range_start + 1;
                if layout == CmapLayout::Sparse {
                    last.unicode_list.push((cp - last.range_start) as u16);
                }
            }
            _ => out.push(match layout {
                CmapLayout::Ranges => CmapEntry {
                    range_start: cp,
                    range_length: 1,
                    glyph_id_start: glyph_id,
                    unicode_list: Vec::new(),
                    kind: CmapKind::Format0Tiny,
                },
                CmapLayout::Sparse => CmapEntry {
                    range_start: cp,
                    range_length: 1,
                    glyph_id_start: glyph_id,
                    unicode_list: vec![0],
                    kind: CmapKind::SparseTiny,
                },
            }),
        }
    }
    out
}
