//! Core asset conversion for LVGL.
//!
//! This crate turns decoded rasters and rasterized glyphs into the C source
//! LVGL compiles in: pixel arrays with `lv_image_dsc_t` descriptors, and
//! packed glyph bitmaps with `lv_font_fmt_txt` tables. It does no file or
//! font I/O of its own; decoders and rasterizers are plugged in by the caller
//! through [`DecodedImage`] and the [`Rasterizer`] trait.

#![deny(unsafe_code)]

pub mod emit;
pub mod error;
pub mod font;
pub mod glyph;
pub mod image;
pub mod pack;
pub mod ranges;
pub mod verify;

pub use emit::{HexCase, font_source, image_source};
pub use error::{ConvertError, RenderError, Result};
pub use font::{CmapLayout, DuplicatePolicy, EncodedFont, FontOptions, FontSource, assemble_font};
pub use glyph::{RasterizedGlyph, Rasterizer, RenderMode};
pub use image::{ChannelOrder, DecodedImage, EncodedPixelBuffer, PixelFormat, encode_image};
pub use pack::Bpp;
pub use ranges::{CoverageReport, GlyphCoverage, RangeSet, Strictness, check_coverage};
pub use verify::{ParsedImage, parse_image_source};
