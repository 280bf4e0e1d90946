//! Runs every asset in a job and collects the outcomes.
//!
//! Assets are independent: a failure is recorded and the batch moves on.
//! Files already written by earlier assets stay in place.

use std::fmt;
use std::path::{Path, PathBuf};

use lvconv_core::emit::{self, HexCase};
use lvconv_core::error::Result;
use lvconv_core::font::{self, FontSource};
use lvconv_core::glyph::Rasterizer;
use lvconv_core::image::encode_image;

use crate::config::{FontJob, ImageJob, JobConfig, OutputConfig};
use crate::decode;
use crate::output;
use crate::raster::SwashRasterizer;

/// What an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Image,
    Font,
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Image => "image",
            Self::Font => "font",
        })
    }
}

/// Result of converting one asset.
#[derive(Debug)]
pub struct AssetOutcome {
    pub kind: AssetKind,
    pub name: String,
    /// Path written, or why nothing was.
    pub result: Result<PathBuf>,
}

/// Outcomes of a whole job, in job file order (images first).
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<AssetOutcome>,
}

impl BatchReport {
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| o.result.as_ref().ok().map(PathBuf::as_path))
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssetOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// Convert every image and font in `job`.
pub fn run_job(job: &JobConfig) -> BatchReport {
    let mut report = BatchReport::default();
    for image in &job.image {
        let name = image.asset_name();
        let result = convert_image(image, &job.output);
        record(&mut report, AssetKind::Image, name, result);
    }
    for font in &job.font {
        let name = font.asset_name();
        let result = convert_font(font, &job.output);
        record(&mut report, AssetKind::Font, name, result);
    }
    log::info!(
        "batch: {} written, {} failed",
        report.written().count(),
        report.failures().count()
    );
    report
}

fn record(report: &mut BatchReport, kind: AssetKind, name: String, result: Result<PathBuf>) {
    if let Err(e) = &result {
        log::warn!("{kind} {name}: {e}");
    }
    report.outcomes.push(AssetOutcome { kind, name, result });
}

/// Decode, encode, emit and write one image.
pub fn convert_image(job: &ImageJob, output: &OutputConfig) -> Result<PathBuf> {
    // Format is checked before any decoding.
    let format = job.pixel_format()?;
    let decoded = decode::load_image(&job.path)?;
    let buffer = encode_image(&decoded, format, job.channel_order.into());
    let name = emit::sanitize_identifier(&job.asset_name());
    let text = emit::image_source(&name, &buffer, output.hex_case.into());
    let target = output::target_path(output.dir.as_deref(), &job.path, &name);
    output::write_source(&target, &text)
}

/// Load every source font, assemble, emit and write one font.
pub fn convert_font(job: &FontJob, output: &OutputConfig) -> Result<PathBuf> {
    let mut faces = job
        .source
        .iter()
        .map(|s| SwashRasterizer::open(&s.path))
        .collect::<Result<Vec<_>>>()?;
    let mut rasters: Vec<&mut dyn Rasterizer> = faces.iter_mut().map(|f| f as &mut dyn Rasterizer).collect();
    let text = font_source_for(job, &mut rasters, output.hex_case.into())?;

    let name = emit::sanitize_identifier(&job.asset_name());
    let first = job.source.first().map(|s| s.path.as_path()).unwrap_or_else(|| Path::new(""));
    let target = output::target_path(output.dir.as_deref(), first, &name);
    output::write_source(&target, &text)
}

/// Assemble and emit a font from already-loaded faces, one per job source.
pub fn font_source_for(job: &FontJob, faces: &mut [&mut dyn Rasterizer], case: HexCase) -> Result<String> {
    let options = job.options()?;
    let ranges = job.range_sets()?;
    let mut sources: Vec<FontSource<'_>> = faces
        .iter_mut()
        .zip(ranges)
        .map(|(raster, ranges)| FontSource {
            raster: &mut **raster,
            ranges,
        })
        .collect();
    let font = font::assemble_font(&mut sources, &options)?;
    log::info!(
        "font {}: {} glyphs, {} bitmap bytes, {} cmaps",
        font.name,
        font.glyphs.len(),
        font.bitmap.len(),
        font.cmaps.len()
    );
    Ok(emit::font_source(&font, case))
}

#[cfg(test)]
mod tests;
