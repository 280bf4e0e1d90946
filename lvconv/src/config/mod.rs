//! Job file structures and validation.

mod io;

pub use io::{DEFAULT_JOB_FILE, default_job_path};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use lvconv_core::emit::HexCase;
use lvconv_core::error::{ConvertError, Result};
use lvconv_core::font::{CmapLayout, DuplicatePolicy, FontOptions};
use lvconv_core::image::{ChannelOrder, PixelFormat};
use lvconv_core::pack::Bpp;
use lvconv_core::ranges::{RangeSet, Strictness};

/// Images accepted per job.
pub const MAX_IMAGES: usize = 10;

/// Font files accepted per font.
pub const MAX_FONT_SOURCES: usize = 10;

/// Accepted font pixel sizes.
pub const FONT_SIZES: std::ops::RangeInclusive<u32> = 8..=72;

/// Top-level job file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    /// Log filter used when `RUST_LOG` is unset.
    pub log_level: Option<String>,
    pub output: OutputConfig,
    pub image: Vec<ImageJob>,
    pub font: Vec<FontJob>,
}

/// Where and how sources are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output directory. Unset means next to each input.
    pub dir: Option<PathBuf>,
    pub hex_case: HexCaseSetting,
}

/// Hex digit case in generated arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HexCaseSetting {
    #[default]
    Upper,
    Lower,
}

impl From<HexCaseSetting> for HexCase {
    fn from(s: HexCaseSetting) -> Self {
        match s {
            HexCaseSetting::Upper => Self::Upper,
            HexCaseSetting::Lower => Self::Lower,
        }
    }
}

/// RGB888 byte order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelOrderSetting {
    #[default]
    Rgb,
    Bgr,
}

impl From<ChannelOrderSetting> for ChannelOrder {
    fn from(s: ChannelOrderSetting) -> Self {
        match s {
            ChannelOrderSetting::Rgb => Self::Rgb,
            ChannelOrderSetting::Bgr => Self::Bgr,
        }
    }
}

/// One image conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageJob {
    pub path: PathBuf,
    /// `RGB888`, `RGB565`, `RGB565A8`, `XRGB8888` or `ARGB8888`.
    pub format: String,
    pub channel_order: ChannelOrderSetting,
    /// C identifier; defaults to the file stem.
    pub name: Option<String>,
}

impl Default for ImageJob {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            format: PixelFormat::Rgb565.token().to_owned(),
            channel_order: ChannelOrderSetting::default(),
            name: None,
        }
    }
}

impl ImageJob {
    pub fn pixel_format(&self) -> Result<PixelFormat> {
        self.format.parse()
    }

    /// Identifier for the descriptor: `name`, else the file stem.
    pub fn asset_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| file_stem(&self.path))
    }
}

/// Duplicate codepoint handling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateSetting {
    #[default]
    KeepAll,
    SkipRepeated,
}

/// Codepoint map layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CmapSetting {
    #[default]
    Ranges,
    Sparse,
}

/// One font assembled from one or more font files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontJob {
    /// C identifier of the `lv_font_t`; defaults to the first source's stem.
    pub name: Option<String>,
    pub size: u32,
    pub bpp: u8,
    /// Refuse to convert when a requested codepoint has no glyph.
    pub strict: bool,
    pub duplicates: DuplicateSetting,
    pub cmap: CmapSetting,
    pub source: Vec<FontSourceJob>,
}

impl Default for FontJob {
    fn default() -> Self {
        Self {
            name: None,
            size: 16,
            bpp: 1,
            strict: false,
            duplicates: DuplicateSetting::default(),
            cmap: CmapSetting::default(),
            source: Vec::new(),
        }
    }
}

/// One font file and the ranges taken from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSourceJob {
    pub path: PathBuf,
    /// Comma-separated codepoints or spans, e.g. `"0x20-0x7E, 0xB0"`.
    pub ranges: String,
}

impl Default for FontSourceJob {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            ranges: "0x20-0x7F".to_owned(),
        }
    }
}

impl FontJob {
    /// Identifier for the font: `name`, else the first source's stem.
    pub fn asset_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.source.first().map(|s| file_stem(&s.path)))
            .unwrap_or_else(|| "lv_font_custom".to_owned())
    }

    pub fn bpp(&self) -> Result<Bpp> {
        Bpp::from_bits(self.bpp).ok_or_else(|| {
            ConvertError::Config(format!("bpp must be 1, 2, 4 or 8, got {}", self.bpp))
        })
    }

    /// Core conversion options for this font.
    pub fn options(&self) -> Result<FontOptions> {
        if !FONT_SIZES.contains(&self.size) {
            return Err(ConvertError::Config(format!(
                "font size {} outside {}..={}",
                self.size,
                FONT_SIZES.start(),
                FONT_SIZES.end()
            )));
        }
        Ok(FontOptions {
            strictness: if self.strict {
                Strictness::Strict
            } else {
                Strictness::Lenient
            },
            duplicates: match self.duplicates {
                DuplicateSetting::KeepAll => DuplicatePolicy::KeepAll,
                DuplicateSetting::SkipRepeated => DuplicatePolicy::SkipRepeated,
            },
            cmap_layout: match self.cmap {
                CmapSetting::Ranges => CmapLayout::Ranges,
                CmapSetting::Sparse => CmapLayout::Sparse,
            },
            ..FontOptions::new(self.asset_name(), self.size, self.bpp()?)
        })
    }

    /// Parsed ranges of every source, in order.
    pub fn range_sets(&self) -> Result<Vec<RangeSet>> {
        self.source.iter().map(|s| RangeSet::parse(&s.ranges)).collect()
    }
}

impl JobConfig {
    /// Check job-level limits. Per-asset problems surface when that asset runs.
    pub fn validate(&self) -> Result<()> {
        if self.image.len() > MAX_IMAGES {
            return Err(ConvertError::Config(format!(
                "{} images given, at most {MAX_IMAGES} per job",
                self.image.len()
            )));
        }
        for font in &self.font {
            if font.source.is_empty() {
                return Err(ConvertError::Config(format!("font {} has no source", font.asset_name())));
            }
            if font.source.len() > MAX_FONT_SOURCES {
                return Err(ConvertError::Config(format!(
                    "font {} has {} sources, at most {MAX_FONT_SOURCES} allowed",
                    font.asset_name(),
                    font.source.len()
                )));
            }
        }
        Ok(())
    }

    /// A filled-in job file for `--print-config`.
    pub fn sample() -> Self {
        Self {
            log_level: Some("info".to_owned()),
            output: OutputConfig {
                dir: Some(PathBuf::from("out")),
                hex_case: HexCaseSetting::Upper,
            },
            image: vec![ImageJob {
                path: PathBuf::from("logo.png"),
                name: Some("logo".to_owned()),
                ..ImageJob::default()
            }],
            font: vec![FontJob {
                name: Some("my_font".to_owned()),
                bpp: 4,
                source: vec![FontSourceJob {
                    path: PathBuf::from("font.ttf"),
                    ranges: "0x20-0x7E".to_owned(),
                }],
                ..FontJob::default()
            }],
        }
    }
}

fn file_stem(path: &std::path::Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
