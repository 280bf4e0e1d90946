//! Error types shared by every conversion stage.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias defaulting to [`ConvertError`].
pub type Result<T, E = ConvertError> = std::result::Result<T, E>;

/// Everything that can stop an image or font conversion.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source asset is missing, unreadable, or has the wrong extension.
    #[error("invalid input file {}: {reason}", path.display())]
    InvalidInputFile { path: PathBuf, reason: String },

    /// Pixel format token not in the supported set.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    /// Malformed or inverted codepoint range token.
    #[error("invalid unicode range {token:?}: {reason}")]
    RangeParse { token: String, reason: String },

    /// Too many range tokens for a single font block.
    #[error("{count} ranges given, at most {max} ranges or codepoints allowed")]
    RangeCount { count: usize, max: usize },

    /// Font cannot render a requested codepoint and strict mode is on.
    #[error("{font}: no glyph for U+{codepoint:04X}")]
    UnsupportedCodepoint { font: String, codepoint: u32 },

    /// Image decoder or font rasterizer reported a fault.
    #[error("{tool} failed: {message}")]
    ExternalToolFailure { tool: &'static str, message: String },

    /// Writing the generated source failed.
    #[error("failed to write {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A generated C source could not be read back.
    #[error("malformed image source: {0}")]
    MalformedSource(String),

    /// Job file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

/// Why a single glyph could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The face has no glyph mapped to the codepoint.
    #[error("glyph not present")]
    Missing,
    /// The rasterizer produced no image for a mapped glyph.
    #[error("rasterizer produced no image")]
    NoImage,
    /// Rasterizer returned a coverage buffer that does not match its box.
    #[error("coverage buffer holds {actual} samples, box needs {expected}")]
    BadCoverage { expected: usize, actual: usize },
}
