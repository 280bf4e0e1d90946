//! Unicode range parsing and glyph coverage checks for font blocks.
//!
//! A font block's range text is a comma- or newline-separated list of
//! tokens, each a single codepoint (`0x41`, `65`) or an inclusive span
//! (`0x20-0x7E`). At most [`MAX_RANGES_PER_FONT`] tokens are accepted.

use std::fmt;

use crate::error::{ConvertError, Result};

/// Range tokens accepted per font block.
pub const MAX_RANGES_PER_FONT: usize = 5;

/// Largest Unicode scalar value.
const MAX_CODEPOINT: u32 = 0x10_FFFF;

/// Inclusive codepoint span. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CodepointRange {
    start: u32,
    end: u32,
}

impl CodepointRange {
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start <= end && end <= MAX_CODEPOINT).then_some(Self { start, end })
    }

    pub fn single(cp: u32) -> Option<Self> {
        Self::new(cp, cp)
    }

    pub const fn start(self) -> u32 {
        self.start
    }

    pub const fn end(self) -> u32 {
        self.end
    }

    /// Codepoints in the span.
    pub const fn count(self) -> u32 {
        self.end - self.start + 1
    }

    pub const fn is_single(self) -> bool {
        self.start == self.end
    }

    pub fn iter(self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}-0x{:04X}", self.start, self.end)
    }
}

/// Ordered ranges of one font block, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeSet {
    ranges: Vec<CodepointRange>,
}

impl RangeSet {
    /// Parse range text, enforcing the per-font token cap.
    pub fn parse(text: &str) -> Result<Self> {
        let tokens: Vec<&str> = text
            .split([',', '\n'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();
        if tokens.len() > MAX_RANGES_PER_FONT {
            return Err(ConvertError::RangeCount {
                count: tokens.len(),
                max: MAX_RANGES_PER_FONT,
            });
        }
        if tokens.is_empty() {
            return Err(ConvertError::RangeParse {
                token: text.trim().to_owned(),
                reason: "unicode range is empty".into(),
            });
        }
        let ranges = tokens
            .into_iter()
            .map(parse_token)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[CodepointRange] {
        &self.ranges
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Every codepoint, range by range, in declaration order.
    pub fn codepoints(&self) -> impl Iterator<Item = u32> + '_ {
        self.ranges.iter().flat_map(|r| r.iter())
    }

    /// Total codepoints (overlapping ranges count twice).
    pub fn codepoint_count(&self) -> usize {
        self.ranges.iter().map(|r| r.count() as usize).sum()
    }
}

fn parse_token(token: &str) -> Result<CodepointRange> {
    let err = |reason: &str| ConvertError::RangeParse {
        token: token.to_owned(),
        reason: reason.to_owned(),
    };
    match token.split_once('-') {
        Some((start, end)) => {
            let start = parse_value(start).ok_or_else(|| err("bad range start"))?;
            let end = parse_value(end).ok_or_else(|| err("bad range end"))?;
            if end < start {
                return Err(err("range end is below range start"));
            }
            CodepointRange::new(start, end).ok_or_else(|| err("beyond U+10FFFF"))
        }
        None => {
            let cp = parse_value(token).ok_or_else(|| err("bad codepoint"))?;
            CodepointRange::single(cp).ok_or_else(|| err("beyond U+10FFFF"))
        }
    }
}

/// Accepts `0x`/`U+` prefixed hex, `0o`, `0b`, or plain decimal.
fn parse_value(s: &str) -> Option<u32> {
    let s = s.trim();
    let (digits, radix) = if let Some(h) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        (h, 16)
    } else if let Some(h) = s.strip_prefix("U+").or_else(|| s.strip_prefix("u+")) {
        (h, 16)
    } else if let Some(o) = s.strip_prefix("0o") {
        (o, 8)
    } else if let Some(b) = s.strip_prefix("0b") {
        (b, 2)
    } else {
        (s, 10)
    };
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, radix).ok()
}

/// Whether a face can render a codepoint.
pub trait GlyphCoverage {
    fn has_glyph(&self, codepoint: u32) -> bool;
}

/// What to do when a requested codepoint has no glyph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strictness {
    /// Refuse to convert until every codepoint is covered.
    Strict,
    /// Convert anyway; missing glyphs become empty boxes.
    #[default]
    Lenient,
}

/// Coverage of one range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeCoverage {
    pub range: CodepointRange,
    pub missing: Vec<u32>,
}

impl RangeCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

impl fmt::Display for RangeCoverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.missing.is_empty() {
            return write!(f, "Range {} fully supported.", self.range);
        }
        write!(f, "Range {} missing: ", self.range)?;
        for (i, cp) in self.missing.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{cp:#x}")?;
        }
        Ok(())
    }
}

/// Per-range coverage of a whole block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub ranges: Vec<RangeCoverage>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.ranges.iter().all(RangeCoverage::is_complete)
    }

    /// First missing codepoint, if any.
    pub fn first_missing(&self) -> Option<u32> {
        self.ranges.iter().find_map(|r| r.missing.first().copied())
    }

    /// Apply a strictness policy. Strict mode turns the first gap into an error.
    pub fn enforce(&self, strictness: Strictness, font: &str) -> Result<()> {
        match (strictness, self.first_missing()) {
            (Strictness::Strict, Some(codepoint)) => Err(ConvertError::UnsupportedCodepoint {
                font: font.to_owned(),
                codepoint,
            }),
            _ => Ok(()),
        }
    }
}

/// Query `face` for every codepoint in `set`.
pub fn check_coverage<F: GlyphCoverage + ?Sized>(set: &RangeSet, face: &F) -> CoverageReport {
    let ranges = set
        .ranges()
        .iter()
        .map(|&range| RangeCoverage {
            range,
            missing: range.iter().filter(|&cp| !face.has_glyph(cp)).collect(),
        })
        .collect();
    CoverageReport { ranges }
}
