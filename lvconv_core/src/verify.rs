//! Reads a generated image source back into pixels.
//!
//! Only the parts the emitter writes are understood: the descriptor's
//! `.header.w`, `.header.h` and `.header.cf` fields and the hex tokens of the
//! first brace-delimited array in the file.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ConvertError, Result};
use crate::image::{ChannelOrder, DecodedImage, PixelFormat};
use crate::pack;

static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.header\.w\s*=\s*(\d+)").expect("width regex is valid"));
static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.header\.h\s*=\s*(\d+)").expect("height regex is valid"));
static FORMAT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.header\.cf\s*=\s*(\w+)").expect("format regex is valid"));
static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^}]*)\}").expect("array regex is valid"));
static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"0[xX]([0-9a-fA-F]+)").expect("hex regex is valid"));

/// Pixel array and header recovered from a generated source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    /// Array elements in file order (bytes, or words for RGB565).
    pub data: Vec<u32>,
}

/// Parse `text` as emitted by [`crate::emit::image_source`].
///
/// A missing `.header.cf` is read as RGB888.
pub fn parse_image_source(text: &str) -> Result<ParsedImage> {
    let width = header_field(&WIDTH_RE, text, "width")?;
    let height = header_field(&HEIGHT_RE, text, "height")?;
    let format = match FORMAT_RE.captures(text) {
        Some(caps) => caps[1].parse()?,
        None => PixelFormat::Rgb888,
    };
    let body = ARRAY_RE
        .captures(text)
        .ok_or_else(|| ConvertError::MalformedSource("no array literal".into()))?;
    let data = HEX_RE
        .captures_iter(&body[1])
        .map(|caps| {
            u32::from_str_radix(&caps[1], 16)
                .map_err(|_| ConvertError::MalformedSource(format!("bad hex token {}", &caps[0])))
        })
        .collect::<Result<Vec<_>>>()?;
    log::debug!("parsed {width}x{height} {format} source, {} elements", data.len());
    Ok(ParsedImage {
        width,
        height,
        format,
        data,
    })
}

fn header_field(re: &Regex, text: &str, what: &str) -> Result<u32> {
    let caps = re
        .captures(text)
        .ok_or_else(|| ConvertError::MalformedSource(format!("missing header {what}")))?;
    caps[1]
        .parse()
        .map_err(|_| ConvertError::MalformedSource(format!("bad header {what} {}", &caps[1])))
}

impl ParsedImage {
    /// Array elements one pixel occupies.
    const fn elements_per_pixel(&self) -> usize {
        match self.format {
            PixelFormat::Rgb565 => 1,
            f => f.bytes_per_pixel(),
        }
    }

    /// Rebuild RGBA pixels. `order` is only consulted for RGB888.
    ///
    /// RGB565 channels are widened by bit replication, so a round trip is
    /// exact only in the top 5/6/5 bits.
    pub fn to_rgba(&self, order: ChannelOrder) -> Result<DecodedImage> {
        let pixels = self.width as usize * self.height as usize;
        let per = self.elements_per_pixel();
        if self.data.len() != pixels * per {
            return Err(ConvertError::MalformedSource(format!(
                "{}x{} {} needs {} elements, found {}",
                self.width,
                self.height,
                self.format,
                pixels * per,
                self.data.len()
            )));
        }
        let mut rgba = Vec::with_capacity(pixels * 4);
        for px in self.data.chunks_exact(per) {
            // Bytes are stored as u32 but never exceed 0xFF; words never exceed 0xFFFF.
            let b = |i: usize| px[i] as u8;
            let rgba_px = match self.format {
                PixelFormat::Rgb888 => match order {
                    ChannelOrder::Rgb => [b(0), b(1), b(2), 0xFF],
                    ChannelOrder::Bgr => [b(2), b(1), b(0), 0xFF],
                },
                PixelFormat::Rgb565 => {
                    let (r, g, bl) = pack::expand_rgb565((px[0] as u16).swap_bytes());
                    [r, g, bl, 0xFF]
                }
                PixelFormat::Rgb565A8 => {
                    let word = u16::from_le_bytes([b(0), b(1)]).swap_bytes();
                    let (r, g, bl) = pack::expand_rgb565(word);
                    [r, g, bl, b(2)]
                }
                PixelFormat::Xrgb8888 => [b(1), b(2), b(3), 0xFF],
                PixelFormat::Argb8888 => [b(1), b(2), b(3), b(0)],
            };
            rgba.extend_from_slice(&rgba_px);
        }
        DecodedImage::new(self.width, self.height, rgba)
            .ok_or_else(|| ConvertError::MalformedSource("pixel buffer size mismatch".into()))
    }
}

#[cfg(test)]
mod tests;
