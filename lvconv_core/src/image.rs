//! Image pixel encoder: RGBA raster to one of LVGL's color formats.

use std::fmt;
use std::str::FromStr;

use crate::error::{ConvertError, Result};
use crate::pack;

/// Target color format of an image array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgb888,
    Rgb565,
    Rgb565A8,
    Xrgb8888,
    Argb8888,
}

impl PixelFormat {
    pub const ALL: [Self; 5] = [
        Self::Rgb888,
        Self::Rgb565,
        Self::Rgb565A8,
        Self::Xrgb8888,
        Self::Argb8888,
    ];

    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgb565 => 2,
            Self::Rgb888 | Self::Rgb565A8 => 3,
            Self::Xrgb8888 | Self::Argb8888 => 4,
        }
    }

    /// Token used in job files and in the LVGL enum name.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Rgb888 => "RGB888",
            Self::Rgb565 => "RGB565",
            Self::Rgb565A8 => "RGB565A8",
            Self::Xrgb8888 => "XRGB8888",
            Self::Argb8888 => "ARGB8888",
        }
    }

    /// `lv_color_format_t` constant for the descriptor header.
    pub const fn lvgl_name(self) -> &'static str {
        match self {
            Self::Rgb888 => "LV_COLOR_FORMAT_RGB888",
            Self::Rgb565 => "LV_COLOR_FORMAT_RGB565",
            Self::Rgb565A8 => "LV_COLOR_FORMAT_RGB565A8",
            Self::Xrgb8888 => "LV_COLOR_FORMAT_XRGB8888",
            Self::Argb8888 => "LV_COLOR_FORMAT_ARGB8888",
        }
    }
}

impl FromStr for PixelFormat {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        let wanted = wanted.strip_prefix("LV_COLOR_FORMAT_").unwrap_or(wanted);
        Self::ALL
            .into_iter()
            .find(|f| f.token().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ConvertError::UnsupportedFormat(s.to_owned()))
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Byte order of the three color channels in RGB888 output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

impl FromStr for ChannelOrder {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(Self::Rgb),
            "bgr" => Ok(Self::Bgr),
            _ => Err(ConvertError::UnsupportedFormat(format!("channel order {s}"))),
        }
    }
}

/// A decoded raster: row-major RGBA, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl DecodedImage {
    /// Wrap RGBA samples. Returns `None` if the buffer does not hold exactly
    /// `width * height` pixels or a dimension is zero.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (width > 0 && height > 0 && rgba.len() == expected).then_some(Self { width, height, rgba })
    }

    /// Solid-color image, mostly for tests. Same dimension rules as [`Self::new`].
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Option<Self> {
        let count = (width as usize).checked_mul(height as usize)?;
        Self::new(width, height, rgba.repeat(count))
    }

    pub const fn width(&self) -> u32 {
        self.width
    }

    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterate pixels as `[r, g, b, a]` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.rgba
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Raw row-major RGBA samples.
    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }
}

/// Element storage of an encoded array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    Bytes(Vec<u8>),
    Words(Vec<u16>),
}

/// The encoded pixel array plus what the emitter needs to print it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPixelBuffer {
    pub format: PixelFormat,
    pub width: u32,
    pub height: u32,
    pub data: PixelData,
}

impl EncodedPixelBuffer {
    /// C element type of the array.
    pub const fn element_type(&self) -> &'static str {
        match self.data {
            PixelData::Bytes(_) => "uint8_t",
            PixelData::Words(_) => "uint16_t",
        }
    }

    /// Hex digits per element token.
    pub const fn hex_digits(&self) -> usize {
        match self.data {
            PixelData::Bytes(_) => 2,
            PixelData::Words(_) => 4,
        }
    }

    /// Number of array elements.
    pub fn len(&self) -> usize {
        match &self.data {
            PixelData::Bytes(b) => b.len(),
            PixelData::Words(w) => w.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `w*h*bytes_per_pixel`, the descriptor's `data_size`.
    pub fn data_size(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_pixel()
    }

    /// Elements widened to `u32` for the hex emitter.
    pub fn elements(&self) -> Vec<u32> {
        match &self.data {
            PixelData::Bytes(b) => b.iter().map(|&v| u32::from(v)).collect(),
            PixelData::Words(w) => w.iter().map(|&v| u32::from(v)).collect(),
        }
    }
}

/// Encode `image` into `format`. `order` only affects RGB888.
pub fn encode_image(image: &DecodedImage, format: PixelFormat, order: ChannelOrder) -> EncodedPixelBuffer {
    let n = image.pixel_count();
    let data = match format {
        PixelFormat::Rgb565 => PixelData::Words(
            image
                .pixels()
                .map(|[r, g, b, _]| pack::rgb565_swapped(r, g, b))
                .collect(),
        ),
        PixelFormat::Rgb888 => {
            let mut out = Vec::with_capacity(n * 3);
            for [r, g, b, _] in image.pixels() {
                match order {
                    ChannelOrder::Rgb => out.extend_from_slice(&[r, g, b]),
                    ChannelOrder::Bgr => out.extend_from_slice(&[b, g, r]),
                }
            }
            PixelData::Bytes(out)
        }
        PixelFormat::Rgb565A8 => {
            let mut out = Vec::with_capacity(n * 3);
            for [r, g, b, a] in image.pixels() {
                out.extend_from_slice(&pack::rgb565a8(r, g, b, a));
            }
            PixelData::Bytes(out)
        }
        PixelFormat::Xrgb8888 => {
            let mut out = Vec::with_capacity(n * 4);
            for [r, g, b, _] in image.pixels() {
                out.extend_from_slice(&[0, r, g, b]);
            }
            PixelData::Bytes(out)
        }
        PixelFormat::Argb8888 => {
            let mut out = Vec::with_capacity(n * 4);
            for [r, g, b, a] in image.pixels() {
                out.extend_from_slice(&[a, r, g, b]);
            }
            PixelData::Bytes(out)
        }
    };
    let encoded = EncodedPixelBuffer {
        format,
        width: image.width(),
        height: image.height(),
        data,
    };
    log::debug!(
        "encoded {}x{} image as {format} ({} elements)",
        encoded.width,
        encoded.height,
        encoded.len()
    );
    encoded
}

/// Parse a format token and encode, rejecting unknown tokens before any work.
pub fn encode_image_token(image: &DecodedImage, format: &str, order: ChannelOrder) -> Result<EncodedPixelBuffer> {
    let format = format.parse::<PixelFormat>()?;
    Ok(encode_image(image, format, order))
}
