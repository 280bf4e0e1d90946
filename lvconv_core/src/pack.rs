//! Bit-packing primitives for pixel words and glyph coverage rows.
//!
//! Color helpers quantize 8-bit channels into the 16-bit layouts LVGL reads.
//! Coverage helpers pack one glyph row at a time into 1/2/4/8 bits per sample,
//! MSB first, padding every row to a whole byte so rows never share a byte.

/// Pack 8-bit channels into native RGB565 (`RRRRRGGG GGGBBBBB`).
pub const fn rgb565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 >> 3) << 11) | ((g as u16 >> 2) << 5) | (b as u16 >> 3)
}

/// RGB565 with its two bytes swapped, the word order LVGL expects in arrays.
pub const fn rgb565_swapped(r: u8, g: u8, b: u8) -> u16 {
    rgb565(r, g, b).swap_bytes()
}

/// One RGB565A8 pixel: swapped color word in little-endian memory order,
/// then the raw alpha byte.
pub const fn rgb565a8(r: u8, g: u8, b: u8, a: u8) -> [u8; 3] {
    let [lo, hi] = rgb565_swapped(r, g, b).to_le_bytes();
    [lo, hi, a]
}

/// Split a native RGB565 word back into its 5/6/5-bit channel fields.
pub const fn unpack_rgb565(word: u16) -> (u8, u8, u8) {
    (
        ((word >> 11) & 0x1F) as u8,
        ((word >> 5) & 0x3F) as u8,
        (word & 0x1F) as u8,
    )
}

/// Expand 5/6/5-bit channel fields to 8 bits by bit replication.
pub const fn expand_rgb565(word: u16) -> (u8, u8, u8) {
    let (r, g, b) = unpack_rgb565(word);
    ((r << 3) | (r >> 2), (g << 2) | (g >> 4), (b << 3) | (b >> 2))
}

/// Bits used to store one glyph coverage sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bpp {
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl Bpp {
    /// Parse a bit depth. Only depths that keep samples byte-aligned are accepted.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            4 => Some(Self::Four),
            8 => Some(Self::Eight),
            _ => None,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Packed byte length of one row of `width` samples.
    pub const fn row_bytes(self, width: usize) -> usize {
        (width * self.bits() as usize).div_ceil(8)
    }

    /// Packed byte length of a `width` x `height` bitmap.
    pub const fn packed_size(self, width: usize, height: usize) -> usize {
        self.row_bytes(width) * height
    }

    /// Reduce an 8-bit coverage sample to this depth, rounding to nearest.
    ///
    /// 1bpp thresholds at half coverage.
    pub const fn quantize(self, sample: u8) -> u8 {
        let s = sample as u16;
        match self {
            Self::One => (sample >= 0x80) as u8,
            Self::Two => ((s + 42) / 85) as u8,
            Self::Four => ((s + 8) / 17) as u8,
            Self::Eight => sample,
        }
    }
}

/// Append one packed row to `out`.
///
/// Samples fill each byte from the most significant bits down; a partially
/// filled trailing byte keeps zeros in its low bits.
pub fn pack_row(bpp: Bpp, row: &[u8], out: &mut Vec<u8>) {
    if bpp == Bpp::Eight {
        out.extend_from_slice(row);
        return;
    }
    let bits = bpp.bits() as usize;
    let per_byte = 8 / bits;
    for chunk in row.chunks(per_byte) {
        let mut byte = 0u8;
        for (i, &sample) in chunk.iter().enumerate() {
            let shift = 8 - bits * (i + 1);
            byte |= bpp.quantize(sample) << shift;
        }
        out.push(byte);
    }
}

/// Pack a row-major coverage bitmap into `out`, returning the bytes written.
///
/// `coverage` must hold at least `width * height` samples.
pub fn pack_bitmap(bpp: Bpp, width: usize, height: usize, coverage: &[u8], out: &mut Vec<u8>) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    let start = out.len();
    out.reserve(bpp.packed_size(width, height));
    for row in coverage.chunks_exact(width).take(height) {
        pack_row(bpp, row, out);
    }
    out.len() - start
}
