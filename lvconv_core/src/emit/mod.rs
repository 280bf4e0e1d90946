//! Textual emitter: renders encoded assets as LVGL C source.
//!
//! The output is plain text. Writing it to disk (and picking a file name
//! that does not clobber an existing one) is the caller's business.

mod font;
mod image;

use std::fmt::Write as _;

pub use font::font_source;
pub use image::image_source;

/// Elements per line in image pixel arrays.
pub const IMAGE_LINE_WIDTH: usize = 5760;

/// Elements per line in glyph bitmap arrays.
pub const GLYPH_LINE_WIDTH: usize = 12;

/// Case of the hex digits in `0x..` tokens. The `0x` prefix is always lowercase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HexCase {
    #[default]
    Upper,
    Lower,
}

/// Render `values` as `0x..` tokens, `per_line` to a line.
///
/// Tokens within a line are joined by `", "`, lines by `",\n"`. There is no
/// trailing separator. `digits` is the zero-padded width of each token.
pub fn format_hex_array(values: &[u32], digits: usize, per_line: usize, case: HexCase) -> String {
    let per_line = per_line.max(1);
    let mut out = String::with_capacity(values.len() * (digits + 4));
    for (i, chunk) in values.chunks(per_line).enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        for (j, &v) in chunk.iter().enumerate() {
            if j > 0 {
                out.push_str(", ");
            }
            push_hex(&mut out, v, digits, case);
        }
    }
    out
}

fn push_hex(out: &mut String, v: u32, digits: usize, case: HexCase) {
    // Writing to a String cannot fail.
    let _ = match case {
        HexCase::Upper => write!(out, "0x{v:0digits$X}"),
        HexCase::Lower => write!(out, "0x{v:0digits$x}"),
    };
}

/// Turn arbitrary text into a C identifier.
///
/// Anything outside `[A-Za-z0-9_]` becomes `_`; a leading digit (or an empty
/// result) gets a `_` prefix.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Enable macro wrapping a font definition: the sanitized name uppercased
/// with a `_FONT_ENABLE` suffix, so it never equals the font's identifier.
pub fn guard_macro(name: &str) -> String {
    format!("{}_FONT_ENABLE", sanitize_identifier(name).to_ascii_uppercase())
}

#[cfg(test)]
mod tests;
