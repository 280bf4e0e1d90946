//! `lv_font_t` source files in the `lv_font_fmt_txt` layout.

use std::fmt::Write as _;

use super::{GLYPH_LINE_WIDTH, HexCase, format_hex_array, guard_macro, sanitize_identifier};
use crate::font::{CmapKind, EncodedFont};

const RULE: &str = "*******************************************************************************";

/// Render `font` as a C source defining the public `lv_font_t`.
pub fn font_source(font: &EncodedFont, case: HexCase) -> String {
    let name = sanitize_identifier(&font.name);
    let guard = guard_macro(&font.name);
    let mut out = String::with_capacity(font.bitmap.len() * 6 + 4096);
    // Writing to a String cannot fail, so results below are ignored.
    let _ = write_banner(&mut out, font);
    out.push_str("#ifdef LV_LVGL_H_INCLUDE_SIMPLE\n\n#include \"lvgl.h\"\n\n#else\n\n#include \"lvgl/lvgl.h\"\n\n#endif\n\n");
    let _ = write!(out, "#ifndef {guard}\n#define {guard} 1\n#endif\n\n#if {guard}\n\n");
    let _ = write_bitmaps(&mut out, font, case);
    let _ = write_descriptors(&mut out, font);
    let _ = write_cmaps(&mut out, font);
    let _ = write!(
        out,
        "{}static lv_font_fmt_txt_dsc_t font_dsc = {{\n\
         \x20   .glyph_bitmap = glyph_bitmap,\n\
         \x20   .glyph_dsc = glyph_dsc,\n\
         \x20   .cmaps = cmaps,\n\
         \x20   .cmap_num = {},\n\
         \x20   .bpp = {},\n\
         \x20   .kern_dsc = NULL,\n\
         \x20   .kern_scale = 0,\n\
         \x20   .kern_classes = 0,\n\
         \x20   .bitmap_format = 0\n\
         }};\n\n",
        section("FONT DESCRIPTION"),
        font.cmaps.len(),
        font.bpp.bits(),
    );
    let _ = write!(
        out,
        "{}lv_font_t {name} = {{\n\
         \x20   .get_glyph_dsc = lv_font_get_glyph_dsc_fmt_txt,\n\
         \x20   .get_glyph_bitmap = lv_font_get_bitmap_fmt_txt,\n\
         \x20   .line_height = {},\n\
         \x20   .base_line = {},\n\
         \x20   .dsc = &font_dsc\n\
         }};\n\n\
         #endif /* {guard} */\n",
        section("PUBLIC FONT"),
        font.line_height,
        font.base_line,
    );
    out
}

fn section(title: &str) -> String {
    format!("/*-----------------\n\n* {title}\n\n*----------------*/\n\n")
}

fn write_banner(out: &mut String, font: &EncodedFont) -> std::fmt::Result {
    let bpp = font.bpp.bits();
    write!(out, "/{RULE}\n\n* Size: {} px\n\n* Bpp: {bpp}\n\n* Opts:", font.px_size)?;
    for (source, report) in font.sources.iter().zip(&font.coverage) {
        write!(out, " --font {source}")?;
        for range in &report.ranges {
            write!(out, " --range {range}")?;
        }
    }
    write!(
        out,
        " --size {} --bpp {bpp} --no-compress --format lvgl\n\n{RULE}/\n\n",
        font.px_size
    )
}

fn write_bitmaps(out: &mut String, font: &EncodedFont, case: HexCase) -> std::fmt::Result {
    out.push_str(&section("BITMAPS"));
    out.push_str("/*Store the image of the glyphs*/\n\n");
    out.push_str("static LV_ATTRIBUTE_LARGE_CONST const uint8_t glyph_bitmap[] = {\n");
    for glyph in &font.glyphs {
        match comment_char(glyph.codepoint) {
            Some(c) => write!(out, "\n/* U+{:04X} \"{c}\" */\n\n", glyph.codepoint)?,
            None => write!(out, "\n/* U+{:04X} */\n\n", glyph.codepoint)?,
        }
        let bytes: Vec<u32> = font.glyph_bitmap(glyph).iter().map(|&b| u32::from(b)).collect();
        for line in bytes.chunks(GLYPH_LINE_WIDTH) {
            writeln!(out, "    {},", format_hex_array(line, 2, GLYPH_LINE_WIDTH, case))?;
        }
    }
    out.push_str("};\n\n");
    Ok(())
}

/// The glyph's character as it appears inside the `/* ... */` label.
/// `None` for control characters and non-scalar values.
fn comment_char(codepoint: u32) -> Option<String> {
    match char::from_u32(codepoint)? {
        '"' => Some("\\\"".to_owned()),
        '\\' => Some("\\\\".to_owned()),
        c if c.is_control() => None,
        c => Some(c.to_string()),
    }
}

fn write_descriptors(out: &mut String, font: &EncodedFont) -> std::fmt::Result {
    out.push_str(&section("GLYPH DESCRIPTION"));
    out.push_str("static const lv_font_fmt_txt_glyph_dsc_t glyph_dsc[] = {\n");
    for d in font.descriptor_table() {
        writeln!(
            out,
            "    {{.bitmap_index = {}, .adv_w = {}, .box_w = {}, .box_h = {}, .ofs_x = {}, .ofs_y = {}}},",
            d.bitmap_index, d.adv_w, d.box_w, d.box_h, d.ofs_x, d.ofs_y
        )?;
    }
    out.push_str("};\n\n");
    Ok(())
}

fn write_cmaps(out: &mut String, font: &EncodedFont) -> std::fmt::Result {
    out.push_str(&section("CHARACTER MAPPING"));
    for (i, cmap) in font.cmaps.iter().enumerate() {
        if cmap.kind == CmapKind::SparseTiny {
            let offsets: Vec<String> = cmap.unicode_list.iter().map(|o| format!("0x{o:x}")).collect();
            writeln!(out, "static const uint16_t unicode_list_{i}[] = {{")?;
            for line in offsets.chunks(GLYPH_LINE_WIDTH) {
                writeln!(out, "    {},", line.join(", "))?;
            }
            out.push_str("};\n\n");
        }
    }
    out.push_str("static const lv_font_fmt_txt_cmap_t cmaps[] = {\n");
    for (i, cmap) in font.cmaps.iter().enumerate() {
        let (list, len) = match cmap.kind {
            CmapKind::Format0Tiny => ("NULL".to_owned(), 0),
            CmapKind::SparseTiny => (format!("unicode_list_{i}"), cmap.unicode_list.len()),
        };
        let sep = if i + 1 < font.cmaps.len() { "," } else { "" };
        write!(
            out,
            "    {{\n\
             \x20       .range_start = {},\n\
             \x20       .range_length = {},\n\
             \x20       .glyph_id_start = {},\n\
             \x20       .unicode_list = {list},\n\
             \x20       .glyph_id_ofs_list = NULL,\n\
             \x20       .list_length = {len},\n\
             \x20       .type = {}\n\
             \x20   }}{sep}\n",
            cmap.range_start,
            cmap.range_length,
            cmap.glyph_id_start,
            cmap.kind.lvgl_name(),
        )?;
    }
    out.push_str("};\n\n");
    Ok(())
}
