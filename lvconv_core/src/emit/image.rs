//! `lv_image_dsc_t` source files.

use std::fmt::Write as _;

use super::{HexCase, IMAGE_LINE_WIDTH, format_hex_array, sanitize_identifier};
use crate::image::EncodedPixelBuffer;

const PREAMBLE: &str = "\
#ifdef __has_include
#  if __has_include(\"lvgl.h\")
#    ifndef LV_LVGL_H_INCLUDE_SIMPLE
#      define LV_LVGL_H_INCLUDE_SIMPLE
#    endif
#  endif
#endif
#if defined(LV_LVGL_H_INCLUDE_SIMPLE)
#  include \"lvgl.h\"
#else
#  include \"lvgl/lvgl.h\"
#endif
#ifndef LV_ATTRIBUTE_MEM_ALIGN
#define LV_ATTRIBUTE_MEM_ALIGN
#endif
";

/// Render `buffer` as a C source defining `<name>_map[]` and the image
/// descriptor `<name>`.
pub fn image_source(name: &str, buffer: &EncodedPixelBuffer, case: HexCase) -> String {
    let name = sanitize_identifier(name);
    let array = format_hex_array(&buffer.elements(), buffer.hex_digits(), IMAGE_LINE_WIDTH, case);
    let pixels = buffer.width as usize * buffer.height as usize;

    let mut out = String::with_capacity(PREAMBLE.len() + array.len() + 512);
    out.push_str(PREAMBLE);
    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "#ifndef LV_ATTRIBUTE_IMAGE_{name}\n\
         #define LV_ATTRIBUTE_IMAGE_{name}\n\
         #endif\n\
         const LV_ATTRIBUTE_MEM_ALIGN LV_ATTRIBUTE_LARGE_CONST LV_ATTRIBUTE_IMAGE_{name} {ty} {name}_map[] = {{\n\
         {array}\n\
         }};\n\
         const lv_image_dsc_t {name} = {{\n\
         \x20 .header.cf = {cf},\n\
         \x20 .header.magic = LV_IMAGE_HEADER_MAGIC,\n\
         \x20 .header.w = {w},\n\
         \x20 .header.h = {h},\n\
         \x20 .data_size = {pixels} * {bpp},\n\
         \x20 .data = {name}_map,\n\
         }};\n",
        ty = buffer.element_type(),
        cf = buffer.format.lvgl_name(),
        w = buffer.width,
        h = buffer.height,
        bpp = buffer.format.bytes_per_pixel(),
    );
    out
}

#[cfg(test)]
mod tests;
