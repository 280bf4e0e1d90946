use super::{HexCase, format_hex_array, guard_macro, sanitize_identifier};

#[test]
fn thirteen_bytes_wrap_at_twelve() {
    let values: Vec<u32> = (0..13).collect();
    let text = format_hex_array(&values, 2, 12, HexCase::Upper);
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].split(", ").count(), 12);
    assert!(lines[0].ends_with("0x0B,"));
    assert_eq!(lines[1], "0x0C");
}

#[test]
fn no_trailing_separator() {
    let text = format_hex_array(&[0xAB, 0x01], 2, 5760, HexCase::Upper);
    assert_eq!(text, "0xAB, 0x01");
    assert_eq!(format_hex_array(&[], 2, 12, HexCase::Upper), "");
}

#[test]
fn word_tokens_and_lower_case() {
    assert_eq!(format_hex_array(&[0x1F], 4, 8, HexCase::Upper), "0x001F");
    assert_eq!(format_hex_array(&[0xBEEF], 4, 8, HexCase::Lower), "0xbeef");
}

#[test]
fn identifiers_are_sanitized() {
    assert_eq!(sanitize_identifier("logo"), "logo");
    assert_eq!(sanitize_identifier("my-logo v2"), "my_logo_v2");
    assert_eq!(sanitize_identifier("8bit"), "_8bit");
    assert_eq!(sanitize_identifier(""), "_");
    assert_eq!(guard_macro("noto-sans 16"), "NOTO_SANS_16_FONT_ENABLE");
    assert_eq!(guard_macro("MY_FONT"), "MY_FONT_FONT_ENABLE");
}
