use std::path::Path;

use lvconv_core::error::ConvertError;

use super::{target_path, unique_path, write_source};

#[test]
fn collisions_get_numbered_suffixes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.c");

    let first = write_source(&path, "a").unwrap();
    let second = write_source(&path, "b").unwrap();
    let third = write_source(&path, "c").unwrap();

    assert_eq!(first, path);
    assert_eq!(second, dir.path().join("logo(1).c"));
    assert_eq!(third, dir.path().join("logo(2).c"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a");
    assert_eq!(std::fs::read_to_string(&third).unwrap(), "c");
}

#[test]
fn free_path_is_used_as_is() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.c");
    assert_eq!(unique_path(&path), path);
}

#[test]
fn nested_output_dir_is_created() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("deep").join("f.c");
    assert_eq!(write_source(&path, "x").unwrap(), path);
}

#[test]
fn unwritable_target_is_an_output_error() {
    let dir = tempfile::tempdir().unwrap();
    // A regular file where a directory is expected.
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let err = write_source(&blocker.join("f.c"), "x").unwrap_err();
    assert!(matches!(err, ConvertError::OutputWrite { .. }));
}

#[test]
fn target_defaults_to_input_directory() {
    let input = Path::new("assets/img/logo.png");
    assert_eq!(target_path(None, input, "logo"), Path::new("assets/img/logo.c"));
    assert_eq!(
        target_path(Some(Path::new("out")), input, "logo"),
        Path::new("out/logo.c")
    );
}
