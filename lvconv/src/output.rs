//! Writing generated sources without clobbering existing files.

use std::path::{Path, PathBuf};

use lvconv_core::error::{ConvertError, Result};

/// First free path among `path`, `stem(1).ext`, `stem(2).ext`, ...
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (1u32..)
        .map(|n| path.with_file_name(format!("{stem}({n}){ext}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Where the source for asset `name` goes: `dir` if given, otherwise
/// next to `input`.
pub fn target_path(dir: Option<&Path>, input: &Path, name: &str) -> PathBuf {
    let dir = dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    dir.join(format!("{name}.c"))
}

/// Write `text` to a free variant of `path` and return the path used.
///
/// The parent directory is created if needed.
pub fn write_source(path: &Path, text: &str) -> Result<PathBuf> {
    let write_err = |path: &Path, source| ConvertError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|e| write_err(dir, e))?;
    }
    let target = unique_path(path);
    std::fs::write(&target, text).map_err(|e| write_err(&target, e))?;
    log::info!("wrote {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests;
