//! Job file I/O.

use std::path::{Path, PathBuf};

use lvconv_core::error::{ConvertError, Result};

use super::JobConfig;

/// Job file read when none is named on the command line.
pub const DEFAULT_JOB_FILE: &str = "lvconv.toml";

/// `lvconv.toml` in the current directory.
pub fn default_job_path() -> PathBuf {
    PathBuf::from(DEFAULT_JOB_FILE)
}

impl JobConfig {
    /// Read, parse and validate the job file at `path`.
    ///
    /// Relative asset paths are resolved against the job file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ConvertError::Config(format!("failed to read {}: {e}", path.display())))?;
        let mut job = Self::parse(&data).map_err(|e| match e {
            ConvertError::Config(msg) => ConvertError::Config(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            job.rebase(base);
        }
        Ok(job)
    }

    /// Parse and validate job text.
    pub fn parse(text: &str) -> Result<Self> {
        let job: Self = toml::from_str(text).map_err(|e| ConvertError::Config(e.to_string()))?;
        job.validate()?;
        Ok(job)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConvertError::Config(e.to_string()))
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        if let Some(dir) = self.output.dir.as_mut() {
            join(dir);
        }
        for image in &mut self.image {
            join(&mut image.path);
        }
        for source in self.font.iter_mut().flat_map(|f| f.source.iter_mut()) {
            join(&mut source.path);
        }
    }
}
