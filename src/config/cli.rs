use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Local file access for the CLI: reads the input table and writes the report.
#[derive(Debug, Clone)]
pub struct LocalFiles {
    base_path: PathBuf,
}

impl LocalFiles {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn read_to_string(&self, path: &str) -> Result<String> {
        let full_path = self.base_path.join(path);
        tracing::debug!("Reading input from {}", full_path.display());
        Ok(fs::read_to_string(full_path)?)
    }

    pub fn write(&self, path: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&full_path, data)?;
        Ok(full_path)
    }
}

impl Default for LocalFiles {
    fn default() -> Self {
        Self::new(Path::new("."))
    }
}
