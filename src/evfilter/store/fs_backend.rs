use super::backend::StorageBackend;
use crate::error::{EvError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Stores each blob as `<root>/<name>.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(EvError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self, name: &str) -> Result<Option<String>> {
        let path = self.blob_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(EvError::Io)?;
        Ok(Some(content))
    }

    fn save(&self, name: &str, blob: &str) -> Result<()> {
        self.ensure_dir()?;

        let tmp_path = self.root.join(format!(".{}-{}.tmp", name, Uuid::new_v4()));
        fs::write(&tmp_path, blob).map_err(EvError::Io)?;
        fs::rename(&tmp_path, self.blob_path(name)).map_err(EvError::Io)?;
        Ok(())
    }
}
