use crate::storage::traits::{ResourceStore, StorageResult};
use crate::StorageError;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-backed resource store rooted at the mirror directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Creates a store that only accepts paths under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceStore for FsStore {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        if !path.starts_with(&self.root) || path.file_name().is_none() {
            return Err(StorageError::InvalidPath(path.display().to_string()));
        }

        let io_err = |source| StorageError::Io {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, bytes).map_err(io_err)?;

        tracing::trace!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}
