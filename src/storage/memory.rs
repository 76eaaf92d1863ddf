use crate::storage::traits::{ResourceStore, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// In-memory resource store
///
/// Keeps every write in a map and counts write calls, which makes it handy
/// for checking what a crawl would have mirrored without touching disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    files: HashMap<PathBuf, Vec<u8>>,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `path` as already present without counting a write
    pub fn preload(&mut self, path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn get(&self, path: &Path) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Number of `write` calls made
    pub fn write_count(&self) -> usize {
        self.writes
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.keys()
    }
}

impl ResourceStore for MemoryStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> StorageResult<()> {
        self.writes += 1;
        self.files.insert(path.to_path_buf(), bytes.to_vec());
        Ok(())
    }
}
