//! Storage traits
//!
//! The crawl loop only needs two things from storage: whether a mirrored file
//! already exists, and a way to write one.

use crate::StorageError;
use std::path::Path;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for the local side of a mirror
///
/// Implementations own directory creation; the scheduler hands over a full
/// path and the bytes to put there.
pub trait ResourceStore {
    /// Returns true if a resource was already stored at `path`
    fn exists(&self, path: &Path) -> bool;

    /// Writes `bytes` to `path`, creating intermediate directories
    fn write(&mut self, path: &Path, bytes: &[u8]) -> StorageResult<()>;
}
