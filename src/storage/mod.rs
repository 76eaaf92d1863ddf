//! Storage module for persisting mirrored resources
//!
//! This module handles writing fetched bytes to the local mirror:
//! - The `ResourceStore` trait the scheduler writes through
//! - A filesystem implementation that creates directories on demand
//! - An in-memory implementation, mostly for tests

mod fs;
mod memory;
mod traits;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use traits::{ResourceStore, StorageResult};
