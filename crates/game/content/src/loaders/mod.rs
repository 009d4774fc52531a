//! Content loaders for reading progression data from files.
//!
//! Each loader parses one file format into core types and validates the
//! result. [`ContentFactory`] resolves the conventional file names inside a
//! data directory.

pub mod catalog;
pub mod config;
pub mod factory;
pub mod rarity;
pub mod stats;

pub use catalog::CatalogLoader;
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use rarity::RarityLoader;
pub use stats::{StatPresetLoader, StatPresets};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
