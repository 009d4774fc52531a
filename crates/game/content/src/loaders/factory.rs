//! Content factory for loading progression content from data files.

use std::path::{Path, PathBuf};

use progression_core::{ProgressionConfig, RarityWeights, SkillCatalog};

use crate::loaders::{
    CatalogLoader, ConfigLoader, LoadResult, RarityLoader, StatPresetLoader, StatPresets,
};

/// Content factory that loads all progression content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── rarity.ron
/// └── stats.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load progression configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<ProgressionConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the skill catalog from `skills.ron`.
    pub fn load_catalog(&self) -> LoadResult<SkillCatalog> {
        CatalogLoader::load(&self.data_dir.join("skills.ron"))
    }

    /// Load offer rarity weights from `rarity.ron`.
    pub fn load_rarity_weights(&self) -> LoadResult<RarityWeights> {
        RarityLoader::load(&self.data_dir.join("rarity.ron"))
    }

    /// Load base stat presets from `stats.ron`.
    pub fn load_stat_presets(&self) -> LoadResult<StatPresets> {
        StatPresetLoader::load(&self.data_dir.join("stats.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let factory = ContentFactory::new(temp_dir.path());
        let err = factory.load_catalog().unwrap_err();
        assert!(err.to_string().contains("Failed to read file"), "{err}");
    }

    #[test]
    fn loads_bundled_data() {
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data");
        let factory = ContentFactory::new(data_dir);

        let catalog = factory.load_catalog().unwrap();
        assert!(!catalog.is_empty());
        factory.load_rarity_weights().unwrap();
        assert!(factory.load_stat_presets().unwrap().get("normal").is_some());
        factory.load_config().unwrap();
    }
}
