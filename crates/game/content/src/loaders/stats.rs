//! Base stat preset loader.

use std::collections::BTreeMap;
use std::path::Path;

use progression_core::StatTable;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Named base stat tables, e.g. one per difficulty.
///
/// Each preset only lists the stats it changes from [`StatTable::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatPresets {
    presets: BTreeMap<String, StatTable>,
}

impl StatPresets {
    pub fn get(&self, name: &str) -> Option<StatTable> {
        self.presets.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Loader for base stat presets from RON files.
pub struct StatPresetLoader;

impl StatPresetLoader {
    /// Load and validate stat presets from a RON file.
    pub fn load(path: &Path) -> LoadResult<StatPresets> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid stat presets {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<StatPresets> {
        let presets: StatPresets = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse stat presets RON: {}", e))?;
        for (name, table) in &presets.presets {
            table
                .validate()
                .map_err(|e| anyhow::anyhow!("preset `{}`: {}", name, e))?;
        }
        Ok(presets)
    }
}
