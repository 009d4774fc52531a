//! Skill catalog loader.

use std::path::Path;

use progression_core::{SkillCatalog, SkillDefinition};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub skills: Vec<SkillDefinition>,
}

/// Loader for the skill catalog from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load and validate a skill catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<SkillCatalog> {
        let content = read_file(path)?;
        let catalog = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid skill catalog {}: {}", path.display(), e))?;
        debug!(path = %path.display(), skills = catalog.len(), "loaded skill catalog");
        Ok(catalog)
    }

    /// Parse and validate a skill catalog from RON text.
    pub fn parse(content: &str) -> LoadResult<SkillCatalog> {
        let file: CatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;
        let catalog = SkillCatalog::new(file.skills)?;
        Ok(catalog)
    }
}
