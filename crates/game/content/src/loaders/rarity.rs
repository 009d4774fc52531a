//! Rarity weight loader.

use std::path::Path;

use progression_core::RarityWeights;

use crate::loaders::{LoadResult, read_file};

/// Loader for offer rarity weights from RON files.
pub struct RarityLoader;

impl RarityLoader {
    /// Load and validate rarity weights from a RON file.
    pub fn load(path: &Path) -> LoadResult<RarityWeights> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid rarity weights {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<RarityWeights> {
        let weights: RarityWeights = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse rarity weights RON: {}", e))?;
        weights.validate()?;
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use progression_core::Rarity;

    use super::*;

    #[test]
    fn parses_weight_table() {
        let weights = RarityLoader::parse(
            r#"(
                weights: { Common: 60.0, Uncommon: 25.0, Rare: 12.0, Epic: 3.0 },
                favor_upgrades: true,
                upgrade_multiplier: 2.0,
            )"#,
        )
        .unwrap();
        assert_eq!(weights.weight_of(Rarity::Rare), 12.0);
        assert_eq!(weights.weight_of(Rarity::Legendary), 0.0);
        assert!(weights.favor_upgrades);
    }

    #[test]
    fn rejects_negative_weight() {
        let err = RarityLoader::parse("(weights: { Common: -1.0 })").unwrap_err();
        assert!(err.to_string().contains("non-positive"), "{err}");
    }
}
