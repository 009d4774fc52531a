//! Progression configuration loader.

use std::path::Path;

use progression_core::ProgressionConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for progression configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<ProgressionConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<ProgressionConfig> {
        let config: ProgressionConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use progression_core::ValidationError;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            offer_count = 4

            [level_curve]
            base = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.offer_count, 4);
        assert_eq!(config.level_curve.base, 8);
        assert_eq!(config.level_curve.growth, 1.25);
        assert_eq!(
            config.periodic_interval,
            ProgressionConfig::DEFAULT_PERIODIC_INTERVAL
        );
    }

    #[test]
    fn rejects_non_positive_interval() {
        assert!(ConfigLoader::parse("periodic_interval = 0.0").is_err());
    }

    #[test]
    fn rejects_values_that_stall_progression() {
        for content in [
            "periodic_interval = nan",
            "periodic_interval = inf",
            "offer_count = 0",
            "max_pending_level_ups = 0",
            "[level_curve]\ngrowth = nan",
            "[level_curve]\ngrowth = -1.0",
        ] {
            let err = ConfigLoader::parse(content).unwrap_err();
            assert!(
                err.downcast_ref::<ValidationError>().is_some(),
                "{content}: {err}"
            );
        }
    }
}
