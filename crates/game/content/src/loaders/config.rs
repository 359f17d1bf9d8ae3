//! Combat tuning loader.

use std::path::Path;

use game_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for combat tuning from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`CombatConfig`] from a TOML file.
    ///
    /// Missing keys keep their default values.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        anyhow::ensure!(
            (0.0..=1.0).contains(&config.transform_life_fraction),
            "transform_life_fraction must be within [0, 1], got {}",
            config.transform_life_fraction
        );
        anyhow::ensure!(
            config.protect_physical_multiplier >= 0.0,
            "protect_physical_multiplier must not be negative"
        );

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("defend_duration = 1.0\nprotect_charges = 5\n").unwrap();
        assert_eq!(config.defend_duration, 1.0);
        assert_eq!(config.protect_charges, 5);
        assert_eq!(
            config.attack_impact_delay,
            CombatConfig::DEFAULT_ATTACK_IMPACT_DELAY
        );
    }

    #[test]
    fn out_of_range_fraction_is_rejected() {
        let err = ConfigLoader::parse("transform_life_fraction = 1.5").unwrap_err();
        assert!(err.to_string().contains("transform_life_fraction"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/config.toml"));
    }
}
