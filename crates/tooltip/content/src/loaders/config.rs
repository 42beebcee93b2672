//! Tooltip configuration loader.

use std::path::Path;

use tooltip_core::TooltipConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for tooltip configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`TooltipConfig::default`].
    pub fn load(path: &Path) -> LoadResult<TooltipConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TooltipConfig> {
        let config: TooltipConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("star_levels = 4\n").expect("config parses");
        assert_eq!(config.star_levels, 4);
        assert_eq!(
            config.icon_placeholder,
            TooltipConfig::ABILITY_ICON_PLACEHOLDER
        );
    }

    #[test]
    fn empty_config_is_default() {
        let config = ConfigLoader::parse("").expect("config parses");
        assert_eq!(config, TooltipConfig::default());
    }

    #[test]
    fn bad_types_are_rejected() {
        assert!(ConfigLoader::parse("star_levels = \"three\"").is_err());
    }
}
