//! Content factory for building tooltips from data files.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tooltip_core::{
    AbilityRenderer, DamageType, StatTable, TooltipConfig, TraitTooltip, VariableTable,
    render_ability_tooltip_with, render_trait_tooltip,
};

use crate::loaders::{
    CharacterBin, CharacterLoader, CharacterRoles, ConfigLoader, LoadResult, StringTable,
    TraitLoader,
};

/// Rendered ability tooltip and classification of one character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChampionTooltip {
    pub character_id: String,
    pub spell: String,
    pub damage_type: DamageType,
    pub stats: StatTable,
    /// Data values and calculations the spell was rendered from.
    pub variables: VariableTable,
    /// Calculations that failed to evaluate and were left out of `spell`.
    pub failed_calculations: Vec<String>,
}

/// Content factory that loads tooltip inputs from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── strings.json
/// ├── characters.json
/// ├── traits.json
/// └── bins/
///     ├── TFT11_Ahri.json
///     └── TFT11_Garen.json
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

    /// Load tooltip configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<TooltipConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::debug!("{} not found, using default config", path.display());
            return Ok(TooltipConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the string table from `strings.json`.
    pub fn load_strings(&self) -> LoadResult<StringTable> {
        StringTable::load(&self.data_dir.join("strings.json"))
    }

    /// Load character and role records from `characters.json`.
    pub fn load_roles(&self) -> LoadResult<CharacterRoles> {
        CharacterRoles::load(&self.data_dir.join("characters.json"))
    }

    /// Load the bin export of one character from `bins/{character_id}.json`.
    pub fn load_character(&self, character_id: &str) -> LoadResult<CharacterBin> {
        let path = self
            .data_dir
            .join("bins")
            .join(format!("{}.json", character_id));
        CharacterLoader::load(&path)
    }

    /// Load the traits of `set_id` from `traits.json`, without unique traits.
    pub fn load_traits(&self, set_id: &str) -> LoadResult<Vec<TraitTooltip>> {
        let path = self.data_dir.join("traits.json");
        TraitLoader::load_set(&path, set_id)?
            .iter()
            .map(|document| {
                render_trait_tooltip(document).map_err(|e| {
                    anyhow::anyhow!("Failed to render trait {}: {}", document.trait_id, e)
                })
            })
            .collect()
    }

    /// Builds the ability tooltip of every character in `character_ids`.
    pub fn load_champions(&self, character_ids: &[&str]) -> LoadResult<Vec<ChampionTooltip>> {
        let renderer = AbilityRenderer::new(self.load_config()?);
        let strings = self.load_strings()?;
        let roles = self.load_roles()?;

        character_ids
            .iter()
            .map(|id| self.build_champion(id, &renderer, &strings, &roles))
            .collect()
    }

    /// Builds the ability tooltip of one character.
    pub fn build_champion(
        &self,
        character_id: &str,
        renderer: &AbilityRenderer,
        strings: &StringTable,
        roles: &CharacterRoles,
    ) -> LoadResult<ChampionTooltip> {
        let character = self.load_character(character_id)?;
        let template = strings.ability_template(character_id)?;
        let damage_type = roles.damage_type(character_id)?;

        let tooltip =
            render_ability_tooltip_with(renderer, &character.spell, &character.stats, template)
                .map_err(|e| {
                    anyhow::anyhow!("Failed to render ability of {}: {}", character_id, e)
                })?;

        let failed_calculations: Vec<String> = tooltip.failures.keys().cloned().collect();
        if !failed_calculations.is_empty() {
            tracing::warn!(
                "{}: {} calculations failed: {:?}",
                character_id,
                failed_calculations.len(),
                failed_calculations
            );
        }

        Ok(ChampionTooltip {
            character_id: character_id.to_owned(),
            spell: tooltip.html,
            damage_type,
            stats: character.stats,
            variables: tooltip.variables,
            failed_calculations,
        })
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
    fn missing_config_is_default() {
        let factory = ContentFactory::new("/nonexistent/tooltip-data");
        assert_eq!(
            factory.load_config().expect("default config"),
            TooltipConfig::default()
        );
        assert!(factory.load_strings().is_err());
    }
}
