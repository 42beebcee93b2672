//! Character bin loader.
//!
//! A character bin export is a flat JSON object keyed by bin path. Two entries
//! matter here:
//!
//! ```text
//! {
//!   "Characters/TFT11_Ahri/CharacterRecords/Root": { "baseDamage": 40.0, ... },
//!   "Characters/TFT11_Ahri/Spells/TFT11_AhriSpell": { "mSpell": { ... } },
//!   ...
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};
use tooltip_core::{SpellDocument, StatTable};

use crate::loaders::{LoadResult, read_json};

const ROOT_SUFFIX: &str = "/Root";
const SPELL_SUFFIX: &str = "Spell";
const SPELL_FIELD: &str = "mSpell";

/// Base stats and spell of one character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterBin {
    pub stats: StatTable,
    pub spell: SpellDocument,
}

impl CharacterBin {
    /// Extracts the stat record and the single spell record from a bin export.
    pub fn from_value(value: Value) -> LoadResult<Self> {
        let Value::Object(entries) = value else {
            anyhow::bail!("Character bin is not a JSON object");
        };

        let stats = Self::stats(&entries)?;
        let spell = Self::spell(&entries)?;
        Ok(Self { stats, spell })
    }

    fn stats(entries: &Map<String, Value>) -> LoadResult<StatTable> {
        let (key, record) = entries
            .iter()
            .find(|(key, _)| key.ends_with(ROOT_SUFFIX))
            .ok_or_else(|| anyhow::anyhow!("Character bin has no {} record", ROOT_SUFFIX))?;

        StatTable::deserialize(record)
            .map_err(|e| anyhow::anyhow!("Failed to parse stats {}: {}", key, e))
    }

    fn spell(entries: &Map<String, Value>) -> LoadResult<SpellDocument> {
        let scripts: Vec<(&String, &Value)> = entries
            .iter()
            .filter(|(key, _)| key.ends_with(SPELL_SUFFIX))
            .collect();

        let [(key, script)] = scripts.as_slice() else {
            anyhow::bail!(
                "Expected exactly one spell record, found {}",
                scripts.len()
            );
        };

        let spell = script
            .get(SPELL_FIELD)
            .ok_or_else(|| anyhow::anyhow!("Spell record {} has no {}", key, SPELL_FIELD))?;
        SpellDocument::deserialize(spell)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell {}: {}", key, e))
    }
}

/// Loader for character bin exports.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Load a character bin from a JSON file.
    pub fn load(path: &Path) -> LoadResult<CharacterBin> {
        let value: Value = read_json(path)?;
        CharacterBin::from_value(value)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))
    }
}
