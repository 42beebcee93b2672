//! String table loader.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_json};

/// String table key of a character's extended ability tooltip.
pub fn ability_template_key(character_id: &str) -> String {
    format!(
        "generatedtip_spelltft_{}spell_tooltipextended",
        character_id.to_lowercase()
    )
}

/// Localized string table export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StringTable {
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl StringTable {
    /// Load a string table from a JSON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        read_json(path)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Ability tooltip template of `character_id`.
    pub fn ability_template(&self, character_id: &str) -> LoadResult<&str> {
        let key = ability_template_key(character_id);
        self.get(&key)
            .ok_or_else(|| anyhow::anyhow!("No tooltip template {} for {}", key, character_id))
    }
}
