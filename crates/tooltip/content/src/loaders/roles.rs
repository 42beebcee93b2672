//! Character role lookup.
//!
//! The character export is one JSON object holding both character records and
//! role records. A character names its role by the role's key:
//!
//! ```text
//! {
//!   "{5a1f3c02}": { "mCharacterName": "TFT11_Ahri", "CharacterRole": "{0b9d77e4}" },
//!   "{0b9d77e4}": { "name": "APCaster" }
//! }
//! ```

use std::path::Path;

use serde_json::{Map, Value};
use tooltip_core::DamageType;

use crate::loaders::{LoadResult, read_json};

/// Character and role records from the character export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterRoles {
    entries: Map<String, Value>,
}

impl CharacterRoles {
    pub fn from_value(value: Value) -> LoadResult<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            _ => anyhow::bail!("Character data is not a JSON object"),
        }
    }

    /// Load character data from a JSON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        Self::from_value(read_json(path)?)
    }

    /// Role name of `character_id`, e.g. `APCaster`.
    pub fn role_name(&self, character_id: &str) -> LoadResult<&str> {
        let character = self
            .entries
            .values()
            .find(|record| {
                record.get("mCharacterName").and_then(Value::as_str) == Some(character_id)
            })
            .ok_or_else(|| anyhow::anyhow!("No character record for {}", character_id))?;

        let role_key = character
            .get("CharacterRole")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("Character {} has no role", character_id))?;

        self.entries
            .get(role_key)
            .and_then(|role| role.get("name"))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("Role {} of {} not found", role_key, character_id))
    }

    /// Damage type of `character_id`, from its role name.
    pub fn damage_type(&self, character_id: &str) -> LoadResult<DamageType> {
        let role = self.role_name(character_id)?;
        Ok(DamageType::from_role_name(role)?)
    }
}
