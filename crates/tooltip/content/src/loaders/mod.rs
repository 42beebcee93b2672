//! Content loaders for reading exported game data from files.
//!
//! Upstream exports are JSON; the hand-edited tooltip configuration is TOML.

pub mod character;
pub mod config;
pub mod factory;
pub mod roles;
pub mod strings;
pub mod traits;

pub use character::{CharacterBin, CharacterLoader};
pub use config::ConfigLoader;
pub use factory::{ChampionTooltip, ContentFactory};
pub use roles::CharacterRoles;
pub use strings::{StringTable, ability_template_key};
pub use traits::TraitLoader;

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Reads and parses a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let content = read_file(path)?;
    serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse JSON {}: {}", path.display(), e))
}
