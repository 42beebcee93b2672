//! Game data loaders for tooltip generation.
//!
//! This crate reads exported game data from a data directory and feeds it to
//! `tooltip-core`:
//! - Tooltip configuration (TOML)
//! - Character bin records: base stats and the spell document (JSON)
//! - Character roles, for the damage type (JSON)
//! - The string table holding ability tooltip templates (JSON)
//! - The trait list, filtered to one set (JSON)
//!
//! Nothing here renders on its own; [`ContentFactory`] wires loaded data into the
//! core renderers.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ChampionTooltip, CharacterBin, CharacterLoader, CharacterRoles, ConfigLoader,
    ContentFactory, StringTable, TraitLoader, ability_template_key,
};
