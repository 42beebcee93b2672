//! Unit stats and their per-level growth.
//!
//! ```text
//! [ StatTable (level-1 base values, by key) ]
//!      ↓  StatKind::from_id(mStat)
//! [ StatKind (key + growth factor) ]
//!      ↓  base × growth^level
//! [ LevelArray ]
//! ```
//!
//! The growth table is data, not logic. It must match upstream exactly,
//! including which ids exist.

pub mod scaling;
pub mod table;

pub use scaling::StatKind;
pub use table::StatTable;
