//! Levelled tooltip evaluation and rendering.
//!
//! `tooltip-core` turns game spell and trait data into finished tooltip HTML. It is
//! pure: callers hand in parsed documents and get strings and tables back.
//!
//! - [`formula`] evaluates spell calculations into per-level [`LevelArray`]s
//! - [`variables`] merges data values and calculations into a case-insensitive table
//! - [`render`] fills ability and trait templates and sanitizes the result
//! - [`tooltip`] bundles the above into per-ability and per-trait records
pub mod config;
pub mod error;
pub mod formula;
pub mod level;
pub mod render;
pub mod stats;
pub mod tooltip;
pub mod variables;

pub use config::TooltipConfig;
pub use error::{ErrorSeverity, TooltipError};
pub use formula::{
    CalculationPart, DataValue, Evaluation, FormulaError, FormulaEvaluator, SpellCalculation,
    SpellDocument, evaluate,
};
pub use level::{LevelArray, LevelError};
pub use render::{
    AbilityRenderer, EffectTally, RenderError, Sanitizer, ScalingIcon, ScalingIcons, TallyError,
    TraitDocument, TraitLevel, render_ability, render_trait,
};
pub use stats::{StatKind, StatTable};
pub use tooltip::{
    AbilityTooltip, DamageType, DamageTypeError, TraitTooltip, render_ability_tooltip,
    render_ability_tooltip_with, render_trait_tooltip,
};
pub use variables::VariableTable;
