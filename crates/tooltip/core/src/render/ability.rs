//! Ability tooltip rendering.
//!
//! Four stages, in this order:
//!
//! 1. Pair the postscript blocks ([`pair_postscripts`])
//! 2. Rename game markup tags to display tags ([`rename_tags`])
//! 3. Interpolate placeholders against the [`VariableTable`]
//! 4. Wrap with the spell icon and sanitize
//!
//! Tag renaming is literal substring replacement. Upstream markup is not well-formed
//! enough to parse, but its tags are always paired and never carry attributes.

use std::sync::LazyLock;

use regex::Regex;
use strum::IntoEnumIterator;

use crate::config::TooltipConfig;
use crate::render::postscript::pair_postscripts;
use crate::render::sanitize::Sanitizer;
use crate::render::{Placeholder, RenderError, format_levels, interpolate, round_value};
use crate::variables::VariableTable;

/// `<base><level>[prefix|postfix]`, case-folded.
static GENERATED_VARIABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<base>\w+?)(?P<level>\d)(?P<marker>prefix|postfix)?$")
        .expect("generated variable pattern is valid")
});

// ============================================================================
// Markup Tags
// ============================================================================

/// Game markup tags with a display replacement.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr, strum::IntoStaticStr, strum::EnumIter,
)]
#[strum(serialize_all = "camelCase")]
pub enum MarkupTag {
    TitleLeft,
    MainText,
    #[strum(serialize = "TFTKeyword")]
    TftKeyword,
    MagicDamage,
    PhysicalDamage,
    ScaleHealth,
    Rules,
}

impl MarkupTag {
    /// Output element and its class.
    pub const fn replacement(self) -> (&'static str, &'static str) {
        match self {
            Self::TitleLeft => ("h1", "spell-name"),
            Self::MainText => ("section", "spell-description"),
            Self::TftKeyword => ("span", "tft-keyword"),
            Self::MagicDamage => ("span", "magic-damage"),
            Self::PhysicalDamage => ("span", "physical-damage"),
            Self::ScaleHealth => ("span", "scale-health"),
            Self::Rules => ("div", "rules"),
        }
    }
}

/// Replaces `<tag>` / `</tag>` of every [`MarkupTag`] with its display element.
pub fn rename_tags(template: &str) -> String {
    let mut result = template.to_owned();
    for tag in MarkupTag::iter() {
        let (element, class) = tag.replacement();
        let open = format!("<{}>", tag.as_ref());
        let close = format!("</{}>", tag.as_ref());

        result = result.replace(&open, &format!(r#"<{element} class="{class}">"#));
        result = result.replace(&close, &format!("</{element}>"));
    }
    result
}

// ============================================================================
// Renderer
// ============================================================================

/// Renders ability tooltip templates.
#[derive(Clone, Debug, Default)]
pub struct AbilityRenderer {
    config: TooltipConfig,
}

impl AbilityRenderer {
    pub fn new(config: TooltipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }

    /// Runs the four-stage pipeline on `template`.
    pub fn render(&self, template: &str, variables: &VariableTable) -> Result<String, RenderError> {
        let html = pair_postscripts(template)?;
        let html = rename_tags(&html);
        let html = interpolate(&html, |placeholder| self.resolve(placeholder, variables))?;

        let wrapped = format!(
            r#"<div class="tooltip-root"><img class="spell-icon" src="{}">{}</div>"#,
            self.config.icon_placeholder, html
        );
        Ok(Sanitizer::ABILITY.sanitize(&wrapped))
    }

    fn resolve(
        &self,
        placeholder: &Placeholder<'_>,
        variables: &VariableTable,
    ) -> Result<String, RenderError> {
        let name = placeholder.name.to_lowercase();

        if let Some(values) = variables.get(&name) {
            let shown: Vec<i64> = self
                .config
                .shown_levels()
                .map(|level| round_value(values[level] * placeholder.factor()))
                .collect();
            return Ok(format_levels(&shown));
        }

        if name.starts_with(TooltipConfig::UNIT_PROPERTY_PREFIX) {
            // Unit properties have no resolvable source upstream.
            return Ok("0".to_owned());
        }

        resolve_generated(placeholder, &name, variables)
    }
}

/// Resolves `<base><level>[prefix|postfix]` placeholders.
///
/// Prefix/postfix markers are zero-width and render empty. A bare level suffix
/// renders the base variable at that single level.
fn resolve_generated(
    placeholder: &Placeholder<'_>,
    name: &str,
    variables: &VariableTable,
) -> Result<String, RenderError> {
    let caps = GENERATED_VARIABLE
        .captures(name)
        .ok_or_else(|| placeholder.unresolved())?;

    if caps.name("marker").is_some() {
        if placeholder.multiplier.is_some() {
            return Err(RenderError::MultiplierOnMarker {
                placeholder: placeholder.raw.to_owned(),
            });
        }
        return Ok(String::new());
    }

    let level: usize = caps["level"]
        .parse()
        .map_err(|_| placeholder.unresolved())?;
    let value = variables
        .get(&caps["base"])
        .and_then(|values| values.get(level))
        .ok_or_else(|| placeholder.unresolved())?;

    Ok(round_value(value * placeholder.factor()).to_string())
}

/// Renders with the default configuration.
pub fn render_ability(template: &str, variables: &VariableTable) -> Result<String, RenderError> {
    AbilityRenderer::default().render(template, variables)
}
