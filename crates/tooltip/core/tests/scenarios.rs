use serde_json::json;
use tooltip_core::{
    AbilityRenderer, FormulaError, RenderError, SpellDocument, StatTable, TallyError,
    TooltipConfig, TraitDocument, render_ability_tooltip, render_ability_tooltip_with,
    render_trait_tooltip,
};

const ROOT_OPEN: &str =
    r#"<div class="tooltip-root"><img class="spell-icon" src="$ABILITY_ICON_SRC">"#;

fn spell() -> SpellDocument {
    serde_json::from_value(json!({
        "mDataValues": [
            { "mName": "BaseDamage", "mValues": [0, 200, 300, 450, 0, 0, 0] },
            { "mName": "ADRatio", "mValues": [1, 1, 1, 1, 1, 1, 1] },
            { "mName": "ShieldRatio", "mValues": [0, 0.2, 0.25, 0.3, 0, 0, 0] },
            { "mName": "Unused" }
        ],
        "mSpellCalculations": {
            "Damage": {
                "__type": "GameCalculation",
                "mFormulaParts": [
                    { "__type": "StatByNamedDataValueCalculationPart", "mStat": 2, "mDataValue": "ADRatio" }
                ]
            },
            "TotalDamage": {
                "__type": "GameCalculation",
                "mFormulaParts": [
                    {
                        "__type": "SumOfSubPartsCalculationPart",
                        "mSubparts": [
                            { "__type": "NamedDataValueCalculationPart", "mDataValue": "BaseDamage" },
                            { "__type": "{f3cbe7b2}", "mSpellCalculationKey": "Damage" }
                        ]
                    }
                ]
            },
            "Shield": {
                "__type": "GameCalculation",
                "mFormulaParts": [
                    {
                        "__type": "StatBySubPartCalculationPart",
                        "mStat": 11,
                        "mSubpart": { "__type": "NamedDataValueCalculationPart", "mDataValue": "ShieldRatio" }
                    }
                ]
            },
            "HalfDamage": {
                "__type": "GameCalculationModified",
                "mModifiedGameCalculation": "Damage",
                "mMultiplier": { "__type": "NumberCalculationPart", "mNumber": 0.5 }
            },
            "Broken": {
                "__type": "GameCalculation",
                "mFormulaParts": [{ "__type": "ClampSubPartsCalculationPart" }]
            }
        }
    }))
    .expect("spell document decodes")
}

fn stats() -> StatTable {
    serde_json::from_value(json!({
        "baseDamage": 100.0,
        "baseHP": 500.0,
        "baseArmor": 40.0,
        "name": "ignored"
    }))
    .expect("stat table decodes")
}

/// Full ability pipeline for one unit:
/// 1. Evaluate calculations against the unit's stats (one failing in isolation)
/// 2. Merge data values and calculations into the variable table
/// 3. Render a template with postscript blocks, markup tags and generated variables
#[test]
fn ability_tooltip_end_to_end() {
    let template = "<titleLeft>Cleave</titleLeft>\
        <mainText>Deal <physicalDamage>@TotalDamage@</physicalDamage> damage and gain \
        <scaleHealth>@Shield@</scaleHealth> shield.@Shield2Prefix@<br>\
        <rules>Half: @HalfDamage@</rules></mainText>\
        <postScriptLeft>Damage: <physicalDamage>200 + 150 = 175%</physicalDamage></postScriptLeft>\
        <postScriptRight>[ @TotalDamage1@ / @TotalDamage2@ ]</postScriptRight>";

    let tooltip = render_ability_tooltip(&spell(), &stats(), template).expect("renders");

    // ================================================================
    // Evaluation
    // ================================================================
    assert!(tooltip.failures.contains_key("Broken"));
    assert!(matches!(
        tooltip.failures["Broken"],
        FormulaError::UnknownFormula { .. }
    ));
    assert!(!tooltip.variables.contains("unused"));

    let damage = tooltip.variables.get("DAMAGE").expect("damage evaluated");
    assert_eq!(&damage.as_slice()[1..4], &[150.0, 225.0, 337.5]);

    // ================================================================
    // Rendering
    // ================================================================
    let expected = format!(
        "{ROOT_OPEN}<h1 class=\"spell-name\">Cleave</h1>\
         <section class=\"spell-description\">Deal \
         <span class=\"physical-damage\">350 / 525 / 788</span> damage and gain \
         <span class=\"scale-health\">180 / 405 / 875</span> shield.<br>\
         <div class=\"rules\">Half: 75 / 112 / 169</div></section>\
         <div class=\"post-script\"><div class=\"post-script-row\">\
         <span class=\"post-script-left\">Damage: <span class=\"physical-damage\">175%</span></span>\
         <span class=\"post-script-right\">[ 350 / 525 ]</span></div></div></div>"
    );
    assert_eq!(tooltip.html, expected);
}

#[test]
fn rendering_is_deterministic() {
    let template = "@Damage@ @Shield*2@";
    let first = render_ability_tooltip(&spell(), &stats(), template).expect("renders");
    let second = render_ability_tooltip(&spell(), &stats(), template).expect("renders");
    assert_eq!(first.html, second.html);
}

#[test]
fn configured_renderer_shows_more_levels() {
    let renderer = AbilityRenderer::new(TooltipConfig {
        star_levels: 4,
        ..TooltipConfig::default()
    });
    let tooltip =
        render_ability_tooltip_with(&renderer, &spell(), &stats(), "@ADRatio@|@BaseDamage@")
            .expect("renders");

    assert_eq!(tooltip.html, format!("{ROOT_OPEN}1|200 / 300 / 450 / 0</div>"));
}

#[test]
fn ability_template_errors_abort_render() {
    let unresolved = render_ability_tooltip(&spell(), &stats(), "@Broken@").unwrap_err();
    assert_eq!(
        unresolved,
        RenderError::UnresolvedPlaceholder {
            placeholder: "@Broken@".into()
        }
    );

    let mismatched = render_ability_tooltip(
        &spell(),
        &stats(),
        "<postScriptLeft>a<br>b</postScriptLeft><postScriptRight>c</postScriptRight>",
    )
    .unwrap_err();
    assert_eq!(
        mismatched,
        RenderError::MismatchedPostscript { left: 2, right: 1 }
    );
}

/// Trait pipeline: tally, row expansion, interpolation, sanitize.
#[test]
fn trait_tooltip_end_to_end() {
    let document: TraitDocument = serde_json::from_value(json!({
        "trait_id": "TFT11_Heavenly",
        "display_name": "Heavenly",
        "set": "TFTSet11",
        "tooltip_text": "Heavenly units gain <b>@Bonus*100@%</b> stats.<expandRow>(@MinUnits@) @DamageAmp*100@% damage</expandRow>",
        "innate_trait_sets": [
            { "effect_amounts": [{ "name": "Bonus", "value": 0.15, "format_string": "" }] }
        ],
        "conditional_trait_sets": [
            {
                "min_units": 5,
                "style_name": "kGold",
                "effect_amounts": [{ "name": "DamageAmp", "value": 0.3, "format_string": "" }]
            },
            {
                "min_units": 3,
                "style_name": "kBronze",
                "effect_amounts": [{ "name": "DamageAmp", "value": 0.125, "format_string": "" }]
            }
        ]
    }))
    .expect("trait document decodes");

    let tooltip = render_trait_tooltip(&document).expect("renders");

    assert_eq!(tooltip.display_name, "Heavenly");
    assert_eq!(
        tooltip.levels.iter().map(|l| l.min_units).collect::<Vec<_>>(),
        vec![3, 5]
    );
    assert_eq!(
        tooltip.tooltip_html,
        "<div class=\"trait-tooltip\">Heavenly units gain 15% stats.\
         <br><span class=\"conditional-effect\">(5) 30% damage</span>\n\
         <br><span class=\"conditional-effect\">(3) 12% damage</span></div>"
    );
}

#[test]
fn trait_min_units_exhaustion() {
    let document: TraitDocument = serde_json::from_value(json!({
        "tooltip_text": "@MinUnits@ and @MinUnits@",
        "conditional_trait_sets": [{ "min_units": 3, "style_name": "kBronze" }]
    }))
    .expect("trait document decodes");

    let err = render_trait_tooltip(&document).unwrap_err();
    assert_eq!(
        err,
        RenderError::Tally(TallyError::Exhausted {
            name: "min_units".into(),
            tallied: 1
        })
    );
}
