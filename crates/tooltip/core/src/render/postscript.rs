//! Postscript pairing.
//!
//! Ability templates may end with a left block of labels and a right block of
//! per-level values:
//!
//! ```text
//! <postScriptLeft>Damage: 180 + 20 = 200%<br>Heal: @Heal@</postScriptLeft>
//! <postScriptRight>[ @Damage1@ / @Damage2@ ]<br>[ @Heal1@ / @Heal2@ ]</postScriptRight>
//! ```
//!
//! Both blocks are split on `<br>` and zipped line by line into side-by-side spans.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::render::RenderError;

const LEFT_TAG: &str = "postScriptLeft";
const RIGHT_TAG: &str = "postScriptRight";

static LEFT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<postScriptLeft>(.*?)</postScriptLeft>").expect("left block pattern is valid")
});

static RIGHT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<postScriptRight>(.*?)</postScriptRight>")
        .expect("right block pattern is valid")
});

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern is valid"));

/// `Label: <expression> = <percentage>` with a precomputed level-1 total. Markup
/// between the label and the expression is kept, as is anything after the value.
static PRECOMPUTED_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^(?P<label>[^:=<>]+:)(?P<gap>\s*(?:<[^<>]*>\s*)*)[^:=<>]*\d[^:=<>]*?\s*=\s*(?P<value>\d+(?:\.\d+)?\s*%[^=<>]*)(?P<rest>.*)$",
    )
    .expect("precomputed total pattern is valid")
});

/// Pairs the left and right postscript blocks of `template`.
///
/// Templates without either block are returned unchanged.
pub fn pair_postscripts(template: &str) -> Result<String, RenderError> {
    let left = block(&LEFT_BLOCK, template);
    let right = block(&RIGHT_BLOCK, template);

    let ((left_range, left_body), (right_range, right_body)) = match (left, right) {
        (None, None) => return Ok(template.to_owned()),
        (Some(_), None) => return Err(RenderError::MissingPostscriptBlock { block: RIGHT_TAG }),
        (None, Some(_)) => return Err(RenderError::MissingPostscriptBlock { block: LEFT_TAG }),
        (Some(left), Some(right)) => (left, right),
    };

    let left_lines = split_lines(left_body);
    let right_lines = split_lines(right_body);
    if left_lines.len() != right_lines.len() {
        return Err(RenderError::MismatchedPostscript {
            left: left_lines.len(),
            right: right_lines.len(),
        });
    }

    let mut paired = String::from(r#"<div class="post-script">"#);
    for (left, right) in left_lines.iter().zip(&right_lines) {
        paired.push_str(r#"<div class="post-script-row"><span class="post-script-left">"#);
        paired.push_str(&strip_precomputed_total(left));
        paired.push_str(r#"</span><span class="post-script-right">"#);
        paired.push_str(right);
        paired.push_str("</span></div>");
    }
    paired.push_str("</div>");

    // The paired block takes the left block's place; the right block is dropped.
    let mut out = template.to_owned();
    if left_range.start < right_range.start {
        out.replace_range(right_range, "");
        out.replace_range(left_range, &paired);
    } else {
        out.replace_range(left_range, &paired);
        out.replace_range(right_range, "");
    }
    Ok(out)
}

/// Rewrites `Label: <expression> = <percentage>` to `Label: <percentage>`.
///
/// The expression is a level-1 total and misleading at other levels. Lines whose
/// right-hand side is not a percentage are left unchanged.
pub fn strip_precomputed_total(line: &str) -> String {
    match PRECOMPUTED_TOTAL.captures(line) {
        Some(caps) => format!(
            "{}{}{}{}",
            &caps["label"], &caps["gap"], &caps["value"], &caps["rest"]
        ),
        None => line.to_owned(),
    }
}

fn block<'t>(pattern: &Regex, template: &'t str) -> Option<(Range<usize>, &'t str)> {
    let caps = pattern.captures(template)?;
    let whole = caps.get(0)?;
    let body = caps.get(1)?;
    Some((whole.range(), body.as_str()))
}

fn split_lines(body: &str) -> Vec<String> {
    LINE_BREAK
        .split(body)
        .map(|line| line.trim().to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_lines_side_by_side() {
        let template = "<mainText>Body</mainText>\
            <postScriptLeft>Damage: @Damage@<br>Heal: @Heal@</postScriptLeft>\
            <postScriptRight>[ @Damage1@ ]<br>[ @Heal1@ ]</postScriptRight>";

        let out = pair_postscripts(template).expect("blocks pair");
        assert_eq!(
            out,
            "<mainText>Body</mainText>\
            <div class=\"post-script\">\
            <div class=\"post-script-row\"><span class=\"post-script-left\">Damage: @Damage@</span>\
            <span class=\"post-script-right\">[ @Damage1@ ]</span></div>\
            <div class=\"post-script-row\"><span class=\"post-script-left\">Heal: @Heal@</span>\
            <span class=\"post-script-right\">[ @Heal1@ ]</span></div>\
            </div>"
        );
    }

    #[test]
    fn unequal_line_counts_fail() {
        let template = "<postScriptLeft>a<br>b</postScriptLeft>\
            <postScriptRight>1<br>2<br>3</postScriptRight>";

        assert_eq!(
            pair_postscripts(template),
            Err(RenderError::MismatchedPostscript { left: 2, right: 3 })
        );
    }

    #[test]
    fn single_block_fails() {
        assert_eq!(
            pair_postscripts("<postScriptLeft>a</postScriptLeft>"),
            Err(RenderError::MissingPostscriptBlock {
                block: "postScriptRight"
            })
        );
        assert_eq!(
            pair_postscripts("<postScriptRight>a</postScriptRight>"),
            Err(RenderError::MissingPostscriptBlock {
                block: "postScriptLeft"
            })
        );
    }

    #[test]
    fn templates_without_postscript_pass_through() {
        let template = "<mainText>Nothing to pair</mainText>";
        assert_eq!(pair_postscripts(template).as_deref(), Ok(template));
    }

    #[test]
    fn right_block_first_is_handled() {
        let template = "<postScriptRight>R</postScriptRight>x<postScriptLeft>L</postScriptLeft>";
        let out = pair_postscripts(template).expect("blocks pair");
        assert!(out.starts_with("x<div class=\"post-script\">"));
        assert!(out.contains(">L</span>"));
        assert!(out.contains(">R</span>"));
    }

    #[test]
    fn precomputed_total_is_stripped() {
        assert_eq!(strip_precomputed_total("Damage: 180 + 20 = 200%"), "Damage: 200%");
        assert_eq!(
            strip_precomputed_total("Shield: 350 = 150% AP"),
            "Shield: 150% AP"
        );
        assert_eq!(strip_precomputed_total("Heal: @Heal@"), "Heal: @Heal@");
    }

    #[test]
    fn absolute_totals_are_kept() {
        assert_eq!(
            strip_precomputed_total("Heal: 20% Health = 350"),
            "Heal: 20% Health = 350"
        );
        assert_eq!(
            strip_precomputed_total("Damage: 180 + 20 = 200"),
            "Damage: 180 + 20 = 200"
        );
    }

    #[test]
    fn markup_around_total_stays_balanced() {
        assert_eq!(
            strip_precomputed_total("Damage: <magicDamage>180 + 20 = 200%</magicDamage>"),
            "Damage: <magicDamage>200%</magicDamage>"
        );
        assert_eq!(
            strip_precomputed_total("<rules>Damage: 180 = 200%</rules>"),
            "<rules>Damage: 180 = 200%</rules>"
        );
    }
}
