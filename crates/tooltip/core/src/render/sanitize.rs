//! Allow-list HTML sanitizer.
//!
//! Tags not on the list are removed but their text stays. Allowed tags keep only
//! their allowed attributes and are re-emitted in a canonical form, so sanitizing
//! sanitized output is a no-op.

use std::sync::LazyLock;

use regex::Regex;

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^<>"']|"[^"]*"|'[^']*')*)>"#)
        .expect("tag pattern is valid")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#)
        .expect("attribute pattern is valid")
});

/// A tag that survives sanitizing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AllowedTag {
    pub name: &'static str,
    pub attributes: &'static [&'static str],
    /// Void elements never get a closing tag.
    pub void: bool,
}

impl AllowedTag {
    pub const fn container(name: &'static str) -> Self {
        Self {
            name,
            attributes: &["class"],
            void: false,
        }
    }

    pub const fn void(name: &'static str, attributes: &'static [&'static str]) -> Self {
        Self {
            name,
            attributes,
            void: true,
        }
    }
}

/// Allow-list sanitizer.
#[derive(Clone, Copy, Debug)]
pub struct Sanitizer {
    tags: &'static [AllowedTag],
}

impl Sanitizer {
    /// Ability tooltips: headings, sections, spans, divs, line breaks and images.
    pub const ABILITY: Sanitizer = Sanitizer::new(&[
        AllowedTag::container("h1"),
        AllowedTag::container("section"),
        AllowedTag::container("span"),
        AllowedTag::container("div"),
        AllowedTag::void("br", &["class"]),
        AllowedTag::void("img", &["class", "src"]),
    ]);

    /// Trait tooltips: divs, spans and line breaks.
    pub const TRAIT: Sanitizer = Sanitizer::new(&[
        AllowedTag::container("div"),
        AllowedTag::container("span"),
        AllowedTag::void("br", &["class"]),
    ]);

    pub const fn new(tags: &'static [AllowedTag]) -> Self {
        Self { tags }
    }

    fn allowed(&self, name: &str) -> Option<&AllowedTag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    pub fn sanitize(&self, html: &str) -> String {
        let html = COMMENT.replace_all(html, "");
        let mut out = String::with_capacity(html.len());
        let mut last = 0;

        for caps in TAG.captures_iter(&html) {
            let Some(whole) = caps.get(0) else { continue };
            push_text(&mut out, &html[last..whole.start()]);
            last = whole.end();

            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let name = caps.get(2).map_or(String::new(), |m| m.as_str().to_ascii_lowercase());
            let Some(tag) = self.allowed(&name) else {
                continue;
            };

            if closing {
                if !tag.void {
                    out.push_str("</");
                    out.push_str(tag.name);
                    out.push('>');
                }
                continue;
            }

            out.push('<');
            out.push_str(tag.name);
            let attributes = caps.get(3).map_or("", |m| m.as_str());
            push_attributes(&mut out, tag, attributes);
            out.push('>');
        }

        push_text(&mut out, &html[last..]);
        out
    }
}

fn push_attributes(out: &mut String, tag: &AllowedTag, raw: &str) {
    let mut seen: Vec<String> = Vec::new();

    for caps in ATTRIBUTE.captures_iter(raw) {
        let name = caps.get(1).map_or(String::new(), |m| m.as_str().to_ascii_lowercase());
        if !tag.attributes.contains(&name.as_str()) || seen.contains(&name) {
            continue;
        }
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());
        if name == "src" && is_script_url(value) {
            continue;
        }

        out.push(' ');
        out.push_str(&name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
        seen.push(name);
    }
}

fn push_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn is_script_url(value: &str) -> bool {
    let compact: String = value
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.starts_with("javascript:") || compact.starts_with("vbscript:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_text_of_disallowed_tags() {
        let out = Sanitizer::ABILITY.sanitize("<p>Deal <b>50</b> damage</p>");
        assert_eq!(out, "Deal 50 damage");
    }

    #[test]
    fn strips_disallowed_attributes() {
        let out = Sanitizer::ABILITY.sanitize(
            r#"<span class="magic-damage" style="color:red" onclick="x()">5</span>"#,
        );
        assert_eq!(out, r#"<span class="magic-damage">5</span>"#);
    }

    #[test]
    fn image_keeps_src_but_not_script_urls() {
        assert_eq!(
            Sanitizer::ABILITY.sanitize(r#"<img class="spell-icon" src="$ABILITY_ICON_SRC" alt="x"/>"#),
            r#"<img class="spell-icon" src="$ABILITY_ICON_SRC">"#
        );
        assert_eq!(
            Sanitizer::ABILITY.sanitize(r#"<img src="javascript:alert(1)">"#),
            "<img>"
        );
    }

    #[test]
    fn void_tags_lose_closing_tags() {
        assert_eq!(Sanitizer::TRAIT.sanitize("a<br/>b<br></br>c"), "a<br>b<br>c");
    }

    #[test]
    fn trait_list_drops_headings() {
        assert_eq!(
            Sanitizer::TRAIT.sanitize(r#"<h1 class="x">Title</h1><div class="y">Body</div>"#),
            r#"Title<div class="y">Body</div>"#
        );
    }

    #[test]
    fn escapes_stray_angle_brackets_and_comments() {
        assert_eq!(
            Sanitizer::ABILITY.sanitize("1 < 2 <!-- hidden --> 3 > 2"),
            "1 &lt; 2  3 &gt; 2"
        );
    }

    #[test]
    fn sanitizing_is_idempotent() {
        let inputs = [
            r#"<div class="tooltip-root"><img class="spell-icon" src="$ABILITY_ICON_SRC"><h1 class="spell-name">Blade</h1></div>"#,
            r#"<DIV Class='a"b' id=3>x &nbsp; <script>alert(1)</script> < y</DIV>"#,
            "<rules>plain <tftbold>bold</tftbold></rules><br />",
        ];
        for input in inputs {
            let once = Sanitizer::ABILITY.sanitize(input);
            let twice = Sanitizer::ABILITY.sanitize(&once);
            assert_eq!(once, twice, "input: {input}");
        }
    }
}
