//! Section tree extraction
//!
//! Top-level sections are found by walking a fixed, ordered list of
//! structural selectors. A node that is already captured, or lies inside a
//! captured node, is skipped, so the first selector to reach a subtree owns
//! it. Captured nodes are tracked in a visited set; the parsed document is
//! never mutated.

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use super::section_rules::infer_section_type;
use super::types::ScrapedSection;

/// Structural selectors in capture priority order
const STRUCTURAL_SELECTORS: &[&str] = &[
    "section",
    "[class*='section']",
    "[class*='hero']",
    "[class*='banner']",
    "header",
    "footer",
    "nav",
    "body > div[class*='container']",
    "body > div[class*='wrapper']",
    "main > div",
];

/// Child elements that become subsections
const SUBSECTION_TAGS: &[&str] = &["div", "section", "article", "header", "footer"];

// Hardcoded selectors should NEVER fail to parse - if they do, it's a compile-time bug.
static STRUCTURAL: LazyLock<Vec<Selector>> = LazyLock::new(|| {
    STRUCTURAL_SELECTORS
        .iter()
        .map(|s| {
            Selector::parse(s)
                .unwrap_or_else(|e| panic!("BUG: hardcoded structural selector '{s}' is invalid: {e}"))
        })
        .collect()
});

/// Parse a `style` attribute into property → value pairs
///
/// Property names are lowercased; values are kept verbatim (trimmed).
/// Declarations without a colon or with an empty side are dropped.
#[must_use]
pub fn parse_inline_styles(style: &str) -> BTreeMap<String, String> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim().to_ascii_lowercase();
            let value = value.trim();
            (!property.is_empty() && !value.is_empty()).then(|| (property, value.to_string()))
        })
        .collect()
}

/// Visible text with runs of whitespace collapsed to single spaces
pub(crate) fn collapsed_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn html_id(element: &ElementRef<'_>) -> Option<String> {
    element
        .value()
        .id()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ToString::to_string)
}

fn is_captured(element: &ElementRef<'_>, captured: &HashSet<NodeId>) -> bool {
    captured.contains(&element.id()) || element.ancestors().any(|node| captured.contains(&node.id()))
}

fn build_section(element: ElementRef<'_>, id: String) -> ScrapedSection {
    let css_classes: Vec<String> = element.value().classes().map(ToString::to_string).collect();
    let text = collapsed_text(&element);
    let inferred_type = infer_section_type(&css_classes, text.chars().count());
    let inline_styles = element
        .value()
        .attr("style")
        .map(parse_inline_styles)
        .unwrap_or_default();

    let children = element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| SUBSECTION_TAGS.contains(&child.value().name()))
        .enumerate()
        .map(|(index, child)| {
            let child_id = html_id(&child).unwrap_or_else(|| format!("{id}-{index}"));
            build_section(child, child_id)
        })
        .collect();

    ScrapedSection {
        id,
        inferred_type,
        inner_html: element.inner_html(),
        text,
        css_classes,
        inline_styles,
        children,
    }
}

/// Extract the section tree of a parsed document
#[must_use]
pub fn extract_sections(document: &Html) -> Vec<ScrapedSection> {
    let mut captured: HashSet<NodeId> = HashSet::new();
    let mut sections = Vec::new();

    for selector in STRUCTURAL.iter() {
        for element in document.select(selector) {
            if is_captured(&element, &captured) {
                continue;
            }
            captured.insert(element.id());

            let id = html_id(&element).unwrap_or_else(|| format!("section-{}", sections.len()));
            sections.push(build_section(element, id));
        }
    }

    log::debug!("Extracted {} top-level sections", sections.len());
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page_scraper::SectionType;

    #[test]
    fn parses_inline_style_declarations() {
        let styles = parse_inline_styles("Background-Color: #fff; padding:10px 20px;; broken; color:");
        assert_eq!(styles.get("background-color").map(String::as_str), Some("#fff"));
        assert_eq!(styles.get("padding").map(String::as_str), Some("10px 20px"));
        assert_eq!(styles.len(), 2);
    }

    #[test]
    fn nested_matches_are_captured_once() {
        let html = Html::parse_document(
            r#"<html><body>
                <section class="hero"><div class="section-inner"><p>Hi</p></div></section>
                <div class="section features"><p>Fast</p></div>
            </body></html>"#,
        );
        let sections = extract_sections(&html);

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].inferred_type, SectionType::Hero);
        // The inner div is a child of the hero, not a second top-level section
        assert_eq!(sections[0].children.len(), 1);
        assert_eq!(sections[0].children[0].id, "section-0-0");
        assert_eq!(sections[1].inferred_type, SectionType::Features);
    }

    #[test]
    fn only_direct_structural_children_become_subsections() {
        let html = Html::parse_document(
            r#"<section id="outer">
                <p>intro</p>
                <article id="a1"><div id="deep"></div></article>
                <span><div id="skipped"></div></span>
            </section>"#,
        );
        let sections = extract_sections(&html);

        assert_eq!(sections.len(), 1);
        let outer = &sections[0];
        assert_eq!(outer.id, "outer");
        assert_eq!(outer.children.len(), 1);
        assert_eq!(outer.children[0].id, "a1");
        assert_eq!(outer.children[0].children[0].id, "deep");
        assert_eq!(outer.node_count(), 3);
    }

    #[test]
    fn text_is_whitespace_collapsed() {
        let html = Html::parse_document("<section><h1>  Hello\n\n world </h1><p>again</p></section>");
        let sections = extract_sections(&html);
        assert_eq!(sections[0].text, "Hello world again");
    }
}
