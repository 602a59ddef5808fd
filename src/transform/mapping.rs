//! Scraped section → canonical section mapping
//!
//! Type-specific payloads are pulled out of each section's own markup with a
//! fragment parse, so a payload never reaches outside the section it
//! belongs to.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::model::{
    ButtonLink, ContentSection, ContentSectionType, FormField, GalleryImage, HeroData,
    SectionData, SectionStyling,
};
use crate::page_scraper::{ScrapedSection, SectionType};

// Hardcoded selectors should NEVER fail to parse - if they do, it's a compile-time bug.
static HEADING: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("h1, h2, h3, h4, h5, h6").expect("BUG: hardcoded CSS selector 'h1..h6' is invalid")
});

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("BUG: hardcoded CSS selector 'p' is invalid"));

static BUTTON_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[class*='button'], a[class*='btn']")
        .expect("BUG: hardcoded CSS selector for button links is invalid")
});

static FORM_FIELD: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("input, textarea").expect("BUG: hardcoded CSS selector 'input, textarea' is invalid")
});

static IMAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("img").expect("BUG: hardcoded CSS selector 'img' is invalid"));

/// Map a fine-grained scraped type onto the canonical set
#[must_use]
pub fn map_section_type(inferred: SectionType) -> ContentSectionType {
    match inferred {
        SectionType::Hero => ContentSectionType::Hero,
        SectionType::Gallery => ContentSectionType::Gallery,
        SectionType::Contact => ContentSectionType::Contact,
        SectionType::Content
        | SectionType::About
        | SectionType::Features
        | SectionType::Testimonial => ContentSectionType::Content,
        SectionType::Navigation | SectionType::Footer | SectionType::Header | SectionType::Section => {
            ContentSectionType::Custom
        }
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(fragment: &Html, selector: &Selector) -> String {
    fragment
        .select(selector)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_default()
}

fn hero_payload(fragment: &Html) -> HeroData {
    HeroData {
        title: first_text(fragment, &HEADING),
        description: first_text(fragment, &PARAGRAPH),
        buttons: fragment
            .select(&BUTTON_LINK)
            .map(|a| ButtonLink {
                text: element_text(&a),
                href: a.value().attr("href").unwrap_or_default().to_string(),
            })
            .collect(),
    }
}

fn form_payload(fragment: &Html) -> Vec<FormField> {
    fragment
        .select(&FORM_FIELD)
        .map(|field| {
            let element = field.value();
            let field_type = if element.name() == "textarea" {
                "textarea".to_string()
            } else {
                element.attr("type").unwrap_or("text").to_ascii_lowercase()
            };
            FormField {
                field_type,
                name: element.attr("name").unwrap_or_default().to_string(),
                placeholder: element.attr("placeholder").unwrap_or_default().to_string(),
            }
        })
        .collect()
}

fn gallery_payload(fragment: &Html) -> Vec<GalleryImage> {
    fragment
        .select(&IMAGE)
        .map(|img| GalleryImage {
            src: img.value().attr("src").unwrap_or_default().to_string(),
            alt: img.value().attr("alt").unwrap_or_default().to_string(),
        })
        .collect()
}

/// Styling taken from inline declarations, `None` when none of the tracked
/// properties is set
#[must_use]
pub fn extract_styling(section: &ScrapedSection) -> Option<SectionStyling> {
    let style = |name: &str| section.inline_styles.get(name).cloned();
    let styling = SectionStyling {
        background_color: style("background-color").or_else(|| style("background")),
        text_color: style("color"),
        padding: style("padding"),
        margin: style("margin"),
        classes: section.css_classes.clone(),
    };

    let has_any = styling.background_color.is_some()
        || styling.text_color.is_some()
        || styling.padding.is_some()
        || styling.margin.is_some();
    has_any.then_some(styling)
}

/// Transform one scraped section (and, for non-payload types, its subtree)
#[must_use]
pub fn transform_section(section: &ScrapedSection) -> ContentSection {
    let section_type = map_section_type(section.inferred_type);
    let mut data = SectionData {
        raw_html: section.inner_html.clone(),
        text: section.text.clone(),
        classes: section.css_classes.clone(),
        ..SectionData::default()
    };

    match section_type {
        ContentSectionType::Hero => {
            data.hero = Some(hero_payload(&Html::parse_fragment(&section.inner_html)));
        }
        ContentSectionType::Contact => {
            data.form = Some(form_payload(&Html::parse_fragment(&section.inner_html)));
        }
        ContentSectionType::Gallery => {
            data.gallery = Some(gallery_payload(&Html::parse_fragment(&section.inner_html)));
        }
        _ => {
            data.children = section.children.iter().map(transform_section).collect();
        }
    }

    ContentSection {
        id: section.id.clone(),
        section_type,
        data,
        styling: extract_styling(section),
    }
}
