//! Section classification rules
//!
//! Classification is an ordered rule table evaluated top to bottom against
//! the joined, lowercased class list of an element; the first rule with a
//! matching keyword wins. Unmatched sections fall back to a text-length
//! heuristic.

use super::types::SectionType;

/// Sections with at least this many characters of text count as content
pub const CONTENT_TEXT_THRESHOLD: usize = 500;

/// A keyword rule: any keyword found in the class string selects `section_type`
#[derive(Debug, Clone, Copy)]
pub struct SectionRule {
    pub keywords: &'static [&'static str],
    pub section_type: SectionType,
}

impl SectionRule {
    #[must_use]
    pub fn matches(&self, class_string: &str) -> bool {
        self.keywords.iter().any(|k| class_string.contains(k))
    }
}

/// Classification rules in priority order
pub const SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        keywords: &["hero", "banner"],
        section_type: SectionType::Hero,
    },
    SectionRule {
        keywords: &["nav", "menu"],
        section_type: SectionType::Navigation,
    },
    SectionRule {
        keywords: &["footer"],
        section_type: SectionType::Footer,
    },
    SectionRule {
        keywords: &["header"],
        section_type: SectionType::Header,
    },
    SectionRule {
        keywords: &["contact", "form"],
        section_type: SectionType::Contact,
    },
    SectionRule {
        keywords: &["gallery", "image"],
        section_type: SectionType::Gallery,
    },
    SectionRule {
        keywords: &["testimonial", "review"],
        section_type: SectionType::Testimonial,
    },
    SectionRule {
        keywords: &["feature", "service"],
        section_type: SectionType::Features,
    },
    SectionRule {
        keywords: &["about", "intro"],
        section_type: SectionType::About,
    },
];

/// Classify a section from its classes, falling back to its text length
#[must_use]
pub fn infer_section_type(classes: &[String], text_chars: usize) -> SectionType {
    let class_string = classes.join(" ").to_lowercase();

    if let Some(rule) = SECTION_RULES.iter().find(|rule| rule.matches(&class_string)) {
        return rule.section_type;
    }

    if text_chars >= CONTENT_TEXT_THRESHOLD {
        SectionType::Content
    } else {
        SectionType::Section
    }
}
