//! Per-page and cross-page validation rules
//!
//! Defects are collected as data. Nothing here returns `Err`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::transform::{ContentSection, ContentSectionType, PageContent};

/// Titles longer than this risk truncation in search results
pub const MAX_TITLE_CHARS: usize = 60;

/// Descriptions longer than this risk truncation in search results
pub const MAX_DESCRIPTION_CHARS: usize = 160;

static SLUG_FORMAT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("BUG: hardcoded slug regex is invalid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single structural or SEO defect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Outcome of validating one page; errors block publication, warnings do not
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationResult {
    fn from_issues(issues: Vec<ValidationIssue>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = issues
            .into_iter()
            .partition(|issue| issue.severity == Severity::Error);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// No errors and no warnings
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

fn validate_section(section: &ContentSection, field: &str, issues: &mut Vec<ValidationIssue>) {
    if section.id.trim().is_empty() {
        issues.push(ValidationIssue::error(format!("{field}.id"), "Section id is required"));
    }

    if !section.section_type.is_known() {
        issues.push(ValidationIssue::error(
            format!("{field}.type"),
            format!(
                "Invalid section type \"{}\"; expected one of hero, content, gallery, contact, custom",
                section.section_type
            ),
        ));
    }

    if section.section_type == ContentSectionType::Hero {
        let has_title = section
            .data
            .hero
            .as_ref()
            .is_some_and(|hero| !hero.title.trim().is_empty());
        if !has_title && section.data.raw_html.trim().is_empty() {
            issues.push(ValidationIssue::error(
                format!("{field}.data.hero.title"),
                "Hero section has neither a title nor raw markup",
            ));
        }
    }

    for (index, child) in section.data.children.iter().enumerate() {
        validate_section(child, &format!("{field}.children[{index}]"), issues);
    }
}

/// Validate a single canonical page
#[must_use]
pub fn validate_page(page: &PageContent) -> ValidationResult {
    let mut issues = Vec::new();

    if page.slug.trim().is_empty() {
        issues.push(ValidationIssue::error("slug", "Slug is required"));
    } else if !SLUG_FORMAT.is_match(&page.slug) {
        issues.push(ValidationIssue::error(
            "slug",
            format!(
                "Slug \"{}\" must contain only lowercase letters, numbers and hyphens",
                page.slug
            ),
        ));
    }

    if page.title.trim().is_empty() {
        issues.push(ValidationIssue::error("title", "Title is required"));
    } else if page.title.chars().count() > MAX_TITLE_CHARS {
        issues.push(ValidationIssue::warning(
            "title",
            format!("Title is longer than {MAX_TITLE_CHARS} characters and may be truncated"),
        ));
    }

    if page.description.chars().count() > MAX_DESCRIPTION_CHARS {
        issues.push(ValidationIssue::warning(
            "description",
            format!(
                "Description is longer than {MAX_DESCRIPTION_CHARS} characters and may be truncated"
            ),
        ));
    }

    if page.sections.is_empty() {
        issues.push(ValidationIssue::warning("sections", "Page has no sections"));
    }
    for (index, section) in page.sections.iter().enumerate() {
        validate_section(section, &format!("sections[{index}]"), &mut issues);
    }

    ValidationResult::from_issues(issues)
}

/// One error per slug that occurs more than once, in first-seen order
#[must_use]
pub fn validate_uniqueness(pages: &[PageContent]) -> Vec<ValidationIssue> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for page in pages {
        let count = counts.entry(page.slug.as_str()).or_insert(0);
        if *count == 0 {
            order.push(page.slug.as_str());
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|slug| {
            let count = counts.get(slug).copied().unwrap_or_default();
            (count > 1).then(|| {
                ValidationIssue::error(
                    "slug",
                    format!("Duplicate slug \"{slug}\" found {count} times"),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{HeroData, SectionData};

    fn page(slug: &str, title: &str) -> PageContent {
        PageContent {
            slug: slug.to_string(),
            title: title.to_string(),
            sections: vec![section("s0", ContentSectionType::Content)],
            ..PageContent::default()
        }
    }

    fn section(id: &str, section_type: ContentSectionType) -> ContentSection {
        ContentSection {
            id: id.to_string(),
            section_type,
            data: SectionData::default(),
            styling: None,
        }
    }

    #[test]
    fn clean_page_is_valid() {
        let result = validate_page(&page("about", "About us"));
        assert!(result.is_valid);
        assert!(result.is_clean());
    }

    #[test]
    fn missing_fields_and_bad_slug_are_errors() {
        let result = validate_page(&page("", ""));
        assert_eq!(result.errors.len(), 2);

        let result = validate_page(&page("About_Us", "About"));
        assert!(!result.is_valid);
        assert_eq!(result.errors[0].field, "slug");
    }

    #[test]
    fn seo_lengths_and_empty_sections_are_warnings() {
        let mut long = page("seo", &"t".repeat(61));
        long.description = "d".repeat(161);
        long.sections.clear();

        let result = validate_page(&long);
        assert!(result.is_valid);
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn section_structure_errors() {
        let mut p = page("home", "Home");
        p.sections = vec![
            section("", ContentSectionType::Content),
            section("x", ContentSectionType::Unknown("slider".to_string())),
            section("h", ContentSectionType::Hero),
        ];
        let result = validate_page(&p);
        let fields: Vec<&str> = result.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["sections[0].id", "sections[1].type", "sections[2].data.hero.title"]);

        p.sections = vec![ContentSection {
            data: SectionData {
                hero: Some(HeroData {
                    title: "Welcome".to_string(),
                    ..HeroData::default()
                }),
                ..SectionData::default()
            },
            ..section("h", ContentSectionType::Hero)
        }];
        assert!(validate_page(&p).is_valid);
    }

    #[test]
    fn duplicate_slugs_report_counts() {
        let pages = vec![page("a", "A"), page("b", "B"), page("a", "A again")];
        let issues = validate_uniqueness(&pages);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("\"a\""));
        assert!(issues[0].message.contains("2 times"));
    }
}
