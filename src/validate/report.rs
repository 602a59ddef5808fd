//! Aggregate validation report

use serde::{Deserialize, Serialize};

use super::rules::{ValidationIssue, ValidationResult, validate_page, validate_uniqueness};
use crate::transform::PageContent;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_pages: usize,
    /// Pages with neither errors nor warnings
    pub valid_pages: usize,
    pub pages_with_errors: usize,
    pub pages_with_warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageValidation {
    pub slug: String,
    pub result: ValidationResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub summary: ValidationSummary,
    pub pages: Vec<PageValidation>,
    pub duplicate_slugs: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Number of defects that block publication
    #[must_use]
    pub fn blocking_count(&self) -> usize {
        self.pages.iter().map(|p| p.result.errors.len()).sum::<usize>() + self.duplicate_slugs.len()
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.blocking_count() > 0
    }

    /// Write the report to the log: summary at info, errors and warnings at their own levels
    pub fn log_summary(&self) {
        let s = &self.summary;
        log::info!(
            "Validation: {} pages, {} valid, {} with errors, {} with warnings",
            s.total_pages,
            s.valid_pages,
            s.pages_with_errors,
            s.pages_with_warnings
        );

        for page in &self.pages {
            for issue in &page.result.errors {
                log::error!("[{}] {}: {}", page.slug, issue.field, issue.message);
            }
            for issue in &page.result.warnings {
                log::warn!("[{}] {}: {}", page.slug, issue.field, issue.message);
            }
        }
        for issue in &self.duplicate_slugs {
            log::error!("{}", issue.message);
        }

        if self.is_blocking() {
            log::error!("{} blocking validation errors", self.blocking_count());
        } else {
            log::info!("Validation passed");
        }
    }
}

/// Validate every page plus slug uniqueness across the set
#[must_use]
pub fn generate_report(pages: &[PageContent]) -> ValidationReport {
    let mut summary = ValidationSummary {
        total_pages: pages.len(),
        ..ValidationSummary::default()
    };

    let results: Vec<PageValidation> = pages
        .iter()
        .map(|page| {
            let result = validate_page(page);
            if result.is_clean() {
                summary.valid_pages += 1;
            }
            if !result.errors.is_empty() {
                summary.pages_with_errors += 1;
            }
            if !result.warnings.is_empty() {
                summary.pages_with_warnings += 1;
            }
            PageValidation {
                slug: page.slug.clone(),
                result,
            }
        })
        .collect();

    ValidationReport {
        summary,
        pages: results,
        duplicate_slugs: validate_uniqueness(pages),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(slug: &str, title: &str, description: &str) -> PageContent {
        PageContent {
            slug: slug.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            ..PageContent::default()
        }
    }

    #[test]
    fn summary_counts_and_blocking() {
        let pages = vec![
            page("home", "Home", ""),
            page("about", "", ""),
            page("home", "Home again", ""),
        ];
        let report = generate_report(&pages);

        // Every page lacks sections, so every page carries a warning
        assert_eq!(report.summary.total_pages, 3);
        assert_eq!(report.summary.valid_pages, 0);
        assert_eq!(report.summary.pages_with_errors, 1);
        assert_eq!(report.summary.pages_with_warnings, 3);
        assert_eq!(report.duplicate_slugs.len(), 1);
        assert_eq!(report.blocking_count(), 2);
        assert!(report.is_blocking());
    }

    #[test]
    fn warnings_alone_do_not_block() {
        let report = generate_report(&[page("home", "Home", &"x".repeat(200))]);
        assert!(!report.is_blocking());
        assert_eq!(report.summary.pages_with_warnings, 1);
    }
}
