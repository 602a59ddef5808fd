//! Content validation gate.
//!
//! Validation never fails: defects are returned as [`ValidationIssue`]s and
//! only errors block publication.

pub mod report;
pub mod rules;

pub use report::{PageValidation, ValidationReport, ValidationSummary, generate_report};
pub use rules::{
    MAX_DESCRIPTION_CHARS, MAX_TITLE_CHARS, Severity, ValidationIssue, ValidationResult,
    validate_page, validate_uniqueness,
};
