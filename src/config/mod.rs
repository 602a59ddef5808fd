//! Configuration module for site migration
//!
//! This module provides the `MigrationConfig` struct and its type-safe builder
//! for configuring the crawl → transform → validate → optimize pipeline with
//! validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{Complete, MigrationConfigBuilder, WithSiteUrl};
pub use types::{ApiCredentials, MigrationConfig};
