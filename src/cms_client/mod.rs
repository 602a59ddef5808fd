//! Headless CMS API client.
//!
//! Wraps the CMS REST surface (collections, items, pages, site info). Any
//! failure, including missing credentials, is replaced with deterministic
//! mock records and reported through [`ApiOutcome::Fallback`] rather than
//! as an error.

pub mod client;
pub mod derived;
pub mod mock;
pub mod outcome;
pub mod types;

pub use client::{CmsClient, RequestOptions};
pub use mock::{EndpointKind, classify_endpoint, mock_response};
pub use outcome::{ApiOutcome, FallbackReason};
pub use types::{
    CmsPage, Collection, CollectionItem, CollectionsResponse, CustomDomain, ItemsResponse,
    PageSeo, PagesResponse, SiteInfo,
};
