//! Deterministic stand-in records
//!
//! Selected by the shape of the endpoint path so every typed wrapper gets
//! data it can deserialize. The same endpoint always yields the same value.

use serde_json::{Value, json};

/// Which endpoint family a path belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    Items,
    Collections,
    Pages,
    Site,
    Other,
}

/// Classify an endpoint path; more specific shapes are checked first
#[must_use]
pub fn classify_endpoint(endpoint: &str) -> EndpointKind {
    let path = endpoint.split('?').next().unwrap_or_default().trim_end_matches('/');
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [.., "collections", _, "items"] => EndpointKind::Items,
        [.., "collections"] => EndpointKind::Collections,
        [.., "pages"] => EndpointKind::Pages,
        ["sites", _] => EndpointKind::Site,
        _ => EndpointKind::Other,
    }
}

fn collection_id(endpoint: &str) -> &str {
    endpoint
        .split('/')
        .skip_while(|segment| *segment != "collections")
        .nth(1)
        .unwrap_or("mock-collection")
}

fn mock_items(collection: &str) -> Value {
    json!({
        "items": [
            {
                "id": format!("{collection}-item-1"),
                "isDraft": false,
                "isArchived": false,
                "lastPublished": "2024-01-15T00:00:00Z",
                "fieldData": {
                    "name": "Getting started with the platform",
                    "slug": "getting-started",
                    "summary": "A walkthrough of the first steps.",
                    "category": "guides",
                    "main-image": "https://cdn.prod.website-files.com/mock/getting-started"
                }
            },
            {
                "id": format!("{collection}-item-2"),
                "isDraft": false,
                "isArchived": false,
                "lastPublished": "2024-02-01T00:00:00Z",
                "fieldData": {
                    "name": "Scaling your workflows",
                    "slug": "scaling-workflows",
                    "summary": "Patterns for growing teams.",
                    "category": "guides"
                }
            },
            {
                "id": format!("{collection}-item-3"),
                "isDraft": true,
                "isArchived": false,
                "fieldData": {
                    "name": "Upcoming release notes",
                    "slug": "upcoming-release",
                    "summary": "Not published yet.",
                    "category": "news"
                }
            }
        ]
    })
}

/// Mock response body for `endpoint`
#[must_use]
pub fn mock_response(endpoint: &str) -> Value {
    match classify_endpoint(endpoint) {
        EndpointKind::Items => mock_items(collection_id(endpoint)),
        EndpointKind::Collections => json!({
            "collections": [
                {"id": "mock-blog-posts", "displayName": "Blog Posts", "singularName": "Blog Post", "slug": "blog-posts"},
                {"id": "mock-customer-stories", "displayName": "Customer Stories", "singularName": "Customer Story", "slug": "customer-stories"}
            ]
        }),
        EndpointKind::Pages => json!({
            "pages": [
                {"id": "mock-page-home", "title": "Home", "slug": "", "seo": {"title": "Home", "description": "Welcome"}},
                {"id": "mock-page-about", "title": "About", "slug": "about", "seo": {"title": "About us"}}
            ]
        }),
        EndpointKind::Site => json!({
            "id": "mock-site",
            "displayName": "Mock Site",
            "shortName": "mock-site",
            "customDomains": []
        }),
        EndpointKind::Other => Value::Null,
    }
}
