//! Headless CMS record types
//!
//! Every type is `Default` so a response that cannot be obtained can always
//! be substituted. Unknown fields are ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Collection {
    pub id: String,
    pub display_name: String,
    pub singular_name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CollectionItem {
    pub id: String,
    pub is_draft: bool,
    pub is_archived: bool,
    pub last_published: Option<String>,
    pub created_on: Option<String>,
    /// Collection-specific fields, including `name` and `slug`
    pub field_data: BTreeMap<String, serde_json::Value>,
}

impl CollectionItem {
    /// A field rendered as a string, if it is one
    #[must_use]
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.field_data.get(name).and_then(serde_json::Value::as_str)
    }

    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.field_str("slug")
    }

    #[must_use]
    pub fn is_published(&self) -> bool {
        !self.is_draft && !self.is_archived
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageSeo {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CmsPage {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub seo: PageSeo,
    pub draft: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteInfo {
    pub id: String,
    pub display_name: String,
    pub short_name: String,
    pub custom_domains: Vec<CustomDomain>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomDomain {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsResponse {
    pub collections: Vec<Collection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemsResponse {
    pub items: Vec<CollectionItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PagesResponse {
    pub pages: Vec<CmsPage>,
}
