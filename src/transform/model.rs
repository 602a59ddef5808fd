//! Canonical content model
//!
//! These types are what the content tree on disk is made of. Field names are
//! serialized in camelCase so the renderer can consume the JSON directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One canonical page; `slug` is its primary key across the content set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub slug: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_graph_image: Option<String>,
    #[serde(default)]
    pub sections: Vec<ContentSection>,
}

/// Coarse section classification of the canonical model
///
/// Serialized as a plain string. Strings outside the known set deserialize
/// to [`ContentSectionType::Unknown`] instead of failing, so content loaded
/// from disk can still be validated and reported on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContentSectionType {
    Hero,
    Content,
    Gallery,
    Contact,
    Custom,
    Unknown(String),
}

impl ContentSectionType {
    /// The closed set a valid section type must belong to
    pub const KNOWN: [Self; 5] = [
        Self::Hero,
        Self::Content,
        Self::Gallery,
        Self::Contact,
        Self::Custom,
    ];

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Hero => "hero",
            Self::Content => "content",
            Self::Gallery => "gallery",
            Self::Contact => "contact",
            Self::Custom => "custom",
            Self::Unknown(other) => other,
        }
    }

    #[must_use]
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl From<String> for ContentSectionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "hero" => Self::Hero,
            "content" => Self::Content,
            "gallery" => Self::Gallery,
            "contact" => Self::Contact,
            "custom" => Self::Custom,
            _ => Self::Unknown(value),
        }
    }
}

impl From<ContentSectionType> for String {
    fn from(value: ContentSectionType) -> Self {
        match value {
            ContentSectionType::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ContentSectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    pub id: String,
    #[serde(rename = "type")]
    pub section_type: ContentSectionType,
    pub data: SectionData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styling: Option<SectionStyling>,
}

/// Section payload: raw markup, text and classes always, plus one typed part
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionData {
    pub raw_html: String,
    pub text: String,
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<Vec<FormField>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<GalleryImage>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroData {
    pub title: String,
    pub description: String,
    pub buttons: Vec<ButtonLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonLink {
    pub text: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    #[serde(rename = "type")]
    pub field_type: String,
    pub name: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
}

/// Styling copied verbatim from inline declarations; nothing is computed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionStyling {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_section_type_survives_deserialization() {
        let json = r#"{"id":"s1","type":"carousel","data":{"rawHtml":"","text":"","classes":[]}}"#;
        let section: ContentSection = serde_json::from_str(json).unwrap();
        assert_eq!(section.section_type, ContentSectionType::Unknown("carousel".to_string()));
        assert!(!section.section_type.is_known());

        let back = serde_json::to_value(&section).unwrap();
        assert_eq!(back["type"], "carousel");
    }

    #[test]
    fn known_types_serialize_lowercase() {
        for known in ContentSectionType::KNOWN {
            let value = serde_json::to_value(known.clone()).unwrap();
            assert_eq!(value, known.as_str());
        }
    }
}
