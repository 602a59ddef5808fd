//! Scraped pages → canonical content model.
//!
//! Everything in this module is pure: no I/O, no clocks, no randomness.

pub mod mapping;
pub mod model;
pub mod palette;
pub mod slug;
pub mod transformer;

pub use mapping::{extract_styling, map_section_type, transform_section};
pub use model::{
    ButtonLink, ContentSection, ContentSectionType, FormField, GalleryImage, HeroData,
    PageContent, SectionData, SectionStyling,
};
pub use palette::{color_name, color_scale, extract_palette};
pub use slug::slug_from_url;
pub use transformer::{TransformedPage, transform_page, transform_pages};
