//! Scrape-then-transform behavior on representative marketing markup

use kodegen_tools_sitemigrate::page_scraper::{PageScraper, SectionType};
use kodegen_tools_sitemigrate::transform::{
    ContentSectionType, PageContent, color_name, extract_palette, transform_page,
};

mod common;

fn transform(url: &str, body: &str) -> PageContent {
    let html = common::create_test_html("Acme", "", body);
    transform_page(&PageScraper::parse_page(url, &html))
}

#[test]
fn hero_div_yields_title_and_description() {
    let page = transform(
        "https://acme.com/",
        r#"<div class="hero"><h1>Welcome</h1><p>Get started</p></div>"#,
    );

    let hero = &page.sections[0];
    assert_eq!(hero.section_type, ContentSectionType::Hero);
    let data = hero.data.hero.as_ref().unwrap();
    assert_eq!(data.title, "Welcome");
    assert_eq!(data.description, "Get started");
    assert!(data.buttons.is_empty());
    assert!(hero.data.raw_html.contains("<h1>Welcome</h1>"));
}

#[test]
fn contact_form_fields_are_enumerated() {
    let page = transform(
        "https://acme.com/contact",
        r#"<section class="contact-form">
            <input type="EMAIL" name="email" placeholder="you@acme.com">
            <input name="company">
            <textarea name="message" placeholder="Say hi"></textarea>
        </section>"#,
    );

    assert_eq!(page.slug, "contact");
    let contact = &page.sections[0];
    assert_eq!(contact.section_type, ContentSectionType::Contact);
    let fields = contact.data.form.as_ref().unwrap();
    let types: Vec<&str> = fields.iter().map(|f| f.field_type.as_str()).collect();
    assert_eq!(types, vec!["email", "text", "textarea"]);
    assert_eq!(fields[2].placeholder, "Say hi");
}

#[test]
fn gallery_images_keep_their_alt_text() {
    let page = transform(
        "https://acme.com/products/rocket",
        r#"<section class="gallery"><img src="/a.png" alt="Launch"><img src="/b.png"></section>"#,
    );

    assert_eq!(page.slug, "products-rocket");
    let images = page.sections[0].data.gallery.as_ref().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].alt, "Launch");
    assert_eq!(images[1].alt, "");
}

#[test]
fn nested_sections_become_canonical_children() {
    let html = common::create_test_html(
        "Acme",
        "",
        r#"<section class="features">
            <div class="feature-card"><h3>Fast</h3></div>
            <div class="testimonial"><p>Great</p></div>
        </section>"#,
    );
    let scraped = PageScraper::parse_page("https://acme.com/features", &html);
    assert_eq!(scraped.sections.len(), 1);
    assert_eq!(scraped.sections[0].inferred_type, SectionType::Features);
    assert_eq!(scraped.sections[0].children.len(), 2);

    let page = transform_page(&scraped);
    let section = &page.sections[0];
    assert_eq!(section.section_type, ContentSectionType::Content);
    assert_eq!(section.data.children.len(), 2);
    assert!(section.data.children.iter().all(|c| c.section_type == ContentSectionType::Content));
}

#[test]
fn palette_collects_inline_section_colors() {
    let page = transform(
        "https://acme.com/",
        r##"<section class="hero" style="background-color: #EF4444; color: #ffffff"><h1>Hi</h1></section>
        <section style="background: #ef4444"><p>Again</p></section>"##,
    );

    let palette = extract_palette(std::slice::from_ref(&page));
    assert!(palette.contains(&"#ef4444".to_string()));
    assert!(palette.contains(&"#ffffff".to_string()));
    assert_eq!(palette.iter().filter(|c| c.as_str() == "#ef4444").count(), 1);
    assert_eq!(color_name("#ef4444"), Some("red"));
}
