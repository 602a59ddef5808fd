//! Test utilities and helper functions for the sitemigrate test suite

use kodegen_tools_sitemigrate::MigrationConfig;
use std::path::Path;
use std::time::Duration;

/// Creates a test HTML document with specified head extras and body
#[allow(dead_code)]
pub fn create_test_html(title: &str, head: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    {head}
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// Marketing homepage with a hero, a gallery and a nav link to `/about`
#[allow(dead_code)]
pub fn create_homepage_html() -> String {
    create_test_html(
        "Acme - Home",
        r#"<meta name="description" content="Acme builds rockets">
    <meta property="og:image" content="/img/og.png">"#,
        r#"<nav><a href="/about">About</a></nav>
    <section class="hero" style="background-color: #3b82f6; padding: 40px">
        <h1>Welcome</h1>
        <p>Rockets for everyone</p>
        <a class="button" href="/signup">Get started</a>
        <img src="/img/hero.png" alt="Hero">
    </section>
    <section class="features">
        <h2>Features</h2>
        <p>Fast and reliable</p>
    </section>"#,
    )
}

/// Plain about page
#[allow(dead_code)]
pub fn create_about_html() -> String {
    create_test_html(
        "About Acme",
        r#"<meta name="description" content="Who we are">"#,
        r#"<section class="about"><h2>About us</h2><p>We build rockets.</p></section>"#,
    )
}

/// PNG header bytes large enough for the dimension reader
#[allow(dead_code)]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes
}

/// Configuration with no crawl or batch delays, rooted in temporary directories
#[allow(dead_code)]
pub fn fast_config(site_url: &str, content_dir: &Path, assets_dir: &Path) -> MigrationConfig {
    MigrationConfig::builder()
        .site_url(site_url)
        .content_dir(content_dir)
        .assets_dir(assets_dir)
        .crawl_delay(Duration::ZERO)
        .batch_delay(Duration::ZERO)
        .request_timeout(Duration::from_secs(5))
        .image_sizes(vec![320, 640])
        .image_formats(vec!["webp".to_string()])
        .build()
        .expect("test configuration is valid")
}
