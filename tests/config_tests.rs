//! Tests for the type-safe configuration builder pattern

use kodegen_tools_sitemigrate::config::{ApiCredentials, MigrationConfig};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

mod common;

#[tokio::test]
async fn test_builder_requires_site_url_and_content_dir() {
    // This should not compile if uncommented - missing content_dir
    // let config = MigrationConfig::builder()
    //     .site_url("https://example.com")
    //     .build();

    let temp_dir = TempDir::new().unwrap();
    let config = MigrationConfig::builder()
        .site_url("https://example.com")
        .content_dir(temp_dir.path().to_path_buf())
        .build()
        .unwrap();

    assert_eq!(config.content_dir(), temp_dir.path());
    assert_eq!(config.site_url(), "https://example.com");
}

#[tokio::test]
async fn test_builder_optional_fields_have_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = MigrationConfig::builder()
        .site_url("https://example.com/")
        .content_dir(temp_dir.path().to_path_buf())
        .build()
        .unwrap();

    assert_eq!(config.sitemap_url(), "https://example.com/sitemap.xml");
    assert_eq!(config.request_timeout(), Duration::from_secs(10));
    assert_eq!(config.crawl_delay(), Duration::from_secs(1));
    assert_eq!(config.cache_ttl(), Duration::from_secs(300));
    assert!(config.api().is_none());

    let optimizer = config.optimizer_config();
    assert_eq!(optimizer.sizes, vec![320, 640, 768, 1024, 1280, 1920]);
    assert_eq!(optimizer.formats, vec!["webp".to_string(), "jpg".to_string()]);
    assert_eq!(optimizer.batch_size, 5);
}

#[tokio::test]
async fn test_builder_with_all_optional_fields() {
    let temp_dir = TempDir::new().unwrap();
    let config = MigrationConfig::builder()
        .site_url("https://example.com")
        .content_dir(temp_dir.path().join("content"))
        .assets_dir(temp_dir.path().join("assets"))
        .sitemap_url("https://example.com/sitemap_index.xml")
        .public_assets_path("/static/img/")
        .allowed_image_domains(vec!["cdn.example.com".to_string()])
        .batch_size(2)
        .api_credentials(ApiCredentials::new("token", "site-1"))
        .build()
        .unwrap();

    assert_eq!(config.sitemap_url(), "https://example.com/sitemap_index.xml");
    assert_eq!(config.assets_dir(), temp_dir.path().join("assets"));
    assert_eq!(config.public_assets_path(), "/static/img");
    assert_eq!(config.optimizer_config().batch_size, 2);
    assert_eq!(config.api().map(|a| a.site_id.as_str()), Some("site-1"));

    let extractor = config.extractor_config();
    assert!(extractor.is_valid_image_url("https://cdn.example.com/a.png"));
    assert!(!extractor.is_valid_image_url("https://elsewhere.com/a.png"));
}

#[tokio::test]
async fn test_builder_rejects_invalid_values() {
    let dir = PathBuf::from("/tmp/content");

    let bad_url = MigrationConfig::builder()
        .site_url("ftp://example.com")
        .content_dir(dir.clone())
        .build();
    assert!(bad_url.is_err());

    let no_sizes = MigrationConfig::builder()
        .site_url("https://example.com")
        .content_dir(dir.clone())
        .image_sizes(Vec::new())
        .build();
    assert!(no_sizes.is_err());

    let no_formats = MigrationConfig::builder()
        .site_url("https://example.com")
        .content_dir(dir)
        .image_formats(Vec::new())
        .build();
    assert!(no_formats.is_err());
}

#[tokio::test]
async fn test_fast_config_helper() {
    let temp_dir = TempDir::new().unwrap();
    let config = common::fast_config(
        "http://127.0.0.1:1",
        &temp_dir.path().join("content"),
        &temp_dir.path().join("assets"),
    );

    assert_eq!(config.crawl_delay(), Duration::ZERO);
    assert_eq!(config.optimizer_config().batch_delay, Duration::ZERO);
}
