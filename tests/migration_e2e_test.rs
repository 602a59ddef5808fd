//! Full migration runs against a mock marketing site

use kodegen_tools_sitemigrate::image_optimizer::MANIFEST_FILENAME;
use kodegen_tools_sitemigrate::pipeline::ASSET_REPORT_FILE;
use kodegen_tools_sitemigrate::transform::PageContent;
use kodegen_tools_sitemigrate::{ContentSectionType, run_migration};
use tempfile::TempDir;

mod common;

async fn mock_site(server: &mut mockito::ServerGuard, sitemap: bool) -> Vec<mockito::Mock> {
    let mut mocks = vec![
        server
            .mock("GET", "/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(common::create_homepage_html())
            .create_async()
            .await,
        server
            .mock("GET", "/about")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(common::create_about_html())
            .create_async()
            .await,
        server
            .mock("GET", "/img/hero.png")
            .with_status(200)
            .with_body(common::png_bytes(1024, 512))
            .expect(1)
            .create_async()
            .await,
        server
            .mock("GET", "/img/og.png")
            .with_status(200)
            .with_body(common::png_bytes(1200, 630))
            .expect(1)
            .create_async()
            .await,
    ];

    let sitemap_mock = if sitemap {
        let base = server.url();
        server
            .mock("GET", "/sitemap.xml")
            .with_status(200)
            .with_body(format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>{base}/about</loc><priority>0.8</priority></url>
</urlset>"#
            ))
            .create_async()
            .await
    } else {
        server
            .mock("GET", "/sitemap.xml")
            .with_status(404)
            .create_async()
            .await
    };
    mocks.push(sitemap_mock);
    mocks
}

fn read_page(path: &std::path::Path) -> PageContent {
    serde_json::from_slice(&std::fs::read(path).unwrap()).unwrap()
}

#[tokio::test]
async fn missing_sitemap_falls_back_to_crawling_from_root() {
    let mut server = mockito::Server::new_async().await;
    let mocks = mock_site(&mut server, false).await;

    let dir = TempDir::new().unwrap();
    let content_dir = dir.path().join("content");
    let assets_dir = dir.path().join("assets");
    let config = common::fast_config(&server.url(), &content_dir, &assets_dir);

    let summary = run_migration(&config).await.unwrap();
    assert_eq!(summary.pages_scraped, 2);
    assert!(summary.content_written);
    assert!(!summary.is_blocking());

    let home = read_page(&content_dir.join("pages/home.json"));
    assert_eq!(home.title, "Acme - Home");
    let hero = home
        .sections
        .iter()
        .find(|s| s.section_type == ContentSectionType::Hero)
        .expect("hero section");
    let hero_data = hero.data.hero.as_ref().expect("hero payload");
    assert_eq!(hero_data.title, "Welcome");
    assert_eq!(hero_data.buttons[0].text, "Get started");
    assert_eq!(
        hero.styling.as_ref().and_then(|s| s.background_color.as_deref()),
        Some("#3b82f6")
    );

    assert!(content_dir.join("pages/about.json").exists());
    assert!(content_dir.join("site-map.json").exists());
    assert!(content_dir.join("transformation-summary.json").exists());

    assert!(assets_dir.join(MANIFEST_FILENAME).exists());
    assert!(assets_dir.join(ASSET_REPORT_FILE).exists());
    assert!(summary.asset_failures.is_empty());
    assert!(summary.asset_stats.unique_images >= 1);

    // The hero image is fetched once even though it appears in two places
    mocks[2].assert_async().await;
    // The relative og:image from the homepage head is resolved and fetched
    mocks[3].assert_async().await;
    assert!(summary.asset_stats.unique_images >= 2);
}

#[tokio::test]
async fn sitemap_urls_are_scraped_alongside_the_root() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_site(&mut server, true).await;

    let dir = TempDir::new().unwrap();
    let content_dir = dir.path().join("content");
    let assets_dir = dir.path().join("assets");
    let config = common::fast_config(&server.url(), &content_dir, &assets_dir);

    let summary = run_migration(&config).await.unwrap();
    assert_eq!(summary.pages_scraped, 2);
    assert_eq!(summary.validation.summary.total_pages, 2);
    assert!(content_dir.join("pages/about.json").exists());
}

#[tokio::test]
async fn second_run_reuses_the_asset_manifest() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_site(&mut server, false).await;

    let dir = TempDir::new().unwrap();
    let content_dir = dir.path().join("content");
    let assets_dir = dir.path().join("assets");
    let config = common::fast_config(&server.url(), &content_dir, &assets_dir);

    let first = run_migration(&config).await.unwrap();
    assert_eq!(first.assets_reused, 0);

    let second = run_migration(&config).await.unwrap();
    assert_eq!(second.assets_reused, first.asset_stats.unique_images);
}

#[tokio::test]
async fn blocking_validation_skips_the_content_tree() {
    let mut server = mockito::Server::new_async().await;
    let _root = server
        .mock("GET", "/")
        .with_status(200)
        .with_body("<html><body><section><p>No title here</p></section></body></html>")
        .create_async()
        .await;
    let _sitemap = server
        .mock("GET", "/sitemap.xml")
        .with_status(404)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let content_dir = dir.path().join("content");
    let assets_dir = dir.path().join("assets");
    let config = common::fast_config(&server.url(), &content_dir, &assets_dir);

    let summary = run_migration(&config).await.unwrap();
    assert!(summary.is_blocking());
    assert!(!summary.content_written);
    assert!(!content_dir.join("pages/home.json").exists());
    assert!(assets_dir.join(MANIFEST_FILENAME).exists());
}
