//! Sitemap fetching, categorisation and priority selection

use kodegen_tools_sitemigrate::MigrateError;
use kodegen_tools_sitemigrate::sitemap::{
    SitemapParser, UrlCategory, filter_by_priority, group_by_category, high_priority_urls,
};
use std::time::Duration;

fn urlset(base: &str, entries: &[(&str, Option<f32>)]) -> String {
    let urls: String = entries
        .iter()
        .map(|(path, priority)| {
            let priority = priority.map(|p| format!("<priority>{p}</priority>")).unwrap_or_default();
            format!("<url><loc>{base}{path}</loc><changefreq>weekly</changefreq>{priority}</url>")
        })
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{urls}</urlset>"#
    )
}

#[tokio::test]
async fn high_priority_selection_over_a_live_sitemap() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let mut entries: Vec<(String, Option<f32>)> = vec![
        ("/".to_string(), Some(1.0)),
        ("/pricing".to_string(), Some(0.9)),
        ("/products/widget".to_string(), None),
        ("/legal/terms".to_string(), Some(0.1)),
    ];
    entries.extend((1..=7).map(|i| (format!("/blog/post-{i}"), Some(0.6))));
    entries.extend((1..=4).map(|i| (format!("/customers/story-{i}"), Some(0.4))));
    let borrowed: Vec<(&str, Option<f32>)> =
        entries.iter().map(|(p, pr)| (p.as_str(), *pr)).collect();

    let _sitemap = server
        .mock("GET", "/sitemap.xml")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(urlset(&base, &borrowed))
        .create_async()
        .await;

    let parser = SitemapParser::with_timeout(Duration::from_secs(5)).unwrap();
    let records = parser.fetch(&format!("{base}/sitemap.xml")).await.unwrap();
    assert_eq!(records.len(), 15);
    assert_eq!(records[0].category, UrlCategory::Homepage);
    assert_eq!(records[3].category, UrlCategory::Other);
    assert_eq!(records[0].change_frequency.as_deref(), Some("weekly"));

    let groups = group_by_category(&records);
    assert_eq!(groups[&UrlCategory::Blog].len(), 7);
    assert_eq!(groups[&UrlCategory::CustomerStory].len(), 4);

    // Missing priority counts as 0.5
    let important = filter_by_priority(&records, 0.5);
    assert_eq!(important.len(), 10);

    let selected: Vec<String> = high_priority_urls(&records).into_iter().map(|r| r.url).collect();
    assert_eq!(selected.len(), 3 + 5 + 3);
    assert_eq!(selected[0], format!("{base}/"));
    assert_eq!(selected[3], format!("{base}/blog/post-1"));
    assert_eq!(selected[7], format!("{base}/blog/post-5"));
    assert_eq!(selected[10], format!("{base}/customers/story-3"));
}

#[tokio::test]
async fn sitemap_index_is_followed_one_level() {
    let mut server = mockito::Server::new_async().await;
    let base = server.url();

    let index = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <sitemap><loc>{base}/pages.xml</loc></sitemap>
  <sitemap><loc>{base}/blog.xml</loc></sitemap>
</sitemapindex>"#
    );
    let _index = server
        .mock("GET", "/sitemap_index.xml")
        .with_body(index)
        .create_async()
        .await;
    let _pages = server
        .mock("GET", "/pages.xml")
        .with_body(urlset(&base, &[("/", None), ("/about", None)]))
        .create_async()
        .await;
    let _blog = server
        .mock("GET", "/blog.xml")
        .with_body(urlset(&base, &[("/blog/hello", None)]))
        .create_async()
        .await;

    let parser = SitemapParser::with_timeout(Duration::from_secs(5)).unwrap();
    let records = parser
        .fetch(&format!("{base}/sitemap_index.xml"))
        .await
        .unwrap();

    let categories: Vec<UrlCategory> = records.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![UrlCategory::Homepage, UrlCategory::MainPage, UrlCategory::Blog]
    );
}

#[tokio::test]
async fn missing_sitemap_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _missing = server
        .mock("GET", "/sitemap.xml")
        .with_status(404)
        .create_async()
        .await;

    let parser = SitemapParser::with_timeout(Duration::from_secs(5)).unwrap();
    let result = parser.fetch(&format!("{}/sitemap.xml", server.url())).await;
    assert!(matches!(result, Err(MigrateError::HttpStatus { status: 404, .. })));
}

#[tokio::test]
async fn malformed_sitemap_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _broken = server
        .mock("GET", "/sitemap.xml")
        .with_body("<urlset><url><loc>https://example.com/</loc></urlset>")
        .create_async()
        .await;

    let parser = SitemapParser::with_timeout(Duration::from_secs(5)).unwrap();
    let result = parser.fetch(&format!("{}/sitemap.xml", server.url())).await;
    assert!(matches!(result, Err(MigrateError::Parse(_))));
}
