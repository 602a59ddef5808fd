//! HTTP page scraper and shallow site crawl

use chrono::Utc;
use dashmap::DashSet;
use reqwest::Client;
use scraper::{Html, Selector};
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use super::assets::extract_assets;
use super::links::extract_navigation_links;
use super::metadata::extract_metadata;
use super::sections::extract_sections;
use super::types::ScrapedPage;
use crate::config::MigrationConfig;
use crate::error::{MigrateError, MigrateResult};
use crate::utils::{CHROME_USER_AGENT, DEFAULT_CRAWL_DELAY, DEFAULT_REQUEST_TIMEOUT, normalize_page_url};

// Hardcoded selectors should NEVER fail to parse - if they do, it's a compile-time bug.
static BODY: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("body").expect("BUG: hardcoded CSS selector 'body' is invalid")
});

/// Fetches pages and turns them into [`ScrapedPage`] records
///
/// Cloning is cheap; clones share the HTTP client and the visited set, so a
/// scraper can be handed to parallel workers.
#[derive(Clone)]
pub struct PageScraper {
    client: Client,
    crawl_delay: Duration,
    visited: Arc<DashSet<String>>,
}

impl PageScraper {
    /// Scraper with the default 10 second timeout and 1 second crawl delay
    pub fn new() -> MigrateResult<Self> {
        Self::with_settings(DEFAULT_REQUEST_TIMEOUT, DEFAULT_CRAWL_DELAY)
    }

    pub fn from_config(config: &MigrationConfig) -> MigrateResult<Self> {
        Self::with_settings(config.request_timeout(), config.crawl_delay())
    }

    pub fn with_settings(timeout: Duration, crawl_delay: Duration) -> MigrateResult<Self> {
        let client = Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| MigrateError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            crawl_delay,
            visited: Arc::new(DashSet::new()),
        })
    }

    /// Whether `url` (normalized) has already been fetched by this scraper
    #[must_use]
    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(&normalize_page_url(url))
    }

    #[must_use]
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Forget every visited URL so a fresh crawl can start
    pub fn reset_visited(&self) {
        self.visited.clear();
    }

    /// Mark `url` visited, returning false if another caller already claimed it
    ///
    /// The insert itself is the membership test, so two workers sharing the
    /// set can never both claim the same page.
    fn claim(&self, url: &str) -> bool {
        self.visited.insert(normalize_page_url(url))
    }

    async fn fetch_html(&self, url: &str) -> MigrateResult<String> {
        log::debug!("Fetching page: {url}");

        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .map_err(|e| MigrateError::from_request(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MigrateError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MigrateError::from_request(url, &e))
    }

    /// Parse already-fetched markup into a page record
    ///
    /// Pure: no network access, the same input always yields the same
    /// sections, metadata and assets.
    #[must_use]
    pub fn parse_page(url: &str, html: &str) -> ScrapedPage {
        let document = Html::parse_document(html);
        Self::build_page(url, &document)
    }

    fn build_page(url: &str, document: &Html) -> ScrapedPage {
        let metadata = extract_metadata(document);
        let raw_html = document
            .select(&BODY)
            .next()
            .map_or_else(|| document.root_element().inner_html(), |body| body.inner_html());

        ScrapedPage {
            url: url.to_string(),
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            raw_html,
            sections: extract_sections(document),
            assets: extract_assets(document, url),
            metadata,
            scraped_at: Utc::now(),
        }
    }

    /// Fetch and parse a single page
    ///
    /// Non-2xx responses and timeouts are returned as errors immediately;
    /// nothing is retried at this layer.
    ///
    /// The URL is always fetched and recorded as visited, even if a crawl
    /// already saw it.
    pub async fn scrape_page(&self, url: &str) -> MigrateResult<ScrapedPage> {
        self.claim(url);
        self.fetch_and_parse(url).await
    }

    async fn fetch_and_parse(&self, url: &str) -> MigrateResult<ScrapedPage> {
        let html = self.fetch_html(url).await?;
        let page = Self::parse_page(url, &html);
        log::debug!(
            "Scraped {url}: {} sections, {} assets",
            page.sections.len(),
            page.assets.len()
        );
        Ok(page)
    }

    /// Scrape a list of URLs sequentially, pausing between fetches
    ///
    /// Failed fetches are logged and skipped. URLs already visited by this
    /// scraper, or claimed by a clone running in parallel, are not fetched again.
    pub async fn scrape_urls(&self, urls: &[String]) -> Vec<ScrapedPage> {
        let mut pages = Vec::with_capacity(urls.len());
        let mut first = true;

        for url in urls {
            if !self.claim(url) {
                log::debug!("Skipping already visited {url}");
                continue;
            }
            if !first && !self.crawl_delay.is_zero() {
                tokio::time::sleep(self.crawl_delay).await;
            }
            first = false;

            match self.fetch_and_parse(url).await {
                Ok(page) => pages.push(page),
                Err(e) => log::warn!("Skipping {url}: {e}"),
            }
        }

        pages
    }

    /// Crawl a site from its root URL
    ///
    /// Only the navigation links of the root page are followed; pages found
    /// later are not mined for further links. A failure on the root page is
    /// returned, failures on secondary pages are skipped.
    pub async fn scrape_website(&self, root_url: &str) -> MigrateResult<Vec<ScrapedPage>> {
        self.claim(root_url);
        let html = self.fetch_html(root_url).await?;
        let (root_page, links) = {
            let document = Html::parse_document(&html);
            (
                Self::build_page(root_url, &document),
                extract_navigation_links(&document, root_url),
            )
        };
        log::info!("Found {} navigation links on {root_url}", links.len());

        let mut pages = vec![root_page];
        for url in links {
            if !self.claim(&url) {
                continue;
            }
            if !self.crawl_delay.is_zero() {
                tokio::time::sleep(self.crawl_delay).await;
            }
            match self.fetch_and_parse(&url).await {
                Ok(page) => pages.push(page),
                Err(e) => log::warn!("Skipping {url}: {e}"),
            }
        }

        log::info!("Crawled {} pages from {root_url}", pages.len());
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_scraper() -> PageScraper {
        PageScraper::with_settings(Duration::from_secs(5), Duration::ZERO).unwrap()
    }

    #[test]
    fn parse_page_fills_title_and_body() {
        let page = PageScraper::parse_page(
            "https://acme.com/",
            r#"<html><head><title>Acme</title><meta name="description" content="Tools"></head>
            <body><section class="hero"><h1>Welcome</h1></section></body></html>"#,
        );
        assert_eq!(page.title, "Acme");
        assert_eq!(page.description, "Tools");
        assert!(page.raw_html.contains("<h1>Welcome</h1>"));
        assert_eq!(page.sections.len(), 1);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server.mock("GET", "/missing").with_status(404).create_async().await;

        let url = format!("{}/missing", server.url());
        let err = fast_scraper().scrape_page(&url).await.unwrap_err();
        assert!(matches!(err, MigrateError::HttpStatus { status: 404, .. }));
    }

    #[tokio::test]
    async fn crawl_follows_root_nav_links_and_skips_failures() {
        let mut server = mockito::Server::new_async().await;
        let _root = server
            .mock("GET", "/")
            .with_header("content-type", "text/html")
            .with_body(
                r#"<html><body><nav><a href="/about">About</a><a href="/broken">Broken</a></nav></body></html>"#,
            )
            .create_async()
            .await;
        let _about = server
            .mock("GET", "/about")
            .with_body(r#"<html><body><nav><a href="/deeper">Deeper</a></nav></body></html>"#)
            .expect(1)
            .create_async()
            .await;
        let _broken = server.mock("GET", "/broken").with_status(500).create_async().await;
        let deeper = server.mock("GET", "/deeper").expect(0).create_async().await;

        let scraper = fast_scraper();
        let pages = scraper.scrape_website(&format!("{}/", server.url())).await.unwrap();

        assert_eq!(pages.len(), 2);
        assert!(pages[1].url.ends_with("/about"));
        deeper.assert_async().await;
    }

    #[tokio::test]
    async fn parallel_workers_fetch_each_url_once() {
        let mut server = mockito::Server::new_async().await;
        let pricing = server
            .mock("GET", "/pricing")
            .with_body("<html><head><title>Pricing</title></head><body></body></html>")
            .expect(1)
            .create_async()
            .await;
        let about = server
            .mock("GET", "/about")
            .with_body("<html><head><title>About</title></head><body></body></html>")
            .expect(1)
            .create_async()
            .await;

        let base = server.url();
        let urls = vec![
            format!("{base}/pricing"),
            format!("{base}/about"),
            format!("{base}/pricing/"),
            format!("{base}/about#team"),
        ];

        let scraper = fast_scraper();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let worker = scraper.clone();
                let urls = urls.clone();
                tokio::spawn(async move { worker.scrape_urls(&urls).await })
            })
            .collect();

        let mut total = 0;
        for worker in workers {
            total += worker.await.unwrap().len();
        }

        assert_eq!(total, 2);
        assert_eq!(scraper.visited_count(), 2);
        pricing.assert_async().await;
        about.assert_async().await;
    }

    #[tokio::test]
    async fn root_failure_is_returned() {
        let mut server = mockito::Server::new_async().await;
        let _root = server.mock("GET", "/").with_status(503).create_async().await;

        let result = fast_scraper().scrape_website(&format!("{}/", server.url())).await;
        assert!(result.is_err());
    }
}
