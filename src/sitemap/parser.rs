//! Sitemap XML parsing
//!
//! Supports:
//! - Standard `urlset` sitemaps
//! - Sitemap index files (`sitemapindex`), resolved one level deep
//!
//! Network or parse failure is raised immediately with no partial results;
//! the caller decides whether to proceed without sitemap guidance.

use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::category::{UrlCategory, categorize_url};
use crate::error::{MigrateError, MigrateResult};
use crate::utils::{CHROME_USER_AGENT, DEFAULT_REQUEST_TIMEOUT};

/// Upper bound on child sitemaps fetched from one sitemap index
const MAX_CHILD_SITEMAPS: usize = 50;

/// One `<url>` entry of a sitemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitemapUrlRecord {
    pub url: String,
    pub last_modified: Option<String>,
    pub change_frequency: Option<String>,
    pub priority: Option<f32>,
    pub category: UrlCategory,
}

/// Parsed sitemap document
#[derive(Debug, Clone, PartialEq)]
pub enum SitemapDocument {
    UrlSet(Vec<SitemapUrlRecord>),
    /// Locations of child sitemaps
    Index(Vec<String>),
}

/// Field of a `<url>`/`<sitemap>` entry currently being read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    LastMod,
    ChangeFreq,
    Priority,
}

#[derive(Debug, Default)]
struct EntryBuilder {
    loc: Option<String>,
    lastmod: Option<String>,
    changefreq: Option<String>,
    priority: Option<f32>,
}

impl EntryBuilder {
    fn set(&mut self, field: Field, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        match field {
            Field::Loc => self.loc = Some(text.to_string()),
            Field::LastMod => self.lastmod = Some(text.to_string()),
            Field::ChangeFreq => self.changefreq = Some(text.to_string()),
            // An unparseable priority is treated as absent
            Field::Priority => self.priority = text.parse::<f32>().ok().filter(|p| p.is_finite()),
        }
    }

    fn into_record(self) -> Option<SitemapUrlRecord> {
        let url = self.loc?;
        let category = categorize_url(&url);
        Some(SitemapUrlRecord {
            url,
            last_modified: self.lastmod,
            change_frequency: self.changefreq,
            priority: self.priority,
            category,
        })
    }
}

fn field_for(name: &[u8]) -> Option<Field> {
    match name {
        b"loc" => Some(Field::Loc),
        b"lastmod" => Some(Field::LastMod),
        b"changefreq" => Some(Field::ChangeFreq),
        b"priority" => Some(Field::Priority),
        _ => None,
    }
}

fn xml_error(e: impl std::fmt::Display, position: impl std::fmt::Display) -> MigrateError {
    MigrateError::Parse(format!("Malformed sitemap XML at byte {position}: {e}"))
}

/// Parse a sitemap or sitemap index document
pub fn parse_sitemap_document(xml: &str) -> MigrateResult<SitemapDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut is_index: Option<bool> = None;
    let mut current: Option<EntryBuilder> = None;
    let mut field: Option<Field> = None;
    let mut records = Vec::new();
    let mut children = Vec::new();

    loop {
        let position = reader.buffer_position();
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                let name = name.as_ref();
                match is_index {
                    None => {
                        is_index = Some(match name {
                            b"urlset" => false,
                            b"sitemapindex" => true,
                            other => {
                                return Err(MigrateError::Parse(format!(
                                    "Unexpected sitemap root element <{}>",
                                    String::from_utf8_lossy(other)
                                )));
                            }
                        });
                    }
                    Some(_) if name == b"url" || name == b"sitemap" => {
                        current = Some(EntryBuilder::default());
                    }
                    Some(_) if current.is_some() => field = field_for(name),
                    Some(_) => {}
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    let text = e.unescape().map_err(|err| xml_error(err, position))?;
                    entry.set(f, &text);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(entry), Some(f)) = (current.as_mut(), field) {
                    entry.set(f, &String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::End(e)) => {
                let name = e.local_name();
                match name.as_ref() {
                    b"url" | b"sitemap" => {
                        if let Some(entry) = current.take() {
                            if is_index == Some(true) {
                                children.extend(entry.loc);
                            } else if let Some(record) = entry.into_record() {
                                records.push(record);
                            }
                        }
                    }
                    other if field_for(other).is_some() => field = None,
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(e, position)),
            _ => {}
        }
    }

    match is_index {
        None => Err(MigrateError::Parse("Sitemap document has no root element".to_string())),
        Some(true) => Ok(SitemapDocument::Index(children)),
        Some(false) => Ok(SitemapDocument::UrlSet(records)),
    }
}

/// Parse a `urlset` document into records
///
/// A sitemap index is rejected here; use [`SitemapParser::fetch`] to follow one.
pub fn parse_sitemap_xml(xml: &str) -> MigrateResult<Vec<SitemapUrlRecord>> {
    match parse_sitemap_document(xml)? {
        SitemapDocument::UrlSet(records) => Ok(records),
        SitemapDocument::Index(_) => Err(MigrateError::Parse(
            "Expected a urlset sitemap but found a sitemap index".to_string(),
        )),
    }
}

/// Sitemap fetcher
pub struct SitemapParser {
    client: Client,
}

impl SitemapParser {
    /// Create a parser with the default 10 second fetch deadline
    pub fn new() -> MigrateResult<Self> {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> MigrateResult<Self> {
        let client = Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| MigrateError::Config(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    async fn fetch_text(&self, url: &str) -> MigrateResult<String> {
        log::debug!("Fetching sitemap: {url}");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/xml,text/xml;q=0.9,*/*;q=0.8")
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

    /// Fetch and parse a sitemap, following a sitemap index one level deep
    ///
    /// Records keep document order (child sitemaps in index order).
    pub async fn fetch(&self, url: &str) -> MigrateResult<Vec<SitemapUrlRecord>> {
        let xml = self.fetch_text(url).await?;
        match parse_sitemap_document(&xml)? {
            SitemapDocument::UrlSet(records) => {
                log::info!("Parsed {} URLs from sitemap {url}", records.len());
                Ok(records)
            }
            SitemapDocument::Index(children) => {
                log::info!("Sitemap index {url} lists {} sitemaps", children.len());
                let mut all = Vec::new();
                for child in children.iter().take(MAX_CHILD_SITEMAPS) {
                    let xml = self.fetch_text(child).await?;
                    all.extend(parse_sitemap_xml(&xml)?);
                }
                if children.len() > MAX_CHILD_SITEMAPS {
                    log::warn!(
                        "Sitemap index {url} truncated to {MAX_CHILD_SITEMAPS} of {} sitemaps",
                        children.len()
                    );
                }
                Ok(all)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url>
    <loc>https://example.com/</loc>
    <lastmod>2024-05-01</lastmod>
    <changefreq>weekly</changefreq>
    <priority>1.0</priority>
  </url>
  <url>
    <loc>https://example.com/blog/my-post?utm=a&amp;b=c</loc>
    <priority>not-a-number</priority>
  </url>
  <url>
    <loc><![CDATA[https://example.com/pricing]]></loc>
    <priority>0.8</priority>
  </url>
</urlset>"#;

    #[test]
    fn parses_urlset_fields() {
        let records = parse_sitemap_xml(SITEMAP).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].url, "https://example.com/");
        assert_eq!(records[0].last_modified.as_deref(), Some("2024-05-01"));
        assert_eq!(records[0].change_frequency.as_deref(), Some("weekly"));
        assert_eq!(records[0].priority, Some(1.0));
        assert_eq!(records[0].category, UrlCategory::Homepage);

        assert_eq!(records[1].url, "https://example.com/blog/my-post?utm=a&b=c");
        assert_eq!(records[1].priority, None);
        assert_eq!(records[1].category, UrlCategory::Blog);

        assert_eq!(records[2].url, "https://example.com/pricing");
        assert_eq!(records[2].category, UrlCategory::MainPage);
    }

    #[test]
    fn parses_sitemap_index() {
        let xml = r#"<sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
            <sitemap><loc>https://example.com/sitemap-1.xml</loc></sitemap>
            <sitemap><loc>https://example.com/sitemap-2.xml</loc></sitemap>
        </sitemapindex>"#;

        let doc = parse_sitemap_document(xml).unwrap();
        assert_eq!(
            doc,
            SitemapDocument::Index(vec![
                "https://example.com/sitemap-1.xml".to_string(),
                "https://example.com/sitemap-2.xml".to_string(),
            ])
        );
        assert!(parse_sitemap_xml(xml).is_err());
    }

    #[test]
    fn rejects_non_sitemap_root() {
        let err = parse_sitemap_xml("<html><body>Not found</body></html>").unwrap_err();
        assert!(matches!(err, MigrateError::Parse(_)));
    }

    #[test]
    fn rejects_empty_and_malformed_documents() {
        assert!(parse_sitemap_xml("").is_err());
        assert!(parse_sitemap_xml("<urlset><url><loc>x</url></urlset>").is_err());
    }
}
