//! Headless CMS REST client with cached live responses and mock fallback

use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

use super::derived;
use super::mock::mock_response;
use super::outcome::{ApiOutcome, FallbackReason};
use super::types::{
    CmsPage, Collection, CollectionItem, CollectionsResponse, ItemsResponse, PagesResponse,
    SiteInfo,
};
use crate::cache::{CacheStats, TrackedCache};
use crate::config::{ApiCredentials, MigrationConfig};
use crate::error::{MigrateError, MigrateResult};
use crate::utils::{CHROME_USER_AGENT, DEFAULT_CACHE_TTL, DEFAULT_REQUEST_TIMEOUT};

/// Site id used in endpoint paths when no credentials are configured
const MOCK_SITE_ID: &str = "mock-site";

/// Method, query and body of a request; also part of the cache key
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub query: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

impl RequestOptions {
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

/// CMS client; callers never see an error from it
pub struct CmsClient {
    client: Client,
    credentials: Option<ApiCredentials>,
    cache: TrackedCache<Value>,
}

impl CmsClient {
    pub fn new(credentials: Option<ApiCredentials>) -> MigrateResult<Self> {
        let client = Client::builder()
            .user_agent(CHROME_USER_AGENT)
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MigrateError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            cache: TrackedCache::new(DEFAULT_CACHE_TTL),
        })
    }

    pub fn from_config(config: &MigrationConfig) -> MigrateResult<Self> {
        let mut client = Self::new(config.api().cloned())?;
        client.cache = TrackedCache::new(config.cache_ttl());
        let interval = config.cache_sweep_interval();
        if client.cache.start_sweep_task(interval).is_some() {
            log::debug!("CMS cache sweep every {interval:?}");
        }
        Ok(client)
    }

    /// True when requests go to the real API
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    fn site_id(&self) -> &str {
        self.credentials
            .as_ref()
            .map_or(MOCK_SITE_ID, |credentials| credentials.site_id.as_str())
    }

    fn cache_key(endpoint: &str, options: &RequestOptions) -> String {
        let serialized = serde_json::to_string(options).unwrap_or_default();
        format!("{endpoint}:{serialized}")
    }

    async fn fetch_live(&self, endpoint: &str, options: &RequestOptions) -> Result<Value, FallbackReason> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(FallbackReason::MissingCredentials)?;

        let method = options
            .method
            .as_deref()
            .and_then(|m| Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok())
            .unwrap_or(Method::GET);
        let url = format!("{}{endpoint}", credentials.base_url.trim_end_matches('/'));

        log::debug!("CMS request: {method} {url}");
        let mut request = self
            .client
            .request(method, &url)
            .bearer_auth(&credentials.token)
            .header("Accept", "application/json");
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FallbackReason::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FallbackReason::HttpStatus(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FallbackReason::Decode(e.to_string()))
    }

    fn fallback<T: DeserializeOwned + Default>(endpoint: &str, reason: FallbackReason) -> ApiOutcome<T> {
        log::warn!("CMS request {endpoint} served from mock data: {reason}");
        let data = serde_json::from_value(mock_response(endpoint)).unwrap_or_default();
        ApiOutcome::Fallback { data, reason }
    }

    /// Issue a request and decode it as `T`
    ///
    /// Live responses are cached per endpoint and options for the cache
    /// TTL. Missing credentials, network failures, non-2xx responses and
    /// undecodable bodies all yield mock data instead; fallbacks are not
    /// cached, so a recovered API is used on the next call.
    pub async fn make_request<T: DeserializeOwned + Default>(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> ApiOutcome<T> {
        let key = Self::cache_key(endpoint, options);
        if let Some(cached) = self.cache.get(&key) {
            if let Ok(data) = serde_json::from_value(cached) {
                return ApiOutcome::Live(data);
            }
        }

        match self.fetch_live(endpoint, options).await {
            Ok(value) => match serde_json::from_value::<T>(value.clone()) {
                Ok(data) => {
                    self.cache.set(key, value, None);
                    ApiOutcome::Live(data)
                }
                Err(e) => Self::fallback(endpoint, FallbackReason::Decode(e.to_string())),
            },
            Err(reason) => Self::fallback(endpoint, reason),
        }
    }

    pub async fn list_collections(&self) -> ApiOutcome<Vec<Collection>> {
        let endpoint = format!("/sites/{}/collections", self.site_id());
        self.make_request::<CollectionsResponse>(&endpoint, &RequestOptions::default())
            .await
            .map(|response| response.collections)
    }

    pub async fn list_items(&self, collection_id: &str) -> ApiOutcome<Vec<CollectionItem>> {
        let endpoint = format!("/collections/{collection_id}/items");
        self.make_request::<ItemsResponse>(&endpoint, &RequestOptions::default())
            .await
            .map(|response| response.items)
    }

    pub async fn list_pages(&self) -> ApiOutcome<Vec<CmsPage>> {
        let endpoint = format!("/sites/{}/pages", self.site_id());
        self.make_request::<PagesResponse>(&endpoint, &RequestOptions::default())
            .await
            .map(|response| response.pages)
    }

    pub async fn get_site(&self) -> ApiOutcome<SiteInfo> {
        let endpoint = format!("/sites/{}", self.site_id());
        self.make_request::<SiteInfo>(&endpoint, &RequestOptions::default())
            .await
    }

    pub async fn get_item_by_slug(&self, collection_id: &str, slug: &str) -> ApiOutcome<Option<CollectionItem>> {
        self.list_items(collection_id)
            .await
            .map(|items| derived::find_by_slug(&items, slug).cloned())
    }

    pub async fn published_items(&self, collection_id: &str) -> ApiOutcome<Vec<CollectionItem>> {
        self.list_items(collection_id)
            .await
            .map(|items| derived::published(&items))
    }

    pub async fn search_items(
        &self,
        collection_id: &str,
        query: &str,
        fields: &[&str],
    ) -> ApiOutcome<Vec<CollectionItem>> {
        self.list_items(collection_id)
            .await
            .map(|items| derived::search(&items, query, fields))
    }

    pub async fn related_items(
        &self,
        collection_id: &str,
        item: &CollectionItem,
        field: &str,
        limit: usize,
    ) -> ApiOutcome<Vec<CollectionItem>> {
        self.list_items(collection_id)
            .await
            .map(|items| derived::related(&items, item, field, limit))
    }

    /// Drop every cached response
    pub fn clear_cache(&self) {
        self.cache.inner().clear();
    }

    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
