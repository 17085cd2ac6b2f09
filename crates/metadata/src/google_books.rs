//! Google Books adapter.
//!
//! Public volumes API: https://developers.google.com/books/docs/v1/using
//! The API key is optional; without it requests share Google's anonymous quota.

pub mod models;

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::google_books::models::{ImageLinks, Volume, Volumes};
use crate::provider::BookProvider;
use crate::{MediaItem, MetadataError, PagedResult, read_json, require_query, transform};

const BASE_URL: &str = "https://www.googleapis.com/books/v1";
const PROVIDER: &str = "google_books";

/// Volumes per page; Google caps `maxResults` at 40.
pub const PAGE_SIZE: u32 = 20;

static VOLUME_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").unwrap());

pub fn is_valid_volume_id(id: &str) -> bool {
    VOLUME_ID_RE.is_match(id)
}

/// Largest available cover, served over https.
pub fn cover_url(links: Option<&ImageLinks>) -> Option<String> {
    let links = links?;
    [
        &links.extra_large,
        &links.large,
        &links.medium,
        &links.small,
        &links.thumbnail,
        &links.small_thumbnail,
    ]
    .into_iter()
    .find_map(|l| l.as_deref().map(str::trim).filter(|l| !l.is_empty()))
    .map(|url| match url.strip_prefix("http://") {
        Some(rest) => format!("https://{rest}"),
        None => url.to_string(),
    })
}

pub struct GoogleBooksClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl GoogleBooksClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, MetadataError> {
        let mut query: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        if let Some(key) = self.api_key.as_deref() {
            query.push(("key", key));
        }

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "Google Books request");

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        read_json(PROVIDER, resp).await
    }
}

#[async_trait::async_trait]
impl BookProvider for GoogleBooksClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search_books(
        &self,
        query: &str,
        start_index: i64,
    ) -> Result<PagedResult<MediaItem>, MetadataError> {
        let query = require_query(query)?;
        let start_index = u32::try_from(start_index.max(0)).unwrap_or(u32::MAX);
        let params = [
            ("q", query.to_string()),
            ("startIndex", start_index.to_string()),
            ("maxResults", PAGE_SIZE.to_string()),
            ("printType", "books".to_string()),
            ("langRestrict", "fr".to_string()),
        ];

        let data: Volumes = self.get("/volumes", &params).await?;
        debug!(query, results = data.items.len(), "Google Books search");

        let total_results = data.total_items.unwrap_or(0);
        Ok(PagedResult {
            page: start_index / PAGE_SIZE + 1,
            total_pages: total_results.div_ceil(PAGE_SIZE),
            total_results,
            results: data
                .items
                .into_iter()
                .filter_map(transform::transform_book)
                .collect(),
        })
    }

    async fn get_book_details(&self, id: &str) -> Result<MediaItem, MetadataError> {
        if !is_valid_volume_id(id) {
            return Err(MetadataError::Validation(format!("invalid volume id: {id}")));
        }

        let volume: Volume = self.get(&format!("/volumes/{id}"), &[]).await?;
        transform::transform_book(volume)
            .ok_or_else(|| MetadataError::Decode(format!("{PROVIDER}: volume without id")))
    }
}
