pub mod certification;
pub mod google_books;
pub mod igdb;
pub mod provider;
pub mod tmdb;
pub mod transform;

use mediafamille_core::types::MediaType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::certification::AgeRating;

/// Relative path served by the web front for items without artwork.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-poster.svg";

/// Highest page number TMDB will serve.
pub const MAX_PAGE: i64 = 500;

#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("{provider} returned HTTP {status}")]
    Upstream { provider: &'static str, status: u16 },
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Canonical media entry handed to callers, whatever the upstream.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub igdb_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub release_date: Option<String>,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
    pub synopsis_fr: Option<String>,
    pub official_rating: Option<String>,
    pub age_rating: Option<AgeRating>,
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<CastMember>>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_seasons: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platforms: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
}

impl MediaItem {
    /// Empty item of the given type, poster set to the placeholder.
    pub fn new(id: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            id: id.into(),
            tmdb_id: None,
            igdb_id: None,
            external_id: None,
            title: None,
            original_title: None,
            media_type,
            release_date: None,
            poster_url: PLACEHOLDER_IMAGE.to_string(),
            backdrop_url: None,
            synopsis_fr: None,
            official_rating: None,
            age_rating: None,
            genres: Vec::new(),
            cast: None,
            vote_average: None,
            vote_count: None,
            runtime_minutes: None,
            number_of_seasons: None,
            platforms: None,
            developers: None,
            authors: None,
            publisher: None,
            page_count: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PagedResult<U> {
        PagedResult {
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Page number to send upstream: anything outside `1..=500` becomes 1.
pub fn normalize_page(page: i64) -> u32 {
    if (1..=MAX_PAGE).contains(&page) {
        page as u32
    } else {
        1
    }
}

/// Reject queries that cannot be sent upstream, before any I/O.
pub(crate) fn require_query(query: &str) -> Result<&str, MetadataError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(MetadataError::Validation("empty search query".into()));
    }
    if query.chars().count() > mediafamille_core::sanitize::MAX_QUERY_LEN {
        return Err(MetadataError::Validation("search query too long".into()));
    }
    Ok(query)
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Check the status and decode the body into the upstream record type.
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: &'static str,
    resp: reqwest::Response,
) -> Result<T, MetadataError> {
    let status = resp.status();
    if !status.is_success() {
        warn!(provider, status = status.as_u16(), "upstream request failed");
        return Err(MetadataError::Upstream {
            provider,
            status: status.as_u16(),
        });
    }

    let body = resp
        .text()
        .await
        .map_err(|e| MetadataError::Network(e.to_string()))?;

    serde_json::from_str(&body).map_err(|e| {
        warn!(provider, error = %e, "unexpected upstream payload");
        MetadataError::Decode(format!("{provider}: {e}"))
    })
}

/// Build the shared reqwest client, optionally bounded by a timeout.
pub fn http_client(
    timeout: Option<std::time::Duration>,
) -> Result<reqwest::Client, MetadataError> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        "mediafamille/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| MetadataError::Config(format!("cannot build HTTP client: {e}")))
}
