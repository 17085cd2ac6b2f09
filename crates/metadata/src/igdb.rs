//! IGDB (Internet Game Database) adapter.
//!
//! API v4: https://api-docs.igdb.com/ — requests are POSTs whose body is an
//! IGDB query (`fields …; where …; limit …;`), authenticated with a Twitch
//! app token held in a [`TokenCache`].

pub mod models;
pub mod token;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::igdb::models::Game;
use crate::provider::GameProvider;
pub use crate::igdb::token::TokenCache;
use crate::{MediaItem, MetadataError, read_json, require_query, transform};

const BASE_URL: &str = "https://api.igdb.com/v4";
const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const PROVIDER: &str = "igdb";

pub const IMAGE_BASE: &str = "https://images.igdb.com/igdb/image/upload";
pub const COVER_SIZE: &str = "t_cover_big";
pub const BACKDROP_SIZE: &str = "t_1080p";

const SEARCH_LIMIT: u32 = 20;
pub const MAX_POPULAR_LIMIT: u32 = 50;

const FIELDS: &str = "name,summary,first_release_date,cover.image_id,artworks.image_id,\
screenshots.image_id,genres.name,platforms.name,involved_companies.company.name,\
involved_companies.developer,age_ratings.category,age_ratings.rating,total_rating,\
total_rating_count";

/// Image URL for an IGDB `image_id` at the given size token.
pub fn image_url(image_id: Option<&str>, size: &str) -> Option<String> {
    image_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| format!("{IMAGE_BASE}/{size}/{id}.jpg"))
}

#[derive(Debug, Clone)]
pub struct IgdbCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl IgdbCredentials {
    /// `None` unless both halves are present and non-blank.
    pub fn from_parts(client_id: Option<String>, client_secret: Option<String>) -> Option<Self> {
        let client_id = client_id.filter(|s| !s.trim().is_empty())?;
        let client_secret = client_secret.filter(|s| !s.trim().is_empty())?;
        Some(Self {
            client_id,
            client_secret,
        })
    }
}

/// Escape a free-text value for use inside an IGDB string literal.
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

pub fn search_body(query: &str) -> String {
    format!(
        "search \"{}\"; fields {FIELDS}; where version_parent = null; limit {SEARCH_LIMIT};",
        escape(query)
    )
}

pub fn popular_body(limit: u32) -> String {
    let limit = limit.clamp(1, MAX_POPULAR_LIMIT);
    format!(
        "fields {FIELDS}; where total_rating_count > 50 & cover != null; \
         sort total_rating desc; limit {limit};"
    )
}

pub fn details_body(id: u64) -> String {
    format!("fields {FIELDS}; where id = {id}; limit 1;")
}

pub struct IgdbClient {
    credentials: Option<IgdbCredentials>,
    base_url: String,
    token_url: String,
    client: reqwest::Client,
    tokens: Arc<TokenCache>,
}

impl IgdbClient {
    pub fn new(credentials: Option<IgdbCredentials>) -> Self {
        Self {
            credentials,
            base_url: BASE_URL.to_string(),
            token_url: TOKEN_URL.to_string(),
            client: reqwest::Client::new(),
            tokens: Arc::new(TokenCache::new()),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_token_cache(mut self, tokens: Arc<TokenCache>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn token_cache(&self) -> Arc<TokenCache> {
        self.tokens.clone()
    }

    fn credentials(&self) -> Result<&IgdbCredentials, MetadataError> {
        self.credentials.as_ref().ok_or_else(|| {
            MetadataError::Config("IGDB_CLIENT_ID and IGDB_CLIENT_SECRET must be set".into())
        })
    }

    async fn query_games(&self, body: String) -> Result<Vec<Game>, MetadataError> {
        let credentials = self.credentials()?;
        let token = self
            .tokens
            .token(&self.client, &self.token_url, credentials)
            .await?;

        let url = format!("{}/games", self.base_url);
        debug!(url = %url, body = %body, "IGDB request");

        let resp = self
            .client
            .post(&url)
            .header("Client-ID", &credentials.client_id)
            .bearer_auth(&token)
            .header(reqwest::header::ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            warn!("IGDB rejected the cached token, dropping it");
            self.tokens.clear().await;
        }

        read_json(PROVIDER, resp).await
    }
}

#[async_trait::async_trait]
impl GameProvider for IgdbClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search_games(&self, query: &str) -> Result<Vec<MediaItem>, MetadataError> {
        let query = require_query(query)?;
        let games = self.query_games(search_body(query)).await?;
        debug!(query, results = games.len(), "IGDB search");
        Ok(games.into_iter().map(transform::transform_game).collect())
    }

    async fn get_popular_games(&self, limit: u32) -> Result<Vec<MediaItem>, MetadataError> {
        let games = self.query_games(popular_body(limit)).await?;
        Ok(games.into_iter().map(transform::transform_game).collect())
    }

    async fn get_game_details(&self, id: u64) -> Result<Option<MediaItem>, MetadataError> {
        let games = self.query_games(details_body(id)).await?;
        Ok(games.into_iter().next().map(transform::transform_game))
    }
}
