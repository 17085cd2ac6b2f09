//! TMDB (The Movie Database) adapter.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs
//! Every request is localized for France (`language=fr-FR`, `region=FR`).

pub mod genres;
pub mod models;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::certification::AgeRating;
use crate::provider::MovieProvider;
use crate::tmdb::models::{ContentRatings, MovieDetail, Page, ReleaseDates, TvDetail};
use crate::{
    MediaItem, MetadataError, PLACEHOLDER_IMAGE, PagedResult, normalize_page, read_json,
    require_query, transform,
};

const BASE_URL: &str = "https://api.themoviedb.org/3";
pub const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";
const PROVIDER: &str = "tmdb";
const LANGUAGE: &str = "fr-FR";
const REGION: &str = "FR";

/// Seconds an upstream answer may be reused before revalidation.
pub const REVALIDATE_SECS: u64 = 3600;

/// Sort orders accepted by [`MovieProvider::discover_movies`].
pub const SORT_OPTIONS: [&str; 5] = [
    "popularity.desc",
    "vote_average.desc",
    "primary_release_date.desc",
    "revenue.desc",
    "title.asc",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W92,
    W185,
    W342,
    W500,
    W780,
    W1280,
    Original,
}

impl ImageSize {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::W92 => "w92",
            Self::W185 => "w185",
            Self::W342 => "w342",
            Self::W500 => "w500",
            Self::W780 => "w780",
            Self::W1280 => "w1280",
            Self::Original => "original",
        }
    }
}

/// Full image URL for a TMDB file path, or [`PLACEHOLDER_IMAGE`] when the
/// path is missing or unusable.
pub fn get_image_url(path: Option<&str>, size: ImageSize) -> String {
    let file = path
        .map(|p| p.trim().trim_start_matches('/'))
        .filter(|p| !p.is_empty() && !p.contains(char::is_whitespace) && !p.contains("://"));

    match file {
        Some(file) => format!("{IMAGE_BASE}/{}/{file}", size.as_str()),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// First non-empty French certification in a movie's `release_dates`,
/// across every FR block.
pub fn get_french_certification(release_dates: &ReleaseDates) -> Option<String> {
    release_dates
        .results
        .iter()
        .filter(|country| country.iso_3166_1.as_deref() == Some(REGION))
        .flat_map(|country| &country.release_dates)
        .filter_map(|r| r.certification.as_deref().map(str::trim))
        .find(|c| !c.is_empty())
        .map(str::to_string)
}

/// French rating in a series' `content_ratings`.
pub fn get_tv_french_rating(ratings: &ContentRatings) -> Option<String> {
    ratings
        .results
        .iter()
        .find(|r| r.iso_3166_1.as_deref() == Some(REGION))?
        .rating
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
}

/// Filters for `/discover/movie`.
#[derive(Debug, Clone, Default)]
pub struct DiscoverFilter {
    pub page: i64,
    pub genre_ids: Vec<u32>,
    pub sort_by: Option<String>,
    pub max_age: Option<AgeRating>,
}

pub struct TmdbClient {
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
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

    fn api_key(&self) -> Result<&str, MetadataError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| MetadataError::Config("TMDB_API_KEY is not set".into()))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, MetadataError> {
        let api_key = self.api_key()?;

        let mut query: Vec<(&str, &str)> = vec![
            ("api_key", api_key),
            ("language", LANGUAGE),
            ("region", REGION),
        ];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let url = format!("{}{path}", self.base_url);
        debug!(url = %url, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&query)
            .header(
                reqwest::header::CACHE_CONTROL,
                format!("max-age={REVALIDATE_SECS}"),
            )
            .send()
            .await
            .map_err(|e| MetadataError::Network(e.to_string()))?;

        read_json(PROVIDER, resp).await
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn discover_movies(
        &self,
        filter: &DiscoverFilter,
    ) -> Result<PagedResult<MediaItem>, MetadataError> {
        let sort_by = filter.sort_by.as_deref().unwrap_or(SORT_OPTIONS[0]);
        if !SORT_OPTIONS.contains(&sort_by) {
            return Err(MetadataError::Validation(format!(
                "unsupported sort order: {sort_by}"
            )));
        }

        let page = normalize_page(filter.page);
        let mut params = vec![
            ("page", page.to_string()),
            ("sort_by", sort_by.to_string()),
            ("include_adult", "false".to_string()),
        ];
        if sort_by == "vote_average.desc" {
            params.push(("vote_count.gte", "100".to_string()));
        }
        if !filter.genre_ids.is_empty() {
            let genres = filter
                .genre_ids
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("with_genres", genres));
        }
        if let Some(max_age) = filter.max_age {
            params.push(("certification_country", REGION.to_string()));
            params.push(("certification.lte", max_age.french_label().to_string()));
        }

        let data: Page<models::Movie> = self.get_json("/discover/movie", &params).await?;
        Ok(transform::transform_page(data, page, transform::transform_movie))
    }

    async fn search_movies(
        &self,
        query: &str,
        page: i64,
    ) -> Result<PagedResult<MediaItem>, MetadataError> {
        let query = require_query(query)?;
        let page = normalize_page(page);
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("include_adult", "false".to_string()),
        ];

        let data: Page<models::Movie> = self.get_json("/search/movie", &params).await?;
        debug!(query, results = data.results.len(), "TMDB movie search");
        Ok(transform::transform_page(data, page, transform::transform_movie))
    }

    async fn search_tv(
        &self,
        query: &str,
        page: i64,
    ) -> Result<PagedResult<MediaItem>, MetadataError> {
        let query = require_query(query)?;
        let page = normalize_page(page);
        let params = [
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("include_adult", "false".to_string()),
        ];

        let data: Page<models::TvShow> = self.get_json("/search/tv", &params).await?;
        debug!(query, results = data.results.len(), "TMDB tv search");
        Ok(transform::transform_page(data, page, transform::transform_tv))
    }

    async fn get_movie_details(&self, id: u64) -> Result<MediaItem, MetadataError> {
        let data: MovieDetail = self
            .get_json(
                &format!("/movie/{id}"),
                &[("append_to_response", "credits,release_dates".to_string())],
            )
            .await?;

        Ok(transform::transform_movie_detail(data))
    }

    async fn get_tv_details(&self, id: u64) -> Result<MediaItem, MetadataError> {
        let data: TvDetail = self
            .get_json(
                &format!("/tv/{id}"),
                &[("append_to_response", "credits,content_ratings".to_string())],
            )
            .await?;

        Ok(transform::transform_tv_detail(data))
    }
}
