use std::sync::Arc;

use mediafamille_metadata::MetadataError;
use mediafamille_metadata::google_books::GoogleBooksClient;
use mediafamille_metadata::igdb::{IgdbClient, IgdbCredentials};
use mediafamille_metadata::provider::{BookProvider, GameProvider, MovieProvider};
use mediafamille_metadata::tmdb::TmdbClient;

use crate::config::AppConfig;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn MovieProvider>,
    pub games: Arc<dyn GameProvider>,
    pub books: Arc<dyn BookProvider>,
}

impl AppState {
    /// Wire the TMDB, IGDB and Google Books clients from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, MetadataError> {
        let http = mediafamille_metadata::http_client(config.upstream_timeout)?;

        let tmdb = TmdbClient::new(config.tmdb_api_key.clone()).with_http_client(http.clone());
        let igdb = IgdbClient::new(IgdbCredentials::from_parts(
            config.igdb_client_id.clone(),
            config.igdb_client_secret.clone(),
        ))
        .with_http_client(http.clone());
        let books =
            GoogleBooksClient::new(config.google_books_api_key.clone()).with_http_client(http);

        Ok(Self {
            movies: Arc::new(tmdb),
            games: Arc::new(igdb),
            books: Arc::new(books),
        })
    }
}
