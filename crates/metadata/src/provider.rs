use crate::tmdb::DiscoverFilter;
use crate::{MediaItem, MetadataError, PagedResult};

/// Movie and TV catalog (TMDB).
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Browse movies with family filters (genres, sort order, age ceiling).
    async fn discover_movies(
        &self,
        filter: &DiscoverFilter,
    ) -> Result<PagedResult<MediaItem>, MetadataError>;

    /// Free-text movie search. `page` outside `1..=500` is treated as 1.
    async fn search_movies(
        &self,
        query: &str,
        page: i64,
    ) -> Result<PagedResult<MediaItem>, MetadataError>;

    /// Free-text TV series search. `page` outside `1..=500` is treated as 1.
    async fn search_tv(
        &self,
        query: &str,
        page: i64,
    ) -> Result<PagedResult<MediaItem>, MetadataError>;

    /// Full movie record with cast and French certification.
    async fn get_movie_details(&self, id: u64) -> Result<MediaItem, MetadataError>;

    /// Full series record with cast and French rating.
    async fn get_tv_details(&self, id: u64) -> Result<MediaItem, MetadataError>;
}

/// Video game catalog (IGDB).
#[async_trait::async_trait]
pub trait GameProvider: Send + Sync {
    fn name(&self) -> &str;

    async fn search_games(&self, query: &str) -> Result<Vec<MediaItem>, MetadataError>;

    /// Best rated games with enough votes to be meaningful.
    async fn get_popular_games(&self, limit: u32) -> Result<Vec<MediaItem>, MetadataError>;

    /// `Ok(None)` when the id matches no game.
    async fn get_game_details(&self, id: u64) -> Result<Option<MediaItem>, MetadataError>;
}

/// Book catalog (Google Books).
#[async_trait::async_trait]
pub trait BookProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Free-text search, paginated by volume offset.
    async fn search_books(
        &self,
        query: &str,
        start_index: i64,
    ) -> Result<PagedResult<MediaItem>, MetadataError>;

    async fn get_book_details(&self, id: &str) -> Result<MediaItem, MetadataError>;
}
