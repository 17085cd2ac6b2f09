use axum::extract::{Path, Query, State};
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use mediafamille_core::error::ApiError;
use mediafamille_core::sanitize::validate_query;
use mediafamille_metadata::certification::AgeRating;
use mediafamille_metadata::tmdb::{DiscoverFilter, REVALIDATE_SECS};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::request_id::{make_span, request_id_middleware};
use crate::state::AppState;

const DEFAULT_POPULAR_LIMIT: u32 = 20;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(cors),
        )
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        // Movies & TV (TMDB)
        .route("/movies/discover", get(discover_movies))
        .route("/movies/search", get(search_movies))
        .route("/movies/{id}", get(get_movie))
        .route("/tv/search", get(search_tv))
        .route("/tv/{id}", get(get_tv))
        // Games (IGDB)
        .route("/games/search", get(search_games))
        .route("/games/popular", get(popular_games))
        .route("/games/{id}", get(get_game))
        // Books (Google Books)
        .route("/books/search", get(search_books))
        .route("/books/{id}", get(get_book))
}

/// JSON body with the same revalidation window the adapters use upstream.
fn cached_json<T: Serialize>(body: T) -> Response {
    (
        [(
            header::CACHE_CONTROL,
            format!("public, max-age={REVALIDATE_SECS}"),
        )],
        Json(body),
    )
        .into_response()
}

/// Lenient page parsing: garbage falls back to the first page.
fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse().ok()).unwrap_or(1)
}

fn parse_id(raw: &str) -> Result<u64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::BadRequest("Identifiant invalide".into()).into())
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    providers: Vec<String>,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        providers: vec![
            state.movies.name().to_string(),
            state.games.name().to_string(),
            state.books.name().to_string(),
        ],
    })
}

// ---------------------------------------------------------------------------
// Movies & TV
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct SearchParams {
    q: Option<String>,
    page: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiscoverParams {
    page: Option<String>,
    genres: Option<String>,
    sort_by: Option<String>,
    max_age: Option<String>,
}

fn discover_filter(params: DiscoverParams) -> Result<DiscoverFilter, AppError> {
    let genre_ids = params
        .genres
        .as_deref()
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(|g| g.parse::<u32>())
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()
        .map_err(|_| ApiError::BadRequest("Liste de genres invalide".into()))?
        .unwrap_or_default();

    let max_age = params
        .max_age
        .as_deref()
        .map(|raw| raw.trim().parse::<u8>())
        .transpose()
        .map_err(|_| ApiError::BadRequest("Âge maximal invalide".into()))?
        .map(AgeRating::from_max_age);

    Ok(DiscoverFilter {
        page: parse_page(params.page.as_deref()),
        genre_ids,
        sort_by: params.sort_by.filter(|s| !s.trim().is_empty()),
        max_age,
    })
}

async fn discover_movies(
    State(state): State<AppState>,
    Query(params): Query<DiscoverParams>,
) -> Result<Response, AppError> {
    let filter = discover_filter(params)?;
    let results = state.movies.discover_movies(&filter).await?;
    Ok(cached_json(results))
}

async fn search_movies(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let query = validate_query(params.q.as_deref())?;
    let page = parse_page(params.page.as_deref());
    let results = state.movies.search_movies(&query, page).await?;
    Ok(cached_json(results))
}

async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let movie = state.movies.get_movie_details(id).await?;
    Ok(cached_json(movie))
}

async fn search_tv(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let query = validate_query(params.q.as_deref())?;
    let page = parse_page(params.page.as_deref());
    let results = state.movies.search_tv(&query, page).await?;
    Ok(cached_json(results))
}

async fn get_tv(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let show = state.movies.get_tv_details(id).await?;
    Ok(cached_json(show))
}

// ---------------------------------------------------------------------------
// Games
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GameSearchParams {
    q: Option<String>,
}

#[derive(Deserialize)]
struct PopularParams {
    limit: Option<String>,
}

async fn search_games(
    State(state): State<AppState>,
    Query(params): Query<GameSearchParams>,
) -> Result<Response, AppError> {
    let query = validate_query(params.q.as_deref())?;
    let games = state.games.search_games(&query).await?;
    Ok(cached_json(games))
}

async fn popular_games(
    State(state): State<AppState>,
    Query(params): Query<PopularParams>,
) -> Result<Response, AppError> {
    let limit = params
        .limit
        .as_deref()
        .and_then(|l| l.trim().parse().ok())
        .unwrap_or(DEFAULT_POPULAR_LIMIT);
    let games = state.games.get_popular_games(limit).await?;
    Ok(cached_json(games))
}

async fn get_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_id(&id)?;
    let game = state
        .games
        .get_game_details(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Ce jeu est introuvable".into()))?;
    Ok(cached_json(game))
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookSearchParams {
    q: Option<String>,
    start_index: Option<String>,
}

async fn search_books(
    State(state): State<AppState>,
    Query(params): Query<BookSearchParams>,
) -> Result<Response, AppError> {
    let query = validate_query(params.q.as_deref())?;
    let start_index = params
        .start_index
        .as_deref()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let results = state.books.search_books(&query, start_index).await?;
    Ok(cached_json(results))
}

async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let book = state.books.get_book_details(id.trim()).await?;
    Ok(cached_json(book))
}
