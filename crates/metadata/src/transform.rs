//! Upstream records → [`MediaItem`].
//!
//! Pure functions: no I/O, and any field the upstream omits ends up `None`.
//! Ratings are put on a 0–10 scale whatever the source scale.

use mediafamille_core::sanitize::strip_html;
use mediafamille_core::types::MediaType;

use crate::certification::map_certification;
use crate::google_books::{self, models::Volume};
use crate::igdb::{self, models::Game};
use crate::tmdb::models::{CastCredit, Credits, Movie, MovieDetail, Page, TvDetail, TvShow};
use crate::tmdb::{self, ImageSize, genres::genre_names};
use crate::{CastMember, MAX_PAGE, MediaItem, PagedResult};

/// Actors kept on detail records.
pub const CAST_LIMIT: usize = 10;

/// Turn a TMDB page into a [`PagedResult`]. TMDB reports more pages than it
/// serves, so `total_pages` is capped at 500.
pub fn transform_page<T>(
    data: Page<T>,
    requested_page: u32,
    f: impl FnMut(T) -> MediaItem,
) -> PagedResult<MediaItem> {
    PagedResult {
        page: data.page.unwrap_or(requested_page),
        total_pages: data.total_pages.unwrap_or(0).min(MAX_PAGE as u32),
        total_results: data.total_results.unwrap_or(0),
        results: data.results.into_iter().map(f).collect(),
    }
}

pub fn transform_movie(movie: Movie) -> MediaItem {
    MediaItem {
        tmdb_id: Some(movie.id),
        title: non_empty(movie.title),
        original_title: non_empty(movie.original_title),
        release_date: non_empty(movie.release_date),
        poster_url: tmdb::get_image_url(movie.poster_path.as_deref(), ImageSize::W342),
        backdrop_url: backdrop(movie.backdrop_path.as_deref()),
        synopsis_fr: non_empty(movie.overview),
        genres: genre_names(&movie.genre_ids),
        vote_average: movie.vote_average,
        vote_count: movie.vote_count,
        ..MediaItem::new(movie.id.to_string(), MediaType::Movie)
    }
}

pub fn transform_tv(show: TvShow) -> MediaItem {
    MediaItem {
        tmdb_id: Some(show.id),
        title: non_empty(show.name),
        original_title: non_empty(show.original_name),
        release_date: non_empty(show.first_air_date),
        poster_url: tmdb::get_image_url(show.poster_path.as_deref(), ImageSize::W342),
        backdrop_url: backdrop(show.backdrop_path.as_deref()),
        synopsis_fr: non_empty(show.overview),
        genres: genre_names(&show.genre_ids),
        vote_average: show.vote_average,
        vote_count: show.vote_count,
        ..MediaItem::new(show.id.to_string(), MediaType::Tv)
    }
}

pub fn transform_movie_detail(movie: MovieDetail) -> MediaItem {
    let official_rating = movie
        .release_dates
        .as_ref()
        .and_then(tmdb::get_french_certification);

    MediaItem {
        tmdb_id: Some(movie.id),
        title: non_empty(movie.title),
        original_title: non_empty(movie.original_title),
        release_date: non_empty(movie.release_date),
        poster_url: tmdb::get_image_url(movie.poster_path.as_deref(), ImageSize::W500),
        backdrop_url: backdrop(movie.backdrop_path.as_deref()),
        synopsis_fr: non_empty(movie.overview),
        age_rating: official_rating.as_deref().and_then(map_certification),
        official_rating,
        genres: movie.genres.into_iter().filter_map(|g| non_empty(g.name)).collect(),
        cast: Some(transform_cast(movie.credits)),
        vote_average: movie.vote_average,
        vote_count: movie.vote_count,
        runtime_minutes: movie.runtime.filter(|r| *r > 0),
        ..MediaItem::new(movie.id.to_string(), MediaType::Movie)
    }
}

pub fn transform_tv_detail(show: TvDetail) -> MediaItem {
    let official_rating = show
        .content_ratings
        .as_ref()
        .and_then(tmdb::get_tv_french_rating);

    MediaItem {
        tmdb_id: Some(show.id),
        title: non_empty(show.name),
        original_title: non_empty(show.original_name),
        release_date: non_empty(show.first_air_date),
        poster_url: tmdb::get_image_url(show.poster_path.as_deref(), ImageSize::W500),
        backdrop_url: backdrop(show.backdrop_path.as_deref()),
        synopsis_fr: non_empty(show.overview),
        age_rating: official_rating.as_deref().and_then(map_certification),
        official_rating,
        genres: show.genres.into_iter().filter_map(|g| non_empty(g.name)).collect(),
        cast: Some(transform_cast(show.credits)),
        vote_average: show.vote_average,
        vote_count: show.vote_count,
        runtime_minutes: show.episode_run_time.first().copied().filter(|r| *r > 0),
        number_of_seasons: show.number_of_seasons,
        ..MediaItem::new(show.id.to_string(), MediaType::Tv)
    }
}

fn transform_cast(credits: Option<Credits>) -> Vec<CastMember> {
    let mut cast: Vec<CastCredit> = credits.unwrap_or_default().cast;
    cast.sort_by_key(|c| c.order.unwrap_or(u32::MAX));

    cast.into_iter()
        .filter_map(|c| {
            Some(CastMember {
                name: non_empty(c.name)?,
                character: non_empty(c.character),
                profile_url: c
                    .profile_path
                    .as_deref()
                    .map(|p| tmdb::get_image_url(Some(p), ImageSize::W185)),
            })
        })
        .take(CAST_LIMIT)
        .collect()
}

pub fn transform_game(game: Game) -> MediaItem {
    let official_rating = game_rating_label(&game);
    let backdrop_id = game
        .artworks
        .iter()
        .chain(game.screenshots.iter())
        .find_map(|img| img.image_id.as_deref());
    let developers: Vec<String> = game
        .involved_companies
        .iter()
        .filter(|c| c.developer == Some(true))
        .filter_map(|c| c.company.as_ref().and_then(|co| co.name.clone()))
        .collect();
    let name = non_empty(game.name);

    MediaItem {
        igdb_id: Some(game.id),
        title: name.clone(),
        original_title: name,
        release_date: game.first_release_date.and_then(unix_to_date),
        poster_url: igdb::image_url(
            game.cover.as_ref().and_then(|c| c.image_id.as_deref()),
            igdb::COVER_SIZE,
        )
        .unwrap_or_else(|| crate::PLACEHOLDER_IMAGE.to_string()),
        backdrop_url: igdb::image_url(backdrop_id, igdb::BACKDROP_SIZE),
        synopsis_fr: non_empty(game.summary),
        age_rating: official_rating.and_then(map_certification),
        official_rating: official_rating.map(str::to_string),
        genres: names(game.genres),
        vote_average: game.total_rating.map(|r| round1(r / 10.0)),
        vote_count: game.total_rating_count,
        platforms: Some(names(game.platforms)),
        developers: Some(developers),
        ..MediaItem::new(game.id.to_string(), MediaType::Game)
    }
}

/// PEGI first (European audience), ESRB otherwise.
fn game_rating_label(game: &Game) -> Option<&'static str> {
    let by_board = |board: u8| {
        game.age_ratings
            .iter()
            .filter(|r| r.category == Some(board))
            .find_map(|r| r.label())
    };
    by_board(igdb::models::PEGI).or_else(|| by_board(igdb::models::ESRB))
}

/// `None` when the volume carries no id.
pub fn transform_book(volume: Volume) -> Option<MediaItem> {
    let id = non_empty(volume.id)?;
    let info = volume.volume_info;
    let mature = info.maturity_rating.as_deref() == Some("MATURE");

    Some(MediaItem {
        external_id: Some(id.clone()),
        title: non_empty(info.title.clone()),
        original_title: non_empty(info.title),
        release_date: non_empty(info.published_date),
        poster_url: google_books::cover_url(info.image_links.as_ref())
            .unwrap_or_else(|| crate::PLACEHOLDER_IMAGE.to_string()),
        synopsis_fr: info
            .description
            .as_deref()
            .map(strip_html)
            .filter(|d| !d.is_empty()),
        official_rating: mature.then(|| "18".to_string()),
        age_rating: mature.then_some(crate::certification::AgeRating::Eighteen),
        genres: info.categories,
        vote_average: info.average_rating.map(|r| round1(r * 2.0)),
        vote_count: info.ratings_count,
        authors: Some(info.authors),
        publisher: non_empty(info.publisher),
        page_count: info.page_count.filter(|p| *p > 0),
        ..MediaItem::new(id, MediaType::Book)
    })
}

fn backdrop(path: Option<&str>) -> Option<String> {
    path.map(|p| tmdb::get_image_url(Some(p), ImageSize::W1280))
        .filter(|url| url != crate::PLACEHOLDER_IMAGE)
}

fn names(items: Vec<igdb::models::Named>) -> Vec<String> {
    items.into_iter().filter_map(|n| non_empty(n.name)).collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn unix_to_date(secs: i64) -> Option<String> {
    chrono::DateTime::from_timestamp(secs, 0).map(|d| d.format("%Y-%m-%d").to_string())
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::certification::AgeRating;

    fn from_json<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn movie_search_result() {
        let movie: Movie = from_json(serde_json::json!({
            "id": 808,
            "title": "Shrek",
            "original_title": "Shrek",
            "release_date": "2001-05-18",
            "poster_path": "/abc.jpg",
            "backdrop_path": null,
            "overview": "Un ogre grincheux…",
            "genre_ids": [16, 35, 10751],
            "vote_average": 7.7,
            "vote_count": 17000
        }));

        let item = transform_movie(movie);
        assert_eq!(item.id, "808");
        assert_eq!(item.tmdb_id, Some(808));
        assert_eq!(item.media_type, MediaType::Movie);
        assert_eq!(item.poster_url, "https://image.tmdb.org/t/p/w342/abc.jpg");
        assert_eq!(item.backdrop_url, None);
        assert_eq!(item.genres, vec!["Animation", "Comédie", "Familial"]);
        assert_eq!(item.cast, None);
    }

    #[test]
    fn movie_with_missing_fields_is_all_none() {
        let movie: Movie = from_json(serde_json::json!({ "id": 1, "genre_ids": null, "release_date": "" }));
        let item = transform_movie(movie);
        assert_eq!(item.title, None);
        assert_eq!(item.release_date, None);
        assert_eq!(item.poster_url, crate::PLACEHOLDER_IMAGE);
        assert!(item.genres.is_empty());
        assert_eq!(item.vote_average, None);
    }

    #[test]
    fn movie_detail_with_certification_and_cast() {
        let detail: MovieDetail = from_json(serde_json::json!({
            "id": 862,
            "title": "Toy Story",
            "original_title": "Toy Story",
            "runtime": 81,
            "genres": [{ "id": 16, "name": "Animation" }, { "id": 10751, "name": null }],
            "credits": {
                "cast": [
                    { "name": "Tim Allen", "character": "Buzz", "order": 1, "profile_path": null },
                    { "name": "Tom Hanks", "character": "Woody", "order": 0, "profile_path": "/tom.jpg" },
                    { "name": null, "order": 2 }
                ]
            },
            "release_dates": {
                "results": [
                    { "iso_3166_1": "US", "release_dates": [{ "certification": "G" }] },
                    { "iso_3166_1": "FR", "release_dates": [{ "certification": "U" }] }
                ]
            }
        }));

        let item = transform_movie_detail(detail);
        assert_eq!(item.official_rating.as_deref(), Some("U"));
        assert_eq!(item.age_rating, Some(AgeRating::All));
        assert_eq!(item.runtime_minutes, Some(81));
        assert_eq!(item.genres, vec!["Animation"]);

        let cast = item.cast.unwrap();
        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].name, "Tom Hanks");
        assert_eq!(
            cast[0].profile_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w185/tom.jpg")
        );
        assert_eq!(cast[1].profile_url, None);
    }

    #[test]
    fn tv_detail_without_run_time() {
        let detail: TvDetail = from_json(serde_json::json!({
            "id": 1396,
            "name": "Bluey",
            "episode_run_time": [],
            "number_of_seasons": 3,
            "content_ratings": { "results": [{ "iso_3166_1": "FR", "rating": "TP" }] }
        }));

        let item = transform_tv_detail(detail);
        assert_eq!(item.media_type, MediaType::Tv);
        assert_eq!(item.runtime_minutes, None);
        assert_eq!(item.number_of_seasons, Some(3));
        assert_eq!(item.official_rating.as_deref(), Some("TP"));
        assert_eq!(item.age_rating, Some(AgeRating::All));
        assert_eq!(item.cast, Some(vec![]));
    }

    #[test]
    fn cast_is_limited() {
        let cast: Vec<serde_json::Value> = (0..15)
            .map(|i| serde_json::json!({ "name": format!("Actor {i}"), "order": i }))
            .collect();
        let detail: MovieDetail =
            from_json(serde_json::json!({ "id": 1, "credits": { "cast": cast } }));
        assert_eq!(transform_movie_detail(detail).cast.unwrap().len(), CAST_LIMIT);
    }

    #[test]
    fn page_total_is_capped() {
        let page: Page<Movie> = from_json(serde_json::json!({
            "page": 3, "total_pages": 9000, "total_results": 180000, "results": []
        }));
        let result = transform_page(page, 3, transform_movie);
        assert_eq!(result.page, 3);
        assert_eq!(result.total_pages, 500);
        assert_eq!(result.total_results, 180000);
    }

    #[test]
    fn game_prefers_pegi() {
        let game: Game = from_json(serde_json::json!({
            "id": 1942,
            "name": "Mario Kart 8 Deluxe",
            "first_release_date": 1493337600,
            "cover": { "image_id": "co213p" },
            "screenshots": [{ "image_id": "sc1" }],
            "genres": [{ "name": "Racing" }],
            "platforms": [{ "name": "Nintendo Switch" }],
            "involved_companies": [
                { "company": { "name": "Nintendo EPD" }, "developer": true },
                { "company": { "name": "Nintendo" }, "developer": false }
            ],
            "age_ratings": [
                { "category": 1, "rating": 8 },
                { "category": 2, "rating": 1 }
            ],
            "total_rating": 91.26,
            "total_rating_count": 220
        }));

        let item = transform_game(game);
        assert_eq!(item.media_type, MediaType::Game);
        assert_eq!(item.igdb_id, Some(1942));
        assert_eq!(item.release_date.as_deref(), Some("2017-04-28"));
        assert_eq!(
            item.poster_url,
            "https://images.igdb.com/igdb/image/upload/t_cover_big/co213p.jpg"
        );
        assert_eq!(
            item.backdrop_url.as_deref(),
            Some("https://images.igdb.com/igdb/image/upload/t_1080p/sc1.jpg")
        );
        assert_eq!(item.official_rating.as_deref(), Some("PEGI 3"));
        assert_eq!(item.age_rating, Some(AgeRating::All));
        assert_eq!(item.vote_average, Some(9.1));
        assert_eq!(item.developers, Some(vec!["Nintendo EPD".to_string()]));
        assert_eq!(item.platforms, Some(vec!["Nintendo Switch".to_string()]));
    }

    #[test]
    fn bare_game() {
        let game: Game = from_json(serde_json::json!({ "id": 7, "age_ratings": null }));
        let item = transform_game(game);
        assert_eq!(item.poster_url, crate::PLACEHOLDER_IMAGE);
        assert_eq!(item.backdrop_url, None);
        assert_eq!(item.official_rating, None);
        assert_eq!(item.release_date, None);
    }

    #[test]
    fn book_volume() {
        let volume: Volume = from_json(serde_json::json!({
            "id": "zyTCAlFPjgYC",
            "volumeInfo": {
                "title": "Le Petit Prince",
                "authors": ["Antoine de Saint-Exupéry"],
                "publisher": "Gallimard",
                "publishedDate": "1943",
                "description": "<p>Un aviateur &amp; un petit prince.</p>",
                "categories": ["Juvenile Fiction"],
                "pageCount": 96,
                "averageRating": 4.5,
                "ratingsCount": 12,
                "maturityRating": "NOT_MATURE",
                "imageLinks": { "thumbnail": "http://books.google.com/books/content?id=zyTCAlFPjgYC&printsec=frontcover&img=1&zoom=1" }
            }
        }));

        let item = transform_book(volume).unwrap();
        assert_eq!(item.media_type, MediaType::Book);
        assert_eq!(item.external_id.as_deref(), Some("zyTCAlFPjgYC"));
        assert_eq!(item.synopsis_fr.as_deref(), Some("Un aviateur & un petit prince."));
        assert!(item.poster_url.starts_with("https://books.google.com/"));
        assert_eq!(item.vote_average, Some(9.0));
        assert_eq!(item.age_rating, None);
        assert_eq!(item.authors, Some(vec!["Antoine de Saint-Exupéry".to_string()]));
    }

    #[test]
    fn mature_book_and_missing_id() {
        let volume: Volume = from_json(serde_json::json!({
            "id": "abc",
            "volumeInfo": { "maturityRating": "MATURE" }
        }));
        let item = transform_book(volume).unwrap();
        assert_eq!(item.age_rating, Some(AgeRating::Eighteen));
        assert_eq!(item.poster_url, crate::PLACEHOLDER_IMAGE);

        let orphan: Volume = from_json(serde_json::json!({ "volumeInfo": null }));
        assert!(transform_book(orphan).is_none());
    }
}
