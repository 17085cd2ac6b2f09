//! TMDB v3 response records, narrowed to the fields the site displays.

use serde::Deserialize;

use crate::null_as_default;

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_results: Option<u32>,
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvShow {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genre_ids: Vec<u32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Genre {
    pub id: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub credits: Option<Credits>,
    pub release_dates: Option<ReleaseDates>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TvDetail {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub first_air_date: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Genre>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub episode_run_time: Vec<u32>,
    pub number_of_seasons: Option<u32>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u32>,
    pub credits: Option<Credits>,
    pub content_ratings: Option<ContentRatings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credits {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<CastCredit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastCredit {
    pub name: Option<String>,
    pub character: Option<String>,
    pub profile_path: Option<String>,
    pub order: Option<u32>,
}

/// `release_dates` block appended to movie details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReleaseDates {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<CountryReleaseDates>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CountryReleaseDates {
    pub iso_3166_1: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_dates: Vec<ReleaseDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseDate {
    pub certification: Option<String>,
    pub release_date: Option<String>,
}

/// `content_ratings` block appended to TV details.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentRatings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ContentRating>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentRating {
    pub iso_3166_1: Option<String>,
    pub rating: Option<String>,
}
