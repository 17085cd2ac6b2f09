//! IGDB v4 response records and the Twitch token payload.

use serde::Deserialize;

use crate::null_as_default;

#[derive(Debug, Clone, Deserialize)]
pub struct Game {
    pub id: u64,
    pub name: Option<String>,
    pub summary: Option<String>,
    /// Unix timestamp, seconds.
    pub first_release_date: Option<i64>,
    pub cover: Option<Image>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub artworks: Vec<Image>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub screenshots: Vec<Image>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<Named>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub platforms: Vec<Named>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub involved_companies: Vec<InvolvedCompany>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub age_ratings: Vec<AgeRatingEntry>,
    pub total_rating: Option<f64>,
    pub total_rating_count: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Named {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InvolvedCompany {
    pub company: Option<Named>,
    pub developer: Option<bool>,
}

/// `category` is the rating board (1 = ESRB, 2 = PEGI), `rating` the
/// board-specific enum value.
#[derive(Debug, Clone, Deserialize)]
pub struct AgeRatingEntry {
    pub category: Option<u8>,
    pub rating: Option<u8>,
}

pub const ESRB: u8 = 1;
pub const PEGI: u8 = 2;

impl AgeRatingEntry {
    /// Human label such as `PEGI 12` or `E10+`.
    pub fn label(&self) -> Option<&'static str> {
        let label = match (self.category?, self.rating?) {
            (PEGI, 1) => "PEGI 3",
            (PEGI, 2) => "PEGI 7",
            (PEGI, 3) => "PEGI 12",
            (PEGI, 4) => "PEGI 16",
            (PEGI, 5) => "PEGI 18",
            (ESRB, 6) => "RP",
            (ESRB, 7) => "EC",
            (ESRB, 8) => "E",
            (ESRB, 9) => "E10+",
            (ESRB, 10) => "T",
            (ESRB, 11) => "M",
            (ESRB, 12) => "AO",
            _ => return None,
        };
        Some(label)
    }
}

/// Client-credentials grant answer from `id.twitch.tv/oauth2/token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    pub token_type: Option<String>,
}
