//! Google Books v1 volume records.

use serde::Deserialize;

use crate::null_as_default;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volumes {
    pub total_items: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Volume>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volume {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    pub page_count: Option<u32>,
    /// Out of 5.
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    /// `MATURE` or `NOT_MATURE`.
    pub maturity_rating: Option<String>,
    pub image_links: Option<ImageLinks>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub small_thumbnail: Option<String>,
    pub thumbnail: Option<String>,
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub extra_large: Option<String>,
}
