use serde::{Deserialize, Serialize};

/// Kind of media a catalog entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Movie,
    Tv,
    Game,
    Book,
    App,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Movie => "MOVIE",
            Self::Tv => "TV",
            Self::Game => "GAME",
            Self::Book => "BOOK",
            Self::App => "APP",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_upper_case() {
        assert_eq!(serde_json::to_string(&MediaType::Tv).unwrap(), "\"TV\"");
        assert_eq!(serde_json::to_string(&MediaType::Movie).unwrap(), "\"MOVIE\"");
        let parsed: MediaType = serde_json::from_str("\"BOOK\"").unwrap();
        assert_eq!(parsed, MediaType::Book);
    }
}
