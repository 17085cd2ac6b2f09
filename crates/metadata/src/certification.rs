//! Age rating normalization.
//!
//! Every supported rating system is folded onto the French CSA bands
//! (all audiences, 10, 12, 16, 18). Ratings from other systems round up to
//! the next band so a mapped rating is never more permissive than the source.

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeRating {
    All,
    Ten,
    Twelve,
    Sixteen,
    Eighteen,
}

impl AgeRating {
    pub const ALL: [AgeRating; 5] = [
        AgeRating::All,
        AgeRating::Ten,
        AgeRating::Twelve,
        AgeRating::Sixteen,
        AgeRating::Eighteen,
    ];

    /// Minimum recommended age for the band.
    pub fn min_age(self) -> u8 {
        match self {
            Self::All => 0,
            Self::Ten => 10,
            Self::Twelve => 12,
            Self::Sixteen => 16,
            Self::Eighteen => 18,
        }
    }

    /// Band for a viewer age ceiling, e.g. `12` → [`AgeRating::Twelve`].
    pub fn from_max_age(age: u8) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|r| r.min_age() <= age)
            .unwrap_or(Self::All)
    }

    /// Certification label TMDB understands for `certification_country=FR`.
    pub fn french_label(self) -> &'static str {
        match self {
            Self::All => "U",
            Self::Ten => "10",
            Self::Twelve => "12",
            Self::Sixteen => "16",
            Self::Eighteen => "18",
        }
    }
}

impl Serialize for AgeRating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.min_age())
    }
}

/// Map a certification code from any supported system to a band.
///
/// Returns `None` for empty or unknown codes.
pub fn map_certification(code: &str) -> Option<AgeRating> {
    let normalized = code.trim().to_ascii_uppercase();
    let rating = match normalized.as_str() {
        // CSA (France)
        "U" | "TP" | "TOUS PUBLICS" | "TOUT PUBLIC" | "0" => AgeRating::All,
        "10" | "-10" => AgeRating::Ten,
        "12" | "-12" => AgeRating::Twelve,
        "16" | "-16" => AgeRating::Sixteen,
        "18" | "-18" => AgeRating::Eighteen,
        // MPAA
        "G" => AgeRating::All,
        "PG" => AgeRating::Ten,
        "PG-13" => AgeRating::Sixteen,
        "R" => AgeRating::Sixteen,
        "NC-17" => AgeRating::Eighteen,
        // US TV parental guidelines
        "TV-Y" | "TV-G" => AgeRating::All,
        "TV-Y7" | "TV-PG" => AgeRating::Ten,
        "TV-14" => AgeRating::Sixteen,
        "TV-MA" => AgeRating::Eighteen,
        // PEGI
        "PEGI 3" | "PEGI3" => AgeRating::All,
        "PEGI 7" | "PEGI7" => AgeRating::Ten,
        "PEGI 12" | "PEGI12" => AgeRating::Twelve,
        "PEGI 16" | "PEGI16" => AgeRating::Sixteen,
        "PEGI 18" | "PEGI18" => AgeRating::Eighteen,
        // ESRB
        "EC" | "E" => AgeRating::All,
        "E10+" => AgeRating::Ten,
        "T" => AgeRating::Sixteen,
        "M" | "AO" => AgeRating::Eighteen,
        _ => return None,
    };
    Some(rating)
}
