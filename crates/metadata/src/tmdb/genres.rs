//! French names for TMDB genre ids.
//!
//! Search and discover results only carry `genre_ids`; the ids are stable on
//! TMDB's side so a static table saves a `/genre/*/list` round trip.

pub fn genre_name(id: u32) -> Option<&'static str> {
    let name = match id {
        28 => "Action",
        12 => "Aventure",
        16 => "Animation",
        35 => "Comédie",
        80 => "Crime",
        99 => "Documentaire",
        18 => "Drame",
        10751 => "Familial",
        14 => "Fantastique",
        36 => "Histoire",
        27 => "Horreur",
        10402 => "Musique",
        9648 => "Mystère",
        10749 => "Romance",
        878 => "Science-Fiction",
        10770 => "Téléfilm",
        53 => "Thriller",
        10752 => "Guerre",
        37 => "Western",
        // TV only
        10759 => "Action & Aventure",
        10762 => "Enfants",
        10763 => "Actualités",
        10764 => "Téléréalité",
        10765 => "Science-Fiction & Fantastique",
        10766 => "Feuilleton",
        10767 => "Talk-show",
        10768 => "Guerre & Politique",
        _ => return None,
    };
    Some(name)
}

/// Resolve ids to names, skipping unknown ids.
pub fn genre_names(ids: &[u32]) -> Vec<String> {
    ids.iter()
        .filter_map(|id| genre_name(*id))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_ids_are_skipped() {
        assert_eq!(
            genre_names(&[16, 1, 10751]),
            vec!["Animation".to_string(), "Familial".to_string()]
        );
    }
}
