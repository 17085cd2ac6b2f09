//! Input and upstream text cleaning.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::ApiError;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Longest free-text query accepted from callers, in characters.
pub const MAX_QUERY_LEN: usize = 200;

/// Make caller-supplied text safe to forward upstream or echo back.
///
/// Drops markup and control characters, collapses whitespace runs and trims.
pub fn sanitize(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, " ");
    let cleaned: String = without_tags
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .filter(|c| !matches!(c, '<' | '>'))
        .collect();
    collapse_whitespace(&cleaned)
}

/// Turn an upstream HTML fragment (book descriptions, mostly) into plain text.
pub fn strip_html(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&");
    collapse_whitespace(&decoded)
}

/// Sanitize a search query and check it is usable.
pub fn validate_query(raw: Option<&str>) -> Result<String, ApiError> {
    let query = sanitize(raw.unwrap_or_default());
    if query.is_empty() {
        return Err(ApiError::BadRequest(
            "Le paramètre de recherche est requis".into(),
        ));
    }
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ApiError::BadRequest(format!(
            "La recherche ne peut pas dépasser {MAX_QUERY_LEN} caractères"
        )));
    }
    Ok(query)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
