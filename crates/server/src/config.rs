//! Runtime configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_BIND: &str = "0.0.0.0:3000";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub tmdb_api_key: Option<String>,
    pub igdb_client_id: Option<String>,
    pub igdb_client_secret: Option<String>,
    pub google_books_api_key: Option<String>,
    /// No deadline on upstream calls unless set.
    pub upstream_timeout: Option<Duration>,
    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key/value source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind = get("MEDIAFAMILLE_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr = bind.parse().map_err(|_| ConfigError::Invalid {
            var: "MEDIAFAMILLE_BIND",
            expected: "a socket address such as 0.0.0.0:3000",
            value: bind.clone(),
        })?;

        let upstream_timeout = match get("MEDIAFAMILLE_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .ok()
                    .filter(|s| *s > 0)
                    .ok_or_else(|| ConfigError::Invalid {
                        var: "MEDIAFAMILLE_UPSTREAM_TIMEOUT_SECS",
                        expected: "a positive number of seconds",
                        value: raw.clone(),
                    })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let log_json = get("MEDIAFAMILLE_LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        Ok(Self {
            bind_addr,
            tmdb_api_key: get("TMDB_API_KEY"),
            igdb_client_id: get("IGDB_CLIENT_ID"),
            igdb_client_secret: get("IGDB_CLIENT_SECRET"),
            google_books_api_key: get("GOOGLE_BOOKS_API_KEY"),
            upstream_timeout,
            log_json,
        })
    }

    /// Required credential variables that are not set.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.tmdb_api_key.is_none() {
            missing.push("TMDB_API_KEY");
        }
        if self.igdb_client_id.is_none() {
            missing.push("IGDB_CLIENT_ID");
        }
        if self.igdb_client_secret.is_none() {
            missing.push("IGDB_CLIENT_SECRET");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND);
        assert_eq!(cfg.upstream_timeout, None);
        assert!(!cfg.log_json);
        assert_eq!(
            cfg.missing_credentials(),
            vec!["TMDB_API_KEY", "IGDB_CLIENT_ID", "IGDB_CLIENT_SECRET"]
        );
    }

    #[test]
    fn reads_credentials_and_ignores_blank_values() {
        let cfg = config(&[
            ("TMDB_API_KEY", "abc"),
            ("IGDB_CLIENT_ID", "id"),
            ("IGDB_CLIENT_SECRET", "  "),
            ("GOOGLE_BOOKS_API_KEY", "gb"),
            ("MEDIAFAMILLE_UPSTREAM_TIMEOUT_SECS", "8"),
            ("MEDIAFAMILLE_LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(cfg.tmdb_api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.igdb_client_secret, None);
        assert_eq!(cfg.google_books_api_key.as_deref(), Some("gb"));
        assert_eq!(cfg.upstream_timeout, Some(Duration::from_secs(8)));
        assert!(cfg.log_json);
        assert_eq!(cfg.missing_credentials(), vec!["IGDB_CLIENT_SECRET"]);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(config(&[("MEDIAFAMILLE_BIND", "localhost")]).is_err());
        assert!(config(&[("MEDIAFAMILLE_UPSTREAM_TIMEOUT_SECS", "0")]).is_err());
        assert!(config(&[("MEDIAFAMILLE_UPSTREAM_TIMEOUT_SECS", "soon")]).is_err());
    }
}
