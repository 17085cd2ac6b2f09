//! Twitch client-credentials token cache for IGDB.
//!
//! The cache is either empty/expired (a call triggers an exchange) or holds a
//! token that is handed out until its expiry. The lock is held across the
//! exchange, so concurrent callers wait for one refresh instead of each
//! running their own.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::MetadataError;
use crate::igdb::IgdbCredentials;
use crate::igdb::models::TokenResponse;

/// Seconds shaved off the upstream lifetime so a token never expires mid-request.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct TokenCache {
    state: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bearer token, exchanging credentials first when needed.
    pub async fn token(
        &self,
        http: &reqwest::Client,
        token_url: &str,
        credentials: &IgdbCredentials,
    ) -> Result<String, MetadataError> {
        let mut state = self.state.lock().await;

        if let Some(cached) = state.as_ref().filter(|t| t.is_valid_at(Utc::now())) {
            return Ok(cached.access_token.clone());
        }

        let fresh = exchange(http, token_url, credentials).await?;
        let token = fresh.access_token.clone();
        *state = Some(fresh);
        Ok(token)
    }

    /// Expiry of the cached token, if any.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().await.as_ref().map(|t| t.expires_at)
    }

    /// Drop the cached token; the next call exchanges again.
    pub async fn clear(&self) {
        *self.state.lock().await = None;
    }
}

async fn exchange(
    http: &reqwest::Client,
    token_url: &str,
    credentials: &IgdbCredentials,
) -> Result<CachedToken, MetadataError> {
    let issued_at = Utc::now();

    let resp = http
        .post(token_url)
        .query(&[
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ])
        .send()
        .await
        .map_err(|e| MetadataError::Auth(format!("token endpoint unreachable: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "IGDB token exchange rejected");
        return Err(MetadataError::Auth(format!(
            "token endpoint returned {status}"
        )));
    }

    let body: TokenResponse = resp
        .json()
        .await
        .map_err(|e| MetadataError::Auth(format!("malformed token response: {e}")))?;

    if body.access_token.trim().is_empty() {
        return Err(MetadataError::Auth("token endpoint returned an empty token".into()));
    }

    let expires_at = expiry(issued_at, body.expires_in)
        .ok_or_else(|| MetadataError::Auth(format!("invalid expires_in: {}", body.expires_in)))?;
    info!(expires_at = %expires_at, "IGDB access token refreshed");

    Ok(CachedToken {
        access_token: body.access_token,
        expires_at,
    })
}

/// Issue time plus the upstream lifetime less the margin; `None` when the
/// lifetime does not fit a timestamp.
fn expiry(issued_at: DateTime<Utc>, expires_in: i64) -> Option<DateTime<Utc>> {
    let lifetime = expires_in.saturating_sub(EXPIRY_MARGIN_SECS).max(0);
    issued_at.checked_add_signed(Duration::try_seconds(lifetime)?)
}
