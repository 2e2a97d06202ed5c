//! OAuth2 access-token lifecycle.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};

use super::clock::{Clock, SystemClock};
use crate::client::ResolvedConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::{Error, Result};

/// Token lifetime assumed when the server omits `expires_in`.
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// A bearer token and the instant it stops being handed out.
///
/// `expires_at` already has the refresh buffer subtracted.
#[derive(Clone)]
pub struct AccessToken {
    value: SecretString,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// The bearer token value.
    pub fn secret(&self) -> &SecretString {
        &self.value
    }

    /// When this token is considered stale.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Hands out valid bearer tokens obtained with the client-credentials grant.
///
/// The held token is only replaced by a successful refresh, and always as a
/// whole. Concurrent callers that find the token stale queue on a single
/// refresh guard and re-check after acquiring it, so a burst of requests
/// triggers one call to the token endpoint.
///
/// # Thread Safety
///
/// `TokenManager` is shared across tasks behind an `Arc`; all methods take
/// `&self`.
pub struct TokenManager {
    http: reqwest::Client,
    config: Arc<ResolvedConfig>,
    clock: Arc<dyn Clock>,
    diagnostics: Diagnostics,
    token: RwLock<Option<AccessToken>>,
    refresh_guard: Mutex<()>,
}

impl TokenManager {
    /// Create a token manager with its own HTTP client and the system clock.
    pub fn new(config: Arc<ResolvedConfig>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|err| Error::Config(format!("failed to build HTTP client: {}", err)))?;

        Ok(Self::from_parts(
            http,
            config,
            Arc::new(SystemClock),
            Diagnostics::default(),
        ))
    }

    pub(crate) fn from_parts(
        http: reqwest::Client,
        config: Arc<ResolvedConfig>,
        clock: Arc<dyn Clock>,
        diagnostics: Diagnostics,
    ) -> Self {
        Self {
            http,
            config,
            clock,
            diagnostics,
            token: RwLock::new(None),
            refresh_guard: Mutex::new(()),
        }
    }

    /// Get a token that is valid for immediate use.
    ///
    /// Refreshes first when no token is held or the held token's expiry is
    /// at or before the current time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if a required refresh fails.
    pub async fn get_token(&self) -> Result<SecretString> {
        if let Some(token) = self.live_token().await {
            return Ok(token);
        }

        let _guard = self.refresh_guard.lock().await;
        // Another caller may have refreshed while we waited.
        if let Some(token) = self.live_token().await {
            return Ok(token);
        }

        let fresh = self.refresh_locked().await?;
        Ok(fresh.value)
    }

    /// Exchange the client credentials for a new token, unconditionally.
    ///
    /// On failure the previously held token, if any, is left in place.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Authentication`] if the token endpoint cannot be
    /// reached, answers with a non-2xx status, or omits `access_token`.
    pub async fn refresh(&self) -> Result<()> {
        let _guard = self.refresh_guard.lock().await;
        self.refresh_locked().await.map(|_| ())
    }

    /// Drop the held token so the next [`get_token`](Self::get_token)
    /// refreshes.
    pub async fn invalidate(&self) {
        *self.token.write().await = None;
    }

    /// Effective expiry of the held token, if one is held.
    pub async fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.token.read().await.as_ref().map(AccessToken::expires_at)
    }

    /// A copy of the held token, live or not.
    pub async fn current(&self) -> Option<AccessToken> {
        self.token.read().await.clone()
    }

    async fn live_token(&self) -> Option<SecretString> {
        let now = self.clock.now();
        self.token
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_live_at(now))
            .map(|token| token.value.clone())
    }

    /// Caller must hold `refresh_guard`.
    async fn refresh_locked(&self) -> Result<AccessToken> {
        self.diagnostics.emit(Diagnostic::TokenRefreshStarted);

        match self.exchange().await {
            Ok(token) => {
                *self.token.write().await = Some(token.clone());
                self.diagnostics.emit(Diagnostic::TokenRefreshed {
                    expires_at: token.expires_at,
                });
                Ok(token)
            }
            Err(err) => {
                self.diagnostics.emit(Diagnostic::TokenRefreshFailed {
                    error: err.to_string(),
                });
                Err(err)
            }
        }
    }

    async fn exchange(&self) -> Result<AccessToken> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.expose_secret()),
            ("scope", self.config.scope.as_str()),
        ];

        let response = self
            .http
            .post(self.config.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|err| Error::authentication_with("Failed to reach token endpoint", err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| Error::authentication_with("Failed to read token response", err))?;

        if !status.is_success() {
            return Err(Error::authentication(format!(
                "Token request failed with status {}: {}",
                status.as_u16(),
                describe_token_error(&body)
            )));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|err| Error::authentication_with("Malformed token response", err))?;

        let access_token = parsed
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| Error::authentication("Token response missing access_token"))?;

        let expires_in = parsed.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        let expires_at = expires_in
            .checked_sub(self.config.token_refresh_buffer_secs)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| self.clock.now().checked_add_signed(lifetime))
            .ok_or_else(|| Error::authentication("Token response expires_in out of range"))?;

        Ok(AccessToken {
            value: SecretString::from(access_token),
            expires_at,
        })
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("token_url", &self.config.token_url.as_str())
            .field("client_id", &self.config.client_id)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
}

/// Pull `error_description` / `error` out of an OAuth2 error body.
fn describe_token_error(body: &str) -> String {
    #[derive(Deserialize)]
    struct OAuthError {
        error: Option<String>,
        error_description: Option<String>,
    }

    match serde_json::from_str::<OAuthError>(body) {
        Ok(OAuthError {
            error_description: Some(description),
            ..
        }) => description,
        Ok(OAuthError {
            error: Some(error), ..
        }) => error,
        _ if body.is_empty() => "no error body".to_string(),
        _ => body.to_string(),
    }
}
