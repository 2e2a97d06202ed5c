//! Client configuration options.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{Error, Result};

/// Default OAuth2 scope.
pub const DEFAULT_SCOPE: &str = "vendor.search";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);
/// Default connection-establishment timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(30_000);
/// Default number of retries after the first attempt.
pub const DEFAULT_MAX_RETRIES: u32 = 3;
/// Default base delay for exponential backoff.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(1_000);
/// Default number of seconds shaved off a token's lifetime.
pub const DEFAULT_TOKEN_REFRESH_BUFFER_SECS: i64 = 60;

/// Caller-supplied configuration for the client.
///
/// The four connection fields are required; everything else falls back to a
/// documented default when left unset. The configuration is turned into an
/// immutable [`ResolvedConfig`] once, when the client is built.
///
/// # Example
///
/// ```
/// use vendor_data_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::new(
///     "https://vendor.example.com",
///     "client-id",
///     "client-secret",
///     "https://auth.example.com/oauth2/token",
/// )
/// .with_timeout(Duration::from_secs(30))
/// .with_max_retries(5);
///
/// let resolved = config.resolve().unwrap();
/// assert_eq!(resolved.scope, "vendor.search");
/// assert_eq!(resolved.max_retries, 5);
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the Vendor Data Service API
    pub base_url: String,
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: SecretString,
    /// OAuth2 token endpoint URL
    pub token_url: String,
    /// OAuth2 scope
    pub scope: Option<String>,
    /// Timeout for every network call
    pub timeout: Option<Duration>,
    /// Timeout for establishing a connection
    pub connect_timeout: Option<Duration>,
    /// Retries after the first attempt
    pub max_retries: Option<u32>,
    /// Base delay for exponential backoff
    pub retry_delay: Option<Duration>,
    /// Seconds subtracted from the server-reported token lifetime
    pub token_refresh_buffer_secs: Option<i64>,
    /// Emit diagnostic events
    pub debug: Option<bool>,
    /// User-Agent header value
    pub user_agent: Option<String>,
    /// Refresh the token and re-send once when a search returns 401
    pub reauthenticate_on_unauthorized: Option<bool>,
}

impl ClientConfig {
    /// Create a configuration with the required connection fields.
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            token_url: token_url.into(),
            scope: None,
            timeout: None,
            connect_timeout: None,
            max_retries: None,
            retry_delay: None,
            token_refresh_buffer_secs: None,
            debug: None,
            user_agent: None,
            reauthenticate_on_unauthorized: None,
        }
    }

    /// Load configuration from `VENDOR_*` environment variables.
    ///
    /// `VENDOR_BASE_URL`, `VENDOR_CLIENT_ID`, `VENDOR_CLIENT_SECRET` and
    /// `VENDOR_TOKEN_URL` are required. `VENDOR_SCOPE`, `VENDOR_TIMEOUT_MS`,
    /// `VENDOR_MAX_RETRIES`, `VENDOR_RETRY_DELAY_MS`,
    /// `VENDOR_TOKEN_REFRESH_BUFFER_SECONDS` and `VENDOR_DEBUG` are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| Error::Config(format!("{} must be set", key)))
        };

        let mut config = Self::new(
            required("VENDOR_BASE_URL")?,
            required("VENDOR_CLIENT_ID")?,
            required("VENDOR_CLIENT_SECRET")?,
            required("VENDOR_TOKEN_URL")?,
        );

        config.scope = lookup("VENDOR_SCOPE");
        config.timeout =
            parse_var::<u64, _>(&lookup, "VENDOR_TIMEOUT_MS")?.map(Duration::from_millis);
        config.max_retries = parse_var(&lookup, "VENDOR_MAX_RETRIES")?;
        config.retry_delay =
            parse_var::<u64, _>(&lookup, "VENDOR_RETRY_DELAY_MS")?.map(Duration::from_millis);
        config.token_refresh_buffer_secs =
            parse_var(&lookup, "VENDOR_TOKEN_REFRESH_BUFFER_SECONDS")?;
        config.debug = parse_var(&lookup, "VENDOR_DEBUG")?;

        Ok(config)
    }

    /// Set the OAuth2 scope.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Set the timeout applied to every network call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection-establishment timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the number of retries after the first attempt.
    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = Some(max);
        self
    }

    /// Set the base delay for exponential backoff.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = Some(delay);
        self
    }

    /// Set the token refresh buffer in seconds.
    pub fn with_token_refresh_buffer(mut self, secs: i64) -> Self {
        self.token_refresh_buffer_secs = Some(secs);
        self
    }

    /// Enable or disable diagnostic events.
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = Some(enabled);
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Enable or disable the refresh-and-resend on a 401 search response.
    pub fn with_reauthenticate_on_unauthorized(mut self, enabled: bool) -> Self {
        self.reauthenticate_on_unauthorized = Some(enabled);
        self
    }

    /// Fill every unset field with its default and validate the URLs.
    ///
    /// Values that were set are kept as-is.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let base_url = parse_url("base_url", &self.base_url)?;
        let token_url = parse_url("token_url", &self.token_url)?;

        Ok(ResolvedConfig {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            token_url,
            scope: self
                .scope
                .clone()
                .unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            connect_timeout: self.connect_timeout.unwrap_or(DEFAULT_CONNECT_TIMEOUT),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            retry_delay: self.retry_delay.unwrap_or(DEFAULT_RETRY_DELAY),
            token_refresh_buffer_secs: self
                .token_refresh_buffer_secs
                .unwrap_or(DEFAULT_TOKEN_REFRESH_BUFFER_SECS),
            debug: self.debug.unwrap_or(false),
            user_agent: self.user_agent.clone().unwrap_or_else(default_user_agent),
            reauthenticate_on_unauthorized: self.reauthenticate_on_unauthorized.unwrap_or(true),
        })
    }
}

/// Configuration with every default applied.
///
/// Built once per client and shared read-only by every call.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: SecretString,
    /// OAuth2 token endpoint
    pub token_url: Url,
    /// OAuth2 scope
    pub scope: String,
    /// Timeout for every network call
    pub timeout: Duration,
    /// Timeout for establishing a connection
    pub connect_timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base delay for exponential backoff
    pub retry_delay: Duration,
    /// Seconds subtracted from the server-reported token lifetime
    pub token_refresh_buffer_secs: i64,
    /// Emit diagnostic events
    pub debug: bool,
    /// User-Agent header value
    pub user_agent: String,
    /// Refresh the token and re-send once when a search returns 401
    pub reauthenticate_on_unauthorized: bool,
}

impl ResolvedConfig {
    /// The retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retries,
            base_delay: self.retry_delay,
        }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl PartialEq for ResolvedConfig {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && self.client_id == other.client_id
            && self.client_secret.expose_secret() == other.client_secret.expose_secret()
            && self.token_url == other.token_url
            && self.scope == other.scope
            && self.timeout == other.timeout
            && self.connect_timeout == other.connect_timeout
            && self.max_retries == other.max_retries
            && self.retry_delay == other.retry_delay
            && self.token_refresh_buffer_secs == other.token_refresh_buffer_secs
            && self.debug == other.debug
            && self.user_agent == other.user_agent
            && self.reauthenticate_on_unauthorized == other.reauthenticate_on_unauthorized
    }
}

impl From<&ResolvedConfig> for ClientConfig {
    fn from(resolved: &ResolvedConfig) -> Self {
        Self {
            base_url: resolved.base_url.clone(),
            client_id: resolved.client_id.clone(),
            client_secret: resolved.client_secret.clone(),
            token_url: resolved.token_url.to_string(),
            scope: Some(resolved.scope.clone()),
            timeout: Some(resolved.timeout),
            connect_timeout: Some(resolved.connect_timeout),
            max_retries: Some(resolved.max_retries),
            retry_delay: Some(resolved.retry_delay),
            token_refresh_buffer_secs: Some(resolved.token_refresh_buffer_secs),
            debug: Some(resolved.debug),
            user_agent: Some(resolved.user_agent.clone()),
            reauthenticate_on_unauthorized: Some(resolved.reauthenticate_on_unauthorized),
        }
    }
}

/// Exponential backoff for idempotent requests.
///
/// The delay before retry `n` (1-indexed) is `base_delay * 2^(n-1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            base_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Backoff before the given 1-indexed retry.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << shift)
    }

    /// Whether another retry is allowed after `retries_done` retries.
    pub fn allows(&self, retries_done: u32) -> bool {
        retries_done < self.max_retries
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

fn default_user_agent() -> String {
    format!("vendor-data-client/{} (Rust)", env!("CARGO_PKG_VERSION"))
}

fn parse_url(field: &str, value: &str) -> Result<Url> {
    Url::parse(value).map_err(|err| Error::Config(format!("invalid {} {:?}: {}", field, value, err)))
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|err| Error::Config(format!("invalid {} {:?}: {}", key, raw, err))),
    }
}
