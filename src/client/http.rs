//! HTTP client implementation for the Vendor Data Service API.

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api::CaseSearchService;
use crate::auth::{Clock, SystemClock, TokenManager};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, TracingSink};
use crate::models::{SearchRequest, SearchResponse};
use crate::{Error, Result};

use super::config::{ClientConfig, ResolvedConfig};

/// Header carrying the per-call correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Path of the unauthenticated liveness probe.
pub const HEALTH_PATH: &str = "/actuator/health";

/// The main client for interacting with the Vendor Data Service API.
///
/// The client owns the token manager and a pooled HTTP connection set.
/// Cloning is cheap; clones share both.
///
/// # Example
///
/// ```no_run
/// use vendor_data_client::{ClientConfig, SearchRequest, VendorDataClient};
///
/// # async fn example() -> vendor_data_client::Result<()> {
/// let client = VendorDataClient::new(ClientConfig::new(
///     "https://vendor.example.com",
///     "client-id",
///     "client-secret",
///     "https://auth.example.com/oauth2/token",
/// ))?;
///
/// let response = client
///     .search(&SearchRequest::new().last_name("Doe").include_charges(true))
///     .await?;
/// println!("{} records", response.data.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VendorDataClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: Arc<ResolvedConfig>,
    pub(crate) tokens: TokenManager,
    pub(crate) diagnostics: Diagnostics,
}

impl VendorDataClient {
    /// Create a client from caller configuration, applying defaults.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::builder(config).build()
    }

    /// Create a client from `VENDOR_*` environment variables.
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Start building a client with custom collaborators.
    pub fn builder(config: ClientConfig) -> VendorDataClientBuilder {
        VendorDataClientBuilder {
            config,
            clock: None,
            sink: None,
        }
    }

    /// Search using `POST /api/v1/search` with a JSON body.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.cases().search(request).await
    }

    /// Search using `GET /api/v1/search` with query parameters.
    pub async fn search_get(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.cases().search_get(request).await
    }

    /// Get the case search service.
    pub fn cases(&self) -> CaseSearchService {
        CaseSearchService::new(self.inner.clone())
    }

    /// Probe the service's liveness endpoint.
    ///
    /// Returns `true` only when the probe answers 200. Transport errors and
    /// any other status yield `false`; this method never fails.
    pub async fn health_check(&self) -> bool {
        let url = self.inner.config.endpoint(HEALTH_PATH);

        match self.inner.http.get(&url).send().await {
            Ok(response) if response.status() == StatusCode::OK => true,
            Ok(response) => {
                self.inner.diagnostics.emit(Diagnostic::HealthCheckFailed {
                    reason: format!("status {}", response.status().as_u16()),
                });
                false
            }
            Err(err) => {
                self.inner.diagnostics.emit(Diagnostic::HealthCheckFailed {
                    reason: err.to_string(),
                });
                false
            }
        }
    }

    /// Get the token manager.
    pub fn token_manager(&self) -> &TokenManager {
        &self.inner.tokens
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> &ResolvedConfig {
        &self.inner.config
    }
}

/// Builder for [`VendorDataClient`].
pub struct VendorDataClientBuilder {
    config: ClientConfig,
    clock: Option<Arc<dyn Clock>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
}

impl VendorDataClientBuilder {
    /// Use a custom time source for token expiry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Send debug diagnostics to a custom sink instead of `tracing`.
    ///
    /// Events are only emitted when debug mode is enabled in the config.
    pub fn diagnostic_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Resolve the configuration and build the client.
    pub fn build(self) -> Result<VendorDataClient> {
        let config = Arc::new(self.config.resolve()?);

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|err| Error::Config(format!("failed to build HTTP client: {}", err)))?;

        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));
        let diagnostics = Diagnostics::new(config.debug, sink);
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let tokens =
            TokenManager::from_parts(http.clone(), config.clone(), clock, diagnostics.clone());

        Ok(VendorDataClient {
            inner: Arc::new(ClientInner {
                http,
                config,
                tokens,
                diagnostics,
            }),
        })
    }
}

impl ClientInner {
    /// Run an idempotent, authenticated request with retries.
    ///
    /// `prepare` attaches the payload (JSON body or query string) to a fresh
    /// request builder for every attempt. A token is obtained before each
    /// dispatch; authentication failures end the call immediately.
    pub(crate) async fn execute_idempotent<T, F>(
        &self,
        method: Method,
        path: &str,
        prepare: F,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn(RequestBuilder) -> RequestBuilder,
    {
        let url = self.config.endpoint(path);
        let request_id = Uuid::new_v4().to_string();
        let policy = self.config.retry_policy();

        let mut retries = 0u32;
        let mut attempts = 0u32;
        let mut reauthenticated = false;

        loop {
            let token = match self.tokens.get_token().await {
                Ok(token) => token,
                Err(err) => {
                    self.diagnostics.emit(Diagnostic::Failed {
                        attempts,
                        error: err.to_string(),
                    });
                    return Err(err);
                }
            };

            attempts += 1;
            self.diagnostics.emit(Diagnostic::Attempt {
                method: method.to_string(),
                url: url.clone(),
                attempt: attempts,
            });

            let builder = prepare(self.http.request(method.clone(), &url))
                .bearer_auth(token.expose_secret())
                .header(REQUEST_ID_HEADER, request_id.as_str())
                .header(ACCEPT, HeaderValue::from_static("application/json"));

            let err = match self.dispatch(builder, attempts).await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };

            if err.status() == Some(401)
                && self.config.reauthenticate_on_unauthorized
                && !reauthenticated
            {
                reauthenticated = true;
                self.tokens.invalidate().await;
                continue;
            }

            if err.is_retryable() && policy.allows(retries) {
                retries += 1;
                let delay = policy.delay_for_retry(retries);
                self.diagnostics.emit(Diagnostic::RetryScheduled {
                    retry: retries,
                    max_retries: policy.max_retries,
                    delay,
                });
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                continue;
            }

            self.diagnostics.emit(Diagnostic::Failed {
                attempts,
                error: err.to_string(),
            });
            return Err(err);
        }
    }

    /// Send one attempt and decode a successful body.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        attempt: u32,
    ) -> Result<T> {
        let response = builder.send().await.map_err(Error::from_transport)?;
        let status = response.status();
        self.diagnostics.emit(Diagnostic::Response {
            status: status.as_u16(),
            attempt,
        });

        let body = response.text().await.map_err(Error::from_transport)?;

        if !status.is_success() {
            return Err(Error::from_api_response(status.as_u16(), body));
        }

        serde_json::from_str(&body).map_err(|err| Error::Decode {
            message: err.to_string(),
            body,
        })
    }
}

impl fmt::Debug for VendorDataClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorDataClient")
            .field("base_url", &self.inner.config.base_url)
            .field("tokens", &self.inner.tokens)
            .finish()
    }
}

impl fmt::Debug for VendorDataClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VendorDataClientBuilder")
            .field("config", &self.config)
            .field("custom_clock", &self.clock.is_some())
            .field("custom_sink", &self.sink.is_some())
            .finish()
    }
}
