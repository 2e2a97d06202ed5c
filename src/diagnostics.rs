//! Debug diagnostics emitted by the client.
//!
//! When [`ClientConfig::with_debug`](crate::ClientConfig::with_debug) is
//! enabled the client reports each token refresh, request attempt, retry
//! delay, and terminal failure as a [`Diagnostic`] event. Events go to a
//! [`DiagnosticSink`]; the default [`TracingSink`] forwards them to `tracing`.
//! Diagnostics never change control flow or error content.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use vendor_data_client::diagnostics::{Diagnostic, DiagnosticSink};
//!
//! #[derive(Default)]
//! struct Collect(Mutex<Vec<Diagnostic>>);
//!
//! impl DiagnosticSink for Collect {
//!     fn emit(&self, event: &Diagnostic) {
//!         self.0.lock().unwrap().push(event.clone());
//!     }
//! }
//!
//! let sink: Arc<dyn DiagnosticSink> = Arc::new(Collect::default());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// A single diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A token refresh is about to hit the token endpoint.
    TokenRefreshStarted,
    /// A token refresh succeeded.
    TokenRefreshed {
        /// Effective expiry of the new token (refresh buffer applied)
        expires_at: DateTime<Utc>,
    },
    /// A token refresh failed.
    TokenRefreshFailed {
        /// Rendered error
        error: String,
    },
    /// A request attempt is being dispatched.
    Attempt {
        /// HTTP method
        method: String,
        /// Full request URL
        url: String,
        /// 1-indexed attempt number
        attempt: u32,
    },
    /// A response was received for an attempt.
    Response {
        /// HTTP status code
        status: u16,
        /// 1-indexed attempt number
        attempt: u32,
    },
    /// A transient failure will be retried after `delay`.
    RetryScheduled {
        /// 1-indexed retry number
        retry: u32,
        /// Configured retry budget
        max_retries: u32,
        /// Backoff before the retry
        delay: Duration,
    },
    /// A call failed terminally.
    Failed {
        /// Number of attempts dispatched
        attempts: u32,
        /// Rendered error
        error: String,
    },
    /// The health probe did not report healthy.
    HealthCheckFailed {
        /// Status code or transport error
        reason: String,
    },
}

/// Receives diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    /// Handle one event.
    fn emit(&self, event: &Diagnostic);
}

/// Sink that writes every event through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, event: &Diagnostic) {
        match event {
            Diagnostic::TokenRefreshStarted => tracing::debug!("refreshing OAuth2 token"),
            Diagnostic::TokenRefreshed { expires_at } => {
                tracing::debug!(%expires_at, "token refreshed")
            }
            Diagnostic::TokenRefreshFailed { error } => {
                tracing::warn!(%error, "token refresh failed")
            }
            Diagnostic::Attempt {
                method,
                url,
                attempt,
            } => tracing::debug!(%method, %url, attempt, "sending request"),
            Diagnostic::Response { status, attempt } => {
                tracing::debug!(status, attempt, "received response")
            }
            Diagnostic::RetryScheduled {
                retry,
                max_retries,
                delay,
            } => tracing::debug!(
                retry,
                max_retries,
                delay_ms = delay.as_millis() as u64,
                "retrying request"
            ),
            Diagnostic::Failed { attempts, error } => {
                tracing::warn!(attempts, %error, "request failed")
            }
            Diagnostic::HealthCheckFailed { reason } => {
                tracing::warn!(%reason, "health check failed")
            }
        }
    }
}

/// Gate in front of a sink; drops events unless debug mode is on.
#[derive(Clone)]
pub(crate) struct Diagnostics {
    enabled: bool,
    sink: Arc<dyn DiagnosticSink>,
}

impl Diagnostics {
    pub(crate) fn new(enabled: bool, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { enabled, sink }
    }

    pub(crate) fn emit(&self, event: Diagnostic) {
        if self.enabled {
            self.sink.emit(&event);
        }
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(false, Arc::new(TracingSink))
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("enabled", &self.enabled)
            .finish()
    }
}
