//! Error types for the Vendor Data Service client.
//!
//! Every failure surfaced by this crate is a variant of [`Error`]. Callers that
//! need to branch on the category without matching every field can use
//! [`Error::kind`], which returns a plain [`ErrorKind`] discriminant.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// A specialized `Result` type for Vendor Data Service operations.
pub type Result<T> = std::result::Result<T, Error>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The main error type for all client operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The token endpoint was unreachable, rejected the credentials, or
    /// returned a response without an access token.
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Human-readable description of the failure
        message: String,
        /// Underlying transport or decode error, if any
        #[source]
        source: Option<BoxError>,
    },

    /// A connection or response deadline was exceeded.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Description reported by the HTTP stack
        message: String,
    },

    /// Any other HTTP failure.
    ///
    /// `status` is `None` when no response was received at all (connection
    /// refused, reset, DNS failure).
    #[error("API error: status={status:?}, message={message}")]
    Api {
        /// HTTP status code, when a response was received
        status: Option<u16>,
        /// Human-readable error message
        message: String,
        /// Raw response body, when one was received
        body: Option<String>,
    },

    /// Caller input failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The client could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A successful response carried a body that could not be decoded.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Decoder error message
        message: String,
        /// The body that failed to decode
        body: String,
    },
}

/// The category of an [`Error`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::Authentication`]
    Authentication,
    /// See [`Error::Timeout`]
    Timeout,
    /// See [`Error::Api`]
    Api,
    /// See [`Error::Validation`]
    Validation,
    /// See [`Error::Config`]
    Config,
    /// See [`Error::Decode`]
    Decode,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Authentication => "authentication",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Api => "api",
            ErrorKind::Validation => "validation",
            ErrorKind::Config => "config",
            ErrorKind::Decode => "decode",
        };
        f.write_str(name)
    }
}

impl Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Authentication { .. } => ErrorKind::Authentication,
            Error::Timeout { .. } => ErrorKind::Timeout,
            Error::Api { .. } => ErrorKind::Api,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Config,
            Error::Decode { .. } => ErrorKind::Decode,
        }
    }

    /// Returns `true` if this error is transient and an idempotent request
    /// that produced it may be re-issued.
    ///
    /// Timeouts, network failures with no response, and 5xx responses are
    /// retryable. Everything else, including authentication failures, is not.
    ///
    /// # Example
    ///
    /// ```
    /// use vendor_data_client::Error;
    ///
    /// let err = Error::Api { status: Some(503), message: "unavailable".into(), body: None };
    /// assert!(err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Timeout { .. } => true,
            Error::Api { status: None, .. } => true,
            Error::Api {
                status: Some(status),
                ..
            } => *status >= 500,
            _ => false,
        }
    }

    /// Returns `true` if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Authentication { .. })
    }

    /// Returns `true` if this error indicates a client-side issue.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api {
                status: Some(status),
                ..
            } => (400..500).contains(status),
            Error::Validation(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status: Some(status), .. } if *status >= 500)
    }

    /// The HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => *status,
            _ => None,
        }
    }

    pub(crate) fn authentication(message: impl Into<String>) -> Self {
        Error::Authentication {
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn authentication_with<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Error::Authentication {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Classify a transport-level failure from the HTTP stack.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return Error::Timeout {
                message: err.to_string(),
            };
        }
        if err.is_builder() {
            return Error::Config(err.to_string());
        }
        Error::Api {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
            body: None,
        }
    }

    /// Build an API error from a non-2xx response.
    ///
    /// The service answers failures with a JSON `ErrorResponse`; its
    /// `message` (or `error`) becomes the error message when present.
    pub(crate) fn from_api_response(status: u16, body: String) -> Self {
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
            message: Option<String>,
            #[serde(default)]
            details: Vec<String>,
        }

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|parsed| {
                let base = parsed.message.or(parsed.error)?;
                if parsed.details.is_empty() {
                    Some(base)
                } else {
                    Some(format!("{} ({})", base, parsed.details.join("; ")))
                }
            })
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        Error::Api {
            status: Some(status),
            message,
            body: if body.is_empty() { None } else { Some(body) },
        }
    }
}
