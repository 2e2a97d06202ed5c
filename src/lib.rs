//! # vendor-data-client
//!
//! An async Rust client for the Vendor Data Service court-records search API.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 client-credentials grant with proactive token
//!   refresh and a single in-flight refresh shared by concurrent callers
//! - **Resilience**: exponential-backoff retries for timeouts, network
//!   failures and 5xx responses on idempotent searches
//! - **Typed errors**: one [`Error`] enum with an explicit [`ErrorKind`]
//! - **Field mapping**: camelCase public models, snake_case on the wire
//! - **Diagnostics**: opt-in debug events through an injectable sink
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vendor_data_client::{ClientConfig, SearchRequest, VendorDataClient};
//!
//! #[tokio::main]
//! async fn main() -> vendor_data_client::Result<()> {
//!     let client = VendorDataClient::new(ClientConfig::new(
//!         "https://vendor.example.com",
//!         "client-id",
//!         "client-secret",
//!         "https://auth.example.com/oauth2/token",
//!     ))?;
//!
//!     let request = SearchRequest::new()
//!         .first_name("John")
//!         .last_name("Doe")
//!         .include_charges(true);
//!
//!     let response = client.search(&request).await?;
//!     println!("Found {:?} records", response.total_records);
//!
//!     for record in &response.data {
//!         println!("{:?} ({:?})", record.case_number, record.case_status);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! ```rust,no_run
//! use vendor_data_client::{ErrorKind, SearchRequest, VendorDataClient};
//!
//! # async fn example(client: VendorDataClient) {
//! match client.search_get(&SearchRequest::new().ucn("292023CF001234000AHC")).await {
//!     Ok(response) => println!("{} records", response.data.len()),
//!     Err(err) => match err.kind() {
//!         ErrorKind::Authentication => eprintln!("check credentials: {}", err),
//!         ErrorKind::Timeout => eprintln!("service too slow: {}", err),
//!         _ => eprintln!("search failed (status {:?}): {}", err.status(), err),
//!     },
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod diagnostics;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use auth::{AccessToken, Clock, SystemClock, TokenManager};
pub use client::{ClientConfig, ResolvedConfig, RetryPolicy, VendorDataClient};
pub use error::{Error, ErrorKind, Result};
pub use models::{
    CaseRecord, Charge, Defendant, Docket, Event, SearchRequest, SearchResponse, Sentence,
};
pub use secrecy::{ExposeSecret, SecretString};

/// Prelude module for convenient imports.
///
/// ```rust
/// use vendor_data_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::{ClientConfig, VendorDataClient};
    pub use crate::diagnostics::{Diagnostic, DiagnosticSink};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::models::{
        CaseRecord, Charge, Defendant, Docket, Event, SearchRequest, SearchResponse, Sentence,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_with_defaults() {
        let client = VendorDataClient::new(ClientConfig::new(
            "https://vendor.example.com/",
            "client-id",
            "client-secret",
            "https://auth.example.com/oauth2/token",
        ))
        .unwrap();

        assert_eq!(client.config().base_url, "https://vendor.example.com");
        assert_eq!(client.config().max_retries, 3);
    }

    #[test]
    fn test_client_debug_hides_secret() {
        let client = VendorDataClient::new(ClientConfig::new(
            "https://vendor.example.com",
            "client-id",
            "very-secret-value",
            "https://auth.example.com/oauth2/token",
        ))
        .unwrap();

        let debug_str = format!("{:?}", client);
        assert!(!debug_str.contains("very-secret-value"));
    }

    #[test]
    fn test_client_rejects_invalid_base_url() {
        let result = VendorDataClient::new(ClientConfig::new(
            "vendor.example.com",
            "client-id",
            "client-secret",
            "https://auth.example.com/oauth2/token",
        ));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
