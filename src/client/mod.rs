//! HTTP client and request execution for the Vendor Data Service API.
//!
//! This module provides the main entry point [`VendorDataClient`], its
//! configuration types, and the retrying executor every search goes through.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use vendor_data_client::{ClientConfig, VendorDataClient};
//!
//! # async fn example() -> vendor_data_client::Result<()> {
//! let config = ClientConfig::new(
//!     "https://vendor.example.com",
//!     "client-id",
//!     "client-secret",
//!     "https://auth.example.com/oauth2/token",
//! )
//! .with_retry_delay(Duration::from_millis(500));
//!
//! let client = VendorDataClient::new(config)?;
//! if client.health_check().await {
//!     println!("service is up");
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::{
    ClientConfig, ResolvedConfig, RetryPolicy, DEFAULT_CONNECT_TIMEOUT, DEFAULT_MAX_RETRIES,
    DEFAULT_RETRY_DELAY, DEFAULT_SCOPE, DEFAULT_TIMEOUT, DEFAULT_TOKEN_REFRESH_BUFFER_SECS,
};
pub use http::{VendorDataClient, VendorDataClientBuilder, HEALTH_PATH, REQUEST_ID_HEADER};
pub(crate) use http::ClientInner;
