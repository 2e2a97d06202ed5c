//! OAuth2 client-credentials authentication.
//!
//! The [`TokenManager`] exchanges the configured client id and secret for a
//! bearer token at the token endpoint, and refreshes it before it expires.
//! A token is considered stale once `expires_in - refresh_buffer` seconds
//! have passed since it was issued.
//!
//! ```no_run
//! use std::sync::Arc;
//! use secrecy::ExposeSecret;
//! use vendor_data_client::{ClientConfig, TokenManager};
//!
//! # async fn example() -> vendor_data_client::Result<()> {
//! let config = ClientConfig::new(
//!     "https://vendor.example.com",
//!     "client-id",
//!     "client-secret",
//!     "https://auth.example.com/oauth2/token",
//! )
//! .resolve()?;
//!
//! let tokens = TokenManager::new(Arc::new(config))?;
//! let token = tokens.get_token().await?;
//! println!("token length: {}", token.expose_secret().len());
//! # Ok(())
//! # }
//! ```

mod clock;
mod token;

pub use clock::{Clock, SystemClock};
pub use token::{AccessToken, TokenManager};
