//! Data models for the Vendor Data Service API.
//!
//! Models are organized by role:
//!
//! - [`search`] - Search request parameters
//! - [`case`] - The response envelope and case records
//!
//! The public types serialize with camelCase names. The service itself speaks
//! snake_case; translation happens in a private wire layer when requests are
//! sent and responses received.

pub mod case;
pub mod search;
pub(crate) mod wire;

pub use case::*;
pub use search::*;
