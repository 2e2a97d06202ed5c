//! API service modules for Vendor Data Service endpoints.

mod search;

pub use search::{CaseSearchService, SEARCH_PATH};
