//! Case search service.

use std::sync::Arc;

use reqwest::Method;

use crate::client::ClientInner;
use crate::models::wire::{WireSearchRequest, WireSearchResponse};
use crate::models::{SearchRequest, SearchResponse};
use crate::Result;

/// Path of the search endpoint.
pub const SEARCH_PATH: &str = "/api/v1/search";

/// Service for court case searches.
///
/// Both methods are idempotent reads and go through the client's retry
/// policy.
///
/// # Example
///
/// ```no_run
/// use vendor_data_client::SearchRequest;
///
/// # async fn example(client: vendor_data_client::VendorDataClient) -> vendor_data_client::Result<()> {
/// let request = SearchRequest::new()
///     .last_name("Doe")
///     .county("Hillsborough")
///     .include_dockets(true);
///
/// let response = client.cases().search(&request).await?;
/// for record in &response.data {
///     println!("{:?}: {} dockets", record.case_number, record.dockets.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct CaseSearchService {
    inner: Arc<ClientInner>,
}

impl CaseSearchService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// Search with the parameters sent as a JSON body.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let wire = WireSearchRequest::from(request);

        let response: WireSearchResponse = self
            .inner
            .execute_idempotent(Method::POST, SEARCH_PATH, |builder| builder.json(&wire))
            .await?;
        Ok(response.into())
    }

    /// Search with the parameters sent as query parameters.
    pub async fn search_get(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let wire = WireSearchRequest::from(request);

        let response: WireSearchResponse = self
            .inner
            .execute_idempotent(Method::GET, SEARCH_PATH, |builder| builder.query(&wire))
            .await?;
        Ok(response.into())
    }
}
