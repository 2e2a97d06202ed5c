//! Wire representations of the search payloads.
//!
//! The service speaks snake_case JSON. These types mirror the public models
//! field for field; the `From` impls are the only place names are mapped.
//! Nested case data (charges, sentences, dockets, events, defendants) is
//! passed through unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::case::{CaseRecord, Charge, Defendant, Docket, Event, SearchResponse, Sentence};
use super::search::SearchRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct WireSearchRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date_from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_charges: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_sentences: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_dockets: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_events: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_defendants: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Empty strings are placeholders, not values; they are never sent.
fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl From<&SearchRequest> for WireSearchRequest {
    fn from(request: &SearchRequest) -> Self {
        Self {
            first_name: present(&request.first_name),
            last_name: present(&request.last_name),
            middle_name: present(&request.middle_name),
            date_of_birth: request.date_of_birth,
            ssn: present(&request.ssn),
            case_number: present(&request.case_number),
            ucn: present(&request.ucn),
            filing_date_from: request.filing_date_from,
            filing_date_to: request.filing_date_to,
            county: present(&request.county),
            case_type: present(&request.case_type),
            include_charges: request.include_charges,
            include_sentences: request.include_sentences,
            include_dockets: request.include_dockets,
            include_events: request.include_events,
            include_defendants: request.include_defendants,
            page: request.page.filter(|p| *p > 0),
            page_size: request.page_size.filter(|s| *s > 0),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct WireSearchResponse {
    pub api_version: Option<String>,
    pub client_request_id: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub total_records: Option<u64>,
    pub total_records_is_estimate: Option<bool>,
    pub warnings: Option<Vec<String>>,
    pub data: Option<Vec<WireCaseRecord>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct WireCaseRecord {
    pub case_number: Option<String>,
    pub ucn: Option<String>,
    pub court_type: Option<String>,
    pub county: Option<String>,
    pub filing_date: Option<NaiveDate>,
    pub case_status: Option<String>,
    pub case_type: Option<String>,
    pub disposition_date: Option<NaiveDate>,
    pub charges: Option<Vec<Charge>>,
    pub sentences: Option<Vec<Sentence>>,
    pub dockets: Option<Vec<Docket>>,
    pub events: Option<Vec<Event>>,
    pub defendants: Option<Vec<Defendant>>,
}

fn map_list<W, T: From<W>>(items: Option<Vec<W>>) -> Vec<T> {
    items
        .unwrap_or_default()
        .into_iter()
        .map(T::from)
        .collect()
}

impl From<WireSearchResponse> for SearchResponse {
    fn from(wire: WireSearchResponse) -> Self {
        Self {
            api_version: wire.api_version,
            client_request_id: wire.client_request_id,
            generated_at: wire.generated_at,
            page: wire.page,
            page_size: wire.page_size,
            total_records: wire.total_records,
            total_records_is_estimate: wire.total_records_is_estimate,
            warnings: wire.warnings.unwrap_or_default(),
            data: map_list(wire.data),
        }
    }
}

impl From<WireCaseRecord> for CaseRecord {
    fn from(wire: WireCaseRecord) -> Self {
        Self {
            case_number: wire.case_number,
            ucn: wire.ucn,
            court_type: wire.court_type,
            county: wire.county,
            filing_date: wire.filing_date,
            case_status: wire.case_status,
            case_type: wire.case_type,
            disposition_date: wire.disposition_date,
            charges: wire.charges.unwrap_or_default(),
            sentences: wire.sentences.unwrap_or_default(),
            dockets: wire.dockets.unwrap_or_default(),
            events: wire.events.unwrap_or_default(),
            defendants: wire.defendants.unwrap_or_default(),
        }
    }
}
