//! Search request parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters for a case search.
///
/// Every field is optional; unset fields are left out of the request
/// entirely. Serializes with camelCase field names.
///
/// # Example
///
/// ```
/// use vendor_data_client::SearchRequest;
///
/// let request = SearchRequest::new()
///     .first_name("John")
///     .last_name("Doe")
///     .include_charges(true)
///     .page(1)
///     .page_size(50);
///
/// assert_eq!(request.last_name.as_deref(), Some("Doe"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Middle name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Date of birth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    /// Social security number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    /// Court case number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_number: Option<String>,
    /// Uniform case number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ucn: Option<String>,
    /// Earliest filing date, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date_from: Option<NaiveDate>,
    /// Latest filing date, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filing_date_to: Option<NaiveDate>,
    /// County name or code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    /// Case type filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_type: Option<String>,
    /// Include charges in each record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_charges: Option<bool>,
    /// Include sentences in each record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_sentences: Option<bool>,
    /// Include docket entries in each record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_dockets: Option<bool>,
    /// Include court events in each record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_events: Option<bool>,
    /// Include defendants in each record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_defendants: Option<bool>,
    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Records per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl SearchRequest {
    /// Create an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the given name.
    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    /// Set the family name.
    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    /// Set the middle name.
    pub fn middle_name(mut self, value: impl Into<String>) -> Self {
        self.middle_name = Some(value.into());
        self
    }

    /// Set the date of birth.
    pub fn date_of_birth(mut self, value: NaiveDate) -> Self {
        self.date_of_birth = Some(value);
        self
    }

    /// Set the social security number.
    pub fn ssn(mut self, value: impl Into<String>) -> Self {
        self.ssn = Some(value.into());
        self
    }

    /// Set the case number.
    pub fn case_number(mut self, value: impl Into<String>) -> Self {
        self.case_number = Some(value.into());
        self
    }

    /// Set the uniform case number.
    pub fn ucn(mut self, value: impl Into<String>) -> Self {
        self.ucn = Some(value.into());
        self
    }

    /// Restrict to cases filed within `from..=to`.
    pub fn filed_between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.filing_date_from = Some(from);
        self.filing_date_to = Some(to);
        self
    }

    /// Set the county.
    pub fn county(mut self, value: impl Into<String>) -> Self {
        self.county = Some(value.into());
        self
    }

    /// Set the case type.
    pub fn case_type(mut self, value: impl Into<String>) -> Self {
        self.case_type = Some(value.into());
        self
    }

    /// Include charges in each record.
    pub fn include_charges(mut self, value: bool) -> Self {
        self.include_charges = Some(value);
        self
    }

    /// Include sentences in each record.
    pub fn include_sentences(mut self, value: bool) -> Self {
        self.include_sentences = Some(value);
        self
    }

    /// Include docket entries in each record.
    pub fn include_dockets(mut self, value: bool) -> Self {
        self.include_dockets = Some(value);
        self
    }

    /// Include court events in each record.
    pub fn include_events(mut self, value: bool) -> Self {
        self.include_events = Some(value);
        self
    }

    /// Include defendants in each record.
    pub fn include_defendants(mut self, value: bool) -> Self {
        self.include_defendants = Some(value);
        self
    }

    /// Set the page number.
    pub fn page(mut self, value: u32) -> Self {
        self.page = Some(value);
        self
    }

    /// Set the page size.
    pub fn page_size(mut self, value: u32) -> Self {
        self.page_size = Some(value);
        self
    }
}
