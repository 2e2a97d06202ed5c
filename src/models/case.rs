//! Search results: the response envelope and case records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The response envelope of a search.
///
/// List fields are always present; a response that omits them yields empty
/// vectors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Version of the API that produced the response
    pub api_version: Option<String>,
    /// Request id echoed back by the service
    pub client_request_id: Option<String>,
    /// When the response was generated
    pub generated_at: Option<DateTime<Utc>>,
    /// 1-based page number
    pub page: Option<u32>,
    /// Records per page
    pub page_size: Option<u32>,
    /// Total number of matching records
    pub total_records: Option<u64>,
    /// Whether `total_records` is an estimate
    pub total_records_is_estimate: Option<bool>,
    /// Non-fatal warnings
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Matching case records
    #[serde(default)]
    pub data: Vec<CaseRecord>,
}

impl SearchResponse {
    /// Returns `true` if the page holds no records.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if a following page may exist.
    pub fn has_more(&self) -> bool {
        match (self.page, self.page_size, self.total_records) {
            (Some(page), Some(size), Some(total)) => u64::from(page) * u64::from(size) < total,
            _ => false,
        }
    }
}

/// A single court case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    /// Court case number
    pub case_number: Option<String>,
    /// Uniform case number
    pub ucn: Option<String>,
    /// Court type
    pub court_type: Option<String>,
    /// County
    pub county: Option<String>,
    /// Filing date
    pub filing_date: Option<NaiveDate>,
    /// Case status
    pub case_status: Option<String>,
    /// Case type
    pub case_type: Option<String>,
    /// Disposition date
    pub disposition_date: Option<NaiveDate>,
    /// Charges
    #[serde(default)]
    pub charges: Vec<Charge>,
    /// Sentences
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    /// Docket entries
    #[serde(default)]
    pub dockets: Vec<Docket>,
    /// Court events
    #[serde(default)]
    pub events: Vec<Event>,
    /// Defendants
    #[serde(default)]
    pub defendants: Vec<Defendant>,
}

/// Generates a nested record type that keeps every field the service sends.
macro_rules! nested_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        ///
        /// The service's field set for nested records varies by court system,
        /// so the record holds the object exactly as received, keyed by the
        /// service's snake_case names. Typed accessors cover the common fields.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Map<String, Value>);

        impl $name {
            /// Raw value of a field by its wire name.
            pub fn get(&self, key: &str) -> Option<&Value> {
                self.0.get(key)
            }

            /// String value of a field by its wire name.
            pub fn get_str(&self, key: &str) -> Option<&str> {
                self.0.get(key).and_then(Value::as_str)
            }

            /// Every field as sent by the service.
            pub fn fields(&self) -> &Map<String, Value> {
                &self.0
            }

            /// Consume the record and return its fields.
            pub fn into_fields(self) -> Map<String, Value> {
                self.0
            }
        }

        impl From<Map<String, Value>> for $name {
            fn from(fields: Map<String, Value>) -> Self {
                Self(fields)
            }
        }
    };
}

nested_record! {
    /// A charge filed in a case.
    Charge
}

nested_record! {
    /// A sentence imposed in a case.
    Sentence
}

nested_record! {
    /// A docket entry.
    Docket
}

nested_record! {
    /// A court event.
    Event
}

nested_record! {
    /// A defendant party.
    Defendant
}

/// Dates arrive as `YYYY-MM-DD`; anything else reads as absent.
fn date_field(fields: &Map<String, Value>, key: &str) -> Option<NaiveDate> {
    fields.get(key)?.as_str()?.parse().ok()
}

impl Charge {
    /// Charge sequence number
    pub fn sequence_number(&self) -> Option<&str> {
        self.get_str("charge_sequence_number")
    }

    /// Statute number as adjudicated by the court
    pub fn court_statute_number(&self) -> Option<&str> {
        self.get_str("court_fl_statute_number")
    }

    /// Statute description as adjudicated by the court
    pub fn court_statute_description(&self) -> Option<&str> {
        self.get_str("court_fl_statute_description")
    }

    /// Offense date
    pub fn offense_date(&self) -> Option<NaiveDate> {
        date_field(&self.0, "offense_date")
    }

    /// Sentences attached to this charge.
    ///
    /// Entries that are not JSON objects are skipped.
    pub fn sentences(&self) -> Vec<Sentence> {
        self.0
            .get("sentences")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_object().cloned().map(Sentence::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Sentence {
    /// Sentence sequence number
    pub fn sequence_number(&self) -> Option<&str> {
        self.get_str("sentence_sequence_number")
    }

    /// Date imposed
    pub fn imposed_date(&self) -> Option<NaiveDate> {
        date_field(&self.0, "sentence_imposed_date")
    }
}

impl Docket {
    /// Docket id
    pub fn docket_id(&self) -> Option<&str> {
        self.get_str("docket_id")
    }

    /// Action date
    pub fn action_date(&self) -> Option<NaiveDate> {
        date_field(&self.0, "docket_action_date")
    }

    /// Docket code
    pub fn docket_code(&self) -> Option<&str> {
        self.get_str("docket_code")
    }

    /// Docket text
    pub fn docket_text(&self) -> Option<&str> {
        self.get_str("docket_text")
    }
}

impl Event {
    /// Event id
    pub fn event_id(&self) -> Option<&str> {
        self.get_str("event_id")
    }

    /// Event description
    pub fn description(&self) -> Option<&str> {
        self.get_str("court_event_description")
    }

    /// Court location
    pub fn location(&self) -> Option<&str> {
        self.get_str("court_location")
    }
}

impl Defendant {
    /// Party id
    pub fn party_id(&self) -> Option<&str> {
        self.get_str("party_id")
    }

    /// Given name
    pub fn first_name(&self) -> Option<&str> {
        self.get_str("first_name")
    }

    /// Family name
    pub fn last_name(&self) -> Option<&str> {
        self.get_str("last_name")
    }

    /// Date of birth
    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        date_field(&self.0, "dob")
    }
}
