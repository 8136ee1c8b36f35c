//! Resource client boundary for the registry API.
//!
//! Everything network-shaped goes through the `ResourceClient` trait so the
//! form engine and orchestrator never touch HTTP directly. Failures are
//! normalized into `ApiFailure` values; the trait never panics and never
//! surfaces transport errors as anything but values.

mod http;
mod mock;

pub use http::HttpResourceClient;
pub use mock::{MockResourceClient, RecordedCall};

use serde_json::Value;
use thiserror::Error;

/// Beneficiary profile records.
pub const BENEFICIARY_DETAILS: &str = "beneficiary-details";
/// Farm profile records.
pub const FARM_PROFILES: &str = "farm-profiles";
/// Individual farm parcel records.
pub const FARM_PARCELS: &str = "farm-parcels";
/// Bulk farm parcel creation.
pub const FARM_PARCELS_BULK: &str = "farm-parcels/bulk";
/// Livelihood detail records, one resource per category.
pub const FARMER_DETAILS: &str = "farmer-details";
pub const FISHERFOLK_DETAILS: &str = "fisherfolk-details";
pub const FARMWORKER_DETAILS: &str = "farmworker-details";
pub const AGRI_YOUTH_DETAILS: &str = "agri-youth-details";
/// Enrollment applications.
pub const RSBSA_ENROLLMENTS: &str = "rsbsa-enrollments";

/// A normalized remote failure: a human-readable message plus the raw
/// response body when one was decodable.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ApiFailure {
    pub message: String,
    pub details: Option<Value>,
}

impl ApiFailure {
    /// Build a failure with no captured response body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    /// Attach the raw response body for caller-side diagnostics.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Outcome of a single remote call.
pub type ApiResult = Result<Value, ApiFailure>;

/// The consumed remote capability: authenticated JSON create/read/update.
pub trait ResourceClient {
    fn create(&self, resource: &str, body: &Value) -> ApiResult;
    fn get_by_id(&self, resource: &str, id: i64) -> ApiResult;
    fn update(&self, resource: &str, id: i64, body: &Value) -> ApiResult;
}

/// Extract the server-assigned record id from a create response.
///
/// A success response without an id is a malformed reply; it is converted to
/// a failure here rather than allowed to panic downstream.
pub fn record_id(record: &Value) -> Result<i64, ApiFailure> {
    record
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiFailure::new("response missing record id").with_details(record.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_id_reads_server_assigned_ids() {
        assert_eq!(record_id(&json!({"id": 42, "name": "x"})).unwrap(), 42);
    }

    #[test]
    fn record_id_flags_malformed_responses() {
        let failure = record_id(&json!({"name": "no id here"})).unwrap_err();
        assert!(failure.message.contains("missing record id"));
        assert!(failure.details.is_some());
    }
}
