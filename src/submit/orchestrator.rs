//! The ordered create sequence behind `submit` and the loose draft-save path.

use super::{SubmitError, SubmitStep};
use crate::client::{self, record_id, ApiFailure, ResourceClient};
use crate::draft::{validate_draft, EnrollmentDraft};
use crate::schema::{EnrollmentStatus, LivelihoodCategory};
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Tag stamped on records created by this client.
const DATA_SOURCE: &str = "self_registration";
/// Completion status for a fully submitted beneficiary profile.
const COMPLETION_COMPLETED: &str = "completed";
/// Completion status for the low-commitment draft-save path.
const COMPLETION_PENDING: &str = "pending";
/// Enrollment type stamped on new applications.
const ENROLLMENT_TYPE_NEW: &str = "new";

/// Everything created by a fully successful submission.
#[derive(Debug, Clone)]
pub struct SubmissionRecord {
    pub reference_code: String,
    pub beneficiary: Value,
    pub farm_profile: Value,
    pub parcels: Value,
    /// Absent when the livelihood category id is outside the known set; the
    /// registry accepts such profiles without a detail record.
    pub livelihood: Option<Value>,
    pub enrollment: Value,
}

/// Run whole-form validation, then the five-step create saga.
///
/// Steps are strictly sequential and dependent; the first failure stops the
/// attempt and is returned with the failing step named. Records created
/// before the failure are left on the server (no compensation), so a full
/// retry can duplicate them.
pub fn submit_complete_form(
    client: &dyn ResourceClient,
    draft: &EnrollmentDraft,
    user_id: i64,
) -> Result<SubmissionRecord, SubmitError> {
    let validation = validate_draft(draft);
    if validation.has_errors() {
        return Err(SubmitError::Validation {
            fields: validation.errors,
        });
    }
    let category_id = parse_category_id(draft)?;
    let areas = parse_parcel_areas(draft)?;

    // Step 1: beneficiary profile.
    let beneficiary_body = entity_payload(
        &draft.beneficiary,
        vec![
            ("user_id", Value::from(user_id)),
            ("completion_status", Value::from(COMPLETION_COMPLETED)),
            ("data_source", Value::from(DATA_SOURCE)),
        ],
    );
    let beneficiary = client
        .create(client::BENEFICIARY_DETAILS, &beneficiary_body)
        .and_then(|record| record_id(&record).map(|id| (id, record)))
        .map_err(|failure| remote(SubmitStep::BeneficiaryProfile, failure))?;
    let (beneficiary_id, beneficiary) = beneficiary;
    tracing::info!(beneficiary_id, "beneficiary profile created");

    // Step 2: farm profile, keyed to the beneficiary profile.
    let farm_profile_body = json!({
        "user_id": user_id,
        "beneficiary_details_id": beneficiary_id,
        "livelihood_category_id": category_id,
    });
    let farm_profile = client
        .create(client::FARM_PROFILES, &farm_profile_body)
        .and_then(|record| record_id(&record).map(|id| (id, record)))
        .map_err(|failure| remote(SubmitStep::FarmProfile, failure))?;
    let (farm_profile_id, farm_profile) = farm_profile;
    tracing::info!(farm_profile_id, "farm profile created");

    // Step 3: all parcels in one bulk call, each stamped with the farm
    // profile id.
    let parcel_bodies: Vec<Value> = draft
        .parcels
        .iter()
        .zip(&areas)
        .map(|(parcel, area)| parcel_payload(parcel, *area, farm_profile_id))
        .collect();
    let parcel_count = parcel_bodies.len();
    let bulk_body = json!({ "farm_parcels": parcel_bodies });
    let parcels = client
        .create(client::FARM_PARCELS_BULK, &bulk_body)
        .map_err(|failure| remote(SubmitStep::FarmParcels, failure))?;
    tracing::info!(count = parcel_count, "farm parcels created");

    // Step 4: the livelihood detail variant selected by the category id.
    // Unknown ids create nothing and submission proceeds.
    let livelihood = match LivelihoodCategory::from_id(category_id) {
        Some(category) => {
            let (resource, body) = livelihood_payload(draft, category, farm_profile_id);
            let record = client
                .create(resource, &body)
                .map_err(|failure| remote(SubmitStep::LivelihoodDetail, failure))?;
            tracing::info!(category = %category, "livelihood detail created");
            Some(record)
        }
        None => {
            tracing::debug!(category_id, "no livelihood detail for category");
            None
        }
    };

    // Step 5: the enrollment record tying everything together.
    let reference_code = generate_reference_code();
    let enrollment_body = json!({
        "user_id": user_id,
        "beneficiary_details_id": beneficiary_id,
        "farm_profile_id": farm_profile_id,
        "reference_code": reference_code.as_str(),
        "enrollment_year": Utc::now().year(),
        "enrollment_type": ENROLLMENT_TYPE_NEW,
        "application_status": EnrollmentStatus::Pending.as_str(),
    });
    let enrollment = client
        .create(client::RSBSA_ENROLLMENTS, &enrollment_body)
        .map_err(|failure| remote(SubmitStep::Enrollment, failure))?;
    tracing::info!(%reference_code, "enrollment created");

    Ok(SubmissionRecord {
        reference_code,
        beneficiary,
        farm_profile,
        parcels,
        livelihood,
        enrollment,
    })
}

/// Persist only the beneficiary profile with a pending completion status.
///
/// The check here is deliberately loose: just a presence check on the two
/// name fields. No farm profile, parcel, livelihood, or enrollment record is
/// touched.
pub fn save_draft(
    client: &dyn ResourceClient,
    draft: &EnrollmentDraft,
    user_id: i64,
) -> Result<Value, SubmitError> {
    let mut fields = BTreeMap::new();
    if draft.beneficiary.first_name.trim().is_empty() {
        fields.insert(
            "beneficiary.first_name".to_string(),
            vec!["first_name is required".to_string()],
        );
    }
    if draft.beneficiary.last_name.trim().is_empty() {
        fields.insert(
            "beneficiary.last_name".to_string(),
            vec!["last_name is required".to_string()],
        );
    }
    if !fields.is_empty() {
        return Err(SubmitError::Validation { fields });
    }

    let body = entity_payload(
        &draft.beneficiary,
        vec![
            ("user_id", Value::from(user_id)),
            ("completion_status", Value::from(COMPLETION_PENDING)),
            ("data_source", Value::from(DATA_SOURCE)),
        ],
    );
    client
        .create(client::BENEFICIARY_DETAILS, &body)
        .map_err(|failure| remote(SubmitStep::BeneficiaryProfile, failure))
}

/// Reference code assigned at submission time.
pub(crate) fn generate_reference_code() -> String {
    format!("RSBSA-{}", now_epoch_ms())
}

/// Current epoch time in milliseconds.
fn now_epoch_ms() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0)
}

fn remote(step: SubmitStep, failure: ApiFailure) -> SubmitError {
    tracing::warn!(step = %step, error = %failure, "submission step failed");
    SubmitError::Remote { step, failure }
}

/// Validation has already passed, so these parses cannot fail on a real
/// draft; the fallback keeps the orchestrator panic-free regardless.
fn parse_category_id(draft: &EnrollmentDraft) -> Result<i64, SubmitError> {
    parse_field(
        draft.farm_profile.livelihood_category_id.trim(),
        "farm_profile.livelihood_category_id",
        "livelihood_category_id must be a positive whole number",
    )
}

fn parse_parcel_areas(draft: &EnrollmentDraft) -> Result<Vec<f64>, SubmitError> {
    draft
        .parcels
        .iter()
        .enumerate()
        .map(|(index, parcel)| {
            parse_field(
                parcel.farm_area.trim(),
                &format!("parcels[{index}].farm_area"),
                "farm_area must be a positive number",
            )
        })
        .collect()
}

fn parse_field<T: std::str::FromStr>(
    raw: &str,
    key: &str,
    message: &str,
) -> Result<T, SubmitError> {
    raw.parse().map_err(|_| SubmitError::Validation {
        fields: BTreeMap::from([(key.to_string(), vec![message.to_string()])]),
    })
}

/// Serialize an entity and stamp extra server-facing fields into it.
fn entity_payload<T: serde::Serialize>(entity: &T, extra: Vec<(&str, Value)>) -> Value {
    let mut map = match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    for (key, value) in extra {
        map.insert(key.to_string(), value);
    }
    Value::Object(map)
}

fn parcel_payload(parcel: &crate::schema::FarmParcel, area: f64, farm_profile_id: i64) -> Value {
    let mut body = match serde_json::to_value(parcel) {
        Ok(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    // The client-local key never leaves the draft.
    body.remove("key");
    body.insert("farm_area".to_string(), json!(area));
    body.insert("farm_profile_id".to_string(), Value::from(farm_profile_id));
    Value::Object(body)
}

fn livelihood_payload(
    draft: &EnrollmentDraft,
    category: LivelihoodCategory,
    farm_profile_id: i64,
) -> (&'static str, Value) {
    let stamp = vec![("farm_profile_id", Value::from(farm_profile_id))];
    match category {
        LivelihoodCategory::Farmer => (
            client::FARMER_DETAILS,
            entity_payload(&draft.farmer, stamp),
        ),
        LivelihoodCategory::Fisherfolk => (
            client::FISHERFOLK_DETAILS,
            entity_payload(&draft.fisherfolk, stamp),
        ),
        LivelihoodCategory::Farmworker => (
            client::FARMWORKER_DETAILS,
            entity_payload(&draft.farmworker, stamp),
        ),
        LivelihoodCategory::AgriYouth => (
            client::AGRI_YOUTH_DETAILS,
            entity_payload(&draft.agri_youth, stamp),
        ),
    }
}

/// Fetch the latest enrollment for display, tolerating absence.
pub fn enrollment_status_label(record: &Value) -> String {
    record
        .get("application_status")
        .and_then(Value::as_str)
        .and_then(|status| {
            serde_json::from_value::<EnrollmentStatus>(Value::from(status))
                .ok()
                .map(|status| status.label().to_string())
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Render a validation error map for terminal output.
pub fn describe_validation_errors(fields: &BTreeMap<String, Vec<String>>) -> String {
    let mut lines = Vec::new();
    for (field, messages) in fields {
        for message in messages {
            lines.push(format!("  {field}: {message}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
