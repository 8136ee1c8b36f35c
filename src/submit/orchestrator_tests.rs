use super::*;
use crate::client::MockResourceClient;
use crate::schema::FarmParcel;

fn valid_draft(category_id: &str) -> EnrollmentDraft {
    let mut draft = EnrollmentDraft::default();
    let beneficiary = &mut draft.beneficiary;
    beneficiary.first_name = "Juan".to_string();
    beneficiary.last_name = "dela Cruz".to_string();
    beneficiary.birth_date = "1990-05-14".to_string();
    beneficiary.civil_status = "married".to_string();
    beneficiary.contact_number = "09171234567".to_string();
    beneficiary.barangay = "Poblacion".to_string();
    beneficiary.municipality = "Tupi".to_string();
    beneficiary.province = "South Cotabato".to_string();
    beneficiary.region = "XII".to_string();
    draft.farm_profile.livelihood_category_id = category_id.to_string();
    draft.parcels.push(FarmParcel {
        key: 1,
        barangay: "Poblacion".to_string(),
        tenure_type: "tenant".to_string(),
        farm_area: "1.5".to_string(),
        ..FarmParcel::default()
    });
    draft.next_parcel_key = 2;
    draft
}

#[test]
fn full_submission_issues_five_ordered_creates() {
    let mock = MockResourceClient::new();
    let record = submit_complete_form(&mock, &valid_draft("1"), 77).expect("submit");

    assert_eq!(
        mock.created_resources(),
        vec![
            "beneficiary-details",
            "farm-profiles",
            "farm-parcels/bulk",
            "farmer-details",
            "rsbsa-enrollments",
        ]
    );
    assert!(record.reference_code.starts_with("RSBSA-"));
    assert!(record.livelihood.is_some());
    assert_eq!(record.beneficiary["id"], serde_json::json!(1));
    assert_eq!(record.farm_profile["id"], serde_json::json!(2));
}

#[test]
fn payloads_are_stamped_with_server_facing_fields() {
    let mock = MockResourceClient::new();
    submit_complete_form(&mock, &valid_draft("1"), 77).expect("submit");
    let calls = mock.calls();

    let beneficiary = &calls[0].body;
    assert_eq!(beneficiary["user_id"], serde_json::json!(77));
    assert_eq!(beneficiary["completion_status"], serde_json::json!("completed"));
    assert_eq!(beneficiary["data_source"], serde_json::json!("self_registration"));

    let farm_profile = &calls[1].body;
    assert_eq!(farm_profile["beneficiary_details_id"], serde_json::json!(1));
    assert_eq!(farm_profile["livelihood_category_id"], serde_json::json!(1));

    let parcels = calls[2].body["farm_parcels"].as_array().expect("parcel list");
    assert_eq!(parcels.len(), 1);
    assert_eq!(parcels[0]["farm_profile_id"], serde_json::json!(2));
    assert_eq!(parcels[0]["farm_area"], serde_json::json!(1.5));
    // The client-local list key never leaves the draft.
    assert!(parcels[0].get("key").is_none());

    let enrollment = &calls[4].body;
    assert_eq!(enrollment["application_status"], serde_json::json!("pending"));
    assert_eq!(enrollment["enrollment_type"], serde_json::json!("new"));
}

#[test]
fn category_two_creates_only_fisherfolk_details() {
    let mock = MockResourceClient::new();
    submit_complete_form(&mock, &valid_draft("2"), 77).expect("submit");
    assert_eq!(mock.calls_for("fisherfolk-details"), 1);
    assert_eq!(mock.calls_for("farmer-details"), 0);
    assert_eq!(mock.calls_for("farmworker-details"), 0);
    assert_eq!(mock.calls_for("agri-youth-details"), 0);
}

#[test]
fn unknown_category_skips_livelihood_but_still_enrolls() {
    let mock = MockResourceClient::new();
    let record = submit_complete_form(&mock, &valid_draft("7"), 77).expect("submit");
    assert!(record.livelihood.is_none());
    assert_eq!(
        mock.created_resources(),
        vec![
            "beneficiary-details",
            "farm-profiles",
            "farm-parcels/bulk",
            "rsbsa-enrollments",
        ]
    );
}

#[test]
fn farm_profile_failure_short_circuits_the_saga() {
    let mock = MockResourceClient::new().with_failure("farm-profiles", "duplicate farm profile");
    let error = submit_complete_form(&mock, &valid_draft("1"), 77).expect_err("must fail");

    match error {
        SubmitError::Remote { step, failure } => {
            assert_eq!(step, SubmitStep::FarmProfile);
            assert_eq!(failure.message, "duplicate farm profile");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // The beneficiary profile stays on the server; nothing downstream runs.
    assert_eq!(mock.calls_for("beneficiary-details"), 1);
    assert_eq!(mock.calls_for("farm-parcels/bulk"), 0);
    assert_eq!(mock.calls_for("farmer-details"), 0);
    assert_eq!(mock.calls_for("rsbsa-enrollments"), 0);
}

#[test]
fn invalid_draft_makes_no_remote_calls() {
    let mock = MockResourceClient::new();
    let mut draft = valid_draft("1");
    draft.beneficiary.contact_number = String::new();
    let error = submit_complete_form(&mock, &draft, 77).expect_err("must fail");
    match error {
        SubmitError::Validation { fields } => {
            assert!(fields.contains_key("beneficiary.contact_number"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn empty_parcel_list_blocks_submission() {
    let mock = MockResourceClient::new();
    let mut draft = valid_draft("1");
    draft.parcels.clear();
    let error = submit_complete_form(&mock, &draft, 77).expect_err("must fail");
    match error {
        SubmitError::Validation { fields } => {
            let messages = fields.get("farm_parcels").expect("parcel-count error");
            assert_eq!(messages, &vec!["at least one farm parcel is required".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn draft_save_touches_only_the_beneficiary_resource() {
    let mock = MockResourceClient::new();
    let mut draft = EnrollmentDraft::default();
    draft.beneficiary.first_name = "Maria".to_string();
    draft.beneficiary.last_name = "Santos".to_string();

    let record = save_draft(&mock, &draft, 42).expect("save draft");
    assert_eq!(record["completion_status"], serde_json::json!("pending"));
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.calls_for("beneficiary-details"), 1);
}

#[test]
fn draft_save_requires_both_name_fields() {
    let mock = MockResourceClient::new();
    let mut draft = EnrollmentDraft::default();
    draft.beneficiary.first_name = "Maria".to_string();
    let error = save_draft(&mock, &draft, 42).expect_err("must fail");
    match error {
        SubmitError::Validation { fields } => {
            assert!(fields.contains_key("beneficiary.last_name"));
            assert!(!fields.contains_key("beneficiary.first_name"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn remote_failure_details_pass_through_unchanged() {
    let mock = MockResourceClient::new();
    mock.queue_failure(
        "rsbsa-enrollments",
        ApiFailure::new("cycle closed").with_details(serde_json::json!({"code": "E_CYCLE"})),
    );
    let error = submit_complete_form(&mock, &valid_draft("3"), 77).expect_err("must fail");
    match error {
        SubmitError::Remote { step, failure } => {
            assert_eq!(step, SubmitStep::Enrollment);
            assert_eq!(failure.details, Some(serde_json::json!({"code": "E_CYCLE"})));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Category 3 still produced its farmworker record before the failure.
    assert_eq!(mock.calls_for("farmworker-details"), 1);
}
