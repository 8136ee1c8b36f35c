//! End-to-end submission flows against the mock resource client.

mod common;

use agrireg::client::MockResourceClient;
use agrireg::submit::{save_draft, submit_complete_form, SubmitError, SubmitStep};
use common::{complete_draft, fill_complete_draft, manager_over};
use agrireg::draft::MemoryStore;

#[test]
fn wizard_driven_draft_submits_with_five_ordered_creates() {
    let store = MemoryStore::new();
    let mut manager = manager_over(store);
    fill_complete_draft(&mut manager, "1");
    assert!(manager.validate_form(), "errors: {:?}", manager.errors());

    let mock = MockResourceClient::new();
    let record = submit_complete_form(&mock, manager.draft(), 77).expect("submit");

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
}

#[test]
fn validation_gate_blocks_submission_before_any_network_call() {
    let store = MemoryStore::new();
    let mut manager = manager_over(store);
    fill_complete_draft(&mut manager, "1");
    manager.remove_parcel(0).expect("remove parcel");
    assert!(!manager.validate_form());

    let mock = MockResourceClient::new();
    let error = submit_complete_form(&mock, manager.draft(), 77).expect_err("must fail");
    assert!(matches!(error, SubmitError::Validation { .. }));
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn parcel_bulk_failure_stops_before_livelihood_and_enrollment() {
    let mock = MockResourceClient::new().with_failure("farm-parcels/bulk", "bulk insert rejected");
    let error = submit_complete_form(&mock, &complete_draft("4"), 77).expect_err("must fail");
    match error {
        SubmitError::Remote { step, failure } => {
            assert_eq!(step, SubmitStep::FarmParcels);
            assert_eq!(failure.message, "bulk insert rejected");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(mock.calls_for("agri-youth-details"), 0);
    assert_eq!(mock.calls_for("rsbsa-enrollments"), 0);
    // The two upstream records were already created and are not compensated.
    assert_eq!(mock.calls_for("beneficiary-details"), 1);
    assert_eq!(mock.calls_for("farm-profiles"), 1);
}

#[test]
fn each_category_selects_its_own_detail_resource() {
    let cases = [
        ("1", "farmer-details"),
        ("2", "fisherfolk-details"),
        ("3", "farmworker-details"),
        ("4", "agri-youth-details"),
    ];
    for (category, resource) in cases {
        let mock = MockResourceClient::new();
        submit_complete_form(&mock, &complete_draft(category), 77).expect("submit");
        assert_eq!(mock.calls_for(resource), 1, "category {category}");
        assert_eq!(mock.call_count(), 5, "category {category}");
    }
}

#[test]
fn draft_save_path_never_touches_downstream_resources() {
    let store = MemoryStore::new();
    let mut manager = manager_over(store);
    manager
        .update_field(agrireg::draft::Section::Beneficiary, "first_name", "Maria")
        .expect("set");
    manager
        .update_field(agrireg::draft::Section::Beneficiary, "last_name", "Santos")
        .expect("set");

    let mock = MockResourceClient::new();
    let record = save_draft(&mock, manager.draft(), 42).expect("save draft");
    assert_eq!(record["completion_status"], serde_json::json!("pending"));
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.calls_for("beneficiary-details"), 1);
    assert_eq!(mock.calls_for("farm-profiles"), 0);
    assert_eq!(mock.calls_for("rsbsa-enrollments"), 0);
}
