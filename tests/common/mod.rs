//! Shared fixture drafts for integration tests.
#![allow(dead_code)] // each test crate uses a subset of these helpers

use agrireg::draft::{EnrollmentDraft, FormManager, MemoryStore, Section};
use std::time::Duration;

/// Open a manager over a shared in-memory store with eager persistence.
pub fn manager_over(store: MemoryStore) -> FormManager {
    FormManager::open_with_interval(Box::new(store), Duration::ZERO).expect("open manager")
}

/// Drive a manager through the wizard the way the CLI would, producing a
/// draft that passes full-form validation with the given category.
pub fn fill_complete_draft(manager: &mut FormManager, category_id: &str) {
    let beneficiary_fields = [
        ("first_name", "Juan"),
        ("middle_name", "Santos"),
        ("last_name", "dela Cruz"),
        ("birth_date", "1990-05-14"),
        ("civil_status", "married"),
        ("contact_number", "09171234567"),
        ("email_address", "juan@example.com"),
        ("barangay", "Poblacion"),
        ("municipality", "Tupi"),
        ("province", "South Cotabato"),
        ("region", "XII"),
    ];
    for (field, value) in beneficiary_fields {
        manager
            .update_field(Section::Beneficiary, field, value)
            .expect("set beneficiary field");
    }
    manager
        .update_field(Section::FarmProfile, "livelihood_category_id", category_id)
        .expect("set category");
    manager.add_parcel().expect("add parcel");
    for (field, value) in [
        ("parcel_number", "P-001"),
        ("barangay", "Kablon"),
        ("tenure_type", "registered_owner"),
        ("farm_type", "irrigated"),
        ("farm_area", "2.25"),
        ("organic_practitioner", "true"),
    ] {
        manager
            .update_parcel(0, field, value)
            .expect("set parcel field");
    }
}

/// A complete standalone draft for orchestrator-only tests.
pub fn complete_draft(category_id: &str) -> EnrollmentDraft {
    let store = MemoryStore::new();
    let mut manager = manager_over(store);
    fill_complete_draft(&mut manager, category_id);
    manager.draft().clone()
}
