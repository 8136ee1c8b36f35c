//! Form state manager: mutation, validation gating, and persistence.
//!
//! All mutation of the draft goes through the manager so the durable store
//! stays in sync. Navigation never validates; validation is an explicit call
//! whose result gates submission in the caller.

use super::{DraftStore, EnrollmentDraft, Section, TOTAL_STEPS};
use crate::rules::{self, FieldErrors};
use crate::schema::{
    AgriYouthDetails, BeneficiaryProfile, FarmParcel, FarmProfile, FarmerDetails,
    FarmworkerDetails, FisherfolkDetails,
};
use anyhow::{anyhow, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Default persistence coalescing window. Mutations inside the window mark
/// the draft dirty without hitting the store; `flush` always writes. Zero
/// restores write-on-every-change.
pub const DEFAULT_PERSIST_INTERVAL: Duration = Duration::from_millis(750);

/// Message for the top-level parcel-count check.
const PARCELS_REQUIRED: &str = "at least one farm parcel is required";

/// Owner of the in-progress draft and its error map.
pub struct FormManager {
    draft: EnrollmentDraft,
    errors: BTreeMap<String, Vec<String>>,
    store: Box<dyn DraftStore>,
    persist_interval: Duration,
    last_persist: Option<Instant>,
    dirty: bool,
}

impl FormManager {
    /// Open a manager over the store, resuming a persisted draft if present.
    pub fn open(store: Box<dyn DraftStore>) -> Result<Self> {
        Self::open_with_interval(store, DEFAULT_PERSIST_INTERVAL)
    }

    /// Open with an explicit coalescing window.
    pub fn open_with_interval(store: Box<dyn DraftStore>, interval: Duration) -> Result<Self> {
        let draft = store.load()?.unwrap_or_default();
        Ok(Self {
            draft,
            errors: BTreeMap::new(),
            store,
            persist_interval: interval,
            last_persist: None,
            dirty: false,
        })
    }

    /// The current draft.
    pub fn draft(&self) -> &EnrollmentDraft {
        &self.draft
    }

    /// The error map from the last `validate_form` call, minus any keys
    /// cleared by subsequent edits.
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Replace one field in one entity section.
    ///
    /// Clears any recorded error for that exact `section.field` key and
    /// schedules a persistence write.
    pub fn update_field(&mut self, section: Section, field: &str, raw: &str) -> Result<()> {
        match section {
            Section::Beneficiary => set_beneficiary_field(&mut self.draft.beneficiary, field, raw)?,
            Section::FarmProfile => set_farm_profile_field(&mut self.draft.farm_profile, field, raw)?,
            Section::Farmer => set_farmer_field(&mut self.draft.farmer, field, raw)?,
            Section::Fisherfolk => set_fisherfolk_field(&mut self.draft.fisherfolk, field, raw)?,
            Section::Farmworker => set_farmworker_field(&mut self.draft.farmworker, field, raw)?,
            Section::AgriYouth => set_agri_youth_field(&mut self.draft.agri_youth, field, raw)?,
        }
        self.errors.remove(&format!("{section}.{field}"));
        self.touch()
    }

    /// Append a new empty parcel and return its client-local key.
    pub fn add_parcel(&mut self) -> Result<u64> {
        let key = self.draft.push_parcel();
        self.errors.remove("farm_parcels");
        self.touch()?;
        Ok(key)
    }

    /// Replace one field of the parcel at `index`.
    pub fn update_parcel(&mut self, index: usize, field: &str, raw: &str) -> Result<()> {
        let parcel = self
            .draft
            .parcels
            .get_mut(index)
            .ok_or_else(|| anyhow!("no farm parcel at index {index}"))?;
        set_parcel_field(parcel, field, raw)?;
        self.errors.remove(&format!("parcels[{index}].{field}"));
        self.touch()
    }

    /// Remove the parcel at `index`. Removal down to zero parcels is legal;
    /// validation, not removal, blocks empty-parcel submission.
    pub fn remove_parcel(&mut self, index: usize) -> Result<()> {
        if index >= self.draft.parcels.len() {
            return Err(anyhow!("no farm parcel at index {index}"));
        }
        self.draft.parcels.remove(index);
        self.touch()
    }

    /// Run the full-form rule set and store the resulting error map.
    /// Returns whether the draft is currently valid.
    pub fn validate_form(&mut self) -> bool {
        let result = validate_draft(&self.draft);
        self.errors = result.errors;
        self.errors.is_empty()
    }

    /// Advance the wizard cursor.
    pub fn next_step(&mut self) -> Result<u32> {
        let step = (self.draft.current_step + 1).min(TOTAL_STEPS);
        self.goto_step(step)
    }

    /// Move the wizard cursor back.
    pub fn prev_step(&mut self) -> Result<u32> {
        let step = self.draft.current_step.saturating_sub(1).max(1);
        self.goto_step(step)
    }

    /// Jump the wizard cursor, clamped to `[1, TOTAL_STEPS]`.
    pub fn goto_step(&mut self, step: u32) -> Result<u32> {
        self.draft.current_step = step.clamp(1, TOTAL_STEPS);
        self.touch()?;
        Ok(self.draft.current_step)
    }

    /// Coarse completion percentage for display.
    pub fn progress(&self) -> u8 {
        super::form_progress(&self.draft)
    }

    /// Restore all entities to their defaults and clear the durable store.
    pub fn reset(&mut self) -> Result<()> {
        self.draft = EnrollmentDraft::default();
        self.errors.clear();
        self.store.clear()?;
        self.last_persist = None;
        self.dirty = false;
        Ok(())
    }

    /// Force any pending persistence write.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty {
            self.persist()?;
        }
        Ok(())
    }

    fn touch(&mut self) -> Result<()> {
        self.dirty = true;
        let due = self
            .last_persist
            .is_none_or(|at| at.elapsed() >= self.persist_interval);
        if due {
            self.persist()?;
        }
        Ok(())
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.draft)?;
        self.dirty = false;
        self.last_persist = Some(Instant::now());
        Ok(())
    }
}

/// Full-form validation over every entity in the draft, including the
/// top-level parcel-count check. Shared with the submission orchestrator.
pub(crate) fn validate_draft(draft: &EnrollmentDraft) -> FieldErrors {
    let mut all = FieldErrors::default();
    all.merge_prefixed(
        Section::Beneficiary.as_str(),
        rules::validate_object(&to_json(&draft.beneficiary), rules::ENROLLMENT_BENEFICIARY),
    );
    all.merge_prefixed(
        Section::FarmProfile.as_str(),
        rules::validate_object(&to_json(&draft.farm_profile), rules::FARM_PROFILE),
    );
    if draft.parcels.is_empty() {
        all.errors
            .insert("farm_parcels".to_string(), vec![PARCELS_REQUIRED.to_string()]);
    }
    for (index, parcel) in draft.parcels.iter().enumerate() {
        all.merge_prefixed(
            &format!("parcels[{index}]"),
            rules::validate_object(&to_json(parcel), rules::FARM_PARCEL),
        );
    }
    all
}

/// Serialize an entity for rule application. These types always serialize;
/// a null fallback would simply trip every required rule.
fn to_json<T: serde::Serialize>(entity: &T) -> Value {
    serde_json::to_value(entity).unwrap_or(Value::Null)
}

fn parse_flag(field: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("{field} expects true or false (got {other:?})")),
    }
}

fn set_beneficiary_field(profile: &mut BeneficiaryProfile, field: &str, raw: &str) -> Result<()> {
    match field {
        "first_name" => profile.first_name = raw.to_string(),
        "middle_name" => profile.middle_name = raw.to_string(),
        "last_name" => profile.last_name = raw.to_string(),
        "extension_name" => profile.extension_name = raw.to_string(),
        "sex" => profile.sex = raw.to_string(),
        "birth_date" => profile.birth_date = raw.to_string(),
        "civil_status" => profile.civil_status = raw.to_string(),
        "education" => profile.education = raw.to_string(),
        "contact_number" => profile.contact_number = raw.to_string(),
        "email_address" => profile.email_address = raw.to_string(),
        "government_id_type" => profile.government_id_type = raw.to_string(),
        "government_id_number" => profile.government_id_number = raw.to_string(),
        "household_head" => profile.household_head = parse_flag(field, raw)?,
        "household_head_name" => profile.household_head_name = raw.to_string(),
        "barangay" => profile.barangay = raw.to_string(),
        "municipality" => profile.municipality = raw.to_string(),
        "province" => profile.province = raw.to_string(),
        "region" => profile.region = raw.to_string(),
        _ => return Err(anyhow!("unknown beneficiary field: {field}")),
    }
    Ok(())
}

fn set_farm_profile_field(profile: &mut FarmProfile, field: &str, raw: &str) -> Result<()> {
    match field {
        "livelihood_category_id" => profile.livelihood_category_id = raw.to_string(),
        _ => return Err(anyhow!("unknown farm profile field: {field}")),
    }
    Ok(())
}

fn set_parcel_field(parcel: &mut FarmParcel, field: &str, raw: &str) -> Result<()> {
    match field {
        "parcel_number" => parcel.parcel_number = raw.to_string(),
        "barangay" => parcel.barangay = raw.to_string(),
        "tenure_type" => parcel.tenure_type = raw.to_string(),
        "farm_type" => parcel.farm_type = raw.to_string(),
        "farm_area" => parcel.farm_area = raw.to_string(),
        "ancestral_domain" => parcel.ancestral_domain = parse_flag(field, raw)?,
        "agrarian_reform_beneficiary" => {
            parcel.agrarian_reform_beneficiary = parse_flag(field, raw)?
        }
        "organic_practitioner" => parcel.organic_practitioner = parse_flag(field, raw)?,
        "remarks" => parcel.remarks = raw.to_string(),
        _ => return Err(anyhow!("unknown farm parcel field: {field}")),
    }
    Ok(())
}

fn set_farmer_field(details: &mut FarmerDetails, field: &str, raw: &str) -> Result<()> {
    match field {
        "rice" => details.rice = parse_flag(field, raw)?,
        "corn" => details.corn = parse_flag(field, raw)?,
        "other_crops" => details.other_crops = parse_flag(field, raw)?,
        "other_crops_description" => details.other_crops_description = raw.to_string(),
        "livestock" => details.livestock = parse_flag(field, raw)?,
        "livestock_description" => details.livestock_description = raw.to_string(),
        "poultry" => details.poultry = parse_flag(field, raw)?,
        "poultry_description" => details.poultry_description = raw.to_string(),
        _ => return Err(anyhow!("unknown farmer field: {field}")),
    }
    Ok(())
}

fn set_fisherfolk_field(details: &mut FisherfolkDetails, field: &str, raw: &str) -> Result<()> {
    match field {
        "fish_capture" => details.fish_capture = parse_flag(field, raw)?,
        "aquaculture" => details.aquaculture = parse_flag(field, raw)?,
        "gleaning" => details.gleaning = parse_flag(field, raw)?,
        "fish_vending" => details.fish_vending = parse_flag(field, raw)?,
        "fish_processing" => details.fish_processing = parse_flag(field, raw)?,
        "other_activity_description" => details.other_activity_description = raw.to_string(),
        _ => return Err(anyhow!("unknown fisherfolk field: {field}")),
    }
    Ok(())
}

fn set_farmworker_field(details: &mut FarmworkerDetails, field: &str, raw: &str) -> Result<()> {
    match field {
        "land_preparation" => details.land_preparation = parse_flag(field, raw)?,
        "planting" => details.planting = parse_flag(field, raw)?,
        "cultivation" => details.cultivation = parse_flag(field, raw)?,
        "harvesting" => details.harvesting = parse_flag(field, raw)?,
        "other_work_description" => details.other_work_description = raw.to_string(),
        _ => return Err(anyhow!("unknown farmworker field: {field}")),
    }
    Ok(())
}

fn set_agri_youth_field(details: &mut AgriYouthDetails, field: &str, raw: &str) -> Result<()> {
    match field {
        "part_of_farming_household" => {
            details.part_of_farming_household = parse_flag(field, raw)?
        }
        "attended_formal_agri_fishery_course" => {
            details.attended_formal_agri_fishery_course = parse_flag(field, raw)?
        }
        "participated_in_agri_youth_program" => {
            details.participated_in_agri_youth_program = parse_flag(field, raw)?
        }
        "other_involvement_description" => {
            details.other_involvement_description = raw.to_string()
        }
        _ => return Err(anyhow!("unknown agri-youth field: {field}")),
    }
    Ok(())
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
