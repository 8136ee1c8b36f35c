//! Entity types for the beneficiary registry.
//!
//! Form-sourced scalar fields are held as raw strings (what a form input
//! produces) and are shaped by the rule engine, not by parsing at entry time.
//! Closed vocabularies are snake_case enums with stable string identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Personal, location, and contact attributes of a registrant.
///
/// Exactly one profile exists per user server-side. Which fields are required
/// depends on the schema applied: registration-time, full enrollment, or the
/// loose draft-save presence check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryProfile {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub extension_name: String,
    pub sex: String,
    pub birth_date: String,
    pub civil_status: String,
    pub education: String,
    pub contact_number: String,
    pub email_address: String,
    pub government_id_type: String,
    pub government_id_number: String,
    pub household_head: bool,
    pub household_head_name: String,
    pub barangay: String,
    pub municipality: String,
    pub province: String,
    pub region: String,
}

/// Farm-level profile; one per beneficiary profile.
///
/// The livelihood category id selects which detail variant is created during
/// submission. It is kept as the raw select-input value and validated as a
/// positive integer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmProfile {
    pub livelihood_category_id: String,
}

/// A single farm parcel. `key` is a client-local identifier used only for
/// list identity before the parcel is persisted; the server assigns the real
/// id and the `farm_profile_id` foreign key is stamped in during submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmParcel {
    pub key: u64,
    pub parcel_number: String,
    pub barangay: String,
    pub tenure_type: String,
    pub farm_type: String,
    pub farm_area: String,
    pub ancestral_domain: bool,
    pub agrarian_reform_beneficiary: bool,
    pub organic_practitioner: bool,
    pub remarks: String,
}

impl FarmParcel {
    /// Create an empty parcel with the given client-local key.
    pub fn with_key(key: u64) -> Self {
        Self {
            key,
            ..Self::default()
        }
    }
}

/// Activity flags for category 1 (farmer).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmerDetails {
    pub rice: bool,
    pub corn: bool,
    pub other_crops: bool,
    pub other_crops_description: String,
    pub livestock: bool,
    pub livestock_description: String,
    pub poultry: bool,
    pub poultry_description: String,
}

/// Activity flags for category 2 (fisherfolk).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FisherfolkDetails {
    pub fish_capture: bool,
    pub aquaculture: bool,
    pub gleaning: bool,
    pub fish_vending: bool,
    pub fish_processing: bool,
    pub other_activity_description: String,
}

/// Activity flags for category 3 (farmworker).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FarmworkerDetails {
    pub land_preparation: bool,
    pub planting: bool,
    pub cultivation: bool,
    pub harvesting: bool,
    pub other_work_description: String,
}

/// Involvement flags for category 4 (agri-youth).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgriYouthDetails {
    pub part_of_farming_household: bool,
    pub attended_formal_agri_fishery_course: bool,
    pub participated_in_agri_youth_program: bool,
    pub other_involvement_description: String,
}

/// Server-side enrollment application status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStatus {
    Pending,
    Verifying,
    Verified,
    Rejected,
}

impl EnrollmentStatus {
    /// Return the stable string identifier used in API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "pending",
            EnrollmentStatus::Verifying => "verifying",
            EnrollmentStatus::Verified => "verified",
            EnrollmentStatus::Rejected => "rejected",
        }
    }

    /// Return the citizen-facing label (the registry displays synonyms for
    /// the first two states).
    pub fn label(&self) -> &'static str {
        match self {
            EnrollmentStatus::Pending => "submitted",
            EnrollmentStatus::Verifying => "under review",
            EnrollmentStatus::Verified => "verified",
            EnrollmentStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Land tenure vocabulary for a farm parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenureType {
    RegisteredOwner,
    Tenant,
    Lessee,
}

impl TenureType {
    /// Return the stable string identifier used in API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            TenureType::RegisteredOwner => "registered_owner",
            TenureType::Tenant => "tenant",
            TenureType::Lessee => "lessee",
        }
    }

    /// Parse a stable identifier back into the vocabulary.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "registered_owner" => Some(TenureType::RegisteredOwner),
            "tenant" => Some(TenureType::Tenant),
            "lessee" => Some(TenureType::Lessee),
            _ => None,
        }
    }
}

impl fmt::Display for TenureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Irrigation vocabulary for a farm parcel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FarmType {
    Irrigated,
    RainfedUpland,
    RainfedLowland,
}

impl FarmType {
    /// Return the stable string identifier used in API payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            FarmType::Irrigated => "irrigated",
            FarmType::RainfedUpland => "rainfed_upland",
            FarmType::RainfedLowland => "rainfed_lowland",
        }
    }

    /// Parse a stable identifier back into the vocabulary.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "irrigated" => Some(FarmType::Irrigated),
            "rainfed_upland" => Some(FarmType::RainfedUpland),
            "rainfed_lowland" => Some(FarmType::RainfedLowland),
            _ => None,
        }
    }
}

impl fmt::Display for FarmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Livelihood category selecting the detail variant created at submission.
///
/// Ids outside the known set are accepted by validation (positive integer
/// only) and simply produce no detail record downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LivelihoodCategory {
    Farmer,
    Fisherfolk,
    Farmworker,
    AgriYouth,
}

impl LivelihoodCategory {
    /// Map a category id to the vocabulary; unknown ids map to nothing.
    pub fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(LivelihoodCategory::Farmer),
            2 => Some(LivelihoodCategory::Fisherfolk),
            3 => Some(LivelihoodCategory::Farmworker),
            4 => Some(LivelihoodCategory::AgriYouth),
            _ => None,
        }
    }

    /// Return the category id used by the registry.
    pub fn id(&self) -> i64 {
        match self {
            LivelihoodCategory::Farmer => 1,
            LivelihoodCategory::Fisherfolk => 2,
            LivelihoodCategory::Farmworker => 3,
            LivelihoodCategory::AgriYouth => 4,
        }
    }

    /// Return the stable string identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            LivelihoodCategory::Farmer => "farmer",
            LivelihoodCategory::Fisherfolk => "fisherfolk",
            LivelihoodCategory::Farmworker => "farmworker",
            LivelihoodCategory::AgriYouth => "agri_youth",
        }
    }
}

impl fmt::Display for LivelihoodCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenure_type_round_trips_identifiers() {
        for tenure in [
            TenureType::RegisteredOwner,
            TenureType::Tenant,
            TenureType::Lessee,
        ] {
            assert_eq!(TenureType::parse(tenure.as_str()), Some(tenure));
        }
        assert_eq!(TenureType::parse("owner"), None);
    }

    #[test]
    fn livelihood_category_maps_known_ids_only() {
        assert_eq!(
            LivelihoodCategory::from_id(1),
            Some(LivelihoodCategory::Farmer)
        );
        assert_eq!(
            LivelihoodCategory::from_id(4),
            Some(LivelihoodCategory::AgriYouth)
        );
        assert_eq!(LivelihoodCategory::from_id(0), None);
        assert_eq!(LivelihoodCategory::from_id(9), None);
    }

    #[test]
    fn enrollment_status_exposes_citizen_labels() {
        assert_eq!(EnrollmentStatus::Pending.label(), "submitted");
        assert_eq!(EnrollmentStatus::Verifying.label(), "under review");
        assert_eq!(EnrollmentStatus::Pending.as_str(), "pending");
    }
}
