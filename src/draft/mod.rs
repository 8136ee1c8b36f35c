//! Draft state for the multi-step enrollment form.
//!
//! The draft is one nested aggregate: beneficiary profile, farm profile, a
//! variable-length parcel list, and all four livelihood-detail placeholders.
//! It is persisted as a single JSON document so a restart never loses work.

mod manager;
mod progress;
mod store;

pub use manager::{FormManager, DEFAULT_PERSIST_INTERVAL};
pub(crate) use manager::validate_draft;
pub use progress::form_progress;
pub use store::{default_draft_path, DraftStore, JsonFileStore, MemoryStore};

use crate::schema::{
    AgriYouthDetails, BeneficiaryProfile, FarmParcel, FarmProfile, FarmerDetails,
    FarmworkerDetails, FisherfolkDetails,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current schema version for persisted drafts.
pub const DRAFT_SCHEMA_VERSION: u32 = 1;

/// Number of wizard steps.
pub const TOTAL_STEPS: u32 = 6;

/// Wizard step titles, indexed by `step - 1`.
pub const STEP_TITLES: [&str; TOTAL_STEPS as usize] = [
    "Personal Information",
    "Address & Contact",
    "Farm Profile",
    "Farm Parcels",
    "Livelihood Details",
    "Review & Submit",
];

/// The complete, locally-held, not-yet-submitted form state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentDraft {
    pub schema_version: u32,
    pub current_step: u32,
    pub next_parcel_key: u64,
    pub beneficiary: BeneficiaryProfile,
    pub farm_profile: FarmProfile,
    pub parcels: Vec<FarmParcel>,
    pub farmer: FarmerDetails,
    pub fisherfolk: FisherfolkDetails,
    pub farmworker: FarmworkerDetails,
    pub agri_youth: AgriYouthDetails,
}

impl Default for EnrollmentDraft {
    fn default() -> Self {
        Self {
            schema_version: DRAFT_SCHEMA_VERSION,
            current_step: 1,
            next_parcel_key: 1,
            beneficiary: BeneficiaryProfile::default(),
            farm_profile: FarmProfile::default(),
            parcels: Vec::new(),
            farmer: FarmerDetails::default(),
            fisherfolk: FisherfolkDetails::default(),
            farmworker: FarmworkerDetails::default(),
            agri_youth: AgriYouthDetails::default(),
        }
    }
}

impl EnrollmentDraft {
    /// Append an empty parcel and return its client-local key.
    pub fn push_parcel(&mut self) -> u64 {
        let key = self.next_parcel_key;
        self.next_parcel_key += 1;
        self.parcels.push(FarmParcel::with_key(key));
        key
    }
}

/// Entity sections addressable by the field mutators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Beneficiary,
    FarmProfile,
    Farmer,
    Fisherfolk,
    Farmworker,
    AgriYouth,
}

impl Section {
    /// Return the stable identifier used in error keys and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Beneficiary => "beneficiary",
            Section::FarmProfile => "farm_profile",
            Section::Farmer => "farmer",
            Section::Fisherfolk => "fisherfolk",
            Section::Farmworker => "farmworker",
            Section::AgriYouth => "agri_youth",
        }
    }

    /// Parse a stable identifier back into the vocabulary.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "beneficiary" => Some(Section::Beneficiary),
            "farm_profile" => Some(Section::FarmProfile),
            "farmer" => Some(Section::Farmer),
            "fisherfolk" => Some(Section::Fisherfolk),
            "farmworker" => Some(Section::Farmworker),
            "agri_youth" => Some(Section::AgriYouth),
            _ => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
