//! Submission orchestration for a completed draft.
//!
//! The remote API has no multi-resource transactions, so submission is a
//! saga: an ordered list of dependent creates, each needing the identifier
//! assigned by the previous one, short-circuiting on the first failure. There
//! is no compensation: records created before a failure stay on the server.

mod orchestrator;

pub use orchestrator::{
    describe_validation_errors, enrollment_status_label, save_draft, submit_complete_form,
    SubmissionRecord,
};

use crate::client::ApiFailure;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The ordered steps of the submission saga.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitStep {
    BeneficiaryProfile,
    FarmProfile,
    FarmParcels,
    LivelihoodDetail,
    Enrollment,
}

impl SubmitStep {
    /// Return the stable string identifier used in reports and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmitStep::BeneficiaryProfile => "beneficiary_profile",
            SubmitStep::FarmProfile => "farm_profile",
            SubmitStep::FarmParcels => "farm_parcels",
            SubmitStep::LivelihoodDetail => "livelihood_detail",
            SubmitStep::Enrollment => "enrollment",
        }
    }
}

impl fmt::Display for SubmitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a submission attempt stopped.
///
/// Validation failures never reach the network; remote failures name the
/// step that failed and carry the normalized API error unchanged.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("draft failed validation")]
    Validation {
        fields: BTreeMap<String, Vec<String>>,
    },
    #[error("{step} step failed: {failure}")]
    Remote { step: SubmitStep, failure: ApiFailure },
}
