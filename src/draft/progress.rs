//! Coarse completion percentage for the wizard header.

use super::EnrollmentDraft;

/// Percentage of a fixed set of important fields that are filled in.
///
/// This is a UX signal only; `FormManager::validate_form` is the correctness
/// gate.
pub fn form_progress(draft: &EnrollmentDraft) -> u8 {
    let beneficiary = &draft.beneficiary;
    let important = [
        beneficiary.first_name.as_str(),
        beneficiary.last_name.as_str(),
        beneficiary.birth_date.as_str(),
        beneficiary.civil_status.as_str(),
        beneficiary.contact_number.as_str(),
        beneficiary.barangay.as_str(),
        beneficiary.municipality.as_str(),
        beneficiary.province.as_str(),
        beneficiary.region.as_str(),
        draft.farm_profile.livelihood_category_id.as_str(),
    ];
    let mut filled = important
        .iter()
        .filter(|value| !value.trim().is_empty())
        .count();
    // One slot for having at least one substantially filled parcel.
    let total = important.len() + 1;
    if draft.parcels.iter().any(parcel_filled) {
        filled += 1;
    }
    ((filled * 100) / total) as u8
}

fn parcel_filled(parcel: &crate::schema::FarmParcel) -> bool {
    !parcel.barangay.trim().is_empty()
        && !parcel.tenure_type.trim().is_empty()
        && !parcel.farm_area.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_reports_zero() {
        assert_eq!(form_progress(&EnrollmentDraft::default()), 0);
    }

    #[test]
    fn progress_grows_with_important_fields() {
        let mut draft = EnrollmentDraft::default();
        draft.beneficiary.first_name = "Juan".to_string();
        let partial = form_progress(&draft);
        assert!(partial > 0 && partial < 100);

        draft.beneficiary.last_name = "dela Cruz".to_string();
        assert!(form_progress(&draft) > partial);
    }

    #[test]
    fn full_draft_reports_one_hundred() {
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
        draft.farm_profile.livelihood_category_id = "1".to_string();
        draft.push_parcel();
        let parcel = draft.parcels.last_mut().expect("parcel");
        parcel.barangay = "Poblacion".to_string();
        parcel.tenure_type = "tenant".to_string();
        parcel.farm_area = "1.5".to_string();
        assert_eq!(form_progress(&draft), 100);
    }
}
