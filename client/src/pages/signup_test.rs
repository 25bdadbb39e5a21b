use std::sync::Arc;

use super::*;
use crate::util::storage::MemoryStorage;

// =============================================================
// Step sequencing
// =============================================================

#[test]
fn from_index_maps_known_steps() {
    assert_eq!(SignupStep::from_index(0), SignupStep::Identity);
    assert_eq!(SignupStep::from_index(1), SignupStep::Verification);
    assert_eq!(SignupStep::from_index(2), SignupStep::Password);
    assert_eq!(SignupStep::from_index(3), SignupStep::Payout);
}

#[test]
fn from_index_past_end_renders_last_step() {
    assert_eq!(SignupStep::from_index(99), SignupStep::Payout);
}

#[test]
fn next_step_saturates_at_last() {
    assert_eq!(next_step(0), 1);
    assert_eq!(next_step(SignupStep::LAST), SignupStep::LAST);
    assert_eq!(next_step(u32::MAX), SignupStep::LAST);
}

#[test]
fn previous_step_saturates_at_zero() {
    assert_eq!(previous_step(2), 1);
    assert_eq!(previous_step(0), 0);
}

// =============================================================
// Step validation
// =============================================================

#[test]
fn validate_identity_step_trims_and_requires_ten_digits() {
    assert_eq!(validate_identity_step(" 1012345678 "), Ok("1012345678".to_owned()));
    assert!(validate_identity_step("12345").is_err());
}

#[test]
fn validate_password_step_requires_length_then_match() {
    assert_eq!(validate_password_step("short", "short"), Err("Password must be at least 8 characters."));
    assert_eq!(validate_password_step("longenough", "different"), Err("Passwords do not match."));
    assert_eq!(validate_password_step("longenough", "longenough"), Ok(()));
}

#[test]
fn normalize_iban_strips_spaces_and_uppercases() {
    assert_eq!(normalize_iban("sa03 8000 0000 6080 1016 7519"), "SA0380000000608010167519");
}

#[test]
fn validate_iban_accepts_saudi_iban() {
    assert_eq!(validate_iban("SA03 8000 0000 6080 1016 7519"), Ok("SA0380000000608010167519".to_owned()));
}

#[test]
fn validate_iban_rejects_foreign_or_short() {
    assert!(validate_iban("GB29NWBK60161331926819").is_err());
    assert!(validate_iban("SA03 8000").is_err());
}

#[test]
fn parse_store_ids_drops_empties() {
    assert_eq!(parse_store_ids(" s1, ,s2 ,"), vec!["s1".to_owned(), "s2".to_owned()]);
    assert!(parse_store_ids("").is_empty());
}

#[test]
fn verification_popup_url_encodes_national_id() {
    assert_eq!(
        verification_popup_url("1012345678"),
        format!("{API_BASE_URL}/auth/nafath/start?national_id=1012345678")
    );
}

// =============================================================
// Popup launch
// =============================================================

#[test]
fn popup_opened_only_with_a_window() {
    assert!(popup_opened::<(), ()>(&Ok(Some(()))));
    assert!(!popup_opened::<(), ()>(&Ok(None)));
    assert!(!popup_opened::<(), ()>(&Err(())));
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn verification_popup_without_browser_reports_not_opened() {
    assert!(!open_verification_popup("1012345678"));
}

// =============================================================
// Input seeding after reload
// =============================================================

#[test]
fn form_inputs_join_store_ids() {
    let form = SignupFormData {
        national_id: Some("1012345678".to_owned()),
        stores: Some(vec!["s1".to_owned(), "s2".to_owned()]),
        iban: Some("SA0380000000608010167519".to_owned()),
        ..SignupFormData::default()
    };
    assert_eq!(
        FormInputs::from_form(&form),
        FormInputs {
            national_id: "1012345678".to_owned(),
            stores: "s1, s2".to_owned(),
            iban: "SA0380000000608010167519".to_owned(),
        }
    );
    assert_eq!(FormInputs::from_form(&SignupFormData::default()), FormInputs::default());
}

#[test]
fn inputs_wait_for_persisted_flow_then_keep_store_list() {
    let storage = MemoryStorage::new();
    let mut earlier = SignupFlowStore::load(Arc::new(storage.clone()));
    earlier.set_active_step(SignupStep::Payout as u32);
    earlier.update_form_data(SignupFormData { stores: Some(vec!["s1".to_owned()]), ..SignupFormData::default() });

    let mut flow = SignupFlowStore::pending(Arc::new(storage.clone()));
    assert_eq!(restored_inputs(&flow), None);

    flow.restore();
    let inputs = restored_inputs(&flow).unwrap();
    assert_eq!(inputs.stores, "s1");

    // Resubmitting the seeded text leaves the persisted list intact.
    flow.update_form_data(SignupFormData { stores: Some(parse_store_ids(&inputs.stores)), ..SignupFormData::default() });
    let reloaded = SignupFlowStore::load(Arc::new(storage));
    assert_eq!(reloaded.form_data().stores, Some(vec!["s1".to_owned()]));
}
