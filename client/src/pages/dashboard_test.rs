use super::*;
use crate::net::types::PayoutMethod;

fn business(id: i64) -> Business {
    Business {
        id,
        cr_number: id.to_string(),
        name_ar: String::new(),
        name_en: format!("Store {id}"),
        activity: String::new(),
        city: String::new(),
        payout_method: PayoutMethod::Monthly,
        status: None,
        overdue_customers: None,
        overdue_amount: None,
        outstanding_amount: None,
        paid_amount: None,
    }
}

fn user_with(businesses: Vec<Business>) -> User {
    User {
        id: 1,
        national_id: None,
        iqama_id: None,
        cr_number: None,
        access_token: "abc".to_owned(),
        full_name_ar: String::new(),
        full_name_en: "Sara".to_owned(),
        nationality: None,
        date_of_birth: None,
        businesses,
        actor_type: ActorKind::Merchant,
    }
}

fn notification(id: i64, read: bool) -> Notification {
    Notification {
        id,
        title: "t".to_owned(),
        body: String::new(),
        created_at: "2024-01-01T00:00:00Z".to_owned(),
        read,
    }
}

#[test]
fn resolve_keeps_owned_selection() {
    let user = user_with(vec![business(1), business(2)]);
    let selected = business(2);
    assert_eq!(resolve_selected_business(Some(&user), Some(&selected)).map(|b| b.id), Some(2));
}

#[test]
fn resolve_replaces_foreign_selection_with_first_owned() {
    let user = user_with(vec![business(1), business(2)]);
    let stale = business(9);
    assert_eq!(resolve_selected_business(Some(&user), Some(&stale)).map(|b| b.id), Some(1));
}

#[test]
fn resolve_without_user_is_none() {
    assert_eq!(resolve_selected_business(None, Some(&business(1))), None);
}

#[test]
fn resolve_without_businesses_is_none() {
    let user = user_with(Vec::new());
    assert_eq!(resolve_selected_business(Some(&user), None), None);
}

#[test]
fn totals_for_previous_selection_are_dropped() {
    assert!(totals_still_current(2, Some(2)));
    assert!(!totals_still_current(1, Some(2)));
    assert!(!totals_still_current(1, None));
}

#[test]
fn unread_count_ignores_read() {
    let list = vec![notification(1, false), notification(2, true), notification(3, false)];
    assert_eq!(unread_count(&list), 2);
}

#[test]
fn pending_debts_label_pluralizes() {
    assert_eq!(pending_debts_label(0), "No debts awaiting your consent.");
    assert_eq!(pending_debts_label(1), "1 debt awaiting your consent.");
    assert_eq!(pending_debts_label(4), "4 debts awaiting your consent.");
}
