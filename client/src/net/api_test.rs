use super::*;

#[test]
fn totals_endpoint_formats_expected_path() {
    assert_eq!(totals_endpoint(42), format!("{API_BASE_URL}/businesses/42/totals"));
}

#[test]
fn debt_consent_endpoint_formats_expected_path() {
    assert_eq!(debt_consent_endpoint(7), format!("{API_BASE_URL}/debts/7/consent"));
}

#[test]
fn bearer_formats_authorization_value() {
    assert_eq!(bearer("abc"), "Bearer abc");
}

#[test]
fn decode_body_returns_data_on_success() {
    let body = r#"{"data":{"overdue_customers":3,"overdue_amount":10.5},"message":"ok","success":true}"#;
    let totals: DashboardTotals = decode_body(200, body).unwrap();
    assert_eq!(totals.overdue_customers, 3);
    assert!(totals.paid_amount.abs() < f64::EPSILON);
}

#[test]
fn decode_body_maps_success_false_to_server_error() {
    let body = r#"{"data":null,"message":"Invalid credentials","success":false}"#;
    let err = decode_body::<User>(200, body).unwrap_err();
    assert_eq!(err, ApiError::Server { status: 200, message: "Invalid credentials".to_owned() });
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[test]
fn decode_body_keeps_status_from_error_envelope() {
    let body = r#"{"data":null,"message":"Session expired","success":false}"#;
    let err = decode_body::<User>(401, body).unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.is_unauthorized());
}

#[test]
fn decode_body_non_envelope_error_uses_status_message() {
    let err = decode_body::<User>(502, "<html>Bad Gateway</html>").unwrap_err();
    assert_eq!(err, ApiError::Server { status: 502, message: "request failed with status 502".to_owned() });
}

#[test]
fn decode_body_empty_message_falls_back_to_status_message() {
    let err = decode_body::<User>(500, r#"{"data":null,"success":false}"#).unwrap_err();
    assert_eq!(err.user_message(), "request failed with status 500");
}

#[test]
fn decode_body_garbage_on_success_is_decode_error() {
    assert!(matches!(decode_body::<User>(200, "nope"), Err(ApiError::Decode(_))));
}

#[test]
fn decode_body_missing_data_is_decode_error() {
    let err = decode_body::<User>(200, r#"{"data":null,"message":"","success":true}"#).unwrap_err();
    assert_eq!(err, ApiError::Decode("missing data".to_owned()));
}

#[test]
fn decode_ack_ignores_data() {
    assert!(decode_ack(200, r#"{"data":null,"message":"done","success":true}"#).is_ok());
    assert!(decode_ack(409, r#"{"data":null,"message":"already decided","success":false}"#).is_err());
}

#[test]
fn transport_error_user_message_includes_cause() {
    assert_eq!(ApiError::Transport("offline".to_owned()).user_message(), "request failed: offline");
    assert_eq!(ApiError::Transport("offline".to_owned()).status(), None);
}
