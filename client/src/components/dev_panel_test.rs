use super::*;

#[test]
fn toggle_shortcut_requires_ctrl_and_shift() {
    assert!(is_toggle_shortcut("D", true, true));
    assert!(is_toggle_shortcut("d", true, true));
    assert!(!is_toggle_shortcut("d", true, false));
    assert!(!is_toggle_shortcut("d", false, true));
}

#[test]
fn toggle_shortcut_ignores_other_keys() {
    assert!(!is_toggle_shortcut("e", true, true));
    assert!(!is_toggle_shortcut("Shift", true, true));
}

#[test]
fn pretty_renders_state_json() {
    let out = pretty(&serde_json::json!({ "activeStep": 2 }));
    assert!(out.contains("\"activeStep\": 2"));
}
