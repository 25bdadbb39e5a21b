use super::*;
use std::cell::{Cell, RefCell};

struct FakeHost {
    search: String,
    has_opener: bool,
    posted: RefCell<Vec<(CallbackMessage, String)>>,
    closed: Cell<u32>,
}

impl FakeHost {
    fn new(search: &str, has_opener: bool) -> Self {
        Self {
            search: search.to_owned(),
            has_opener,
            posted: RefCell::new(Vec::new()),
            closed: Cell::new(0),
        }
    }
}

impl CallbackHost for FakeHost {
    fn search(&self) -> String {
        self.search.clone()
    }

    fn origin(&self) -> String {
        "https://portal.example".to_owned()
    }

    fn post_to_opener(&self, message: &CallbackMessage, target_origin: &str) -> Result<(), RelayError> {
        if !self.has_opener {
            return Err(RelayError::NoOpener);
        }
        self.posted.borrow_mut().push((message.clone(), target_origin.to_owned()));
        Ok(())
    }

    fn close(&self) {
        self.closed.set(self.closed.get() + 1);
    }
}

// =============================================================
// Query parsing
// =============================================================

#[test]
fn parse_query_extracts_pairs() {
    let pairs = parse_query("?code=123&state=abc");
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs["code"], "123");
    assert_eq!(pairs["state"], "abc");
}

#[test]
fn parse_query_decodes_percent_and_plus() {
    let pairs = parse_query("msg=hello+world&path=%2Fsignup");
    assert_eq!(pairs["msg"], "hello world");
    assert_eq!(pairs["path"], "/signup");
}

#[test]
fn parse_query_later_duplicate_wins() {
    assert_eq!(parse_query("?a=1&a=2")["a"], "2");
}

#[test]
fn parse_query_empty() {
    assert!(parse_query("").is_empty());
    assert!(parse_query("?").is_empty());
}

#[test]
fn envelope_serializes_with_type_tag() {
    let message = CallbackMessage::from_query("?code=123");
    assert_eq!(
        serde_json::to_value(&message).unwrap(),
        serde_json::json!({ "type": "NAFATH_CALLBACK", "payload": { "code": "123" } })
    );
}

// =============================================================
// Relay sequence
// =============================================================

#[test]
fn dispatch_posts_envelope_to_same_origin() {
    let host = FakeHost::new("?code=123&state=abc", true);
    let mut relay = IdentityRelay::new();
    relay.dispatch(&host);

    let posted = host.posted.borrow();
    assert_eq!(posted.len(), 1);
    let (message, target) = &posted[0];
    assert_eq!(message.kind, IDENTITY_CALLBACK_TAG);
    assert_eq!(message.payload["code"], "123");
    assert_eq!(message.payload["state"], "abc");
    assert_eq!(target, "https://portal.example");
    assert!(relay.delivered());
    assert_eq!(relay.phase(), RelayPhase::Dispatched);
}

#[test]
fn close_happens_even_without_opener() {
    let host = FakeHost::new("?code=123", false);
    let mut relay = IdentityRelay::new();
    relay.dispatch(&host);
    assert!(!relay.delivered());
    assert!(relay.close(&host));
    assert_eq!(host.closed.get(), 1);
    assert_eq!(relay.phase(), RelayPhase::Closed);
}

#[test]
fn dispatch_is_one_shot() {
    let host = FakeHost::new("?code=1", true);
    let mut relay = IdentityRelay::new();
    relay.dispatch(&host);
    relay.dispatch(&host);
    assert_eq!(host.posted.borrow().len(), 1);
}

#[test]
fn close_is_one_shot() {
    let host = FakeHost::new("", true);
    let mut relay = IdentityRelay::new();
    relay.dispatch(&host);
    assert!(relay.close(&host));
    assert!(!relay.close(&host));
    assert_eq!(host.closed.get(), 1);
}

#[test]
fn cancel_before_tick_prevents_close() {
    let host = FakeHost::new("?code=1", true);
    let mut relay = IdentityRelay::new();
    relay.dispatch(&host);
    relay.cancel();
    assert!(!relay.close(&host));
    assert_eq!(host.closed.get(), 0);
    assert_eq!(relay.phase(), RelayPhase::Cancelled);
}

#[test]
fn cancel_after_close_keeps_closed() {
    let host = FakeHost::new("", false);
    let mut relay = IdentityRelay::new();
    relay.close(&host);
    relay.cancel();
    assert_eq!(relay.phase(), RelayPhase::Closed);
}

// =============================================================
// Opener-side acceptance
// =============================================================

#[test]
fn accept_same_origin_identity_message() {
    let raw = r#"{"type":"NAFATH_CALLBACK","payload":{"code":"123","state":"abc"}}"#;
    let message = accept_callback_message("https://portal.example", "https://portal.example", raw).unwrap();
    assert_eq!(message.payload["code"], "123");
}

#[test]
fn reject_cross_origin_message() {
    let raw = r#"{"type":"NAFATH_CALLBACK","payload":{}}"#;
    assert!(accept_callback_message("https://evil.example", "https://portal.example", raw).is_none());
}

#[test]
fn reject_other_message_kinds_and_garbage() {
    let origin = "https://portal.example";
    assert!(accept_callback_message(origin, origin, r#"{"type":"OTHER","payload":{}}"#).is_none());
    assert!(accept_callback_message(origin, origin, "\"just a string\"").is_none());
}
