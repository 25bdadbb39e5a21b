//! One-shot identity-callback relay from a verification popup to its opener.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity provider redirects the popup to `/nafath/callback?...`. That
//! page posts the query parameters to `window.opener` (same origin only) and
//! closes itself on the next tick. There is no acknowledgment channel: the
//! popup closes whether or not delivery worked. The signup page on the opener
//! side accepts the envelope via [`accept_callback_message`].

#[cfg(test)]
#[path = "identity_relay_test.rs"]
mod identity_relay_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message tag identifying an identity-callback envelope.
pub const IDENTITY_CALLBACK_TAG: &str = "NAFATH_CALLBACK";

/// Envelope posted to the opener window.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: BTreeMap<String, String>,
}

impl CallbackMessage {
    /// Identity-callback envelope carrying the pairs of `search`.
    pub fn from_query(search: &str) -> Self {
        Self { kind: IDENTITY_CALLBACK_TAG.to_owned(), payload: parse_query(search) }
    }

    pub fn is_identity_callback(&self) -> bool {
        self.kind == IDENTITY_CALLBACK_TAG
    }
}

/// Decode a query string (with or without the leading `?`). Later duplicates
/// win.
pub fn parse_query(search: &str) -> BTreeMap<String, String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes()).into_owned().collect()
}

/// Opener-side filter: keep only same-origin identity-callback envelopes.
pub fn accept_callback_message(event_origin: &str, own_origin: &str, raw: &str) -> Option<CallbackMessage> {
    if event_origin != own_origin {
        return None;
    }
    serde_json::from_str::<CallbackMessage>(raw).ok().filter(CallbackMessage::is_identity_callback)
}

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("window has no opener")]
    NoOpener,
    #[error("failed to post message to opener: {0}")]
    PostFailed(String),
}

/// Browsing context the relay runs in.
pub trait CallbackHost {
    /// Query part of the current address, including the leading `?`.
    fn search(&self) -> String;
    fn origin(&self) -> String;
    /// Post `message` to the opener, restricted to `target_origin`.
    ///
    /// # Errors
    ///
    /// Returns an error when there is no reachable opener or posting fails.
    fn post_to_opener(&self, message: &CallbackMessage, target_origin: &str) -> Result<(), RelayError>;
    fn close(&self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelayPhase {
    #[default]
    Idle,
    Dispatched,
    Closed,
    Cancelled,
}

/// Drives the dispatch → close sequence exactly once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IdentityRelay {
    phase: RelayPhase,
    delivered: bool,
}

impl IdentityRelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> RelayPhase {
        self.phase
    }

    pub fn delivered(&self) -> bool {
        self.delivered
    }

    /// Post the callback envelope to the opener. Delivery errors are logged
    /// and dropped. Later calls are no-ops.
    pub fn dispatch<H: CallbackHost>(&mut self, host: &H) {
        if self.phase != RelayPhase::Idle {
            return;
        }
        let message = CallbackMessage::from_query(&host.search());
        match host.post_to_opener(&message, &host.origin()) {
            Ok(()) => self.delivered = true,
            Err(e) => leptos::logging::warn!("identity callback not delivered: {e}"),
        }
        self.phase = RelayPhase::Dispatched;
    }

    /// Close the window unless already closed or cancelled. Returns whether
    /// the window was closed by this call.
    pub fn close<H: CallbackHost>(&mut self, host: &H) -> bool {
        match self.phase {
            RelayPhase::Idle | RelayPhase::Dispatched => {
                host.close();
                self.phase = RelayPhase::Closed;
                true
            }
            RelayPhase::Closed | RelayPhase::Cancelled => false,
        }
    }

    /// Teardown before the close tick fired.
    pub fn cancel(&mut self) {
        if self.phase != RelayPhase::Closed {
            self.phase = RelayPhase::Cancelled;
        }
    }
}

/// The popup's own window.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserCallbackHost;

impl CallbackHost for BrowserCallbackHost {
    fn search(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window().and_then(|w| w.location().search().ok()).unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn origin(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn post_to_opener(&self, message: &CallbackMessage, target_origin: &str) -> Result<(), RelayError> {
        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let window = web_sys::window().ok_or(RelayError::NoOpener)?;
            let opener = window.opener().map_err(|e| RelayError::PostFailed(format!("{e:?}")))?;
            if opener.is_null() || opener.is_undefined() {
                return Err(RelayError::NoOpener);
            }
            let opener: web_sys::Window = opener.unchecked_into();
            let raw = serde_json::to_string(message).map_err(|e| RelayError::PostFailed(e.to_string()))?;
            let value = js_sys::JSON::parse(&raw).map_err(|e| RelayError::PostFailed(format!("{e:?}")))?;
            opener
                .post_message(&value, target_origin)
                .map_err(|e| RelayError::PostFailed(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (message, target_origin);
            Err(RelayError::NoOpener)
        }
    }

    fn close(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.close();
            }
        }
    }
}
