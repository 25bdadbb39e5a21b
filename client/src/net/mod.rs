//! Networking modules for HTTP and cross-window messaging.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `identity_relay` carries the verification popup's
//! one-shot message to its opener, and `types` defines the shared schema.

pub mod api;
pub mod identity_relay;
pub mod types;
