//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `durable` is the persistence capability; `session` and `signup_flow` are
//! the two stores built on it. Each store is provided once through context
//! and persists under its own key.

pub mod durable;
pub mod session;
pub mod signup_flow;
