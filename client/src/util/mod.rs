//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser storage access and the route guard. Pages reach `localStorage` only
//! through `storage`.

pub mod auth;
pub mod storage;
