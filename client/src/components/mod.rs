//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render dashboard and diagnostics surfaces while reading shared
//! stores from Leptos context providers.

pub mod dev_panel;
pub mod notification_list;
pub mod totals_panel;
