//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::SessionStore;

/// Whether a guarded route should bounce to `/login`.
///
/// Waits for the persisted session to be restored so a reload does not
/// redirect a signed-in user.
pub fn should_redirect_unauth(session: &SessionStore) -> bool {
    session.is_restored() && !session.is_authenticated()
}

/// Redirect to `/login` whenever the session is restored and unauthenticated.
pub fn install_unauth_redirect<F>(session: RwSignal<SessionStore>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let navigate = navigate.clone();
    Effect::new(move || {
        if session.with(should_redirect_unauth) {
            navigate("/login", NavigateOptions::default());
        }
    });
}
