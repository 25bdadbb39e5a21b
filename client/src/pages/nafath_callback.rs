//! Popup landing page for the Nafath identity callback.
//!
//! Posts the query parameters to the opener, then closes on the next tick.
//! Leaving the page before the tick cancels the close.

use leptos::prelude::*;

#[component]
pub fn NafathCallbackPage() -> impl IntoView {
    #[cfg(feature = "hydrate")]
    {
        use std::time::Duration;

        use leptos::leptos_dom::helpers::{TimeoutHandle, set_timeout_with_handle};

        use crate::net::identity_relay::{BrowserCallbackHost, IdentityRelay};

        let relay = StoredValue::new(IdentityRelay::new());
        let pending = StoredValue::new(None::<TimeoutHandle>);

        Effect::new(move || {
            relay.update_value(|r| r.dispatch(&BrowserCallbackHost));
            let close = move || {
                relay.update_value(|r| {
                    r.close(&BrowserCallbackHost);
                });
            };
            match set_timeout_with_handle(close, Duration::ZERO) {
                Ok(handle) => pending.set_value(Some(handle)),
                Err(_) => close(),
            }
        });

        on_cleanup(move || {
            relay.update_value(IdentityRelay::cancel);
            if let Some(handle) = pending.get_value() {
                handle.clear();
            }
        });
    }

    view! {
        <div class="callback-page">
            <p class="callback-message">"Verification complete. You can return to the signup window."</p>
        </div>
    }
}
