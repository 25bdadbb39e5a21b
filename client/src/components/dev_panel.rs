//! Development-only panel showing raw store snapshots.
//!
//! Toggled with Ctrl+Shift+D. Release builds render nothing.

#[cfg(test)]
#[path = "dev_panel_test.rs"]
mod dev_panel_test;

use leptos::prelude::*;

use crate::state::session::SessionStore;
use crate::state::signup_flow::SignupFlowStore;

pub fn is_toggle_shortcut(key: &str, ctrl: bool, shift: bool) -> bool {
    ctrl && shift && key.eq_ignore_ascii_case("d")
}

fn pretty<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unserializable: {e}>"))
}

#[component]
pub fn DevPanel() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let flow = expect_context::<RwSignal<SignupFlowStore>>();
    let open = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let handle = window_event_listener(leptos::ev::keydown, move |ev: web_sys::KeyboardEvent| {
            if is_toggle_shortcut(&ev.key(), ev.ctrl_key(), ev.shift_key()) {
                ev.prevent_default();
                open.update(|o| *o = !*o);
            }
        });
        on_cleanup(move || handle.remove());
    }

    view! {
        <Show when=move || cfg!(debug_assertions) && open.get()>
            <aside class="dev-panel">
                <h3>"Session"</h3>
                <pre>{move || session.with(|s| pretty(s.state()))}</pre>
                <h3>"Signup flow"</h3>
                <pre>{move || flow.with(|f| pretty(f.state()))}</pre>
            </aside>
        </Show>
    }
}
