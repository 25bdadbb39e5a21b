//! Login page with national id + password.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::state::session::SessionStore;

/// Saudi national ids and iqama numbers are ten digits.
pub(crate) fn is_identity_number(value: &str) -> bool {
    value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit())
}

fn validate_login_input(national_id: &str, password: &str) -> Result<(String, String), &'static str> {
    let national_id = national_id.trim();
    if national_id.is_empty() || password.is_empty() {
        return Err("Enter your national id and password.");
    }
    if !is_identity_number(national_id) {
        return Err("National id must be 10 digits.");
    }
    Ok((national_id.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let national_id = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (id_value, password_value) = match validate_login_input(&national_id.get(), &password.get()) {
            Ok(values) => values,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move {
                match crate::net::api::login(&id_value, &password_value).await {
                    Ok(user) => {
                        session.update(|s| s.set_user(user));
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href("/dashboard");
                        }
                    }
                    Err(e) => info.set(e.user_message()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id_value, password_value, session);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Merchant Portal"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        inputmode="numeric"
                        maxlength="10"
                        placeholder="National ID / Iqama"
                        prop:value=move || national_id.get()
                        on:input=move |ev| national_id.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <a href="/signup" class="login-link">"Create an account"</a>
            </div>
        </div>
    }
}
