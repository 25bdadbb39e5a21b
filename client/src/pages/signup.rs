//! Multi-step signup wizard.
//!
//! SYSTEM CONTEXT
//! ==============
//! All wizard progress lives in the `SignupFlowStore`, so a reload resumes at
//! the same step. Identity verification happens in a popup; the popup's
//! relay message arrives here as a window `message` event and is exchanged for
//! a provisional token and user. Completion promotes the returned user into
//! the session and resets the flow.

#[cfg(test)]
#[path = "signup_test.rs"]
mod signup_test;

use leptos::prelude::*;

use super::login::is_identity_number;
use crate::net::api::API_BASE_URL;
use crate::state::session::SessionStore;
use crate::state::signup_flow::{SignupFlowStore, SignupFormData};

const MIN_PASSWORD_LEN: usize = 8;
const IBAN_LEN: usize = 24;
const POPUP_BLOCKED: &str = "The Nafath window did not open. Allow pop-ups for this site and try again.";

/// Wizard steps in order; the discriminant is the persisted step index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupStep {
    Identity = 0,
    Verification = 1,
    Password = 2,
    Payout = 3,
}

impl SignupStep {
    pub const LAST: u32 = SignupStep::Payout as u32;

    /// Step for a stored index. Indices past the end render the last step.
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Self::Identity,
            1 => Self::Verification,
            2 => Self::Password,
            _ => Self::Payout,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Identity => "Your identity",
            Self::Verification => "Verify with Nafath",
            Self::Password => "Choose a password",
            Self::Payout => "Stores and payout",
        }
    }
}

pub fn next_step(current: u32) -> u32 {
    current.saturating_add(1).min(SignupStep::LAST)
}

pub fn previous_step(current: u32) -> u32 {
    current.saturating_sub(1)
}

fn validate_identity_step(national_id: &str) -> Result<String, &'static str> {
    let national_id = national_id.trim();
    if !is_identity_number(national_id) {
        return Err("National id must be 10 digits.");
    }
    Ok(national_id.to_owned())
}

fn validate_password_step(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 8 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(())
}

fn normalize_iban(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_ascii_uppercase()
}

fn validate_iban(raw: &str) -> Result<String, &'static str> {
    let iban = normalize_iban(raw);
    let valid = iban.len() == IBAN_LEN
        && iban.starts_with("SA")
        && iban[2..].bytes().all(|b| b.is_ascii_alphanumeric());
    if valid { Ok(iban) } else { Err("Enter a Saudi IBAN (SA followed by 22 characters).") }
}

/// Comma-separated store ids, trimmed, empties dropped.
fn parse_store_ids(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}

fn verification_popup_url(national_id: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("national_id", national_id)
        .finish();
    format!("{API_BASE_URL}/auth/nafath/start?{query}")
}

/// Whether `window.open` produced a window. Popup blockers return `Ok(None)`.
fn popup_opened<W, E>(result: &Result<Option<W>, E>) -> bool {
    matches!(result, Ok(Some(_)))
}

fn open_verification_popup(national_id: &str) -> bool {
    let url = verification_popup_url(national_id);
    #[cfg(feature = "hydrate")]
    let result = web_sys::window().map_or(Ok(None), |w| w.open_with_url_and_target(&url, "nafath"));
    #[cfg(not(feature = "hydrate"))]
    let result: Result<Option<()>, ()> = {
        let _ = url;
        Ok(None)
    };
    popup_opened(&result)
}

/// Input text for a persisted form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct FormInputs {
    national_id: String,
    stores: String,
    iban: String,
}

impl FormInputs {
    fn from_form(form: &SignupFormData) -> Self {
        Self {
            national_id: form.national_id.clone().unwrap_or_default(),
            stores: form.stores.as_deref().unwrap_or_default().join(", "),
            iban: form.iban.clone().unwrap_or_default(),
        }
    }
}

/// Inputs to seed from `flow`, or `None` while its record has not been read.
fn restored_inputs(flow: &SignupFlowStore) -> Option<FormInputs> {
    flow.is_restored().then(|| FormInputs::from_form(flow.form_data()))
}

#[component]
pub fn SignupPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let flow = expect_context::<RwSignal<SignupFlowStore>>();
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let national_id = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let stores = RwSignal::new(String::new());
    let iban = RwSignal::new(String::new());

    // Seed the inputs once, after the persisted flow has been read.
    Effect::new(move |seeded: Option<bool>| {
        if seeded == Some(true) {
            return true;
        }
        let Some(inputs) = flow.with(restored_inputs) else {
            return false;
        };
        national_id.set(inputs.national_id);
        stores.set(inputs.stores);
        iban.set(inputs.iban);
        true
    });

    #[cfg(feature = "hydrate")]
    {
        use crate::net::identity_relay::accept_callback_message;

        let handle = window_event_listener(leptos::ev::message, move |ev: web_sys::MessageEvent| {
            let own_origin = web_sys::window().and_then(|w| w.location().origin().ok()).unwrap_or_default();
            let Some(raw) = js_sys::JSON::stringify(&ev.data()).ok().map(String::from) else {
                return;
            };
            let Some(message) = accept_callback_message(&ev.origin(), &own_origin, &raw) else {
                return;
            };
            busy.set(true);
            info.set("Verifying identity...".to_owned());
            leptos::task::spawn_local(async move {
                match crate::net::api::verify_identity_callback(&message.payload).await {
                    Ok(user) => {
                        flow.update(|f| {
                            f.set_access_token(user.access_token.clone());
                            f.set_user(user);
                            f.set_active_step(SignupStep::Password as u32);
                        });
                        info.set(String::new());
                    }
                    Err(e) => info.set(e.user_message()),
                }
                busy.set(false);
            });
        });
        on_cleanup(move || handle.remove());
    }

    let step = move || SignupStep::from_index(flow.with(SignupFlowStore::active_step));

    let on_identity = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        match validate_identity_step(&national_id.get()) {
            Ok(id) => {
                let opened = open_verification_popup(&id);
                flow.update(|f| {
                    f.update_form_data(SignupFormData { national_id: Some(id), ..SignupFormData::default() });
                    if opened {
                        f.set_active_step(next_step(f.active_step()));
                    }
                });
                info.set(if opened { String::new() } else { POPUP_BLOCKED.to_owned() });
            }
            Err(msg) => info.set(msg.to_owned()),
        }
    };

    let on_password = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let (pw, confirm_pw) = (password.get(), confirm.get());
        if let Err(msg) = validate_password_step(&pw, &confirm_pw) {
            info.set(msg.to_owned());
            return;
        }
        flow.update(|f| {
            f.update_form_data(SignupFormData {
                password: Some(pw),
                confirm_password: Some(confirm_pw),
                ..SignupFormData::default()
            });
            f.set_active_step(next_step(f.active_step()));
        });
        info.set(String::new());
    };

    let on_payout = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let iban_value = match validate_iban(&iban.get()) {
            Ok(v) => v,
            Err(msg) => {
                info.set(msg.to_owned());
                return;
            }
        };
        flow.update(|f| {
            f.update_form_data(SignupFormData {
                stores: Some(parse_store_ids(&stores.get())),
                iban: Some(iban_value),
                ..SignupFormData::default()
            });
        });
        busy.set(true);
        info.set("Creating your account...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            let (token, form) = flow.with_untracked(|f| (f.state().access_token.clone(), f.form_data().clone()));
            leptos::task::spawn_local(async move {
                match crate::net::api::complete_signup(&token, &form).await {
                    Ok(user) => {
                        session.update(|s| s.set_user(user));
                        flow.update(SignupFlowStore::reset_flow);
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
            let _ = session;
        }
    };

    let on_reopen = move |_| {
        let id = flow.with_untracked(|f| f.form_data().national_id.clone().unwrap_or_default());
        info.set(if open_verification_popup(&id) { String::new() } else { POPUP_BLOCKED.to_owned() });
    };

    let on_back = move |_| flow.update(|f| f.set_active_step(previous_step(f.active_step())));
    let on_abandon = move |_| {
        flow.update(SignupFlowStore::reset_flow);
        national_id.set(String::new());
        stores.set(String::new());
        iban.set(String::new());
        info.set(String::new());
    };

    view! {
        <div class="signup-page">
            <div class="signup-card">
                <p class="signup-card__progress">
                    {move || format!("Step {} of {}", flow.with(SignupFlowStore::active_step).min(SignupStep::LAST) + 1, SignupStep::LAST + 1)}
                </p>
                <h1>{move || step().title()}</h1>
                {move || match step() {
                    SignupStep::Identity => view! {
                        <form class="signup-form" on:submit=on_identity>
                            <input
                                class="signup-input"
                                type="text"
                                inputmode="numeric"
                                maxlength="10"
                                placeholder="National ID / Iqama"
                                prop:value=move || national_id.get()
                                on:input=move |ev| national_id.set(event_target_value(&ev))
                            />
                            <button class="signup-button" type="submit">"Continue with Nafath"</button>
                        </form>
                    }
                    .into_any(),
                    SignupStep::Verification => view! {
                        <div class="signup-form">
                            <p class="signup-message">
                                "Approve the request in the Nafath app. This page continues automatically."
                            </p>
                            <button class="signup-link" on:click=on_reopen>"Open Nafath again"</button>
                        </div>
                    }
                    .into_any(),
                    SignupStep::Password => view! {
                        <form class="signup-form" on:submit=on_password>
                            <input
                                class="signup-input"
                                type="password"
                                placeholder="Password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                            <input
                                class="signup-input"
                                type="password"
                                placeholder="Confirm password"
                                prop:value=move || confirm.get()
                                on:input=move |ev| confirm.set(event_target_value(&ev))
                            />
                            <button class="signup-button" type="submit">"Next"</button>
                        </form>
                    }
                    .into_any(),
                    SignupStep::Payout => view! {
                        <form class="signup-form" on:submit=on_payout>
                            <input
                                class="signup-input"
                                type="text"
                                placeholder="Store ids, comma separated"
                                prop:value=move || stores.get()
                                on:input=move |ev| stores.set(event_target_value(&ev))
                            />
                            <input
                                class="signup-input"
                                type="text"
                                placeholder="SA00 0000 0000 0000 0000 0000"
                                prop:value=move || iban.get()
                                on:input=move |ev| iban.set(event_target_value(&ev))
                            />
                            <button class="signup-button" type="submit" disabled=move || busy.get()>
                                "Create account"
                            </button>
                        </form>
                    }
                    .into_any(),
                }}
                <Show when=move || !info.get().is_empty()>
                    <p class="signup-message">{move || info.get()}</p>
                </Show>
                <div class="signup-actions">
                    <button
                        class="signup-link"
                        disabled=move || flow.with(SignupFlowStore::active_step) == 0
                        on:click=on_back
                    >
                        "Back"
                    </button>
                    <button class="signup-link" on:click=on_abandon>"Start over"</button>
                </div>
            </div>
        </div>
    }
}
