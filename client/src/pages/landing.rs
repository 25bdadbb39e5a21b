//! Marketing landing page.

use leptos::prelude::*;

use crate::state::session::SessionStore;

#[component]
pub fn LandingPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let signed_in = move || session.with(SessionStore::is_authenticated);

    view! {
        <div class="landing-page">
            <section class="landing-hero">
                <h1>"Get paid on time"</h1>
                <p>"Track outstanding balances, collect overdue payments, and choose how you get paid out."</p>
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <div class="landing-actions">
                            <a href="/signup" class="landing-button">"Create an account"</a>
                            <a href="/login" class="landing-link">"Sign in"</a>
                        </div>
                    }
                >
                    <a href="/dashboard" class="landing-button">"Go to dashboard"</a>
                </Show>
            </section>
            <section class="landing-features">
                <div class="landing-feature">
                    <h3>"Weekly, monthly, or instant payouts"</h3>
                </div>
                <div class="landing-feature">
                    <h3>"Verified with Nafath"</h3>
                </div>
                <div class="landing-feature">
                    <h3>"Customer debt consent"</h3>
                </div>
            </section>
        </div>
    }
}
