//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::dev_panel::DevPanel;
use crate::pages::{
    dashboard::DashboardPage, landing::LandingPage, login::LoginPage, nafath_callback::NafathCallbackPage,
    signup::SignupPage,
};
use crate::state::session::SessionStore;
use crate::state::signup_flow::SignupFlowStore;
use crate::util::storage::{BrowserStorage, StorageBackend};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session and signup-flow stores and sets up client-side
/// routing. Both stores start empty so SSR and the first client render agree;
/// the persisted records are read once after hydration.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let storage: Arc<dyn StorageBackend> = Arc::new(BrowserStorage);
    let session = RwSignal::new(SessionStore::pending(Arc::clone(&storage)));
    let flow = RwSignal::new(SignupFlowStore::pending(storage));

    provide_context(session);
    provide_context(flow);

    Effect::new(move || {
        session.update(SessionStore::restore);
        flow.update(SignupFlowStore::restore);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/merchant-portal.css"/>
        <Title text="Merchant Portal"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=LandingPage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("signup") view=SignupPage/>
                <Route path=(StaticSegment("nafath"), StaticSegment("callback")) view=NafathCallbackPage/>
                <Route path=StaticSegment("dashboard") view=DashboardPage/>
            </Routes>
        </Router>
        <DevPanel/>
    }
}
