//! Business dashboard: totals, debt consent, and notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated landing route. It scopes everything to the
//! session's selected business, falls back to the first owned business when
//! none is selected, and treats a 401 from any fetch as a logout.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::notification_list::NotificationList;
use crate::components::totals_panel::TotalsPanel;
use crate::net::types::{ActorKind, Business, DashboardTotals, DebtRequest, Notification, User};
use crate::state::session::SessionStore;
use crate::util::auth::install_unauth_redirect;

/// Selected business if the user still owns it, else the first owned one.
fn resolve_selected_business(user: Option<&User>, selected: Option<&Business>) -> Option<Business> {
    let owned = user.map(|u| u.businesses.as_slice()).unwrap_or_default();
    selected
        .and_then(|s| owned.iter().find(|b| b.id == s.id))
        .or_else(|| owned.first())
        .cloned()
}

/// Totals fetched for `requested` are stale once the selection has moved on.
#[cfg(any(test, feature = "hydrate"))]
fn totals_still_current(requested: i64, selected: Option<i64>) -> bool {
    selected == Some(requested)
}

fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

fn pending_debts_label(count: usize) -> String {
    match count {
        0 => "No debts awaiting your consent.".to_owned(),
        1 => "1 debt awaiting your consent.".to_owned(),
        n => format!("{n} debts awaiting your consent."),
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();
    install_unauth_redirect(session, navigate);

    let totals = RwSignal::new(None::<DashboardTotals>);
    let debts = RwSignal::new(Vec::<DebtRequest>::new());
    let notifications = RwSignal::new(Vec::<Notification>::new());
    let error = RwSignal::new(None::<String>);

    // Keep the selection pointing at an owned business.
    Effect::new(move || {
        let (current, resolved) = session.with(|s| {
            (s.selected_business().map(|b| b.id), resolve_selected_business(s.user(), s.selected_business()))
        });
        if session.with_untracked(SessionStore::is_authenticated) && current != resolved.as_ref().map(|b| b.id) {
            session.update(|s| s.set_selected_business(resolved));
        }
    });

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::{self, ApiError};

        let on_api_error = move |e: ApiError| {
            if e.is_unauthorized() {
                session.update(SessionStore::clear_user);
            } else {
                error.set(Some(e.user_message()));
            }
        };

        Effect::new(move || {
            let (token, business_id) =
                session.with(|s| (s.access_token().to_owned(), s.selected_business().map(|b| b.id)));
            if token.is_empty() {
                return;
            }
            if let Some(business_id) = business_id {
                let token = token.clone();
                leptos::task::spawn_local(async move {
                    match api::fetch_dashboard_totals(&token, business_id).await {
                        Ok(t) => {
                            let selected = session.with_untracked(|s| s.selected_business().map(|b| b.id));
                            if totals_still_current(business_id, selected) {
                                totals.set(Some(t));
                            }
                        }
                        Err(e) => on_api_error(e),
                    }
                });
            }
            leptos::task::spawn_local(async move {
                match api::fetch_notifications(&token).await {
                    Ok(list) => notifications.set(list),
                    Err(e) => on_api_error(e),
                }
                if session.with_untracked(|s| s.user().map(|u| u.actor_type)) == Some(ActorKind::Customer) {
                    match api::fetch_debt_requests(&token).await {
                        Ok(list) => debts.set(list),
                        Err(e) => on_api_error(e),
                    }
                }
            });
        });
    }

    let shown_totals = move || {
        totals.get().or_else(|| session.with(|s| s.selected_business().map(DashboardTotals::from))).unwrap_or_default()
    };

    let on_select = move |ev: leptos::ev::Event| {
        let Ok(id) = event_target_value(&ev).parse::<i64>() else {
            return;
        };
        let business = session.with_untracked(|s| s.user().and_then(|u| u.businesses.iter().find(|b| b.id == id).cloned()));
        totals.set(None);
        session.update(|s| s.set_selected_business(business));
    };

    let on_consent = move |debt_id: i64, approved: bool| {
        #[cfg(feature = "hydrate")]
        {
            let token = session.with_untracked(|s| s.access_token().to_owned());
            leptos::task::spawn_local(async move {
                match crate::net::api::submit_debt_consent(&token, debt_id, approved).await {
                    Ok(()) => debts.update(|list| list.retain(|d| d.id != debt_id)),
                    Err(e) => error.set(Some(e.user_message())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (debt_id, approved);
        }
    };

    let on_logout = move |_| session.update(SessionStore::clear_user);

    let is_customer =
        move || session.with(|s| s.user().map(|u| u.actor_type)) == Some(ActorKind::Customer);
    let display_name = move || session.with(|s| s.user().map(|u| u.display_name().to_owned()).unwrap_or_default());

    view! {
        <div class="dashboard-page">
            <header class="dashboard-header">
                <h1>{display_name}</h1>
                <span class="dashboard-badge">
                    {move || format!("{} unread", notifications.with(|n| unread_count(n)))}
                </span>
                <button class="dashboard-logout" on:click=on_logout>"Log out"</button>
            </header>

            <Show when=move || error.get().is_some()>
                <p class="dashboard-error">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <label class="dashboard-select">
                "Business "
                <select on:change=on_select>
                    <For
                        each=move || session.with(|s| s.user().map(|u| u.businesses.clone()).unwrap_or_default())
                        key=|b| b.id
                        children=move |b: Business| {
                            let id = b.id;
                            view! {
                                <option
                                    value=id.to_string()
                                    selected=move || session.with(|s| s.selected_business().map(|sb| sb.id)) == Some(id)
                                >
                                    {b.display_name().to_owned()}
                                </option>
                            }
                        }
                    />
                </select>
            </label>

            <TotalsPanel totals=Signal::derive(shown_totals)/>

            <Show when=is_customer>
                <section class="dashboard-debts">
                    <h2>"Debt consent"</h2>
                    <p>{move || debts.with(|d| pending_debts_label(d.len()))}</p>
                    <For
                        each=move || debts.get()
                        key=|d| d.id
                        children=move |d: DebtRequest| {
                            let id = d.id;
                            view! {
                                <div class="debt-row">
                                    <span>{d.business_name.clone()}</span>
                                    <span>{crate::components::totals_panel::format_sar(d.amount)}</span>
                                    <button on:click=move |_| on_consent(id, true)>"Approve"</button>
                                    <button on:click=move |_| on_consent(id, false)>"Decline"</button>
                                </div>
                            }
                        }
                    />
                </section>
            </Show>

            <NotificationList notifications=notifications.read_only()/>
        </div>
    }
}
