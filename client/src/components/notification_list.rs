//! Notification inbox list.

use leptos::prelude::*;

use crate::net::types::Notification;

#[component]
pub fn NotificationList(#[prop(into)] notifications: Signal<Vec<Notification>>) -> impl IntoView {
    view! {
        <section class="notification-list">
            <h2>"Notifications"</h2>
            <Show
                when=move || notifications.with(|n| !n.is_empty())
                fallback=|| view! { <p class="notification-list__empty">"You're all caught up."</p> }
            >
                <ul>
                    <For
                        each=move || notifications.get()
                        key=|n| n.id
                        children=move |n: Notification| {
                            let class = if n.read { "notification" } else { "notification notification--unread" };
                            view! {
                                <li class=class>
                                    <strong>{n.title}</strong>
                                    <p>{n.body}</p>
                                    <time>{n.created_at}</time>
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </section>
    }
}
