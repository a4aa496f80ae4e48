//! Notification inbox with mark-as-read.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use access::ApiError;
use access::format::format_date;
use access::types::Notification;
use leptos::prelude::*;

use crate::state::auth::{ClientSession, report_failure};
use crate::state::notices::NoticeState;
use crate::util::scope::{spawn_scoped, use_view_scope};

fn unread_count(items: &[Notification]) -> usize {
    items.iter().filter(|item| !item.read).count()
}

fn mark_read(items: &mut [Notification], notification_id: &str) {
    if let Some(item) = items.iter_mut().find(|item| item.id == notification_id) {
        item.read = true;
    }
}

#[component]
pub fn NotificationsPage() -> impl IntoView {
    let session = expect_context::<ClientSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = use_view_scope();

    let items = RwSignal::new(Vec::<Notification>::new());
    let loading = RwSignal::new(true);

    let on_loaded = move |result: Result<Vec<Notification>, ApiError>| {
        match result {
            Ok(list) => items.set(list),
            Err(err) => report_failure(notices, &err, "Failed to load notifications"),
        }
        loading.set(false);
    };
    spawn_scoped(&session, &scope, |api| async move { api.notifications().await }, on_loaded);

    let session = StoredValue::new(session);
    let scope = StoredValue::new(scope);
    let on_read = move |notification_id: String| {
        let session = session.get_value();
        let on_done = {
            let notification_id = notification_id.clone();
            move |result: Result<(), ApiError>| match result {
                Ok(()) => items.update(|list| mark_read(list, &notification_id)),
                Err(err) => report_failure(notices, &err, "Failed to update notification"),
            }
        };
        spawn_scoped(
            &session,
            &scope.get_value(),
            move |api| async move { api.mark_notification_read(&notification_id).await },
            on_done,
        );
    };

    view! {
        <div class="notifications-page">
            <p class="notifications-page__summary">
                {move || format!("{} unread", items.with(|list| unread_count(list)))}
            </p>
            <Show when=move || !loading.get() fallback=|| view! { <div class="spinner"></div> }>
                <Show
                    when=move || !items.with(Vec::is_empty)
                    fallback=|| view! { <p class="empty">"You're all caught up."</p> }
                >
                    <ul class="notification-list">
                        {move || {
                            items
                                .get()
                                .into_iter()
                                .map(|item| {
                                    let id = item.id.clone();
                                    view! {
                                        <li class="notification" class:notification--unread=!item.read>
                                            <div class="notification__title">{item.title.clone()}</div>
                                            <p class="notification__message">{item.message.clone()}</p>
                                            <span class="notification__date">
                                                {item.created_at.as_deref().map(format_date).unwrap_or_default()}
                                            </span>
                                            {(!item.read)
                                                .then(|| {
                                                    view! {
                                                        <button
                                                            class="btn btn--ghost"
                                                            on:click=move |_| on_read(id.clone())
                                                        >
                                                            "Mark as read"
                                                        </button>
                                                    }
                                                })}
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </Show>
        </div>
    }
}
