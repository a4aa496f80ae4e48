//! Transient notice stack in the page corner.

#[cfg(test)]
#[path = "toasts_test.rs"]
mod toasts_test;

use access::NoticeLevel;
use leptos::prelude::*;

use crate::state::notices::NoticeState;

fn toast_class(level: NoticeLevel) -> &'static str {
    match level {
        NoticeLevel::Success => "toast toast--success",
        NoticeLevel::Error => "toast toast--error",
        NoticeLevel::Info => "toast toast--info",
    }
}

/// Renders queued notices; each can be dismissed early.
#[component]
pub fn Toasts() -> impl IntoView {
    let notices = expect_context::<RwSignal<NoticeState>>();

    view! {
        <div class="toasts" role="status" aria-live="polite">
            {move || {
                notices
                    .get()
                    .items()
                    .iter()
                    .map(|(id, notice)| {
                        let id = *id;
                        view! {
                            <div class=toast_class(notice.level)>
                                <span class="toast__message">{notice.message.clone()}</span>
                                <button
                                    class="toast__close"
                                    aria-label="Dismiss"
                                    on:click=move |_| notices.update(|state| state.dismiss(id))
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
