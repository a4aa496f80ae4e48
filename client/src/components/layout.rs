//! Authenticated application shell: header, role-filtered navigation and
//! the user menu.
//!
//! SYSTEM CONTEXT
//! ==============
//! Rendered by the route gate around every page except login. Navigation
//! entries come from `access::visible_items`, recomputed whenever the
//! session's role changes.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use access::format::initials;
use access::{AuthState, NAV_ITEMS, Route, visible_items};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::auth::ClientSession;

/// CSS class of a navigation entry.
fn nav_item_class(item_route: Route, current: Route) -> &'static str {
    if item_route == current {
        "layout__nav-item layout__nav-item--active"
    } else {
        "layout__nav-item"
    }
}

/// Page shell with sidebar navigation for `route`.
#[component]
pub fn Layout(route: Route, children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let session = StoredValue::new(expect_context::<ClientSession>());

    let items = move || visible_items(NAV_ITEMS, auth.get().role());
    let user_name = move || auth.get().user().map(|u| u.full_name.clone()).unwrap_or_default();
    let user_email = move || auth.get().user().map(|u| u.email.clone()).unwrap_or_default();
    let user_initials = move || initials(&user_name());
    let role_label = move || auth.get().role().map(|role| role.label()).unwrap_or_default();

    let on_logout = move |_| session.with_value(ClientSession::logout);

    view! {
        <div class="layout">
            <aside class="layout__sidebar">
                <div class="layout__brand">"ExpenseFlow"</div>
                <nav>
                    <ul class="layout__nav">
                        {move || {
                            items()
                                .into_iter()
                                .map(|item| {
                                    view! {
                                        <li class=nav_item_class(item.route, route)>
                                            <A href=item.route.path()>
                                                <span class="layout__nav-icon" data-icon=item.icon></span>
                                                <span>{item.label}</span>
                                            </A>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </nav>
            </aside>
            <div class="layout__main">
                <header class="layout__header">
                    <h1 class="layout__title">{route.title()}</h1>
                    <div class="layout__user">
                        <span class="layout__avatar">{user_initials}</span>
                        <div class="layout__user-meta">
                            <span class="layout__user-name">{user_name}</span>
                            <span class="layout__user-email">{user_email}</span>
                            <span class="layout__role-badge">{role_label}</span>
                        </div>
                        <button class="btn btn--ghost" on:click=on_logout>
                            "Log out"
                        </button>
                    </div>
                </header>
                <main class="layout__content">{children()}</main>
            </div>
        </div>
    }
}
