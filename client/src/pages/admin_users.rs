//! User management for admins: list company users, create accounts, change
//! roles and deactivate or reactivate members.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reachable only with the admin role (the route gate enforces it). Edits are
//! sent as minimal `PATCH /admin/users/{id}` bodies built by
//! `UserUpdate::diff`, and the returned record replaces the listed one. An
//! edit that changes nothing is not sent. The create form can fill in a
//! generated temporary password.

#[cfg(test)]
#[path = "admin_users_test.rs"]
mod admin_users_test;

use access::types::{Role, User, UserUpdate};
use access::validate::{generate_password, password_strength, strength_label, validate_new_user};
use access::{ApiError, Notice};
use leptos::prelude::*;

use crate::state::auth::{ClientSession, report_failure};
use crate::state::notices::{NoticeState, push_notice};
use crate::util::entropy::seeded_rng;
use crate::util::scope::{spawn_scoped, use_view_scope};

/// Users who can be assigned as someone's manager.
fn manager_candidates(users: &[User]) -> Vec<&User> {
    users
        .iter()
        .filter(|user| user.is_active && matches!(user.role, Role::Manager | Role::Admin))
        .collect()
}

/// Replace the listed record with the same id.
fn replace_user(users: &mut [User], updated: User) {
    if let Some(slot) = users.iter_mut().find(|user| user.id == updated.id) {
        *slot = updated;
    }
}

/// Notice for an edit with nothing to send, or `None` when it must be sent.
fn unchanged_notice(update: &UserUpdate) -> Option<Notice> {
    update.is_empty().then(|| Notice::info("No changes to update"))
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let session = expect_context::<ClientSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = use_view_scope();

    let users = RwSignal::new(Vec::<User>::new());
    let loading = RwSignal::new(true);

    let show_form = RwSignal::new(false);
    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(Role::Employee.as_str().to_owned());
    let manager = RwSignal::new("none".to_owned());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_loaded = move |result: Result<Vec<User>, ApiError>| {
        match result {
            Ok(list) => users.set(list),
            Err(err) => report_failure(notices, &err, "Failed to load users"),
        }
        loading.set(false);
    };
    spawn_scoped(&session, &scope, |api| async move { api.users().await }, on_loaded);

    let session = StoredValue::new(session);
    let scope = StoredValue::new(scope);

    let reset_form = move || {
        full_name.set(String::new());
        email.set(String::new());
        password.set(String::new());
        role.set(Role::Employee.as_str().to_owned());
        manager.set("none".to_owned());
        error.set(None);
    };

    let on_create = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let manager_value = manager.get_untracked();
        let validated = validate_new_user(
            &full_name.get_untracked(),
            &email.get_untracked(),
            &password.get_untracked(),
            role.get_untracked().parse::<Role>().ok(),
            Some(manager_value.as_str()),
        );
        let new_user = match validated {
            Ok(user) => user,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        error.set(None);
        busy.set(true);
        let session = session.get_value();
        let on_created = move |result: Result<User, ApiError>| {
            busy.set(false);
            match result {
                Ok(user) => {
                    push_notice(notices, Notice::success(format!("User {} created", user.full_name)));
                    users.update(|list| list.push(user));
                    reset_form();
                    show_form.set(false);
                }
                Err(err) => report_failure(notices, &err, "Failed to create user"),
            }
        };
        spawn_scoped(
            &session,
            &scope.get_value(),
            move |api| async move { api.create_user(&new_user).await },
            on_created,
        );
    };

    let on_generate = move |_: leptos::ev::MouseEvent| {
        password.set(generate_password(&mut seeded_rng()));
        push_notice(notices, Notice::success("Secure password generated"));
    };

    let apply_update = move |user: User, update: UserUpdate| {
        if let Some(notice) = unchanged_notice(&update) {
            push_notice(notices, notice);
            return;
        }
        let session = session.get_value();
        let on_updated = move |result: Result<User, ApiError>| match result {
            Ok(updated) => {
                push_notice(notices, Notice::success("User updated"));
                users.update(|list| replace_user(list, updated));
            }
            Err(err) => report_failure(notices, &err, "Failed to update user"),
        };
        spawn_scoped(
            &session,
            &scope.get_value(),
            move |api| async move { api.update_user(&user.id, &update).await },
            on_updated,
        );
    };

    let strength = move || password_strength(&password.get());

    view! {
        <div class="admin-users">
            <div class="admin-users__toolbar">
                <button class="btn btn--primary" on:click=move |_| show_form.update(|open| *open = !*open)>
                    {move || if show_form.get() { "Cancel" } else { "Add user" }}
                </button>
            </div>
            <Show when=move || show_form.get()>
                <form class="user-form" on:submit=on_create>
                    <input
                        type="text"
                        placeholder="Full name"
                        prop:value=move || full_name.get()
                        on:input=move |ev| full_name.set(event_target_value(&ev))
                    />
                    <input
                        type="email"
                        placeholder="Email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        placeholder="Temporary password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="btn btn--ghost" type="button" on:click=on_generate>
                        "Generate"
                    </button>
                    <span class="user-form__strength">{move || strength_label(strength())}</span>
                    <select prop:value=move || role.get() on:change=move |ev| role.set(event_target_value(&ev))>
                        {Role::ALL
                            .iter()
                            .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                            .collect_view()}
                    </select>
                    <select prop:value=move || manager.get() on:change=move |ev| manager.set(event_target_value(&ev))>
                        <option value="none">"No manager"</option>
                        {move || {
                            users
                                .with(|list| {
                                    manager_candidates(list)
                                        .into_iter()
                                        .map(|m| (m.id.clone(), m.full_name.clone()))
                                        .collect::<Vec<_>>()
                                })
                                .into_iter()
                                .map(|(id, name)| view! { <option value=id>{name}</option> })
                                .collect_view()
                        }}
                    </select>
                    <Show when=move || error.get().is_some()>
                        <p class="form-error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        "Create user"
                    </button>
                </form>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <div class="spinner"></div> }>
                <table class="user-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            users
                                .get()
                                .into_iter()
                                .map(|user| {
                                    let for_role = user.clone();
                                    let for_toggle = user.clone();
                                    let current_role = user.role.as_str();
                                    view! {
                                        <tr class:user-table__row--inactive=!user.is_active>
                                            <td>{user.full_name.clone()}</td>
                                            <td>{user.email.clone()}</td>
                                            <td>
                                                <select
                                                    prop:value=current_role
                                                    on:change=move |ev| {
                                                        let Ok(next) = event_target_value(&ev).parse::<Role>() else {
                                                            return;
                                                        };
                                                        let update = UserUpdate::diff(
                                                            &for_role,
                                                            &for_role.full_name,
                                                            next,
                                                            for_role.is_active,
                                                        );
                                                        apply_update(for_role.clone(), update);
                                                    }
                                                >
                                                    {Role::ALL
                                                        .iter()
                                                        .map(|r| view! { <option value=r.as_str()>{r.label()}</option> })
                                                        .collect_view()}
                                                </select>
                                            </td>
                                            <td>{if user.is_active { "Active" } else { "Inactive" }}</td>
                                            <td>
                                                <button
                                                    class="btn btn--ghost"
                                                    on:click=move |_| {
                                                        let update = UserUpdate::diff(
                                                            &for_toggle,
                                                            &for_toggle.full_name,
                                                            for_toggle.role,
                                                            !for_toggle.is_active,
                                                        );
                                                        apply_update(for_toggle.clone(), update);
                                                    }
                                                >
                                                    {if user.is_active { "Deactivate" } else { "Activate" }}
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </Show>
        </div>
    }
}
