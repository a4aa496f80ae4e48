//! Login page with sign-in and company registration forms.
//!
//! SYSTEM CONTEXT
//! ==============
//! The only route an anonymous visitor may see. Both forms validate locally
//! and then hand off to the session store; on success the route gate moves
//! the user to the dashboard, on failure the store raises a notice and the
//! form stays put.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use access::validate::{password_strength, strength_label, validate_login, validate_registration};
use leptos::prelude::*;

use crate::state::auth::ClientSession;

/// Countries offered on the registration form, ISO code first.
pub const COUNTRIES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("GB", "United Kingdom"),
    ("CA", "Canada"),
    ("AU", "Australia"),
    ("DE", "Germany"),
    ("FR", "France"),
    ("IN", "India"),
    ("JP", "Japan"),
];

const DEFAULT_COUNTRY: &str = "US";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    SignIn,
    Register,
}

impl Mode {
    fn submit_label(self, busy: bool) -> &'static str {
        match (self, busy) {
            (Self::SignIn, false) => "Sign in",
            (Self::SignIn, true) => "Signing in...",
            (Self::Register, false) => "Create account",
            (Self::Register, true) => "Creating account...",
        }
    }
}

/// Width class of the password strength bar for a 0-5 score.
fn strength_class(score: u8) -> &'static str {
    match score {
        0 | 1 => "strength strength--weak",
        2 | 3 => "strength strength--fair",
        _ => "strength strength--strong",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = StoredValue::new(expect_context::<ClientSession>());

    let mode = RwSignal::new(Mode::SignIn);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let company_name = RwSignal::new(String::new());
    let country = RwSignal::new(DEFAULT_COUNTRY.to_owned());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let switch_to = move |next: Mode| {
        mode.set(next);
        error.set(None);
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        error.set(None);
        let session = session.get_value();
        match mode.get_untracked() {
            Mode::SignIn => match validate_login(&email.get_untracked(), &password.get_untracked()) {
                Ok(request) => {
                    busy.set(true);
                    leptos::task::spawn_local(async move {
                        let _ = session.login(&request.email, &request.password).await;
                        let _ = busy.try_set(false);
                    });
                }
                Err(err) => error.set(Some(err.to_string())),
            },
            Mode::Register => {
                let validated = validate_registration(
                    &full_name.get_untracked(),
                    &email.get_untracked(),
                    &password.get_untracked(),
                    &company_name.get_untracked(),
                    &country.get_untracked(),
                );
                match validated {
                    Ok(request) => {
                        busy.set(true);
                        leptos::task::spawn_local(async move {
                            let _ = session.register(&request).await;
                            let _ = busy.try_set(false);
                        });
                    }
                    Err(err) => error.set(Some(err.to_string())),
                }
            }
        }
    };

    let strength = move || password_strength(&password.get());

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"ExpenseFlow"</h1>
                <p class="login-card__subtitle">"Expense management for growing teams"</p>
                <div class="login-tabs" role="tablist">
                    <button
                        class="login-tab"
                        class:login-tab--active=move || mode.get() == Mode::SignIn
                        on:click=move |_| switch_to(Mode::SignIn)
                    >
                        "Sign in"
                    </button>
                    <button
                        class="login-tab"
                        class:login-tab--active=move || mode.get() == Mode::Register
                        on:click=move |_| switch_to(Mode::Register)
                    >
                        "Register"
                    </button>
                </div>
                <form class="login-form" on:submit=on_submit>
                    <Show when=move || mode.get() == Mode::Register>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Company name (optional)"
                            prop:value=move || company_name.get()
                            on:input=move |ev| company_name.set(event_target_value(&ev))
                        />
                        <select
                            class="login-input"
                            prop:value=move || country.get()
                            on:change=move |ev| country.set(event_target_value(&ev))
                        >
                            {COUNTRIES
                                .iter()
                                .map(|(code, name)| view! { <option value=*code>{*name}</option> })
                                .collect_view()}
                        </select>
                    </Show>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@company.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <Show when=move || mode.get() == Mode::Register && !password.get().is_empty()>
                        <div class=move || strength_class(strength())>
                            <span class="strength__label">{move || strength_label(strength())}</span>
                        </div>
                    </Show>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || mode.get().submit_label(busy.get())}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </div>
        </div>
    }
}
