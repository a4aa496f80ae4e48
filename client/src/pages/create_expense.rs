//! Create-expense form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Categories are loaded from `/categories`; the form validates locally and
//! posts to `/expenses`, then returns to the personal expense list. Categories
//! flagged `requires_receipt` show a reminder next to the select.

#[cfg(test)]
#[path = "create_expense_test.rs"]
mod create_expense_test;

use access::types::{Category, Expense};
use access::validate::validate_new_expense;
use access::{ApiError, Notice, Route};
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::state::auth::{ClientSession, report_failure};
use crate::state::notices::{NoticeState, push_notice};
use crate::util::clock::today_iso;
use crate::util::scope::{spawn_scoped, use_view_scope};

/// Currencies offered by the form.
pub const CURRENCIES: &[&str] = &["USD", "EUR", "GBP", "CAD", "AUD", "INR", "JPY"];

/// Whether the selected category asks for a receipt.
fn needs_receipt(categories: &[Category], selected: &str) -> bool {
    categories
        .iter()
        .any(|category| category.name == selected && category.requires_receipt)
}

#[component]
pub fn CreateExpensePage() -> impl IntoView {
    let session = expect_context::<ClientSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = use_view_scope();
    let navigate = use_navigate();

    let categories = RwSignal::new(Vec::<Category>::new());
    let amount = RwSignal::new(String::new());
    let currency = RwSignal::new(CURRENCIES[0].to_owned());
    let category = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let date = RwSignal::new(today_iso());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let created = RwSignal::new(false);

    let on_categories = move |result: Result<Vec<Category>, ApiError>| match result {
        Ok(list) => categories.set(list),
        Err(err) => report_failure(notices, &err, "Failed to load categories"),
    };
    spawn_scoped(&session, &scope, |api| async move { api.categories().await }, on_categories);

    Effect::new(move || {
        if created.get() {
            navigate(Route::Expenses.path(), NavigateOptions::default());
        }
    });

    let session = StoredValue::new(session);
    let scope = StoredValue::new(scope);
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let validated = validate_new_expense(
            &amount.get_untracked(),
            &currency.get_untracked(),
            &category.get_untracked(),
            &description.get_untracked(),
            &date.get_untracked(),
        );
        let expense = match validated {
            Ok(expense) => expense,
            Err(err) => {
                error.set(Some(err.to_string()));
                return;
            }
        };
        error.set(None);
        busy.set(true);
        let session = session.get_value();
        let on_created = move |result: Result<Expense, ApiError>| {
            busy.set(false);
            match result {
                Ok(_) => {
                    push_notice(notices, Notice::success("Expense created successfully"));
                    created.set(true);
                }
                Err(err) => report_failure(notices, &err, "Failed to create expense"),
            }
        };
        spawn_scoped(
            &session,
            &scope.get_value(),
            move |api| async move { api.create_expense(&expense).await },
            on_created,
        );
    };

    view! {
        <form class="expense-form" on:submit=on_submit>
            <label class="expense-form__field">
                <span>"Amount"</span>
                <input
                    type="text"
                    inputmode="decimal"
                    placeholder="0.00"
                    prop:value=move || amount.get()
                    on:input=move |ev| amount.set(event_target_value(&ev))
                />
            </label>
            <label class="expense-form__field">
                <span>"Currency"</span>
                <select prop:value=move || currency.get() on:change=move |ev| currency.set(event_target_value(&ev))>
                    {CURRENCIES.iter().map(|code| view! { <option value=*code>{*code}</option> }).collect_view()}
                </select>
            </label>
            <label class="expense-form__field">
                <span>"Category"</span>
                <select prop:value=move || category.get() on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value="">"Select a category"</option>
                    {move || {
                        categories
                            .get()
                            .into_iter()
                            .map(|c| view! { <option value=c.name.clone()>{c.label.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <Show when=move || categories.with(|list| needs_receipt(list, &category.get()))>
                    <span class="expense-form__hint">"A receipt is required for this category."</span>
                </Show>
            </label>
            <label class="expense-form__field">
                <span>"Description"</span>
                <textarea
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
            </label>
            <label class="expense-form__field">
                <span>"Date"</span>
                <input type="date" prop:value=move || date.get() on:input=move |ev| date.set(event_target_value(&ev))/>
            </label>
            <Show when=move || error.get().is_some()>
                <p class="form-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Saving..." } else { "Create expense" }}
            </button>
        </form>
    }
}
