//! "My Expenses" page: the caller's own expenses with search, status and
//! category filters.

#[cfg(test)]
#[path = "expenses_test.rs"]
mod expenses_test;

use access::ApiError;
use access::expenses::{ExpenseFilter, SortKey, SortOrder, apply, parse_sort, unique_categories};
use access::format::status_label;
use access::types::{Expense, ExpenseStatus};
use leptos::prelude::*;

use crate::components::expense_table::ExpenseTable;
use crate::state::auth::{ClientSession, report_failure};
use crate::state::notices::NoticeState;
use crate::util::scope::{spawn_scoped, use_view_scope};

/// Select value meaning "no constraint".
pub(crate) const ANY: &str = "all";

/// Build a filter from raw control values; [`ANY`] or blank means unfiltered.
pub(crate) fn build_filter(search: &str, status: &str, category: &str) -> ExpenseFilter {
    let chosen = |value: &str| {
        let value = value.trim();
        (!value.is_empty() && value != ANY).then(|| value.to_owned())
    };
    ExpenseFilter {
        search: search.to_owned(),
        status: status.parse::<ExpenseStatus>().ok(),
        category: chosen(category),
        ..ExpenseFilter::default()
    }
}

/// Sort order from a select value, newest first when unrecognized.
pub(crate) fn sort_from(value: &str) -> (SortKey, SortOrder) {
    parse_sort(value).unwrap_or_default()
}

/// Options offered by the sort select.
pub(crate) const SORT_OPTIONS: &[(&str, &str)] = &[
    ("date-desc", "Newest first"),
    ("date-asc", "Oldest first"),
    ("amount-desc", "Amount: high to low"),
    ("amount-asc", "Amount: low to high"),
    ("status-asc", "Status"),
    ("category-asc", "Category"),
];

#[component]
pub fn ExpensesPage() -> impl IntoView {
    let session = expect_context::<ClientSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = use_view_scope();

    let expenses = RwSignal::new(Vec::<Expense>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(ANY.to_owned());
    let category = RwSignal::new(ANY.to_owned());
    let sort = RwSignal::new("date-desc".to_owned());

    let on_loaded = move |result: Result<Vec<Expense>, ApiError>| {
        match result {
            Ok(list) => expenses.set(list),
            Err(err) => report_failure(notices, &err, "Failed to load expenses"),
        }
        loading.set(false);
    };
    spawn_scoped(&session, &scope, |api| async move { api.expenses().await }, on_loaded);

    let visible = Signal::derive(move || {
        let filter = build_filter(&search.get(), &status.get(), &category.get());
        let (key, order) = sort_from(&sort.get());
        expenses.with(|list| apply(list, &filter, key, order))
    });
    let categories = move || expenses.with(|list| unique_categories(list));

    view! {
        <div class="expenses-page">
            <div class="filters">
                <input
                    class="filters__search"
                    type="search"
                    placeholder="Search expenses"
                    prop:value=move || search.get()
                    on:input=move |ev| search.set(event_target_value(&ev))
                />
                <select prop:value=move || status.get() on:change=move |ev| status.set(event_target_value(&ev))>
                    <option value=ANY>"All statuses"</option>
                    {ExpenseStatus::KNOWN
                        .iter()
                        .map(|s| view! { <option value=s.as_str()>{status_label(*s)}</option> })
                        .collect_view()}
                </select>
                <select prop:value=move || category.get() on:change=move |ev| category.set(event_target_value(&ev))>
                    <option value=ANY>"All categories"</option>
                    {move || {
                        categories()
                            .into_iter()
                            .map(|name| view! { <option value=name.clone()>{name.clone()}</option> })
                            .collect_view()
                    }}
                </select>
                <select prop:value=move || sort.get() on:change=move |ev| sort.set(event_target_value(&ev))>
                    {SORT_OPTIONS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <div class="spinner"></div> }>
                <ExpenseTable expenses=visible/>
            </Show>
        </div>
    }
}
