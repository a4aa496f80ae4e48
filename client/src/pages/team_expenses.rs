//! Team expense overview for managers and admins.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads `/manager/team/expenses` once, then filters by text, status,
//! employee and a relative date window, sorts by any column, and summarizes
//! the filtered set with per-status counts and amounts. The filtered set can
//! be exported as CSV.

#[cfg(test)]
#[path = "team_expenses_test.rs"]
mod team_expenses_test;

use access::expenses::{DateRange, ExpenseFilter, TeamStats, apply};
use access::export::{expenses_csv, team_export_file_name};
use access::format::{format_currency, status_label};
use access::types::{Expense, ExpenseStatus};
use access::{ApiError, Notice};
use leptos::prelude::*;
use time::OffsetDateTime;

use crate::components::expense_table::ExpenseTable;
use crate::pages::expenses::{ANY, SORT_OPTIONS, build_filter, sort_from};
use crate::state::auth::{ClientSession, report_failure};
use crate::state::notices::{NoticeState, push_notice};
use crate::util::clock::{now_utc, today_iso};
use crate::util::download::save_text;
use crate::util::scope::{spawn_scoped, use_view_scope};

const DATE_RANGES: &[(&str, &str)] = &[
    ("all", "All time"),
    ("week", "Last 7 days"),
    ("month", "Last month"),
    ("quarter", "Last 3 months"),
    ("year", "Last year"),
];

/// Distinct employees as `(id, name)`, sorted by name.
fn employee_options(expenses: &[Expense]) -> Vec<(String, String)> {
    let mut options: Vec<(String, String)> = Vec::new();
    for expense in expenses {
        if options.iter().any(|(id, _)| *id == expense.employee_id) {
            continue;
        }
        let name = expense
            .employee_name
            .clone()
            .unwrap_or_else(|| expense.employee_id.clone());
        options.push((expense.employee_id.clone(), name));
    }
    options.sort_by(|a, b| a.1.to_lowercase().cmp(&b.1.to_lowercase()));
    options
}

/// Filter for the team view, with the date window resolved against `now`.
fn team_filter(search: &str, status: &str, employee: &str, range: &str, now: OffsetDateTime) -> ExpenseFilter {
    let employee = employee.trim();
    ExpenseFilter {
        employee_id: (!employee.is_empty() && employee != ANY).then(|| employee.to_owned()),
        since: range.parse::<DateRange>().unwrap_or_default().cutoff(now),
        ..build_filter(search, status, ANY)
    }
}

/// Outcome notice of exporting `expenses`; `save` receives the file name and
/// the CSV text and reports whether the download started.
fn export_expenses(expenses: &[Expense], today: &str, save: impl FnOnce(&str, &str) -> bool) -> Notice {
    if expenses.is_empty() {
        return Notice::info("No expenses to export");
    }
    match expenses_csv(expenses) {
        Ok(csv) if save(&team_export_file_name(today), &csv) => Notice::success("Expenses exported successfully"),
        Ok(_) => Notice::error("Failed to export expenses"),
        Err(err) => {
            log::warn!("export: {err}");
            Notice::error("Failed to export expenses")
        }
    }
}

#[component]
pub fn TeamExpensesPage() -> impl IntoView {
    let session = expect_context::<ClientSession>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = use_view_scope();

    let expenses = RwSignal::new(Vec::<Expense>::new());
    let loading = RwSignal::new(true);
    let search = RwSignal::new(String::new());
    let status = RwSignal::new(ANY.to_owned());
    let employee = RwSignal::new(ANY.to_owned());
    let range = RwSignal::new(ANY.to_owned());
    let sort = RwSignal::new("date-desc".to_owned());

    let on_loaded = move |result: Result<Vec<Expense>, ApiError>| {
        match result {
            Ok(list) => expenses.set(list),
            Err(err) => report_failure(notices, &err, "Failed to load team expenses"),
        }
        loading.set(false);
    };
    spawn_scoped(&session, &scope, |api| async move { api.team_expenses().await }, on_loaded);

    let visible = Signal::derive(move || {
        let filter = team_filter(&search.get(), &status.get(), &employee.get(), &range.get(), now_utc());
        let (key, order) = sort_from(&sort.get());
        expenses.with(|list| apply(list, &filter, key, order))
    });
    let stats = Memo::new(move |_| visible.with(|list| TeamStats::from_expenses(list)));

    let on_export = move |_: leptos::ev::MouseEvent| {
        let notice = visible.with_untracked(|list| {
            export_expenses(list, &today_iso(), |name, csv| save_text(name, "text/csv", csv))
        });
        push_notice(notices, notice);
    };

    view! {
        <div class="team-page">
            <div class="team-page__stats">
                <div class="stat-card">
                    <span class="stat-card__label">"Expenses"</span>
                    <span class="stat-card__value">{move || stats.get().total}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-card__label">"Total"</span>
                    <span class="stat-card__value">{move || format_currency(stats.get().total_amount, "USD")}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-card__label">"Pending"</span>
                    <span class="stat-card__value">
                        {move || {
                            let s = stats.get();
                            format!("{} · {}", s.pending, format_currency(s.pending_amount, "USD"))
                        }}
                    </span>
                </div>
                <div class="stat-card">
                    <span class="stat-card__label">"Approved"</span>
                    <span class="stat-card__value">
                        {move || {
                            let s = stats.get();
                            format!("{} · {}", s.approved, format_currency(s.approved_amount, "USD"))
                        }}
                    </span>
                </div>
                <div class="stat-card">
                    <span class="stat-card__label">"Average"</span>
                    <span class="stat-card__value">
                        {move || format_currency(stats.get().average_amount(), "USD")}
                    </span>
                </div>
            </div>
            <div class="filters">
                <input
                    class="filters__search"
                    type="search"
                    placeholder="Search team expenses"
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
                <select prop:value=move || employee.get() on:change=move |ev| employee.set(event_target_value(&ev))>
                    <option value=ANY>"All employees"</option>
                    {move || {
                        expenses
                            .with(|list| employee_options(list))
                            .into_iter()
                            .map(|(id, name)| view! { <option value=id>{name}</option> })
                            .collect_view()
                    }}
                </select>
                <select prop:value=move || range.get() on:change=move |ev| range.set(event_target_value(&ev))>
                    {DATE_RANGES
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                </select>
                <select prop:value=move || sort.get() on:change=move |ev| sort.set(event_target_value(&ev))>
                    {SORT_OPTIONS
                        .iter()
                        .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                        .collect_view()}
                    <option value="employee-asc">"Employee"</option>
                </select>
                <button class="btn btn--ghost" on:click=on_export>
                    "Export CSV"
                </button>
            </div>
            <Show when=move || !loading.get() fallback=|| view! { <div class="spinner"></div> }>
                <ExpenseTable expenses=visible show_employee=true/>
            </Show>
        </div>
    }
}
