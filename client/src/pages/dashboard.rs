//! Dashboard page: headline counters and the most recent expenses.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated landing route. Counters come from `/dashboard/stats`,
//! whose shape depends on the role; approvers additionally get a shortcut to
//! the approval queue.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use access::capability::APPROVERS;
use access::expenses::{SortKey, SortOrder, sort_expenses};
use access::format::{format_currency, format_date};
use access::types::{DashboardStats, Expense};
use access::{ApiError, AuthState, Route, can_access};
use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::status_badge::StatusBadge;
use crate::state::auth::{ClientSession, report_failure};
use crate::state::notices::NoticeState;
use crate::util::scope::{spawn_scoped, use_view_scope};

/// How many recent expenses the dashboard lists.
const RECENT_LIMIT: usize = 5;

/// Newest first, capped at [`RECENT_LIMIT`].
fn recent_expenses(mut expenses: Vec<Expense>) -> Vec<Expense> {
    sort_expenses(&mut expenses, SortKey::Date, SortOrder::Desc);
    expenses.truncate(RECENT_LIMIT);
    expenses
}

/// Label and value of each counter card.
fn stat_cards(stats: &DashboardStats) -> Vec<(&'static str, String)> {
    let mut cards = vec![
        ("Total expenses", stats.total_expenses.to_string()),
        ("Pending", stats.pending_expenses.to_string()),
        ("Approved", stats.approved_expenses.to_string()),
    ];
    if let Some(amount) = stats.total_amount {
        cards.push(("Total amount", format_currency(amount, "USD")));
    }
    if let Some(users) = stats.total_users {
        cards.push(("Team members", users.to_string()));
    }
    cards
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<ClientSession>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let scope = use_view_scope();

    let stats = RwSignal::new(None::<DashboardStats>);
    let recent = RwSignal::new(Vec::<Expense>::new());
    let loading = RwSignal::new(true);

    let on_stats = move |result: Result<DashboardStats, ApiError>| {
        match result {
            Ok(value) => stats.set(Some(value)),
            Err(err) => report_failure(notices, &err, "Failed to load dashboard"),
        }
        loading.set(false);
    };
    spawn_scoped(&session, &scope, |api| async move { api.dashboard_stats().await }, on_stats);

    let on_recent = move |result: Result<Vec<Expense>, ApiError>| match result {
        Ok(list) => recent.set(recent_expenses(list)),
        Err(err) => report_failure(notices, &err, "Failed to load expenses"),
    };
    spawn_scoped(&session, &scope, |api| async move { api.expenses().await }, on_recent);

    let greeting = move || {
        auth.get()
            .user()
            .map(|user| format!("Welcome, {}", user.full_name))
            .unwrap_or_default()
    };
    let is_approver = move || can_access(auth.get().role(), APPROVERS);

    view! {
        <div class="dashboard">
            <h2 class="dashboard__greeting">{greeting}</h2>
            <Show when=move || !loading.get() fallback=|| view! { <div class="spinner"></div> }>
                <div class="dashboard__stats">
                    {move || {
                        stats
                            .get()
                            .map(|value| {
                                stat_cards(&value)
                                    .into_iter()
                                    .map(|(label, value)| {
                                        view! {
                                            <div class="stat-card">
                                                <span class="stat-card__label">{label}</span>
                                                <span class="stat-card__value">{value}</span>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            })
                    }}
                </div>
            </Show>
            <div class="dashboard__actions">
                <A href=Route::CreateExpense.path()>"New expense"</A>
                <Show when=is_approver>
                    <A href=Route::Approvals.path()>"Review approvals"</A>
                </Show>
            </div>
            <section class="dashboard__recent">
                <h3>"Recent expenses"</h3>
                <Show
                    when=move || !recent.get().is_empty()
                    fallback=|| view! { <p class="empty">"No expenses yet."</p> }
                >
                    <ul class="expense-list">
                        {move || {
                            recent
                                .get()
                                .into_iter()
                                .map(|expense| {
                                    view! {
                                        <li class="expense-list__row">
                                            <span class="expense-list__description">{expense.description.clone()}</span>
                                            <span class="expense-list__date">{format_date(&expense.date)}</span>
                                            <span class="expense-list__amount">
                                                {format_currency(expense.amount, &expense.currency)}
                                            </span>
                                            <StatusBadge status=expense.status/>
                                        </li>
                                    }
                                })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </section>
        </div>
    }
}
