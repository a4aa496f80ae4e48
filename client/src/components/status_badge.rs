//! Colored pill for an expense status.

#[cfg(test)]
#[path = "status_badge_test.rs"]
mod status_badge_test;

use access::format::status_label;
use access::types::ExpenseStatus;
use leptos::prelude::*;

fn badge_class(status: ExpenseStatus) -> &'static str {
    match status {
        ExpenseStatus::Pending => "badge badge--pending",
        ExpenseStatus::Approved => "badge badge--approved",
        ExpenseStatus::Rejected => "badge badge--rejected",
        ExpenseStatus::Reimbursed => "badge badge--reimbursed",
        ExpenseStatus::Unknown => "badge",
    }
}

#[component]
pub fn StatusBadge(status: ExpenseStatus) -> impl IntoView {
    view! { <span class=badge_class(status)>{status_label(status)}</span> }
}
