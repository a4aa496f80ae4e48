//! Backend endpoint paths, relative to the configured API base.
//!
//! Ids are percent-encoded into a single path segment; a bare `.` or `..` id
//! has its dots encoded too so it can never resolve to a parent path.

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use std::borrow::Cow;

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_ME: &str = "/auth/me";
pub const EXPENSES: &str = "/expenses";
pub const EXPENSES_PENDING: &str = "/expenses/pending";
pub const DASHBOARD_STATS: &str = "/dashboard/stats";
pub const ANALYTICS_EXPENSES: &str = "/analytics/expenses";
pub const CATEGORIES: &str = "/categories";
pub const ADMIN_USERS: &str = "/admin/users";
pub const MANAGER_TEAM: &str = "/manager/team";
pub const MANAGER_TEAM_EXPENSES: &str = "/manager/team/expenses";
pub const MANAGER_TEAM_PENDING: &str = "/manager/team/pending";
pub const POLICIES: &str = "/policies";
pub const REPORTS: &str = "/reports";
pub const NOTIFICATIONS: &str = "/notifications";

#[must_use]
pub fn approve_expense(expense_id: &str) -> String {
    format!("/expenses/{}/approve", segment(expense_id))
}

#[must_use]
pub fn admin_user(user_id: &str) -> String {
    format!("{ADMIN_USERS}/{}", segment(user_id))
}

#[must_use]
pub fn user(user_id: &str) -> String {
    format!("/users/{}", segment(user_id))
}

#[must_use]
pub fn policy(policy_id: &str) -> String {
    format!("{POLICIES}/{}", segment(policy_id))
}

#[must_use]
pub fn submit_report(report_id: &str) -> String {
    format!("{REPORTS}/{}/submit", segment(report_id))
}

#[must_use]
pub fn mark_notification_read(notification_id: &str) -> String {
    format!("{NOTIFICATIONS}/{}/read", segment(notification_id))
}

/// `/analytics/expenses` with its optional filters as a query string.
#[must_use]
pub fn analytics(start_date: Option<&str>, end_date: Option<&str>, category: Option<&str>) -> String {
    let params: Vec<String> = [("start_date", start_date), ("end_date", end_date), ("category", category)]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value?.trim();
            (!value.is_empty()).then(|| format!("{key}={}", urlencoding::encode(value)))
        })
        .collect();
    if params.is_empty() {
        ANALYTICS_EXPENSES.to_owned()
    } else {
        format!("{ANALYTICS_EXPENSES}?{}", params.join("&"))
    }
}

/// Join a base URL and an endpoint path without doubling the slash.
#[must_use]
pub fn join(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn segment(id: &str) -> Cow<'_, str> {
    match id {
        "." | ".." => Cow::Owned(id.replace('.', "%2E")),
        _ => urlencoding::encode(id),
    }
}
