//! Route table: every view the clients can show and who may see it.

#[cfg(test)]
#[path = "route_test.rs"]
mod route_test;

use crate::capability::{ADMINS, APPROVERS, EVERYONE};
use crate::types::Role;

/// A reachable view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    Expenses,
    CreateExpense,
    Approvals,
    TeamExpenses,
    Notifications,
    AdminUsers,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Login,
        Route::Dashboard,
        Route::Expenses,
        Route::CreateExpense,
        Route::Approvals,
        Route::TeamExpenses,
        Route::Notifications,
        Route::AdminUsers,
    ];

    /// Landing page after sign-in and the target of authenticated redirects.
    pub const LANDING: Route = Route::Dashboard;

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Expenses => "/expenses",
            Self::CreateExpense => "/expenses/create",
            Self::Approvals => "/approvals",
            Self::TeamExpenses => "/team/expenses",
            Self::Notifications => "/notifications",
            Self::AdminUsers => "/admin/users",
        }
    }

    /// Match a location path, ignoring a trailing slash and query string.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Roles allowed to see this route. `Login` is the anonymous surface and
    /// is handled by the gate before role checks apply.
    #[must_use]
    pub const fn required_roles(self) -> &'static [Role] {
        match self {
            Self::Login
            | Self::Dashboard
            | Self::Expenses
            | Self::CreateExpense
            | Self::Notifications => EVERYONE,
            Self::Approvals | Self::TeamExpenses => APPROVERS,
            Self::AdminUsers => ADMINS,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Dashboard => "Dashboard",
            Self::Expenses => "My Expenses",
            Self::CreateExpense => "Create Expense",
            Self::Approvals => "Approvals",
            Self::TeamExpenses => "Team Expenses",
            Self::Notifications => "Notifications",
            Self::AdminUsers => "User Management",
        }
    }
}
