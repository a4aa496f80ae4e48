//! Role-gated navigation.
//!
//! Filtering is a pure function of the static item list and the current role,
//! so layouts may recompute it on every render.

#[cfg(test)]
#[path = "nav_test.rs"]
mod nav_test;

use crate::capability::can_access;
use crate::route::Route;
use crate::types::Role;

/// One entry of the primary navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub route: Route,
    /// Icon name understood by the layout's icon set.
    pub icon: &'static str,
    pub roles: &'static [Role],
}

impl NavItem {
    const fn for_route(label: &'static str, route: Route, icon: &'static str) -> Self {
        Self {
            label,
            route,
            icon,
            roles: route.required_roles(),
        }
    }
}

/// Primary navigation in display order.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem::for_route("Dashboard", Route::Dashboard, "layout-dashboard"),
    NavItem::for_route("My Expenses", Route::Expenses, "receipt"),
    NavItem::for_route("Create Expense", Route::CreateExpense, "plus"),
    NavItem::for_route("Approvals", Route::Approvals, "check-circle"),
    NavItem::for_route("Team Expenses", Route::TeamExpenses, "users-round"),
    NavItem::for_route("Notifications", Route::Notifications, "bell"),
    NavItem::for_route("User Management", Route::AdminUsers, "users"),
];

/// Items whose role set contains `role`, in their original order.
#[must_use]
pub fn visible_items(items: &[NavItem], role: Option<Role>) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| can_access(role, item.roles))
        .copied()
        .collect()
}
