//! Route gate: which view a location resolves to for the current session.
//!
//! DESIGN
//! ======
//! The gate state is derived from [`AuthState`], never stored separately, so
//! it can only move through the session store's operations:
//!
//! - `Unresolved -> Anonymous | Authenticated(role)` when restore finishes
//! - `Anonymous -> Authenticated(role)` on login or registration
//! - `Authenticated(role) -> Anonymous` on logout or a rejected credential

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use crate::capability::can_access;
use crate::route::Route;
use crate::session::AuthState;
use crate::types::Role;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateState {
    /// The stored credential has not been checked yet.
    Unresolved,
    Anonymous,
    Authenticated(Role),
}

impl GateState {
    #[must_use]
    pub fn role(self) -> Option<Role> {
        match self {
            Self::Authenticated(role) => Some(role),
            Self::Unresolved | Self::Anonymous => None,
        }
    }
}

impl From<&AuthState> for GateState {
    fn from(state: &AuthState) -> Self {
        if state.is_loading() {
            return Self::Unresolved;
        }
        match state.role() {
            Some(role) => Self::Authenticated(role),
            None => Self::Anonymous,
        }
    }
}

/// Outcome of gating one navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show a loading indicator and do not navigate.
    Loading,
    Render(Route),
    /// Replace the current location with this route.
    Redirect(Route),
}

/// Decide what `path` shows for `state`.
#[must_use]
pub fn decide(state: GateState, path: &str) -> RouteDecision {
    let route = Route::from_path(path);
    match state {
        GateState::Unresolved => RouteDecision::Loading,
        GateState::Anonymous => match route {
            Some(Route::Login) => RouteDecision::Render(Route::Login),
            _ => RouteDecision::Redirect(Route::Login),
        },
        GateState::Authenticated(role) => match route {
            Some(route) if route != Route::Login && can_access(Some(role), route.required_roles()) => {
                RouteDecision::Render(route)
            }
            _ => RouteDecision::Redirect(Route::LANDING),
        },
    }
}
