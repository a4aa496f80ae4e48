//! The one authorization predicate used for client-side gating.
//!
//! Gating here only decides what is offered; the backend still rejects
//! unauthorized calls on its own.

#[cfg(test)]
#[path = "capability_test.rs"]
mod capability_test;

use crate::types::Role;

/// Whether `role` is a member of `required`. An absent role never passes.
#[must_use]
pub fn can_access(role: Option<Role>, required: &[Role]) -> bool {
    role.is_some_and(|role| required.contains(&role))
}

/// Roles that may review and decide on other people's expenses.
pub const APPROVERS: &[Role] = &[Role::Admin, Role::Manager];

/// Every role.
pub const EVERYONE: &[Role] = &Role::ALL;

/// Company administrators only.
pub const ADMINS: &[Role] = &[Role::Admin];
