//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the authenticated shell and small shared widgets while
//! reading the session and notice signals from Leptos context.

pub mod expense_table;
pub mod layout;
pub mod status_badge;
pub mod toasts;
