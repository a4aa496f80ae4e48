//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (fetches tied to its view scope,
//! form state) and delegates rendering details to `components`. The route
//! gate in `app` decides which page renders; pages never check roles for
//! access themselves.

pub mod admin_users;
pub mod approvals;
pub mod create_expense;
pub mod dashboard;
pub mod expenses;
pub mod login;
pub mod notifications;
pub mod team_expenses;
