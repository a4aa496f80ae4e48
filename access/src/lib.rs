//! Session, authorization and routing model shared by the ExpenseFlow clients.
//!
//! This crate owns everything the browser frontend (`client`) and the terminal
//! client (`cli`) agree on: the wire types exchanged with the REST backend, the
//! single-owner session store, the route gate, role-filtered navigation, and
//! the small client-side helpers (validation, list filtering, formatting) the
//! pages share. It performs no I/O itself; transport and credential storage
//! are injected through the traits in [`session`].

pub mod capability;
pub mod endpoints;
pub mod error;
pub mod expenses;
pub mod export;
pub mod format;
pub mod gate;
pub mod nav;
pub mod route;
pub mod scope;
pub mod session;
pub mod types;
pub mod validate;

pub use capability::can_access;
pub use error::{ApiError, ValidationError, decode_response};
pub use gate::{GateState, RouteDecision, decide};
pub use nav::{NAV_ITEMS, NavItem, visible_items};
pub use route::Route;
pub use scope::{RequestTicket, ViewScope};
pub use session::{AuthApi, AuthState, CredentialStore, Notice, NoticeLevel, SessionListener, SessionStore};
pub use types::{Role, User};
