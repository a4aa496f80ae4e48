//! Reactive state shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` adapts the session store to signals; `notices` holds the transient
//! toast queue every page reports into.

pub mod auth;
pub mod notices;
