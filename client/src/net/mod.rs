//! Networking modules for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps every backend call behind one bearer-carrying client; wire
//! types come from `access::types`.

pub mod api;
