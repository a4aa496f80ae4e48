//! Browser-facing helpers: wall clock, view scopes, credential storage,
//! file downloads and a seeded random source.
//!
//! SYSTEM CONTEXT
//! ==============
//! `clock`, `storage`, `download` and `entropy` fall back to native stand-ins
//! outside the `csr` feature, which is how page and component helpers run
//! under `cargo test`.

pub mod clock;
pub mod download;
pub mod entropy;
pub mod scope;
pub mod storage;
