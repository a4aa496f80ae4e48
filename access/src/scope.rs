//! Lifetime scoping for in-flight requests.
//!
//! A page takes a [`RequestTicket`] before it awaits a response and checks it
//! again before applying the result. The ticket dies when the owning view
//! closes or when the session credential changes (see
//! [`crate::session::SessionStore::accepts`]), so late responses are dropped
//! instead of landing in a view that is gone or belongs to another session.

#[cfg(test)]
#[path = "scope_test.rs"]
mod scope_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Alive flag shared between a mounted view and its async tasks.
#[derive(Clone, Debug)]
pub struct ViewScope {
    open: Arc<AtomicBool>,
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Mark the view as gone. Idempotent.
    pub fn close(&self) {
        self.open.store(false, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Relaxed)
    }
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

/// Proof that a request was issued within a given view and session epoch.
#[derive(Clone, Debug)]
pub struct RequestTicket {
    epoch: u64,
    view: ViewScope,
}

impl RequestTicket {
    pub(crate) fn new(epoch: u64, view: ViewScope) -> Self {
        Self { epoch, view }
    }

    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether a response for this ticket may still be applied.
    #[must_use]
    pub fn is_live(&self, current_epoch: u64) -> bool {
        self.view.is_open() && self.epoch == current_epoch
    }
}
