//! The browser's session store and its bridge into Leptos signals.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser owns exactly one [`ClientSession`], provided through context
//! by `App`. Its [`SignalListener`] mirrors every state change into a
//! `RwSignal<AuthState>` so the route gate, layout and pages re-render
//! reactively, and routes store notices into the toast queue.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use access::{ApiError, AuthState, Notice, SessionListener, SessionStore};
use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::state::notices::{NoticeState, push_notice};
use crate::util::storage::LocalCredentialStore;

/// The browser's session store.
pub type ClientSession = SessionStore<ApiClient, LocalCredentialStore, SignalListener>;

/// Mirrors session changes into the signals provided by `App`.
#[derive(Clone, Copy)]
pub struct SignalListener {
    auth: RwSignal<AuthState>,
    notices: RwSignal<NoticeState>,
}

impl SignalListener {
    pub fn new(auth: RwSignal<AuthState>, notices: RwSignal<NoticeState>) -> Self {
        Self { auth, notices }
    }
}

impl SessionListener for SignalListener {
    fn state_changed(&self, state: &AuthState) {
        self.auth.set(state.clone());
    }

    fn notice(&self, notice: Notice) {
        push_notice(self.notices, notice);
    }
}

/// Report a failed page call with `fallback` or the backend's detail.
///
/// A 401 is silent here: `spawn_scoped` has already handed it to the session
/// store, which ends the session and raises its own notice.
pub fn report_failure(notices: RwSignal<NoticeState>, err: &ApiError, fallback: &str) {
    if err.is_unauthorized() {
        return;
    }
    log::warn!("{fallback}: {err}");
    push_notice(notices, Notice::error(err.user_message(fallback)));
}
