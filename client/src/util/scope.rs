//! View-scoped async requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages start their fetches through [`spawn_scoped`]. The request takes a
//! ticket from the session store before awaiting and the result is applied
//! only if the page is still mounted and the session has not changed since.
//! A 401 goes to the store with that ticket, so a rejection of an earlier
//! credential never ends a newer session.

use std::future::Future;

use access::{ApiError, ViewScope};
use leptos::prelude::*;

use crate::net::api::ApiClient;
use crate::state::auth::ClientSession;

/// A [`ViewScope`] closed when the current reactive owner is cleaned up.
pub fn use_view_scope() -> ViewScope {
    let scope = ViewScope::new();
    let closing = scope.clone();
    on_cleanup(move || closing.close());
    scope
}

/// Run `request` and hand its result to `apply` unless it went stale.
pub fn spawn_scoped<T, Fut>(
    session: &ClientSession,
    scope: &ViewScope,
    request: impl FnOnce(ApiClient) -> Fut,
    apply: impl FnOnce(Result<T, ApiError>) + 'static,
) where
    T: 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let ticket = session.ticket(scope);
    let pending = request(session.api().clone());
    let session = session.clone();
    leptos::task::spawn_local(async move {
        let result = pending.await;
        if let Err(err) = &result {
            session.handle_rejection(&ticket, err);
        }
        if session.accepts(&ticket) {
            apply(result);
        } else {
            log::debug!("scope: dropping response for a closed view or ended session");
        }
    });
}
