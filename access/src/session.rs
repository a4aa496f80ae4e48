//! Single-owner session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both clients construct exactly one [`SessionStore`] at startup and hand it
//! to every consumer. All session mutations go through `restore`, `login`,
//! `register`, `logout` and `handle_rejection`; consumers only read snapshots.
//!
//! Transport, the persisted credential slot and UI feedback are injected
//! through [`AuthApi`], [`CredentialStore`] and [`SessionListener`] so the
//! same state machine drives the browser and the terminal.
//!
//! INVARIANTS
//! ==========
//! - A user is never held without a credential.
//! - Every credential change bumps the epoch; responses captured under an
//!   older epoch are discarded.
//! - The state lock is never held across an `.await` or a listener call.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::ApiError;
use crate::gate::GateState;
use crate::scope::{RequestTicket, ViewScope};
use crate::types::{AuthResponse, LoginRequest, RegisterRequest, Role, User};

const SESSION_EXPIRED: &str = "Session expired. Please login again.";

/// Backend calls the session store needs.
///
/// Implementations keep a default bearer header that [`AuthApi::set_bearer`]
/// replaces; every later request made through the same client carries it.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    fn set_bearer(&self, credential: Option<&str>);
    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError>;
    /// "Who am I" for the current bearer.
    async fn current_user(&self) -> Result<User, ApiError>;
}

/// The single persisted credential slot.
pub trait CredentialStore {
    fn load(&self) -> Option<String>;
    fn save(&self, credential: &str);
    fn clear(&self);
}

/// UI hooks fired after every state change and for every user-facing notice.
pub trait SessionListener {
    fn state_changed(&self, _state: &AuthState) {}
    fn notice(&self, _notice: Notice) {}
}

impl SessionListener for () {}

/// Severity of a transient notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// A transient, dismissable message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }
}

/// Snapshot of who is signed in.
///
/// Starts unresolved (`loading`) until the stored credential has been checked.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    loading: bool,
    credential: Option<String>,
    user: Option<User>,
    epoch: u64,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            loading: true,
            credential: None,
            user: None,
            epoch: 0,
        }
    }
}

impl AuthState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Number of credential changes so far.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Hold a credential whose identity is not known yet.
    fn adopt_credential(&mut self, credential: String) -> u64 {
        if self.credential.as_deref() != Some(credential.as_str()) {
            self.credential = Some(credential);
            self.user = None;
            self.epoch += 1;
        }
        self.epoch
    }

    fn establish(&mut self, credential: String, user: User) {
        self.credential = Some(credential);
        self.user = Some(user);
        self.loading = false;
        self.epoch += 1;
    }

    fn resolve_user(&mut self, user: User) {
        if self.credential.is_some() {
            self.user = Some(user);
        }
        self.loading = false;
    }

    /// Drop credential and identity. Returns whether a credential was held.
    fn clear(&mut self) -> bool {
        self.loading = false;
        self.user = None;
        if self.credential.take().is_some() {
            self.epoch += 1;
            true
        } else {
            false
        }
    }
}

/// Owner of the session state and the three collaborators that mutate it.
#[derive(Clone)]
pub struct SessionStore<A, S, L> {
    api: A,
    storage: S,
    listener: L,
    state: Arc<Mutex<AuthState>>,
}

impl<A, S, L> SessionStore<A, S, L>
where
    A: AuthApi,
    S: CredentialStore,
    L: SessionListener,
{
    pub fn new(api: A, storage: S, listener: L) -> Self {
        Self {
            api,
            storage,
            listener,
            state: Arc::new(Mutex::new(AuthState::default())),
        }
    }

    /// The transport, carrying the current bearer, for page-level calls.
    pub fn api(&self) -> &A {
        &self.api
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.lock().clone()
    }

    #[must_use]
    pub fn gate(&self) -> GateState {
        GateState::from(&*self.lock())
    }

    /// Resolve the startup state from the persisted credential.
    ///
    /// Fails closed: any error validating a stored credential signs out.
    pub async fn restore(&self) -> GateState {
        let Some(credential) = self.storage.load() else {
            log::info!("session: no stored credential");
            let ((), snapshot) = self.mutate(|state| {
                state.clear();
            });
            self.listener.state_changed(&snapshot);
            return GateState::Anonymous;
        };

        self.api.set_bearer(Some(&credential));
        let (epoch, snapshot) = self.mutate(|state| state.adopt_credential(credential));
        self.listener.state_changed(&snapshot);

        match self.api.current_user().await {
            Ok(user) => {
                let (applied, snapshot) = self.mutate(|state| {
                    if state.epoch != epoch {
                        return false;
                    }
                    state.resolve_user(user);
                    true
                });
                if applied {
                    log::info!("session: restored for {}", snapshot.user().map_or("?", |u| u.email.as_str()));
                    self.listener.state_changed(&snapshot);
                } else {
                    log::debug!("session: discarding stale restore result");
                }
            }
            Err(err) => {
                let (expired, snapshot) = self.mutate(|state| state.epoch == epoch && state.clear());
                if expired {
                    log::warn!("session: stored credential rejected: {err}");
                    self.storage.clear();
                    self.api.set_bearer(None);
                    self.listener.state_changed(&snapshot);
                    self.listener.notice(Notice::error(SESSION_EXPIRED));
                }
            }
        }
        self.gate()
    }

    /// Sign in. Returns `false` (with an error notice) on any failure and
    /// leaves an existing session untouched.
    pub async fn login(&self, email: &str, password: &str) -> bool {
        let request = LoginRequest {
            email: email.trim().to_owned(),
            password: password.to_owned(),
        };
        let epoch = self.lock().epoch;
        match self.api.login(&request).await {
            Ok(response) => self.establish(epoch, response, |user| format!("Welcome back, {}!", user.full_name)),
            Err(err) => {
                log::warn!("session: login failed: {err}");
                self.listener.notice(Notice::error(err.user_message("Login failed")));
                false
            }
        }
    }

    /// Create an account and its company, then sign in as it.
    pub async fn register(&self, profile: &RegisterRequest) -> bool {
        let epoch = self.lock().epoch;
        match self.api.register(profile).await {
            Ok(response) => self.establish(epoch, response, |user| {
                format!("Welcome, {}! Your company has been created.", user.full_name)
            }),
            Err(err) => {
                log::warn!("session: registration failed: {err}");
                self.listener.notice(Notice::error(err.user_message("Registration failed")));
                false
            }
        }
    }

    /// Sign out locally. Always succeeds; repeated calls are no-ops on state.
    pub fn logout(&self) {
        self.storage.clear();
        self.api.set_bearer(None);
        let (held, snapshot) = self.mutate(AuthState::clear);
        if held {
            log::info!("session: logged out");
        }
        self.listener.state_changed(&snapshot);
        self.listener.notice(Notice::success("Logged out successfully"));
    }

    /// Force a logout when an authenticated call was rejected with 401.
    ///
    /// `ticket` is the one taken when the request was issued; a rejection
    /// from an earlier session is ignored. The view it was taken for may
    /// already be closed. Returns whether the session was ended. Only the
    /// first rejection of a session produces a notice.
    pub fn handle_rejection(&self, ticket: &RequestTicket, err: &ApiError) -> bool {
        if !err.is_unauthorized() {
            return false;
        }
        let (held, snapshot) = self.mutate(|state| state.epoch == ticket.epoch() && state.clear());
        if !held {
            if ticket.epoch() != snapshot.epoch {
                log::debug!("session: ignoring rejection from an earlier session");
            }
            return false;
        }
        log::warn!("session: credential rejected by backend");
        self.storage.clear();
        self.api.set_bearer(None);
        self.listener.state_changed(&snapshot);
        self.listener.notice(Notice::error(SESSION_EXPIRED));
        true
    }

    /// Ticket for a request issued by `view` under the current session.
    pub fn ticket(&self, view: &ViewScope) -> RequestTicket {
        RequestTicket::new(self.lock().epoch, view.clone())
    }

    /// Whether a response for `ticket` may still be applied.
    pub fn accepts(&self, ticket: &RequestTicket) -> bool {
        ticket.is_live(self.lock().epoch)
    }

    fn establish(&self, epoch: u64, response: AuthResponse, greeting: impl FnOnce(&User) -> String) -> bool {
        let AuthResponse { access_token, user, .. } = response;
        let message = greeting(&user);
        let credential = access_token.clone();
        let (applied, snapshot) = self.mutate(|state| {
            if state.epoch != epoch {
                return false;
            }
            state.establish(access_token, user);
            true
        });
        if !applied {
            log::info!("session: discarding auth response that raced a session change");
            return false;
        }
        self.storage.save(&credential);
        self.api.set_bearer(Some(&credential));
        log::info!("session: signed in as {}", snapshot.user().map_or("?", |u| u.email.as_str()));
        self.listener.state_changed(&snapshot);
        self.listener.notice(Notice::success(message));
        true
    }

    fn mutate<R>(&self, f: impl FnOnce(&mut AuthState) -> R) -> (R, AuthState) {
        let mut state = self.lock();
        let result = f(&mut state);
        (result, state.clone())
    }

    fn lock(&self) -> MutexGuard<'_, AuthState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
