use super::*;

use tokio::sync::oneshot;

// =============================================================
// Fakes for the three collaborators
// =============================================================

#[derive(Default)]
struct FakeApiState {
    login: Option<Result<AuthResponse, ApiError>>,
    register: Option<Result<AuthResponse, ApiError>>,
    me: Option<Result<User, ApiError>>,
    me_calls: usize,
    bearer: Option<String>,
    bearer_seen_by_me: Option<String>,
    login_gate: Option<oneshot::Receiver<()>>,
}

#[derive(Clone, Default)]
struct FakeApi {
    inner: Arc<Mutex<FakeApiState>>,
}

impl FakeApi {
    fn with(configure: impl FnOnce(&mut FakeApiState)) -> Self {
        let api = Self::default();
        configure(&mut api.inner.lock().unwrap());
        api
    }

    fn state(&self) -> MutexGuard<'_, FakeApiState> {
        self.inner.lock().unwrap()
    }
}

fn unconfigured() -> ApiError {
    ApiError::Network("unconfigured".to_owned())
}

impl AuthApi for FakeApi {
    fn set_bearer(&self, credential: Option<&str>) {
        self.state().bearer = credential.map(str::to_owned);
    }

    async fn login(&self, _request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let gate = self.state().login_gate.take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.state().login.clone().unwrap_or_else(|| Err(unconfigured()))
    }

    async fn register(&self, _request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.state().register.clone().unwrap_or_else(|| Err(unconfigured()))
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        let mut state = self.state();
        state.me_calls += 1;
        state.bearer_seen_by_me = state.bearer.clone();
        state.me.clone().unwrap_or_else(|| Err(unconfigured()))
    }
}

#[derive(Clone, Default)]
struct MemoryStore {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryStore {
    fn holding(credential: &str) -> Self {
        let store = Self::default();
        store.save(credential);
        store
    }

    fn get(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.get()
    }

    fn save(&self, credential: &str) {
        *self.slot.lock().unwrap() = Some(credential.to_owned());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

#[derive(Clone, Default)]
struct Recorder {
    notices: Arc<Mutex<Vec<Notice>>>,
    states: Arc<Mutex<Vec<AuthState>>>,
}

impl Recorder {
    fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    fn errors(&self) -> usize {
        self.notices().iter().filter(|n| n.level == NoticeLevel::Error).count()
    }
}

impl SessionListener for Recorder {
    fn state_changed(&self, state: &AuthState) {
        self.states.lock().unwrap().push(state.clone());
    }

    fn notice(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}

type Store = SessionStore<FakeApi, MemoryStore, Recorder>;

fn user(role: Role) -> User {
    User {
        id: "u-1".to_owned(),
        email: "a@b.com".to_owned(),
        full_name: "Ada Lovelace".to_owned(),
        role,
        company_id: "c-1".to_owned(),
        department: None,
        job_title: None,
        manager_id: None,
        is_active: true,
    }
}

fn auth_response(token: &str, role: Role) -> AuthResponse {
    AuthResponse {
        access_token: token.to_owned(),
        token_type: Some("bearer".to_owned()),
        user: user(role),
    }
}

fn store(api: FakeApi, storage: MemoryStore) -> (Store, Recorder) {
    let recorder = Recorder::default();
    (SessionStore::new(api, storage, recorder.clone()), recorder)
}

async fn signed_in(role: Role) -> (Store, FakeApi, MemoryStore, Recorder) {
    let api = FakeApi::with(|s| s.login = Some(Ok(auth_response("T", role))));
    let storage = MemoryStore::default();
    let (store, recorder) = store(api.clone(), storage.clone());
    store.restore().await;
    assert!(store.login("a@b.com", "secret").await);
    (store, api, storage, recorder)
}

// =============================================================
// restore
// =============================================================

#[tokio::test]
async fn starts_unresolved() {
    let (store, _) = store(FakeApi::default(), MemoryStore::default());
    assert_eq!(store.gate(), GateState::Unresolved);
}

#[tokio::test]
async fn restore_without_credential_is_anonymous_and_skips_who_am_i() {
    let api = FakeApi::default();
    let (store, recorder) = store(api.clone(), MemoryStore::default());

    assert_eq!(store.restore().await, GateState::Anonymous);
    assert_eq!(api.state().me_calls, 0);
    assert!(recorder.notices().is_empty());
    assert!(!store.snapshot().is_loading());
}

#[tokio::test]
async fn restore_with_accepted_credential_authenticates() {
    let api = FakeApi::with(|s| s.me = Some(Ok(user(Role::Manager))));
    let storage = MemoryStore::holding("T");
    let (store, recorder) = store(api.clone(), storage.clone());

    assert_eq!(store.restore().await, GateState::Authenticated(Role::Manager));
    assert_eq!(storage.get().as_deref(), Some("T"));
    assert_eq!(api.state().bearer_seen_by_me.as_deref(), Some("T"));
    assert_eq!(store.snapshot().credential(), Some("T"));
    assert!(recorder.notices().is_empty());
}

#[tokio::test]
async fn restore_with_rejected_credential_clears_and_notifies_once() {
    let api = FakeApi::with(|s| s.me = Some(Err(ApiError::Unauthorized { detail: None })));
    let storage = MemoryStore::holding("expired");
    let (store, recorder) = store(api.clone(), storage.clone());

    assert_eq!(store.restore().await, GateState::Anonymous);
    assert_eq!(storage.get(), None);
    assert_eq!(api.state().bearer, None);
    assert_eq!(store.snapshot().credential(), None);
    assert_eq!(recorder.notices(), vec![Notice::error("Session expired. Please login again.")]);
}

#[tokio::test]
async fn restore_fails_closed_on_network_error() {
    let api = FakeApi::with(|s| s.me = Some(Err(ApiError::Network("offline".to_owned()))));
    let storage = MemoryStore::holding("T");
    let (store, recorder) = store(api, storage.clone());

    assert_eq!(store.restore().await, GateState::Anonymous);
    assert_eq!(storage.get(), None);
    assert_eq!(recorder.errors(), 1);
}

#[tokio::test]
async fn credential_never_absent_while_user_present() {
    let api = FakeApi::with(|s| s.me = Some(Ok(user(Role::Employee))));
    let (store, recorder) = store(api, MemoryStore::holding("T"));
    store.restore().await;
    store.logout();

    for state in recorder.states.lock().unwrap().iter() {
        assert!(state.user().is_none() || state.credential().is_some());
    }
}

// =============================================================
// login / register
// =============================================================

#[tokio::test]
async fn login_success_authenticates_and_persists() {
    let api = FakeApi::with(|s| s.login = Some(Ok(auth_response("T", Role::Manager))));
    let storage = MemoryStore::default();
    let (store, recorder) = store(api.clone(), storage.clone());
    store.restore().await;

    assert!(store.login("a@b.com", "secret").await);
    assert_eq!(store.gate(), GateState::Authenticated(Role::Manager));
    assert_eq!(storage.get().as_deref(), Some("T"));
    assert_eq!(api.state().bearer.as_deref(), Some("T"));
    assert_eq!(recorder.notices(), vec![Notice::success("Welcome back, Ada Lovelace!")]);
}

#[tokio::test]
async fn login_failure_reports_detail_and_keeps_state() {
    let api = FakeApi::with(|s| {
        s.login = Some(Err(ApiError::from_response(401, r#"{"detail":"Incorrect email or password"}"#)));
    });
    let (store, recorder) = store(api, MemoryStore::default());
    store.restore().await;
    let before = store.snapshot();

    assert!(!store.login("a@b.com", "wrong").await);
    assert_eq!(store.snapshot(), before);
    assert_eq!(recorder.notices(), vec![Notice::error("Incorrect email or password")]);
}

#[tokio::test]
async fn login_failure_uses_generic_fallback() {
    let (store, recorder) = store(FakeApi::default(), MemoryStore::default());
    store.restore().await;
    assert!(!store.login("a@b.com", "pw").await);
    assert_eq!(recorder.notices(), vec![Notice::error("Login failed")]);
}

#[tokio::test]
async fn failed_login_leaves_existing_session_intact() {
    let (store, api, storage, _) = signed_in(Role::Employee).await;
    api.state().login = Some(Err(ApiError::Network("offline".to_owned())));

    assert!(!store.login("other@b.com", "pw").await);
    assert_eq!(store.gate(), GateState::Authenticated(Role::Employee));
    assert_eq!(storage.get().as_deref(), Some("T"));
}

#[tokio::test]
async fn register_success_is_an_immediate_session() {
    let api = FakeApi::with(|s| s.register = Some(Ok(auth_response("R", Role::Admin))));
    let storage = MemoryStore::default();
    let (store, recorder) = store(api, storage.clone());
    store.restore().await;
    let profile = RegisterRequest {
        email: "a@b.com".to_owned(),
        password: "Secret123!".to_owned(),
        full_name: "Ada Lovelace".to_owned(),
        company_name: Some("Analytical Engines".to_owned()),
        country: "GB".to_owned(),
    };

    assert!(store.register(&profile).await);
    assert_eq!(store.gate(), GateState::Authenticated(Role::Admin));
    assert_eq!(storage.get().as_deref(), Some("R"));
    assert_eq!(
        recorder.notices(),
        vec![Notice::success("Welcome, Ada Lovelace! Your company has been created.")]
    );
}

#[tokio::test]
async fn register_failure_uses_registration_fallback() {
    let (store, recorder) = store(FakeApi::default(), MemoryStore::default());
    store.restore().await;
    let profile = RegisterRequest {
        email: "a@b.com".to_owned(),
        password: "pw".to_owned(),
        full_name: "Ada".to_owned(),
        company_name: None,
        country: "US".to_owned(),
    };
    assert!(!store.register(&profile).await);
    assert_eq!(recorder.notices(), vec![Notice::error("Registration failed")]);
}

#[tokio::test]
async fn login_response_after_session_change_is_discarded() {
    let (gate_tx, gate_rx) = oneshot::channel();
    let (store, api, storage, _) = signed_in(Role::Employee).await;
    {
        let mut state = api.state();
        state.login = Some(Ok(auth_response("LATE", Role::Admin)));
        state.login_gate = Some(gate_rx);
    }

    let (signed_in_again, ()) = tokio::join!(store.login("a@b.com", "secret"), async {
        store.logout();
        let _ = gate_tx.send(());
    });

    assert!(!signed_in_again);
    assert_eq!(store.gate(), GateState::Anonymous);
    assert_eq!(storage.get(), None);
    assert_eq!(api.state().bearer, None);
}

// =============================================================
// logout / rejection
// =============================================================

#[tokio::test]
async fn logout_clears_everything_without_network() {
    let (store, api, storage, _) = signed_in(Role::Manager).await;
    let me_calls = api.state().me_calls;

    store.logout();

    assert_eq!(store.gate(), GateState::Anonymous);
    assert_eq!(storage.get(), None);
    assert_eq!(api.state().bearer, None);
    assert_eq!(api.state().me_calls, me_calls);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let (store, _, _, _) = signed_in(Role::Employee).await;
    store.logout();
    let once = store.snapshot();
    store.logout();
    assert_eq!(store.snapshot(), once);
}

#[tokio::test]
async fn logout_before_restore_resolves_to_anonymous() {
    let (store, _) = store(FakeApi::default(), MemoryStore::default());
    store.logout();
    assert_eq!(store.gate(), GateState::Anonymous);
}

#[tokio::test]
async fn unauthorized_page_call_forces_logout_once() {
    let (store, _, storage, recorder) = signed_in(Role::Employee).await;
    let rejected = ApiError::Unauthorized { detail: None };
    let ticket = store.ticket(&ViewScope::new());

    assert!(store.handle_rejection(&ticket, &rejected));
    assert!(!store.handle_rejection(&ticket, &rejected));
    assert_eq!(store.gate(), GateState::Anonymous);
    assert_eq!(storage.get(), None);
    assert_eq!(recorder.errors(), 1);
}

#[tokio::test]
async fn other_errors_do_not_end_the_session() {
    let (store, _, _, _) = signed_in(Role::Employee).await;
    let forbidden = ApiError::from_response(403, r#"{"detail":"Only managers"}"#);
    assert!(!store.handle_rejection(&store.ticket(&ViewScope::new()), &forbidden));
    assert_eq!(store.gate(), GateState::Authenticated(Role::Employee));
}

#[tokio::test]
async fn rejection_from_an_earlier_session_is_ignored() {
    let (store, _, storage, recorder) = signed_in(Role::Employee).await;
    let stale = store.ticket(&ViewScope::new());
    store.logout();
    assert!(store.login("a@b.com", "secret").await);

    assert!(!store.handle_rejection(&stale, &ApiError::Unauthorized { detail: None }));
    assert_eq!(store.gate(), GateState::Authenticated(Role::Employee));
    assert_eq!(storage.get().as_deref(), Some("T"));
    assert_eq!(recorder.errors(), 0);
}

#[tokio::test]
async fn rejection_after_the_view_closed_still_ends_the_session() {
    let (store, _, storage, _) = signed_in(Role::Manager).await;
    let view = ViewScope::new();
    let ticket = store.ticket(&view);
    view.close();

    assert!(store.handle_rejection(&ticket, &ApiError::Unauthorized { detail: None }));
    assert_eq!(store.gate(), GateState::Anonymous);
    assert_eq!(storage.get(), None);
}

// =============================================================
// request tickets
// =============================================================

#[tokio::test]
async fn ticket_taken_before_logout_is_rejected_after() {
    let (store, _, _, _) = signed_in(Role::Employee).await;
    let view = ViewScope::new();
    let ticket = store.ticket(&view);
    assert!(store.accepts(&ticket));

    store.logout();
    assert!(!store.accepts(&ticket));
}

#[tokio::test]
async fn ticket_from_closed_view_is_rejected() {
    let (store, _, _, _) = signed_in(Role::Employee).await;
    let view = ViewScope::new();
    let ticket = store.ticket(&view);
    view.close();
    assert!(!store.accepts(&ticket));
}
