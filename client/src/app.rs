//! Root application component with context providers and the route gate.
//!
//! SYSTEM CONTEXT
//! ==============
//! `App` builds the single session store, publishes it and its mirrored
//! signals through context, and starts the stored-credential check. `Gate`
//! then maps every location change through `access::decide`: it shows a
//! loading screen while unresolved, redirects when required, and otherwise
//! renders the page inside the authenticated layout.

use access::{AuthState, GateState, Route, RouteDecision, SessionStore, decide};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::NavigateOptions;
use leptos_router::components::Router;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::layout::Layout;
use crate::components::toasts::Toasts;
use crate::net::api::ApiClient;
use crate::pages::{
    admin_users::AdminUsersPage, approvals::ApprovalsPage, create_expense::CreateExpensePage,
    dashboard::DashboardPage, expenses::ExpensesPage, login::LoginPage, notifications::NotificationsPage,
    team_expenses::TeamExpensesPage,
};
use crate::state::auth::{ClientSession, SignalListener};
use crate::state::notices::NoticeState;
use crate::util::storage::LocalCredentialStore;

/// Root application component.
///
/// Provides the session store and its signals, then sets up routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let auth = RwSignal::new(AuthState::default());
    let notices = RwSignal::new(NoticeState::default());
    provide_context(auth);
    provide_context(notices);

    let session: ClientSession = SessionStore::new(
        ApiClient::from_env(),
        LocalCredentialStore,
        SignalListener::new(auth, notices),
    );
    provide_context(session.clone());

    leptos::task::spawn_local(async move {
        let gate = session.restore().await;
        log::debug!("app: startup session resolved to {gate:?}");
    });

    view! {
        <Title text="ExpenseFlow"/>
        <Router>
            <Gate/>
        </Router>
        <Toasts/>
    }
}

/// Route gate: renders, redirects or waits based on the session state.
#[component]
fn Gate() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let location = use_location();
    let navigate = use_navigate();

    let decision = Memo::new(move |_| decide(GateState::from(&auth.get()), &location.pathname.get()));

    Effect::new(move || {
        if let RouteDecision::Redirect(target) = decision.get() {
            navigate(
                target.path(),
                NavigateOptions {
                    replace: true,
                    ..NavigateOptions::default()
                },
            );
        }
    });

    move || match decision.get() {
        RouteDecision::Loading => view! {
            <div class="app-loading">
                <div class="app-loading__spinner"></div>
            </div>
        }
        .into_any(),
        RouteDecision::Redirect(_) => ().into_any(),
        RouteDecision::Render(Route::Login) => view! { <LoginPage/> }.into_any(),
        RouteDecision::Render(route) => view! { <Layout route=route>{page_view(route)}</Layout> }.into_any(),
    }
}

fn page_view(route: Route) -> AnyView {
    match route {
        Route::Login => view! { <LoginPage/> }.into_any(),
        Route::Dashboard => view! { <DashboardPage/> }.into_any(),
        Route::Expenses => view! { <ExpensesPage/> }.into_any(),
        Route::CreateExpense => view! { <CreateExpensePage/> }.into_any(),
        Route::Approvals => view! { <ApprovalsPage/> }.into_any(),
        Route::TeamExpenses => view! { <TeamExpensesPage/> }.into_any(),
        Route::Notifications => view! { <NotificationsPage/> }.into_any(),
        Route::AdminUsers => view! { <AdminUsersPage/> }.into_any(),
    }
}
