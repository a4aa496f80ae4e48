//! REST API client for the ExpenseFlow backend.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds (tests): every call fails with [`ApiError::Network`] since
//! these endpoints are only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns `Result<_, ApiError>`. `util::scope::spawn_scoped` hands
//! a 401 to the session store, which ends the session; pages pass every other
//! failure to `state::auth::report_failure` to become a notice.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::{Arc, PoisonError, RwLock};

use access::endpoints;
use access::types::{
    ApprovalRequest, AuthResponse, Category, DashboardStats, Expense, LoginRequest, NewExpense, NewUser,
    Notification, RegisterRequest, User, UserUpdate,
};
use access::{ApiError, AuthApi};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Base used when the build does not set `EXPENSE_API_BASE`.
pub const DEFAULT_API_BASE: &str = "/api";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
}

/// Shared HTTP client. Clones share the bearer slot.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base: String,
    bearer: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            bearer: Arc::new(RwLock::new(None)),
        }
    }

    /// Client for the base baked in at build time.
    pub fn from_env() -> Self {
        Self::new(option_env!("EXPENSE_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }

    fn bearer(&self) -> Option<String> {
        self.bearer.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn url(&self, path: &str) -> String {
        endpoints::join(&self.base, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(Method::Get, path, None).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send(Method::Post, path, Some(encode_body(body)?)).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send(Method::Put, path, Some(encode_body(body)?)).await
    }

    async fn patch<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send(Method::Patch, path, Some(encode_body(body)?)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let url = self.url(path);
            let builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
            };
            let builder = match self.bearer() {
                Some(token) => builder.header("Authorization", &bearer_header(&token)),
                None => builder,
            };
            let sent = match body {
                Some(json) => builder.json(&json).map_err(|e| ApiError::Network(e.to_string()))?.send().await,
                None => builder.send().await,
            };
            let resp = sent.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
            if !resp.ok() {
                log::warn!("api: {method:?} {path} -> {status}");
            }
            access::decode_response(status, &text)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (method, self.url(path), self.bearer(), body);
            Err(ApiError::Network("not available outside the browser".to_owned()))
        }
    }

    /// `GET /dashboard/stats`.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get(endpoints::DASHBOARD_STATS).await
    }

    /// `GET /expenses`: the caller's own expenses.
    pub async fn expenses(&self) -> Result<Vec<Expense>, ApiError> {
        self.get(endpoints::EXPENSES).await
    }

    /// `POST /expenses`.
    pub async fn create_expense(&self, expense: &NewExpense) -> Result<Expense, ApiError> {
        self.post(endpoints::EXPENSES, expense).await
    }

    /// `GET /expenses/pending`: expenses awaiting the caller's decision.
    pub async fn pending_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        self.get(endpoints::EXPENSES_PENDING).await
    }

    /// `POST /expenses/{id}/approve`.
    pub async fn decide_expense(&self, expense_id: &str, decision: &ApprovalRequest) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post(&endpoints::approve_expense(expense_id), decision).await?;
        Ok(())
    }

    /// `GET /categories`.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get(endpoints::CATEGORIES).await
    }

    /// `GET /manager/team/expenses`.
    pub async fn team_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        self.get(endpoints::MANAGER_TEAM_EXPENSES).await
    }

    /// `GET /notifications`.
    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.get(endpoints::NOTIFICATIONS).await
    }

    /// `PUT /notifications/{id}/read`.
    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .put(&endpoints::mark_notification_read(notification_id), &serde_json::json!({}))
            .await?;
        Ok(())
    }

    /// `GET /admin/users`.
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get(endpoints::ADMIN_USERS).await
    }

    /// `POST /admin/users`.
    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post(endpoints::ADMIN_USERS, user).await
    }

    /// `PATCH /admin/users/{id}`.
    pub async fn update_user(&self, user_id: &str, update: &UserUpdate) -> Result<User, ApiError> {
        self.patch(&endpoints::admin_user(user_id), update).await
    }
}

impl AuthApi for ApiClient {
    fn set_bearer(&self, credential: Option<&str>) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = credential.map(str::to_owned);
    }

    async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.post(endpoints::AUTH_LOGIN, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.post(endpoints::AUTH_REGISTER, request).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get(endpoints::AUTH_ME).await
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(any(test, feature = "csr"))]
fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}
