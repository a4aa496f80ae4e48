//! `reqwest` transport for the terminal client.
//!
//! One client per process. The bearer slot is shared with the session store
//! through [`AuthApi::set_bearer`]; every request made afterwards carries it.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::{PoisonError, RwLock};

use access::endpoints;
use access::types::{AuthResponse, LoginRequest, RegisterRequest, User};
use access::{ApiError, AuthApi, decode_response};
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug)]
pub struct HttpApi {
    client: reqwest::Client,
    base: String,
    bearer: RwLock<Option<String>>,
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base: base.into(),
            bearer: RwLock::new(None),
        }
    }

    pub fn url(&self, path: &str) -> String {
        endpoints::join(&self.base, path)
    }

    fn bearer(&self) -> Option<String> {
        self.bearer.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Send one request and decode the JSON response as `T`.
    pub async fn call<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<&Value>) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!(%method, %url, "request");
        let mut request = self.client.request(method, &url);
        if let Some(token) = self.bearer() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        tracing::debug!(status, bytes = text.len(), "response");
        decode_response(status, &text)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.call(Method::POST, path, Some(&body)).await
    }
}

impl AuthApi for HttpApi {
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
        self.call(Method::GET, endpoints::AUTH_ME, None).await
    }
}
