//! Authenticated client for the loan-tracking REST API.
//!
//! All endpoints live under `/api/v1`. The client attaches the current
//! bearer token to every request when one is present, reading it through
//! [`TokenProvider`] at call time - never caching a copy - so a logout is
//! visible to the very next request. Token refresh and retry-on-401 are
//! deliberately out of scope: a 401 surfaces as
//! [`ApiError::Unauthorized`] and the caller clears the session.

mod alerts;
mod clients;
mod disbursements;
mod loans;
mod reports;

pub use alerts::AlertFilter;
pub use clients::ClientFilter;
pub use disbursements::DisbursementFilter;
pub use loans::LoanFilter;

use std::sync::Arc;

use reqwest::{RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::instrument;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{LoginResponse, User};

/// Source of the current bearer token.
///
/// Implemented by the session store; the client holds it behind an `Arc`
/// and queries it on every request.
pub trait TokenProvider: Send + Sync {
    /// The token to attach, or `None` when unauthenticated.
    fn current_token(&self) -> Option<String>;
}

/// A provider that never has a token, for unauthenticated clients in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn current_token(&self) -> Option<String> {
        None
    }
}

/// Loan-tracking API client.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

/// Error body shape the backend uses for non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
}

impl ApiClient {
    /// Create a client for the configured API.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never
    /// happen under normal circumstances as we use standard TLS
    /// configuration.
    #[must_use]
    pub fn new(config: &Config, tokens: Arc<dyn TokenProvider>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.api_url.clone(),
            tokens,
        }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Authenticate with username and password.
    ///
    /// This is the only call that never carries a bearer token. The caller
    /// (normally [`crate::session::SessionStore::login`]) installs the
    /// returned identity.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthenticationFailed`] when the API rejects the
    /// credentials (401/403), or a transport/decoding error otherwise.
    #[instrument(skip(self, password), fields(username = %username))]
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, ApiError> {
        #[derive(Serialize)]
        struct LoginRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        let response = self
            .client
            .post(self.endpoint("/auth/login-json"))
            .json(&LoginRequest {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let detail = Self::read_detail(response).await;
            Err(ApiError::AuthenticationFailed(detail))
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    /// Fetch the identity behind the current token (`/auth/me`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] when the token is missing or
    /// rejected.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get("/auth/me", &[]).await
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/v1{path}", self.base_url)
    }

    /// Attach the live bearer token, when one exists.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.current_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let request = self.authorize(self.client.get(self.endpoint(path)).query(query));
        Self::handle(request.send().await?).await
    }

    /// PUT to an action endpoint whose response body we don't need
    /// (acknowledge, resolve, approve, disburse).
    pub(crate) async fn put_action(&self, path: &str) -> Result<(), ApiError> {
        let request = self.authorize(self.client.put(self.endpoint(path)));
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::status_error(status, response).await)
        }
    }

    async fn status_error(status: StatusCode, response: Response) -> ApiError {
        let detail = Self::read_detail(response).await;
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden(detail),
            StatusCode::NOT_FOUND => ApiError::NotFound(detail),
            _ => ApiError::Status {
                status: status.as_u16(),
                message: detail,
            },
        }
    }

    /// Pull the `detail` field out of an error body, falling back to the
    /// raw text, falling back to a generic message.
    async fn read_detail(response: Response) -> String {
        let text = response.text().await.unwrap_or_default();
        serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.detail)
            .unwrap_or_else(|| {
                if text.is_empty() {
                    "no detail provided".to_string()
                } else {
                    text
                }
            })
    }
}

/// Render a serde-serializable enum as its wire value, for query strings.
pub(crate) fn wire_value<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default()
}
