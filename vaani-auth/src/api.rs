//! Client for the registration and login endpoints.
//!
//! The service reports validation problems (missing fields, duplicate
//! email or phone) as 4xx with a single human-readable `message`; those
//! come back as [`AuthApiError::Rejected`] so callers can show the text
//! and re-prompt.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::token::AuthToken;

/// Errors from the auth service.
#[derive(Debug, thiserror::Error)]
pub enum AuthApiError {
    /// The service refused the request and said why. Shown verbatim.
    #[error("{0}")]
    Rejected(String),

    #[error("auth request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("auth service error: status {0}")]
    Server(reqwest::StatusCode),
}

/// The signed-in user as the service describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub role: String,
    #[serde(default = "default_active", rename = "isActive")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Token and profile as returned by both endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub token: AuthToken,
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct RejectionBody {
    message: String,
}

/// Client for `/api/auth` on the account service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create an account. Returns the freshly issued credentials.
    pub async fn register(&self, request: &RegisterRequest) -> Result<Credentials, AuthApiError> {
        debug!("registering {}", request.email);
        self.post("register", request).await
    }

    /// Sign in to an existing account.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credentials, AuthApiError> {
        debug!("logging in {email}");
        self.post("login", &LoginRequest { email, password }).await
    }

    async fn post<T: Serialize>(
        &self,
        endpoint: &str,
        body: &T,
    ) -> Result<Credentials, AuthApiError> {
        let url = format!(
            "{}/api/auth/{endpoint}",
            self.base_url.trim_end_matches('/')
        );

        let response = self.http.post(&url).json(body).send().await?;
        let status = response.status();

        if status.is_client_error() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<RejectionBody>(&text)
                .map(|body| body.message)
                .unwrap_or_else(|_| format!("request rejected with status {status}"));
            warn!("auth {endpoint} rejected: {message}");
            return Err(AuthApiError::Rejected(message));
        }
        if !status.is_success() {
            warn!("auth {endpoint} failed with {status}");
            return Err(AuthApiError::Server(status));
        }

        Ok(response.json().await?)
    }
}
