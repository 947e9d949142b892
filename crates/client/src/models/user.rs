//! User identity and login payloads.

use serde::{Deserialize, Serialize};

use loantrack_core::{Email, Language, UserId, UserRole};

/// A back-office user as returned by `/auth/login-json` and `/auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Email address.
    pub email: Email,
    /// Display name.
    pub full_name: String,
    /// Permission level.
    pub role: UserRole,
    /// Agency the user belongs to, if any.
    #[serde(default)]
    pub agency: Option<String>,
    /// Whether the account is active.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Language the user wants screens rendered in.
    #[serde(default)]
    pub preferred_language: Language,
}

const fn default_true() -> bool {
    true
}

/// Successful response from the authentication endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer credential for subsequent requests.
    pub access_token: String,
    /// Always `bearer`.
    #[serde(default)]
    pub token_type: String,
    /// The authenticated user's identity.
    pub user: User,
}
