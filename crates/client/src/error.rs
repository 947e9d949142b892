//! Unified error handling for the client library.

use thiserror::Error;

/// Errors that can occur when talking to the loan-tracking API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Login rejected (bad username/password or inactive account).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The bearer token was rejected by the API (expired or invalid).
    ///
    /// Callers are expected to clear the session so the route guard falls
    /// back to the login redirect.
    #[error("Unauthorized - credential rejected by the API")]
    Unauthorized,

    /// The authenticated user lacks permission for this resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-2xx response.
    #[error("API returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error detail reported by the API, if any.
        message: String,
    },
}

impl ApiError {
    /// Whether this error means the session's credential is no longer
    /// usable and the caller should log out.
    #[must_use]
    pub const fn is_credential_rejection(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable present but unusable.
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("loan 42".to_string());
        assert_eq!(err.to_string(), "Not found: loan 42");

        let err = ApiError::Status {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API returned 503: maintenance");
    }

    #[test]
    fn test_credential_rejection_classification() {
        assert!(ApiError::Unauthorized.is_credential_rejection());
        assert!(!ApiError::NotFound("x".to_string()).is_credential_rejection());
        assert!(
            !ApiError::AuthenticationFailed("bad password".to_string())
                .is_credential_rejection()
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingEnvVar("LOANTRACK_API_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing environment variable: LOANTRACK_API_URL"
        );
    }
}
