//! Command implementations (the "screens" of the terminal front-end).
//!
//! Every protected screen consults the route guard before touching the
//! API, exactly once per invocation, and maps the guard's decision to
//! terminal behavior: a login hint (carrying the screen the user was
//! after), a permission message, or the rendered screen.

pub mod alerts;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod disbursements;
pub mod loans;

use serde::de::DeserializeOwned;
use thiserror::Error;

use loantrack_client::guard::{Location, RouteDecision, evaluate_route};
use loantrack_client::{ApiClient, ApiError, QueryCache, SessionStore};
use loantrack_core::UserRole;

/// Everything a command needs: the session store, the API client wired to
/// read its token from that store, and the query cache.
pub struct AppContext {
    /// Owned session store (injected, not global).
    pub store: SessionStore,
    /// API client reading the live token from `store`.
    pub api: ApiClient,
    /// Short-TTL cache for read-only screens.
    pub cache: QueryCache,
}

/// Errors a command can surface to the user.
#[derive(Debug, Error)]
pub enum CommandError {
    /// API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Guard denied: no session. The location is echoed so the user knows
    /// where to return after signing in.
    #[error("not signed in - run `loantrack login`, then retry {0}")]
    NotSignedIn(Location),

    /// Guard denied: the user's role is not in the screen's required set.
    #[error("your role does not allow access to {0}")]
    RoleDenied(Location),

    /// Guard pending: a sign-in is still in flight.
    #[error("a sign-in is in progress, try again in a moment")]
    SignInPending,

    /// A flag value didn't parse.
    #[error("invalid value: {0}")]
    InvalidArgument(String),
}

impl AppContext {
    /// Evaluate the route guard for a navigation to `location`.
    ///
    /// # Errors
    ///
    /// Returns the guard's denial mapped onto [`CommandError`].
    pub fn guard(
        &self,
        location: &Location,
        required_roles: Option<&[UserRole]>,
    ) -> Result<(), CommandError> {
        match evaluate_route(&self.store.snapshot(), location, required_roles) {
            RouteDecision::Allowed => Ok(()),
            RouteDecision::Pending => Err(CommandError::SignInPending),
            RouteDecision::RedirectToLogin { from } => Err(CommandError::NotSignedIn(from)),
            RouteDecision::RedirectToUnauthorized => {
                Err(CommandError::RoleDenied(location.clone()))
            }
        }
    }

    /// Convert an API failure into a command failure, clearing the session
    /// first when the API rejected our credential so the next guard
    /// evaluation redirects to login.
    pub fn fail(&self, err: ApiError) -> CommandError {
        if err.is_credential_rejection() {
            tracing::warn!("credential rejected by the API, clearing session");
            self.store.logout();
        }
        CommandError::Api(err)
    }
}

/// Parse a CLI flag holding a wire value (`DEBLOCAGE`, `RED`, ...) into
/// the corresponding enum.
pub fn parse_wire<T: DeserializeOwned>(raw: &str) -> Result<T, CommandError> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| CommandError::InvalidArgument(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use loantrack_core::{AlertSeverity, LoanStatus};

    #[test]
    fn test_parse_wire_accepts_backend_values() {
        let status: LoanStatus = parse_wire("DEBLOCAGE").expect("parse");
        assert_eq!(status, LoanStatus::Disbursing);
        let severity: AlertSeverity = parse_wire("RED").expect("parse");
        assert_eq!(severity, AlertSeverity::Red);
    }

    #[test]
    fn test_parse_wire_rejects_unknown_values() {
        let err = parse_wire::<LoanStatus>("PENDING").expect_err("should fail");
        assert!(matches!(err, CommandError::InvalidArgument(_)));
    }
}
