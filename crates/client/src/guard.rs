//! Route guard for protected screens.
//!
//! A pure decision procedure: given a session snapshot, the requested
//! location, and an optional role restriction, decide whether to render,
//! wait, or redirect. The guard holds no state and is re-evaluated on
//! every navigation and every session mutation.

use loantrack_core::UserRole;

use crate::session::Session;

/// A navigable location, `/loans/42` style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    /// The login screen.
    pub const LOGIN: &'static str = "/login";
    /// The screen shown on a role denial.
    pub const UNAUTHORIZED: &'static str = "/unauthorized";

    /// Create a location from a path. A missing leading slash is added so
    /// locations compare consistently.
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        if path.starts_with('/') {
            Self(path)
        } else {
            Self(format!("/{path}"))
        }
    }

    /// The location's path.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Location {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Outcome of evaluating the guard for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// A login is in flight; render a loading placeholder, issue no
    /// redirect, render no children.
    Pending,
    /// Render the requested screen.
    Allowed,
    /// Not authenticated; go to the login screen, carrying the originally
    /// requested location so the login flow can return there.
    RedirectToLogin {
        /// Where the user was trying to go.
        from: Location,
    },
    /// Authenticated but the user's role is not in the required set.
    RedirectToUnauthorized,
}

/// Evaluate the guard for a navigation to `requested`.
///
/// Decision order matches the navigation flow: an in-flight login wins over
/// everything (so the very first render never flash-redirects to login),
/// then authentication, then the role restriction. When `required_roles` is
/// `None` any authenticated user passes.
#[must_use]
pub fn evaluate_route(
    session: &Session,
    requested: &Location,
    required_roles: Option<&[UserRole]>,
) -> RouteDecision {
    if session.is_loading {
        return RouteDecision::Pending;
    }

    if !session.is_authenticated {
        return RouteDecision::RedirectToLogin {
            from: requested.clone(),
        };
    }

    if let (Some(required), Some(user)) = (required_roles, session.user.as_ref()) {
        if !required.contains(&user.role) {
            return RouteDecision::RedirectToUnauthorized;
        }
    }

    RouteDecision::Allowed
}

#[cfg(test)]
mod tests {
    use super::*;

    use loantrack_core::{Email, Language, UserId};

    use crate::models::User;

    fn session_with_role(role: UserRole) -> Session {
        Session {
            user: Some(User {
                id: UserId::new(1),
                username: "agent".to_string(),
                email: Email::parse("agent@bank.example").expect("valid email"),
                full_name: "Agent".to_string(),
                role,
                agency: None,
                is_active: true,
                preferred_language: Language::Fr,
            }),
            token: Some("tok".to_string()),
            is_authenticated: true,
            is_loading: false,
        }
    }

    #[test]
    fn test_loading_is_pending_regardless_of_auth() {
        let mut session = Session {
            is_loading: true,
            ..Session::default()
        };
        let loc = Location::new("/dashboard");
        assert_eq!(evaluate_route(&session, &loc, None), RouteDecision::Pending);

        // Still pending even when already authenticated.
        session = session_with_role(UserRole::Admin);
        session.is_loading = true;
        assert_eq!(evaluate_route(&session, &loc, None), RouteDecision::Pending);
    }

    #[test]
    fn test_unauthenticated_redirects_with_origin() {
        let session = Session::default();
        let loc = Location::new("/loans/42");
        assert_eq!(
            evaluate_route(&session, &loc, None),
            RouteDecision::RedirectToLogin {
                from: Location::new("/loans/42")
            }
        );
    }

    #[test]
    fn test_role_mismatch_redirects_to_unauthorized() {
        let session = session_with_role(UserRole::ChargeClientele);
        let loc = Location::new("/disbursements/7/approve");
        assert_eq!(
            evaluate_route(&session, &loc, Some(&[UserRole::Admin])),
            RouteDecision::RedirectToUnauthorized
        );
    }

    #[test]
    fn test_role_match_allows() {
        let session = session_with_role(UserRole::AdministrateurPrets);
        let loc = Location::new("/disbursements/7/approve");
        assert_eq!(
            evaluate_route(
                &session,
                &loc,
                Some(&[UserRole::Admin, UserRole::AdministrateurPrets])
            ),
            RouteDecision::Allowed
        );
    }

    #[test]
    fn test_no_role_restriction_allows_any_authenticated_user() {
        let session = session_with_role(UserRole::Readonly);
        let loc = Location::new("/dashboard");
        assert_eq!(evaluate_route(&session, &loc, None), RouteDecision::Allowed);
    }

    #[test]
    fn test_location_normalizes_leading_slash() {
        assert_eq!(Location::new("loans/42"), Location::new("/loans/42"));
        assert_eq!(Location::new("/alerts").as_str(), "/alerts");
        assert_eq!(Location::new("/alerts").to_string(), "/alerts");
    }
}
