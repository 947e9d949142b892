//! Guard decisions across a real sign-in flow.

use std::sync::Arc;

use secrecy::SecretString;

use loantrack_client::guard::{Location, RouteDecision, evaluate_route};
use loantrack_client::session::FileSessionStorage;
use loantrack_client::{ApiClient, SessionStore};
use loantrack_core::UserRole;
use loantrack_integration_tests::{MockApi, VALID_PASSWORD};

#[tokio::test]
async fn test_guard_follows_the_sign_in_flow() {
    let mock = MockApi::spawn().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");

    let store = SessionStore::open(Box::new(FileSessionStorage::new(session_file.clone())));
    store.check_auth();
    let api = ApiClient::new(&mock.config(session_file), Arc::new(store.clone()));

    // Before sign-in: redirect to login, carrying the requested screen.
    let requested = Location::new("/loans/42");
    assert_eq!(
        evaluate_route(&store.snapshot(), &requested, None),
        RouteDecision::RedirectToLogin {
            from: requested.clone()
        }
    );

    store
        .login(&api, "cdiallo", &SecretString::from(VALID_PASSWORD))
        .await
        .expect("login");

    // After sign-in: unrestricted screens render.
    assert_eq!(
        evaluate_route(&store.snapshot(), &requested, None),
        RouteDecision::Allowed
    );

    // Role-restricted screens still deny a client officer.
    let approve = Location::new("/disbursements/7/approve");
    assert_eq!(
        evaluate_route(
            &store.snapshot(),
            &approve,
            Some(&[UserRole::Admin, UserRole::AdministrateurPrets])
        ),
        RouteDecision::RedirectToUnauthorized
    );

    // After logout the guard redirects again, preserving the origin.
    store.logout();
    assert_eq!(
        evaluate_route(&store.snapshot(), &requested, None),
        RouteDecision::RedirectToLogin { from: requested }
    );
}

#[tokio::test]
async fn test_admin_passes_role_restriction() {
    let mock = MockApi::spawn().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let session_file = dir.path().join("session.json");

    let store = SessionStore::open(Box::new(FileSessionStorage::new(session_file.clone())));
    store.check_auth();
    let api = ApiClient::new(&mock.config(session_file), Arc::new(store.clone()));

    store
        .login(&api, "admin", &SecretString::from(VALID_PASSWORD))
        .await
        .expect("login");

    let approve = Location::new("/disbursements/7/approve");
    assert_eq!(
        evaluate_route(
            &store.snapshot(),
            &approve,
            Some(&[UserRole::Admin, UserRole::AdministrateurPrets])
        ),
        RouteDecision::Allowed
    );
}
