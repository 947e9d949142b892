//! Smoke tests against a real loan-tracking backend.
//!
//! These tests require:
//! - A running loan-tracking API (`LOANTRACK_API_URL`)
//! - Valid credentials (`LOANTRACK_TEST_USERNAME`, `LOANTRACK_TEST_PASSWORD`)
//!
//! Run with: cargo test -p loantrack-integration-tests -- --ignored

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use loantrack_client::api::{AlertFilter, ClientFilter};
use loantrack_client::session::MemorySessionStorage;
use loantrack_client::{ApiClient, Config, SessionStore};

fn live_config() -> Config {
    Config {
        api_url: std::env::var("LOANTRACK_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string()),
        session_file: std::env::temp_dir().join("loantrack-live-test-session.json"),
        timeout: Duration::from_secs(30),
    }
}

fn credentials() -> (String, SecretString) {
    let username =
        std::env::var("LOANTRACK_TEST_USERNAME").expect("LOANTRACK_TEST_USERNAME must be set");
    let password =
        std::env::var("LOANTRACK_TEST_PASSWORD").expect("LOANTRACK_TEST_PASSWORD must be set");
    (username, SecretString::from(password))
}

async fn signed_in() -> (SessionStore, ApiClient) {
    let store = SessionStore::open(Box::new(MemorySessionStorage::new()));
    let api = ApiClient::new(&live_config(), Arc::new(store.clone()));
    let (username, password) = credentials();
    store
        .login(&api, &username, &password)
        .await
        .expect("Failed to sign in against the live API");
    (store, api)
}

#[tokio::test]
#[ignore = "Requires running loan-tracking API and credentials"]
async fn test_live_login_and_identity() {
    let (store, api) = signed_in().await;
    assert!(store.is_authenticated());

    let user = api.me().await.expect("me");
    assert!(user.is_active);
}

#[tokio::test]
#[ignore = "Requires running loan-tracking API and credentials"]
async fn test_live_dashboard_and_summary() {
    let (_store, api) = signed_in().await;

    let stats = api.dashboard_stats().await.expect("dashboard stats");
    assert!(stats.total_clients >= 0);

    let summary = api.alerts_summary().await.expect("alerts summary");
    assert!(summary.total >= summary.red() + summary.orange());
}

#[tokio::test]
#[ignore = "Requires running loan-tracking API and credentials"]
async fn test_live_list_endpoints_paginate() {
    let (_store, api) = signed_in().await;

    let clients = api
        .list_clients(&ClientFilter {
            limit: Some(5),
            ..ClientFilter::default()
        })
        .await
        .expect("list clients");
    assert!(clients.len() <= 5);

    let alerts = api
        .list_alerts(&AlertFilter {
            limit: Some(5),
            ..AlertFilter::default()
        })
        .await
        .expect("list alerts");
    assert!(alerts.len() <= 5);
}
