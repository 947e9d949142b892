//! Integration tests for Loantrack.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p loantrack-integration-tests
//! ```
//!
//! Most tests run against [`MockApi`], an in-process server speaking the
//! backend's `/api/v1` wire protocol, so they need no external services.
//! Tests marked `#[ignore]` additionally require a running loan-tracking
//! API and valid credentials in the environment.
//!
//! # Test Categories
//!
//! - `session_lifecycle` - Persisted session store against a live server
//! - `route_guard` - Guard decisions across the sign-in flow
//! - `api_client` - Token attachment, error mapping, caching
//! - `api_live` - Smoke tests against a real backend (ignored by default)

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post, put};
use serde_json::{Value, json};

use loantrack_client::Config;

/// The only password the mock accepts.
pub const VALID_PASSWORD: &str = "s3cret";

/// The bearer token the mock issues for `username`.
#[must_use]
pub fn token_for(username: &str) -> String {
    format!("tok-{username}")
}

struct MockState {
    login_calls: AtomicU32,
    dashboard_calls: AtomicU32,
    /// Workflow status of the one mutable disbursement (id 7).
    tranche_status: Mutex<String>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            login_calls: AtomicU32::new(0),
            dashboard_calls: AtomicU32::new(0),
            tranche_status: Mutex::new("DEMANDE".to_string()),
        }
    }
}

/// In-process server speaking the loan-tracking API's wire protocol.
///
/// Usernames map to roles: `admin` gets `ADMIN`, everyone else gets
/// `CHARGE_CLIENTELE`. Only [`VALID_PASSWORD`] authenticates, and only
/// tokens issued by [`token_for`] are accepted. Disbursement 7 starts
/// `DEMANDE` and moves through the approve/disburse workflow, which only
/// the `admin` user may drive.
pub struct MockApi {
    addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockApi {
    /// Bind to an ephemeral port and serve the mock in the background.
    ///
    /// # Panics
    ///
    /// Panics when the listener cannot bind; tests cannot proceed without
    /// the server.
    pub async fn spawn() -> Self {
        let state = Arc::new(MockState::default());
        let app = router(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock API listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock API server failed");
        });

        Self { addr, state }
    }

    /// Base URL of the running mock.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// A client [`Config`] pointing at the mock.
    #[must_use]
    pub fn config(&self, session_file: PathBuf) -> Config {
        Config {
            api_url: self.base_url(),
            session_file,
            timeout: Duration::from_secs(5),
        }
    }

    /// How many login attempts the mock has served.
    #[must_use]
    pub fn login_calls(&self) -> u32 {
        self.state.login_calls.load(Ordering::SeqCst)
    }

    /// How many dashboard reads the mock has served.
    #[must_use]
    pub fn dashboard_calls(&self) -> u32 {
        self.state.dashboard_calls.load(Ordering::SeqCst)
    }
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/v1/auth/login-json", post(login))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/clients", get(list_clients))
        .route("/api/v1/clients/{id}", get(get_client))
        .route("/api/v1/loans", get(list_loans))
        .route("/api/v1/loans/{id}", get(get_loan))
        .route("/api/v1/disbursements", get(list_disbursements))
        .route("/api/v1/disbursements/{id}", get(get_disbursement))
        .route(
            "/api/v1/disbursements/{id}/approve",
            put(approve_disbursement),
        )
        .route(
            "/api/v1/disbursements/{id}/disburse",
            put(release_disbursement),
        )
        .route("/api/v1/reports/dashboard", get(dashboard))
        .route("/api/v1/alerts/summary/dashboard", get(alerts_summary))
        .route("/api/v1/alerts/{id}/acknowledge", put(acknowledge_alert))
        .route("/api/v1/alerts/{id}/resolve", put(resolve_alert))
        .with_state(state)
}

fn user_json(username: &str) -> Value {
    let role = if username == "admin" {
        "ADMIN"
    } else {
        "CHARGE_CLIENTELE"
    };
    json!({
        "id": 1,
        "username": username,
        "email": format!("{username}@bank.example"),
        "full_name": "Test User",
        "role": role,
        "agency": "Agence Centrale",
        "is_active": true,
        "preferred_language": "fr"
    })
}

fn client_json(id: i32, name: &str) -> Value {
    json!({
        "id": id,
        "client_number": format!("CL-2024-{id:04}"),
        "name": name,
        "address": "Rue 14, Quartier Nord",
        "phone": "+226 70 00 00 00",
        "is_active": true,
        "created_at": "2024-03-01T09:30:00Z"
    })
}

fn disbursement_json(status: &str) -> Value {
    json!({
        "id": 7,
        "loan_id": 42,
        "disbursement_number": 2,
        "status": status,
        "requested_amount": "3000000.00",
        "request_date": "2024-06-10",
        "work_description": "Elévation des murs",
        "work_completion_percentage": 35,
        "bet_report_received": false,
        "created_at": "2024-06-10T14:00:00Z"
    })
}

fn loan_json(id: i32) -> Value {
    json!({
        "id": id,
        "loan_number": format!("PR-2024-{id:04}"),
        "client_id": 12,
        "loan_type": "PRET_CLASSIQUE_CONSTRUCTEUR",
        "status": "DEBLOCAGE",
        "amount": "15000000.00",
        "duration_months": 180,
        "grace_period_months": 12,
        "interest_rate": "6.50",
        "monthly_payment": "130000.00",
        "created_at": "2024-02-01T08:00:00Z"
    })
}

/// Extract the username a bearer token was issued for, if it is one of
/// ours.
fn authenticated_user(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    token.strip_prefix("tok-").map(ToString::to_string)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Non authentifié"})),
    )
        .into_response()
}

async fn login(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.login_calls.fetch_add(1, Ordering::SeqCst);

    // Hold the request open briefly so overlapping login attempts in the
    // concurrency tests genuinely overlap in time.
    tokio::time::sleep(Duration::from_millis(25)).await;

    let username = body["username"].as_str().unwrap_or_default().to_string();
    if body["password"].as_str() == Some(VALID_PASSWORD) {
        Json(json!({
            "access_token": token_for(&username),
            "token_type": "bearer",
            "user": user_json(&username)
        }))
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Identifiants invalides"})),
        )
            .into_response()
    }
}

async fn me(headers: HeaderMap) -> Response {
    match authenticated_user(&headers) {
        Some(username) => Json(user_json(&username)).into_response(),
        None => unauthorized(),
    }
}

async fn list_clients(
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    if authenticated_user(&headers).is_none() {
        return unauthorized();
    }
    let search = params
        .iter()
        .find(|(k, _)| k == "search")
        .map(|(_, v)| v.to_lowercase());
    let clients = [
        client_json(12, "Mariam Diallo"),
        client_json(13, "Ibrahim Ouedraogo"),
    ];
    let matched: Vec<Value> = clients
        .into_iter()
        .filter(|c| {
            search.as_ref().is_none_or(|needle| {
                c["name"]
                    .as_str()
                    .unwrap_or_default()
                    .to_lowercase()
                    .contains(needle)
            })
        })
        .collect();
    Json(Value::Array(matched)).into_response()
}

async fn get_client(headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if authenticated_user(&headers).is_none() {
        return unauthorized();
    }
    if id == 12 {
        let mut client = client_json(12, "Mariam Diallo");
        client["loans"] = Value::Array(vec![loan_json(42)]);
        Json(client).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Client non trouvé"})),
        )
            .into_response()
    }
}

async fn list_loans(headers: HeaderMap, Query(params): Query<Vec<(String, String)>>) -> Response {
    if authenticated_user(&headers).is_none() {
        return unauthorized();
    }
    // A status filter narrows the fixture set to the one disbursing loan.
    let filtered = params
        .iter()
        .any(|(k, v)| k == "status" && v == "DEBLOCAGE");
    let loans = if filtered {
        vec![loan_json(42)]
    } else {
        vec![loan_json(42), loan_json(43)]
    };
    Json(Value::Array(loans)).into_response()
}

async fn get_loan(headers: HeaderMap, Path(id): Path<i32>) -> Response {
    if authenticated_user(&headers).is_none() {
        return unauthorized();
    }
    if id == 42 {
        Json(loan_json(42)).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Prêt non trouvé"})),
        )
            .into_response()
    }
}

fn tranche_status(state: &MockState) -> String {
    state
        .tranche_status
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

async fn list_disbursements(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if authenticated_user(&headers).is_none() {
        return unauthorized();
    }
    Json(Value::Array(vec![disbursement_json(&tranche_status(
        &state,
    ))]))
    .into_response()
}

async fn get_disbursement(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    if authenticated_user(&headers).is_none() {
        return unauthorized();
    }
    if id == 7 {
        Json(disbursement_json(&tranche_status(&state))).into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Déblocage non trouvé"})),
        )
            .into_response()
    }
}

/// Shared gate for the two workflow actions: authenticated, admin role,
/// and the tranche must be in `expected` to move to `next`.
fn advance_tranche(
    state: &MockState,
    headers: &HeaderMap,
    id: i32,
    expected: &str,
    next: &str,
) -> Response {
    let Some(username) = authenticated_user(headers) else {
        return unauthorized();
    };
    if username != "admin" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "Rôle insuffisant"})),
        )
            .into_response();
    }
    if id != 7 {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Déblocage non trouvé"})),
        )
            .into_response();
    }
    let mut status = state
        .tranche_status
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    if *status != expected {
        return (
            StatusCode::CONFLICT,
            Json(json!({"detail": format!("Statut invalide: {status}")})),
        )
            .into_response();
    }
    *status = next.to_string();
    StatusCode::OK.into_response()
}

async fn approve_disbursement(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    advance_tranche(&state, &headers, id, "DEMANDE", "APPROUVE")
}

async fn release_disbursement(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Response {
    advance_tranche(&state, &headers, id, "APPROUVE", "COMPLETE")
}

async fn dashboard(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if authenticated_user(&headers).is_none() {
        return unauthorized();
    }
    state.dashboard_calls.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "total_clients": 150,
        "total_loans": 89,
        "pending_disbursements": 12,
        "total_amount": 25000000
    }))
    .into_response()
}

async fn alerts_summary(headers: HeaderMap) -> Response {
    if authenticated_user(&headers).is_none() {
        return unauthorized();
    }
    Json(json!({
        "total": 3,
        "by_severity": {"RED": 1, "ORANGE": 2},
        "by_status": {"PENDING": 3},
        "by_type": {"WORK_DELAY_WARNING": 2, "VALIDITY_WARNING": 1}
    }))
    .into_response()
}

async fn acknowledge_alert(headers: HeaderMap, Path(id): Path<i32>) -> Response {
    alert_action(&headers, id)
}

async fn resolve_alert(headers: HeaderMap, Path(id): Path<i32>) -> Response {
    alert_action(&headers, id)
}

fn alert_action(headers: &HeaderMap, id: i32) -> Response {
    if authenticated_user(headers).is_none() {
        return unauthorized();
    }
    if id == 5 {
        StatusCode::OK.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"detail": "Alerte non trouvée"})),
        )
            .into_response()
    }
}
