//! Loantrack client library.
//!
//! Everything the terminal front-end needs to talk to the loan-disbursement
//! tracking API:
//!
//! - [`session`] - Persisted session store (user identity + bearer token)
//! - [`guard`] - Route guard evaluated before rendering protected screens
//! - [`api`] - Authenticated API client for the `/api/v1` endpoints
//! - [`models`] - Typed resource models mirroring the backend schemas
//! - [`cache`] - Short-TTL query cache for read-only screens
//! - [`config`] - Environment-based configuration
//!
//! # Session and authentication flow
//!
//! At boot the session store rehydrates the persisted `{user, token}` pair
//! from disk, then `check_auth` derives the authenticated flag from it. The
//! guard is consulted before every protected screen; the API client reads
//! the live token through [`api::TokenProvider`] on each request so a
//! logout is visible to the very next call.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod session;

pub use api::ApiClient;
pub use cache::QueryCache;
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use guard::{Location, RouteDecision, evaluate_route};
pub use session::{Session, SessionStore};
