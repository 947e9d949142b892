//! Persisted session store.
//!
//! Holds the current user identity and bearer token, derives the
//! authenticated flag from them, and persists exactly the `{user, token}`
//! pair across restarts. The store is an explicitly owned, injectable
//! container: construct one with [`SessionStore::open`] and hand clones to
//! whatever needs it (clones share state).
//!
//! # Invariant
//!
//! `is_authenticated` is true if and only if both `user` and a non-empty
//! `token` are present. The flag is never persisted; it is re-derived by
//! [`SessionStore::check_auth`] at every boot, so a hand-edited or
//! partially written session file can never produce a stale `true`.

pub mod storage;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use secrecy::SecretString;

use crate::api::{ApiClient, TokenProvider};
use crate::error::ApiError;
use crate::models::{LoginResponse, User};

pub use storage::{FileSessionStorage, MemorySessionStorage, PersistedSession, SessionStorage};

/// In-memory session state.
///
/// `user` and `token` are the durable fields; `is_authenticated` is derived
/// and `is_loading` is transient (true only while a login is in flight).
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// Identity of the logged-in user.
    pub user: Option<User>,
    /// Opaque bearer credential.
    pub token: Option<String>,
    /// Derived: both durable fields present.
    pub is_authenticated: bool,
    /// Transient: a login attempt is in flight.
    pub is_loading: bool,
}

impl Session {
    /// Whether the durable fields currently form a usable credential pair.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.user.is_some() && self.token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

/// Shared, persisted session store.
///
/// Cheap to clone; clones observe the same state. All mutations replace the
/// session value under a single write lock, so readers never observe a
/// `user` from one login paired with a `token` from another.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    session: RwLock<Session>,
    storage: Box<dyn SessionStorage>,
    /// Serializes concurrent `login` calls; held across the network round
    /// trip so two in-flight attempts cannot interleave.
    login_serial: tokio::sync::Mutex<()>,
}

impl SessionStore {
    /// Open the store, rehydrating the persisted `{user, token}` pair.
    ///
    /// Corrupt or unreadable storage degrades to the empty (unauthenticated)
    /// session rather than failing: an unauthenticated fallback is always
    /// safe. `is_authenticated` stays false until [`Self::check_auth`] runs.
    #[must_use]
    pub fn open(storage: Box<dyn SessionStorage>) -> Self {
        let persisted = storage.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "session storage unreadable, starting unauthenticated");
            PersistedSession::default()
        });

        let session = Session {
            user: persisted.user,
            token: persisted.token,
            is_authenticated: false,
            is_loading: false,
        };

        Self {
            inner: Arc::new(SessionStoreInner {
                session: RwLock::new(session),
                storage,
                login_serial: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// Authenticate against the API and install the resulting identity.
    ///
    /// While the request is in flight `is_loading` is true. On success the
    /// whole session is replaced in one atomic write (user + token +
    /// derived flag together) and persisted. On failure `is_loading` is
    /// cleared, `user`/`token` stay untouched, and the error propagates -
    /// no retry, the caller decides what to show.
    ///
    /// Concurrent calls are serialized; the second caller waits for the
    /// first round trip to finish before starting its own.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthenticationFailed`] for rejected credentials,
    /// or any transport/decoding error from the API client.
    pub async fn login(
        &self,
        api: &ApiClient,
        username: &str,
        password: &SecretString,
    ) -> Result<(), ApiError> {
        let _serial = self.inner.login_serial.lock().await;

        self.write().is_loading = true;

        match api.login(username, password).await {
            Ok(response) => {
                self.install(response);
                Ok(())
            }
            Err(e) => {
                self.write().is_loading = false;
                Err(e)
            }
        }
    }

    /// Clear the session. Synchronous, idempotent, and infallible: safe to
    /// call from an error handler reacting to a rejected credential.
    ///
    /// Durable storage is cleared as a side effect; a storage failure is
    /// logged and swallowed.
    pub fn logout(&self) {
        *self.write() = Session::default();
        if let Err(e) = self.inner.storage.clear() {
            tracing::warn!(error = %e, "failed to clear persisted session");
        }
    }

    /// Re-derive `is_authenticated` from the presence of `user` and
    /// `token`. Idempotent and network-free; called once at boot after
    /// rehydration, before the first guard evaluation.
    pub fn check_auth(&self) {
        let mut session = self.write();
        session.is_authenticated = session.has_credentials();
    }

    /// A point-in-time copy of the session for guard evaluation.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.read().clone()
    }

    /// Whether the store currently considers the user authenticated.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_authenticated
    }

    /// Atomically replace the session with a freshly authenticated one and
    /// persist the durable pair.
    fn install(&self, response: LoginResponse) {
        let next = Session {
            user: Some(response.user),
            token: Some(response.access_token),
            is_authenticated: true,
            is_loading: false,
        };
        *self.write() = next;
        self.persist();
    }

    /// Write the durable pair to storage. Persistence observes state
    /// changes; it never gates them, so failures are logged and swallowed.
    fn persist(&self) {
        let persisted = {
            let session = self.read();
            PersistedSession {
                user: session.user.clone(),
                token: session.token.clone(),
            }
        };
        if let Err(e) = self.inner.storage.store(&persisted) {
            tracing::warn!(error = %e, "failed to persist session");
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Session> {
        self.inner
            .session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Session> {
        self.inner
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl TokenProvider for SessionStore {
    /// Read the live token. Called per request so a logout is visible to
    /// the very next API call - no copy is retained across requests.
    fn current_token(&self) -> Option<String> {
        self.read().token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use loantrack_core::{Email, Language, UserId, UserRole};

    fn test_user(username: &str) -> User {
        User {
            id: UserId::new(1),
            username: username.to_string(),
            email: Email::parse(&format!("{username}@bank.example")).expect("valid email"),
            full_name: "Test User".to_string(),
            role: UserRole::ChargeClientele,
            agency: None,
            is_active: true,
            preferred_language: Language::Fr,
        }
    }

    fn seeded_store(username: &str, token: &str) -> SessionStore {
        SessionStore::open(Box::new(MemorySessionStorage::seeded(PersistedSession {
            user: Some(test_user(username)),
            token: Some(token.to_string()),
        })))
    }

    #[test]
    fn test_fresh_store_is_unauthenticated() {
        let store = SessionStore::open(Box::new(MemorySessionStorage::new()));
        store.check_auth();
        let session = store.snapshot();
        assert!(!session.is_authenticated);
        assert!(session.user.is_none());
        assert!(session.token.is_none());
        assert_eq!(session.is_authenticated, session.has_credentials());
    }

    #[test]
    fn test_rehydration_derives_authenticated() {
        let store = seeded_store("aknight", "tok-1");

        // Before check_auth the derived flag is still false.
        assert!(!store.is_authenticated());

        store.check_auth();
        let session = store.snapshot();
        assert!(session.is_authenticated);
        assert_eq!(
            session.user.as_ref().map(|u| u.username.as_str()),
            Some("aknight")
        );
        assert_eq!(session.token.as_deref(), Some("tok-1"));

        // Idempotent: a second derivation yields the same result.
        store.check_auth();
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_logout_clears_state_and_storage() {
        let storage = MemorySessionStorage::seeded(PersistedSession {
            user: Some(test_user("aknight")),
            token: Some("tok-1".to_string()),
        });
        let store = SessionStore::open(Box::new(storage));
        store.check_auth();
        assert!(store.is_authenticated());

        store.logout();
        let session = store.snapshot();
        assert!(!session.is_authenticated);
        assert!(session.user.is_none());
        assert!(session.token.is_none());

        // check_auth after logout stays unauthenticated (the invariant
        // holds after every operation).
        store.check_auth();
        assert!(!store.is_authenticated());

        // logout is idempotent.
        store.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let store = seeded_store("aknight", "");
        store.check_auth();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_token_provider_reads_live_value() {
        let store = seeded_store("aknight", "tok-live");
        assert_eq!(store.current_token().as_deref(), Some("tok-live"));

        store.logout();
        assert_eq!(store.current_token(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let store = seeded_store("aknight", "tok-1");
        let clone = store.clone();
        store.check_auth();
        assert!(clone.is_authenticated());
        clone.logout();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_corrupt_file_storage_degrades_to_unauthenticated() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"\x00\x01 not json").expect("write garbage");

        let store = SessionStore::open(Box::new(FileSessionStorage::new(path)));
        store.check_auth();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_install_replaces_pair_atomically() {
        let store = seeded_store("old", "tok-old");
        store.check_auth();

        store.install(LoginResponse {
            access_token: "tok-new".to_string(),
            token_type: "bearer".to_string(),
            user: test_user("new"),
        });

        let session = store.snapshot();
        assert!(session.is_authenticated);
        assert!(!session.is_loading);
        assert_eq!(
            session.user.as_ref().map(|u| u.username.as_str()),
            Some("new")
        );
        assert_eq!(session.token.as_deref(), Some("tok-new"));
    }
}
