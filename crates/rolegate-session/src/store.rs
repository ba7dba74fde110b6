// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! The session store and its read handles.
//!
//! [`SessionStore`] is the only writer of the session state. Every transition
//! is published through a `tokio::sync::watch` channel, so each
//! [`SessionHandle`] observes the latest committed [`SessionState`] as soon as
//! the writer returns.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized --bootstrap--> Bootstrapping --+--> Authenticated
//!                                              +--> Unauthenticated
//!
//! Authenticated | Unauthenticated --login ok--> Authenticated
//! Authenticated | Unauthenticated --logout----> Unauthenticated
//! ```
//!
//! Writers are serialized by an internal lock. Readers never take it.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use rolegate_core::{Identity, LoginError, SessionCodec, SessionPhase, SessionState};

use crate::storage::{CredentialStorage, DEFAULT_STORAGE_KEY};

// =============================================================================
// SessionStore
// =============================================================================

/// Process-wide authentication state.
///
/// # Example
///
/// ```rust,ignore
/// let store = SessionStore::new(Arc::new(MemoryStorage::new()));
/// store.bootstrap().await;
///
/// match store.login(token) {
///     Ok(identity) => println!("welcome {}", identity.email),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
pub struct SessionStore {
    storage: Arc<dyn CredentialStorage>,
    key: String,
    codec: SessionCodec,
    state: watch::Sender<SessionState>,
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Creates a store over `storage` using [`DEFAULT_STORAGE_KEY`].
    ///
    /// The store starts `Uninitialized`; call [`bootstrap`](Self::bootstrap)
    /// once at startup.
    pub fn new(storage: Arc<dyn CredentialStorage>) -> Self {
        let (state, _) = watch::channel(SessionState::uninitialized());
        Self {
            storage,
            key: DEFAULT_STORAGE_KEY.to_string(),
            codec: SessionCodec::new(),
            state,
            write_lock: Mutex::new(()),
        }
    }

    /// Sets the storage key holding the credential.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Returns the storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the storage backend name.
    pub fn storage_name(&self) -> &'static str {
        self.storage.name()
    }

    /// Returns a new read handle.
    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            rx: self.state.subscribe(),
        }
    }

    /// Returns the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Restores the session from durable storage.
    ///
    /// Only the first call does any work; later calls return the current
    /// state. A persisted credential that fails to decode is purged. A
    /// storage read failure is logged and treated as no credential.
    ///
    /// If a login or logout commits while the read is in flight, that
    /// transition wins and the read result is discarded.
    pub async fn bootstrap(&self) -> SessionState {
        {
            let _guard = self.write_lock.lock();
            let phase = self.state.borrow().phase();
            if phase != SessionPhase::Uninitialized {
                debug!(phase = %phase, "Bootstrap skipped");
                return self.snapshot();
            }
            self.state.send_replace(SessionState::bootstrapping());
        }

        debug!(backend = self.storage.name(), "Reading persisted credential");

        let storage = Arc::clone(&self.storage);
        let key = self.key.clone();
        let credential = match tokio::task::spawn_blocking(move || storage.get(&key)).await {
            Ok(Ok(credential)) => credential,
            Ok(Err(e)) => {
                warn!(
                    backend = self.storage.name(),
                    error = %e,
                    "Failed to read persisted credential"
                );
                None
            }
            Err(e) => {
                warn!(error = %e, "Credential read task failed");
                None
            }
        };

        let _guard = self.write_lock.lock();
        let phase = self.state.borrow().phase();
        if phase != SessionPhase::Bootstrapping {
            debug!("Session changed during bootstrap, discarding persisted credential");
            return self.snapshot();
        }

        let next = match credential {
            None => SessionState::unauthenticated(),
            Some(credential) => match self.codec.decode(&credential) {
                Ok(identity) => SessionState::authenticated(identity),
                Err(e) => {
                    warn!(kind = e.kind(), "Persisted credential rejected, purging");
                    self.remove_persisted();
                    SessionState::unauthenticated()
                }
            },
        };

        self.state.send_replace(next.clone());
        info!(phase = %next.phase(), "Session bootstrapped");
        next
    }

    /// Establishes a session from `credential`.
    ///
    /// The credential is decoded first; on failure neither storage nor the
    /// published state is touched. On success the raw credential is
    /// persisted and the identity published.
    pub fn login(&self, credential: &str) -> Result<Arc<Identity>, LoginError> {
        let identity = match self.codec.decode(credential) {
            Ok(identity) => Arc::new(identity),
            Err(e) => {
                info!(kind = e.kind(), "Login rejected");
                return Err(e.into());
            }
        };

        let _guard = self.write_lock.lock();
        if let Err(e) = self.storage.set(&self.key, credential) {
            warn!(
                backend = self.storage.name(),
                error = %e,
                "Failed to persist credential"
            );
            return Err(e.into());
        }

        self.state
            .send_replace(SessionState::authenticated(Arc::clone(&identity)));
        info!(backend = self.storage.name(), "Login succeeded");
        Ok(identity)
    }

    /// Ends the session.
    ///
    /// Always clears the identity, even if the durable entry could not be
    /// removed. Calling it without an active session is a no-op.
    pub fn logout(&self) {
        let _guard = self.write_lock.lock();
        self.remove_persisted();

        let previous = self.state.send_replace(SessionState::unauthenticated());
        if previous.is_authenticated() {
            info!("Logged out");
        } else {
            debug!(phase = %previous.phase(), "Logout without active session");
        }
    }

    fn remove_persisted(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            warn!(
                backend = self.storage.name(),
                error = %e,
                "Failed to remove persisted credential"
            );
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("storage", &self.storage.name())
            .field("key", &self.key)
            .field("phase", &self.state.borrow().phase())
            .finish()
    }
}

// =============================================================================
// SessionHandle
// =============================================================================

/// A read-only view of the session.
///
/// Handles are cheap to clone and may outlive the store; once the store is
/// dropped they keep returning the last committed state.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<SessionState>,
}

impl SessionHandle {
    /// Returns the latest committed state.
    ///
    /// Take one snapshot per decision and evaluate against it.
    pub fn snapshot(&self) -> SessionState {
        self.rx.borrow().clone()
    }

    /// Returns `true` if an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// Returns `true` while bootstrap has not completed.
    pub fn is_loading(&self) -> bool {
        self.rx.borrow().is_loading()
    }

    /// Returns the current identity, if any.
    pub fn identity(&self) -> Option<Arc<Identity>> {
        self.rx.borrow().identity_arc()
    }

    /// Waits for the next published transition.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<SessionState> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Waits until bootstrap has completed and returns that state.
    ///
    /// If the store is dropped first, the last committed state is returned.
    pub async fn wait_until_loaded(&mut self) -> SessionState {
        let loaded = self
            .rx
            .wait_for(|state| !state.is_loading())
            .await
            .map(|state| state.clone());
        match loaded {
            Ok(state) => state,
            Err(_) => self.snapshot(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use rolegate_core::{MockPersona, Role, StorageError};

    use crate::storage::MemoryStorage;

    fn token_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"sub":"u-1","email":"u@example.com","roles":["USER"],"exp":{}}}"#,
            exp
        ));
        format!("{}.{}.sig", header, payload)
    }

    #[derive(Debug)]
    struct ReadOnlyStorage;

    impl CredentialStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::unavailable("offline"))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::unavailable("read-only"))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::unavailable("read-only"))
        }

        fn name(&self) -> &'static str {
            "read-only"
        }
    }

    #[tokio::test]
    async fn test_bootstrap_without_credential() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let handle = store.handle();
        assert!(handle.is_loading());

        let state = store.bootstrap().await;
        assert_eq!(state.phase(), SessionPhase::Unauthenticated);
        assert!(!handle.is_loading());
        assert!(!handle.is_authenticated());
    }

    #[tokio::test]
    async fn test_bootstrap_restores_persisted_session() {
        let storage = Arc::new(MemoryStorage::with_entry(
            DEFAULT_STORAGE_KEY,
            MockPersona::Admin.token(),
        ));
        let store = SessionStore::new(storage);

        let state = store.bootstrap().await;
        assert_eq!(state.phase(), SessionPhase::Authenticated);
        assert!(state.evaluator().has_role(Role::Admin));
    }

    #[tokio::test]
    async fn test_bootstrap_purges_invalid_credential() {
        let storage = Arc::new(MemoryStorage::with_entry(DEFAULT_STORAGE_KEY, token_with_exp(1)));
        let store = SessionStore::new(storage.clone());

        let state = store.bootstrap().await;
        assert_eq!(state.phase(), SessionPhase::Unauthenticated);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_read_failure_is_unauthenticated() {
        let store = SessionStore::new(Arc::new(ReadOnlyStorage));
        let state = store.bootstrap().await;
        assert_eq!(state.phase(), SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_bootstrap_runs_once() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.bootstrap().await;

        storage.set(DEFAULT_STORAGE_KEY, MockPersona::User.token()).unwrap();
        let state = store.bootstrap().await;
        assert_eq!(state.phase(), SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_login_persists_and_publishes() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        let handle = store.handle();
        store.bootstrap().await;

        let identity = store.login(MockPersona::SuperAdmin.token()).unwrap();
        assert_eq!(identity.id, "super-789");
        assert_eq!(handle.identity().as_deref(), Some(identity.as_ref()));
        assert_eq!(
            storage.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(MockPersona::SuperAdmin.token())
        );
    }

    #[tokio::test]
    async fn test_login_failure_leaves_state_untouched() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.bootstrap().await;
        store.login(MockPersona::User.token()).unwrap();
        let before = store.snapshot();

        let err = store.login(&token_with_exp(1)).unwrap_err();
        assert!(err.is_invalid_credential());
        assert_eq!(store.snapshot(), before);
        assert_eq!(
            storage.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
            Some(MockPersona::User.token())
        );
    }

    #[tokio::test]
    async fn test_login_storage_failure_leaves_state_untouched() {
        let store = SessionStore::new(Arc::new(ReadOnlyStorage));
        store.bootstrap().await;

        let err = store.login(MockPersona::Admin.token()).unwrap_err();
        assert!(matches!(err, LoginError::Storage(_)));
        assert!(!store.snapshot().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.bootstrap().await;
        store.login(MockPersona::Admin.token()).unwrap();

        store.logout();
        let once = store.snapshot();
        store.logout();

        assert_eq!(store.snapshot(), once);
        assert_eq!(once.phase(), SessionPhase::Unauthenticated);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_logout_clears_identity_when_removal_fails() {
        let store = SessionStore::new(Arc::new(ReadOnlyStorage));
        store.bootstrap().await;
        store.logout();
        assert_eq!(store.snapshot().phase(), SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_handle_observes_transitions() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let mut handle = store.handle();
        store.bootstrap().await;

        let loaded = handle.wait_until_loaded().await;
        assert_eq!(loaded.phase(), SessionPhase::Unauthenticated);

        store.login(MockPersona::User.token()).unwrap();
        let next = handle.changed().await.unwrap();
        assert!(next.is_authenticated());
    }

    #[tokio::test]
    async fn test_handle_outlives_store() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        let mut handle = store.handle();
        store.bootstrap().await;
        handle.wait_until_loaded().await;
        drop(store);

        assert!(handle.changed().await.is_none());
        assert_eq!(handle.snapshot().phase(), SessionPhase::Unauthenticated);
    }

    #[tokio::test]
    async fn test_custom_key() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone()).with_key("session");
        store.bootstrap().await;
        store.login(MockPersona::User.token()).unwrap();

        assert!(storage.get("session").unwrap().is_some());
        assert!(storage.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }
}
