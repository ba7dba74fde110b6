// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Session Integration Tests
//!
//! Integration tests for rolegate-session:
//!
//! - Bootstrap from empty, valid, expired, malformed and unreadable storage
//! - Login atomicity and round-trip
//! - Logout idempotence
//! - Subscriber notifications and bootstrap races
//!
//! ## Test Categories
//!
//! - `test_bootstrap_*`: Restoring a persisted session
//! - `test_login_*`: Establishing a session
//! - `test_logout_*`: Ending a session
//! - `test_handle_*`: Observing the session

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use rolegate_core::{LoginError, SessionCodec, StorageError};
use rolegate_session::{CredentialStorage, FileStorage, MemoryStorage, SessionStore, DEFAULT_STORAGE_KEY};
use rolegate_tests::prelude::*;

const KEY: &str = DEFAULT_STORAGE_KEY;
const CHANGE_TIMEOUT: Duration = Duration::from_secs(2);

// =============================================================================
// Bootstrap Tests
// =============================================================================

#[tokio::test]
async fn test_bootstrap_empty_storage() {
    init_test_logging();
    let (store, storage) = recording_store();

    let state = store.bootstrap().await;

    state.assert_signed_out();
    assert!(storage.writes().is_empty());
}

#[tokio::test]
async fn test_bootstrap_restores_valid_credential() {
    let (store, storage) =
        recording_store_with(RecordingStorage::with_entry(KEY, TokenFixtures::admin()));

    let state = store.bootstrap().await;

    state.assert_authenticated_as("admin-456");
    assert_eq!(storage.ops(), vec![StorageOp::Get(KEY.to_string())]);
}

#[tokio::test]
async fn test_bootstrap_purges_expired_credential() {
    let (store, storage) =
        recording_store_with(RecordingStorage::with_entry(KEY, TokenFixtures::expired()));

    let state = store.bootstrap().await;

    state.assert_signed_out();
    assert_eq!(storage.writes(), vec![StorageOp::Remove(KEY.to_string())]);
    assert!(storage.peek(KEY).is_none());
}

#[tokio::test]
async fn test_bootstrap_purges_malformed_credentials() {
    for token in TokenFixtures::malformed() {
        let (store, storage) = recording_store_with(RecordingStorage::with_entry(KEY, token.clone()));

        store.bootstrap().await.assert_signed_out();
        assert!(storage.peek(KEY).is_none(), "kept {:?}", token);
    }
}

#[tokio::test]
async fn test_bootstrap_read_failure_is_signed_out() {
    let failing = FailingStorage::with_entry(KEY, TokenFixtures::admin());
    failing.fail_get(true);
    let (store, storage) = failing_store(failing);

    store.bootstrap().await.assert_signed_out();

    // Unreadable is not the same as invalid: the entry is left alone.
    assert_eq!(storage.peek(KEY), Some(TokenFixtures::admin()));
}

#[tokio::test]
async fn test_bootstrap_runs_once() {
    let (store, storage) =
        recording_store_with(RecordingStorage::with_entry(KEY, TokenFixtures::user()));

    let first = store.bootstrap().await;
    let second = store.bootstrap().await;

    assert_eq!(first, second);
    let reads = storage
        .ops()
        .into_iter()
        .filter(|op| matches!(op, StorageOp::Get(_)))
        .count();
    assert_eq!(reads, 1);
}

#[tokio::test]
async fn test_bootstrap_from_file_storage() {
    let dir = scratch_dir("rolegate-session");
    {
        let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
        let store = SessionStore::new(storage);
        store.bootstrap().await;
        store.login(&TokenFixtures::super_admin()).unwrap();
    }

    let storage = Arc::new(FileStorage::open(dir.path()).unwrap());
    let store = SessionStore::new(storage);
    store.bootstrap().await.assert_authenticated_as("super-789");
}

#[tokio::test]
async fn test_bootstrap_never_expiring_credential() {
    let storage = Arc::new(MemoryStorage::with_entry(KEY, TokenFixtures::never_expires()));
    let store = SessionStore::new(storage);

    store.bootstrap().await.assert_authenticated_as("forever-1");
}

// =============================================================================
// Login Tests
// =============================================================================

#[tokio::test]
async fn test_login_round_trip_matches_decode() {
    let (store, storage) = recording_store();
    store.bootstrap().await;

    let token = TokenFixtures::user_and_admin();
    let expected = SessionCodec::new().decode(&token).unwrap();
    let identity = store.login(&token).unwrap();

    assert_eq!(*identity, expected);
    assert_eq!(store.snapshot().identity(), Some(&expected));
    assert_eq!(storage.peek(KEY), Some(token));
}

#[tokio::test]
async fn test_login_expired_leaves_everything_unchanged() {
    let (store, storage) = recording_store();
    store.bootstrap().await;
    store.login(&TokenFixtures::admin()).unwrap();
    storage.reset();
    let before = store.snapshot();

    let err = store.login(&TokenFixtures::expired()).unwrap_err();

    assert!(err.is_invalid_credential());
    assert!(err.decode_error().is_some_and(|e| e.is_expired()));
    assert_eq!(store.snapshot(), before);
    assert!(storage.writes().is_empty());
    assert_eq!(storage.peek(KEY), Some(TokenFixtures::admin()));
}

#[tokio::test]
async fn test_login_expired_when_signed_out() {
    let (store, storage) = recording_store();
    store.bootstrap().await;

    assert!(store.login(&TokenFixtures::expired()).is_err());

    store.snapshot().assert_signed_out();
    assert!(storage.peek(KEY).is_none());
}

#[tokio::test]
async fn test_login_malformed_leaves_state() {
    let (store, storage) = recording_store();
    store.bootstrap().await;
    store.login(&TokenFixtures::user()).unwrap();
    storage.reset();

    for token in TokenFixtures::malformed() {
        let err = store.login(&token).unwrap_err();
        assert!(matches!(err, LoginError::InvalidCredential(_)));
    }

    store.snapshot().assert_authenticated_as("user-123");
    assert!(storage.writes().is_empty());
}

#[tokio::test]
async fn test_login_storage_failure_leaves_state() {
    let (store, storage) = failing_store(FailingStorage::new());
    store.bootstrap().await;
    storage.fail_set(true);

    let err = store.login(&TokenFixtures::admin()).unwrap_err();

    assert!(matches!(err, LoginError::Storage(StorageError::Unavailable { .. })));
    store.snapshot().assert_signed_out();
    assert!(storage.peek(KEY).is_none());
}

#[tokio::test]
async fn test_login_replaces_previous_identity() {
    let (store, storage) = recording_store();
    store.bootstrap().await;

    store.login(&TokenFixtures::user()).unwrap();
    store.login(&TokenFixtures::super_admin()).unwrap();

    store.snapshot().assert_authenticated_as("super-789");
    assert_eq!(storage.peek(KEY), Some(TokenFixtures::super_admin()));
}

#[tokio::test]
async fn test_login_with_custom_key() {
    let storage = Arc::new(MemoryStorage::new());
    let store = SessionStore::new(storage.clone()).with_key("alt_token");
    store.bootstrap().await;

    store.login(&TokenFixtures::user()).unwrap();

    assert!(storage.get(KEY).unwrap().is_none());
    assert_eq!(storage.get("alt_token").unwrap(), Some(TokenFixtures::user()));
}

// =============================================================================
// Logout Tests
// =============================================================================

#[tokio::test]
async fn test_logout_is_idempotent() {
    let (store, storage) = recording_store();
    store.bootstrap().await;
    store.login(&TokenFixtures::admin()).unwrap();

    store.logout();
    let once = store.snapshot();
    assert!(storage.peek(KEY).is_none());

    store.logout();
    let twice = store.snapshot();
    assert!(storage.peek(KEY).is_none());

    assert_eq!(once, twice);
    twice.assert_signed_out();
}

#[tokio::test]
async fn test_logout_without_session() {
    let (store, storage) = recording_store();
    store.bootstrap().await;

    store.logout();

    store.snapshot().assert_signed_out();
    assert_eq!(storage.writes(), vec![StorageOp::Remove(KEY.to_string())]);
}

#[tokio::test]
async fn test_logout_remove_failure_still_clears_identity() {
    let (store, storage) = failing_store(FailingStorage::new());
    store.bootstrap().await;
    store.login(&TokenFixtures::admin()).unwrap();
    storage.fail_remove(true);

    store.logout();

    store.snapshot().assert_signed_out();
}

// =============================================================================
// Handle Tests
// =============================================================================

#[tokio::test]
async fn test_handle_sees_each_transition() {
    let (store, _storage) = recording_store();
    let mut handle = store.handle();
    handle.snapshot().assert_phase(SessionPhase::Uninitialized);
    assert!(handle.is_loading());

    store.bootstrap().await;
    expect_change(&mut handle, CHANGE_TIMEOUT).await.assert_signed_out();

    store.login(&TokenFixtures::user()).unwrap();
    expect_change(&mut handle, CHANGE_TIMEOUT)
        .await
        .assert_authenticated_as("user-123");
    assert!(handle.is_authenticated());

    store.logout();
    expect_change(&mut handle, CHANGE_TIMEOUT).await.assert_signed_out();
    assert!(handle.identity().is_none());
}

#[tokio::test]
async fn test_handle_not_notified_by_failed_login() {
    let (store, _storage) = recording_store();
    store.bootstrap().await;
    let mut handle = store.handle();

    assert!(store.login(&TokenFixtures::expired()).is_err());

    expect_no_change(&mut handle, Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_handle_wait_until_loaded() {
    let (store, _storage) =
        recording_store_with(RecordingStorage::with_entry(KEY, TokenFixtures::admin()));
    let mut handle = store.handle();

    let task = {
        let store = store.clone();
        tokio::spawn(async move { store.bootstrap().await })
    };

    let loaded = tokio::time::timeout(CHANGE_TIMEOUT, handle.wait_until_loaded())
        .await
        .unwrap();
    loaded.assert_authenticated_as("admin-456");
    task.await.unwrap();
}

// =============================================================================
// Bootstrap Race
// =============================================================================

/// Storage whose reads block until released.
#[derive(Debug)]
struct GatedStorage {
    inner: MemoryStorage,
    gate: Mutex<mpsc::Receiver<()>>,
}

impl CredentialStorage for GatedStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _ = self.gate.lock().recv();
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key)
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

#[tokio::test]
async fn test_login_during_bootstrap_wins() {
    let (release, gate) = mpsc::channel();
    let storage = Arc::new(GatedStorage {
        inner: MemoryStorage::with_entry(KEY, TokenFixtures::user()),
        gate: Mutex::new(gate),
    });
    let store = Arc::new(SessionStore::new(storage));
    let mut handle = store.handle();

    let task = {
        let store = store.clone();
        tokio::spawn(async move { store.bootstrap().await })
    };

    expect_change(&mut handle, CHANGE_TIMEOUT)
        .await
        .assert_phase(SessionPhase::Bootstrapping);

    store.login(&TokenFixtures::admin()).unwrap();
    release.send(()).unwrap();

    let returned = task.await.unwrap();
    returned.assert_authenticated_as("admin-456");
    store.snapshot().assert_authenticated_as("admin-456");
}

#[tokio::test]
async fn test_logout_during_bootstrap_wins() {
    let (release, gate) = mpsc::channel();
    let storage = Arc::new(GatedStorage {
        inner: MemoryStorage::with_entry(KEY, TokenFixtures::user()),
        gate: Mutex::new(gate),
    });
    let store = Arc::new(SessionStore::new(storage));
    let mut handle = store.handle();

    let task = {
        let store = store.clone();
        tokio::spawn(async move { store.bootstrap().await })
    };

    expect_change(&mut handle, CHANGE_TIMEOUT)
        .await
        .assert_phase(SessionPhase::Bootstrapping);

    store.logout();
    release.send(()).unwrap();

    task.await.unwrap().assert_signed_out();
    store.snapshot().assert_signed_out();
}
