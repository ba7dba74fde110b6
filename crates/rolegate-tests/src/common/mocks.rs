// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Mock Implementations
//!
//! Storage doubles for testing the session store in isolation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use rolegate_core::StorageError;
use rolegate_session::{CredentialStorage, MemoryStorage, SessionStore};

// =============================================================================
// Recording Storage
// =============================================================================

/// A storage call observed by [`RecordingStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageOp {
    /// `get(key)`.
    Get(String),
    /// `set(key, value)`.
    Set(String, String),
    /// `remove(key)`.
    Remove(String),
}

/// In-memory storage that records every call.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    inner: MemoryStorage,
    ops: Mutex<Vec<StorageOp>>,
}

impl RecordingStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage holding one entry. Seeding is not recorded.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inner: MemoryStorage::with_entry(key, value),
            ops: Mutex::new(Vec::new()),
        }
    }

    /// Returns the recorded calls.
    pub fn ops(&self) -> Vec<StorageOp> {
        self.ops.lock().clone()
    }

    /// Returns only the mutating calls.
    pub fn writes(&self) -> Vec<StorageOp> {
        self.ops
            .lock()
            .iter()
            .filter(|op| !matches!(op, StorageOp::Get(_)))
            .cloned()
            .collect()
    }

    /// Reads the current value without recording.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key).ok().flatten()
    }

    /// Clears recorded calls.
    pub fn reset(&self) {
        self.ops.lock().clear();
    }
}

impl CredentialStorage for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.ops.lock().push(StorageOp::Get(key.to_string()));
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.ops
            .lock()
            .push(StorageOp::Set(key.to_string(), value.to_string()));
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.ops.lock().push(StorageOp::Remove(key.to_string()));
        self.inner.remove(key)
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

// =============================================================================
// Failing Storage
// =============================================================================

/// In-memory storage with switchable failures per operation.
#[derive(Debug, Default)]
pub struct FailingStorage {
    inner: MemoryStorage,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_remove: AtomicBool,
}

impl FailingStorage {
    /// Creates storage where every operation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage holding one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            inner: MemoryStorage::with_entry(key, value),
            ..Self::default()
        }
    }

    /// Makes `get` fail.
    pub fn fail_get(&self, fail: bool) -> &Self {
        self.fail_get.store(fail, Ordering::SeqCst);
        self
    }

    /// Makes `set` fail.
    pub fn fail_set(&self, fail: bool) -> &Self {
        self.fail_set.store(fail, Ordering::SeqCst);
        self
    }

    /// Makes `remove` fail.
    pub fn fail_remove(&self, fail: bool) -> &Self {
        self.fail_remove.store(fail, Ordering::SeqCst);
        self
    }

    /// Reads the current value, ignoring failure switches.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.get(key).ok().flatten()
    }
}

impl CredentialStorage for FailingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("injected read failure"));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_set.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("injected write failure"));
        }
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("injected remove failure"));
        }
        self.inner.remove(key)
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

// =============================================================================
// Store Helpers
// =============================================================================

/// A store over fresh [`RecordingStorage`], returning both.
pub fn recording_store() -> (Arc<SessionStore>, Arc<RecordingStorage>) {
    recording_store_with(RecordingStorage::new())
}

/// A store over the given [`RecordingStorage`], returning both.
pub fn recording_store_with(
    storage: RecordingStorage,
) -> (Arc<SessionStore>, Arc<RecordingStorage>) {
    let storage = Arc::new(storage);
    let store = Arc::new(SessionStore::new(storage.clone()));
    (store, storage)
}

/// A store over the given [`FailingStorage`], returning both.
pub fn failing_store(storage: FailingStorage) -> (Arc<SessionStore>, Arc<FailingStorage>) {
    let storage = Arc::new(storage);
    let store = Arc::new(SessionStore::new(storage.clone()));
    (store, storage)
}
