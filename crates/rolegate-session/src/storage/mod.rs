// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Durable credential storage.
//!
//! Storage holds opaque strings under string keys. Nothing in this module
//! parses the stored value; only the session codec does.
//!
//! Operations are synchronous and expected to complete quickly. The session
//! store moves the bootstrap read onto the blocking pool; login and logout
//! call storage inline.

use std::fmt::Debug;

use rolegate_core::StorageError;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Key under which the raw credential is persisted by default.
pub const DEFAULT_STORAGE_KEY: &str = "auth_token";

/// Durable key-value storage for credentials.
///
/// # Contract
///
/// - `get` returns `Ok(None)` when the key has no entry.
/// - `set` either stores the full value or leaves the previous entry intact.
/// - `remove` succeeds when the key has no entry.
pub trait CredentialStorage: Send + Sync + Debug {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes the entry under `key`, if any.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Returns the backend name for logging.
    fn name(&self) -> &'static str;
}
