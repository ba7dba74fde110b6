// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Error types for rolegate.
//!
//! # Error Hierarchy
//!
//! ```text
//! DecodeError     - credential could not become an identity (codec)
//! ├── Malformed   - structurally invalid token
//! └── Expired     - `exp` is in the past
//!
//! LoginError      - returned by the session store's login
//! ├── InvalidCredential(DecodeError)
//! └── Storage(StorageError)
//!
//! StorageError    - durable credential storage failures
//! ```
//!
//! Guard denials are not errors; they are ordinary decisions.

use std::io;

use thiserror::Error;

// =============================================================================
// DecodeError
// =============================================================================

/// Reasons a credential failed to decode into an identity.
///
/// Callers treat both variants the same way: the session is absent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Wrong segment count, bad encoding, or missing/invalid claims.
    #[error("Malformed credential: {reason}")]
    Malformed {
        /// What was wrong with the credential.
        reason: String,
    },

    /// The `exp` claim lies in the past.
    #[error("Credential expired at {exp} (now {now})")]
    Expired {
        /// Expiry from the payload, seconds since epoch.
        exp: i64,
        /// Evaluation time, seconds since epoch.
        now: i64,
    },
}

impl DecodeError {
    /// Creates a malformed-credential error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }

    /// Returns `true` if the credential was well-formed but expired.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }

    /// Returns a short label for structured logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed { .. } => "malformed",
            Self::Expired { .. } => "expired",
        }
    }
}

// =============================================================================
// StorageError
// =============================================================================

/// Durable credential storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("Storage I/O error for key '{key}': {source}")]
    Io {
        /// Storage key involved.
        key: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The storage key is not usable by the backend.
    #[error("Invalid storage key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why the key was rejected.
        reason: String,
    },

    /// Backend refused the operation.
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Error message.
        message: String,
    },
}

impl StorageError {
    /// Creates an I/O error for a key.
    pub fn io(key: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Creates an invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

// =============================================================================
// LoginError
// =============================================================================

/// Errors returned by login.
///
/// On any error the session state and durable storage are left exactly as
/// they were before the call.
#[derive(Debug, Error)]
pub enum LoginError {
    /// The credential did not decode into a valid identity.
    #[error("Invalid credential: {0}")]
    InvalidCredential(#[from] DecodeError),

    /// The credential was valid but could not be persisted.
    #[error("Failed to persist credential: {0}")]
    Storage(#[from] StorageError),
}

impl LoginError {
    /// Returns `true` if the credential itself was rejected.
    pub fn is_invalid_credential(&self) -> bool {
        matches!(self, Self::InvalidCredential(_))
    }

    /// Returns the decode failure, if that was the cause.
    pub fn decode_error(&self) -> Option<&DecodeError> {
        match self {
            Self::InvalidCredential(e) => Some(e),
            Self::Storage(_) => None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
