// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Credential payload claims.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claims carried in the payload segment of a credential.
///
/// `sub`, `email` and `roles` are required. `exp` is optional; a payload
/// without it never expires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - the user ID.
    pub sub: String,

    /// User's email.
    pub email: String,

    /// Role labels, in payload order. Duplicates carry no meaning.
    pub roles: Vec<String>,

    /// Expiration time (Unix timestamp, seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Creates claims without an expiry.
    pub fn new(sub: impl Into<String>, email: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            sub: sub.into(),
            email: email.into(),
            roles,
            exp: None,
        }
    }

    /// Sets the expiry.
    pub fn with_exp(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Returns `true` if `exp` is present and strictly before `now`.
    ///
    /// The comparison is done at millisecond precision, so a credential
    /// expiring at second `t` is already expired at `t + 0.001`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.exp {
            Some(exp) => i128::from(exp) * 1000 < i128::from(now.timestamp_millis()),
            None => false,
        }
    }

    /// Returns the expiry as a DateTime.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

// =============================================================================
// Tests
// =============================================================================
