// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Builders
//!
//! Builders for credentials and session stores with sensible defaults.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header};
use serde_json::{json, Map, Value};

use rolegate_core::Role;
use rolegate_session::{CredentialStorage, SessionStore};

/// Secret used to sign test credentials. The codec never verifies it.
pub const TEST_SIGNING_SECRET: &[u8] = b"rolegate-test-secret";

// =============================================================================
// Token Builder
// =============================================================================

/// Builder for signed credentials.
///
/// Defaults to subject `test-user`, email `test@example.com`, no roles and
/// no expiry.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    sub: Option<String>,
    email: Option<String>,
    roles: Option<Vec<String>>,
    exp: Option<i64>,
    extra: Map<String, Value>,
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            sub: Some("test-user".to_string()),
            email: Some("test@example.com".to_string()),
            roles: Some(Vec::new()),
            exp: None,
            extra: Map::new(),
        }
    }

    /// Set the subject.
    pub fn subject(mut self, sub: impl Into<String>) -> Self {
        self.sub = Some(sub.into());
        self
    }

    /// Set the email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Add a known role.
    pub fn role(self, role: Role) -> Self {
        self.role_label(role.as_str())
    }

    /// Add a raw role label, which may be unknown or differently cased.
    pub fn role_label(mut self, label: impl Into<String>) -> Self {
        self.roles.get_or_insert_with(Vec::new).push(label.into());
        self
    }

    /// Replace the role list.
    pub fn roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles = Some(roles.into_iter().map(|r| r.as_str().to_string()).collect());
        self
    }

    /// Set an absolute expiry (Unix seconds).
    pub fn expires_at(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Expire `secs` seconds from now.
    pub fn expires_in_secs(self, secs: i64) -> Self {
        self.expires_at(Utc::now().timestamp() + secs)
    }

    /// Expire `secs` seconds in the past.
    pub fn expired_secs_ago(self, secs: i64) -> Self {
        self.expires_at(Utc::now().timestamp() - secs)
    }

    /// Drop the subject claim.
    pub fn without_subject(mut self) -> Self {
        self.sub = None;
        self
    }

    /// Drop the email claim.
    pub fn without_email(mut self) -> Self {
        self.email = None;
        self
    }

    /// Drop the roles claim.
    pub fn without_roles(mut self) -> Self {
        self.roles = None;
        self
    }

    /// Add an extra claim.
    pub fn claim(mut self, name: impl Into<String>, value: Value) -> Self {
        self.extra.insert(name.into(), value);
        self
    }

    /// Returns the payload as JSON.
    pub fn payload(&self) -> Value {
        let mut payload = self.extra.clone();
        if let Some(sub) = &self.sub {
            payload.insert("sub".into(), json!(sub));
        }
        if let Some(email) = &self.email {
            payload.insert("email".into(), json!(email));
        }
        if let Some(roles) = &self.roles {
            payload.insert("roles".into(), json!(roles));
        }
        if let Some(exp) = self.exp {
            payload.insert("exp".into(), json!(exp));
        }
        Value::Object(payload)
    }

    /// Build a credential signed with HS256.
    ///
    /// # Panics
    /// Panics if encoding fails.
    pub fn build(&self) -> String {
        jsonwebtoken::encode(
            &Header::default(),
            &self.payload(),
            &EncodingKey::from_secret(TEST_SIGNING_SECRET),
        )
        .expect("Failed to encode test credential")
    }

    /// Build a credential with a placeholder signature segment.
    pub fn build_unsigned(&self) -> String {
        raw_token(&json!({"alg": "HS256", "typ": "JWT"}), &self.payload())
    }
}

/// Assemble a credential from arbitrary header and payload JSON.
pub fn raw_token(header: &Value, payload: &Value) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

/// Assemble a credential whose payload segment is the given raw bytes.
pub fn token_with_raw_payload(payload: &[u8]) -> String {
    format!(
        "{}.{}.signature",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

// =============================================================================
// Store Builders
// =============================================================================

/// Build a session store over any storage.
pub fn store_over(storage: Arc<dyn CredentialStorage>) -> Arc<SessionStore> {
    Arc::new(SessionStore::new(storage))
}
