// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Test Fixtures
//!
//! Pre-built credentials and identities for consistent testing.

use rolegate_core::{Identity, MockPersona, Role};

use super::builders::TokenBuilder;

// =============================================================================
// Token Fixtures
// =============================================================================

/// Ready-made credentials.
pub struct TokenFixtures;

impl TokenFixtures {
    /// Valid credential holding only `USER`.
    pub fn user() -> String {
        MockPersona::User.token().to_string()
    }

    /// Valid credential holding only `ADMIN`.
    pub fn admin() -> String {
        MockPersona::Admin.token().to_string()
    }

    /// Valid credential holding only `SUPER_ADMIN`.
    pub fn super_admin() -> String {
        MockPersona::SuperAdmin.token().to_string()
    }

    /// Valid credential holding `USER` and `ADMIN`.
    pub fn user_and_admin() -> String {
        TokenBuilder::new()
            .subject("multi-1")
            .email("multi@example.com")
            .roles([Role::User, Role::Admin])
            .expires_in_secs(3600)
            .build()
    }

    /// Valid credential with an empty role list.
    pub fn no_roles() -> String {
        TokenBuilder::new()
            .subject("plain-1")
            .email("plain@example.com")
            .expires_in_secs(3600)
            .build()
    }

    /// Valid credential without an `exp` claim.
    pub fn never_expires() -> String {
        TokenBuilder::new()
            .subject("forever-1")
            .email("forever@example.com")
            .role(Role::User)
            .build()
    }

    /// Credential that expired an hour ago.
    pub fn expired() -> String {
        TokenBuilder::new()
            .subject("expired-1")
            .email("expired@example.com")
            .role(Role::Admin)
            .expired_secs_ago(3600)
            .build()
    }

    /// Credential holding a lowercase role label.
    pub fn lowercase_admin() -> String {
        TokenBuilder::new()
            .subject("lower-1")
            .email("lower@example.com")
            .role_label("admin")
            .expires_in_secs(3600)
            .build()
    }

    /// Credentials that cannot be decoded.
    pub fn malformed() -> Vec<String> {
        vec![
            String::new(),
            "not-a-token".to_string(),
            "a.b".to_string(),
            "a.b.c.d".to_string(),
            "header.%%%.signature".to_string(),
            super::builders::token_with_raw_payload(b"not json"),
            TokenBuilder::new().without_subject().build_unsigned(),
            TokenBuilder::new().without_roles().build_unsigned(),
        ]
    }
}

// =============================================================================
// Identity Fixtures
// =============================================================================

/// Ready-made identities.
pub struct IdentityFixtures;

impl IdentityFixtures {
    /// Identity of the `user` persona.
    pub fn user() -> Identity {
        Identity::new("user-123", "user@example.com", ["USER"])
    }

    /// Identity of the `admin` persona.
    pub fn admin() -> Identity {
        Identity::new("admin-456", "admin@example.com", ["ADMIN"])
    }

    /// Identity of the `super-admin` persona.
    pub fn super_admin() -> Identity {
        Identity::new("super-789", "super@example.com", ["SUPER_ADMIN"])
    }

    /// Identity with no roles.
    pub fn no_roles() -> Identity {
        Identity::new("plain-1", "plain@example.com", Vec::<String>::new())
    }

    /// Identity holding every known role.
    pub fn all_roles() -> Identity {
        Identity::new(
            "all-1",
            "all@example.com",
            Role::all().iter().map(|r| r.as_str()),
        )
    }
}
