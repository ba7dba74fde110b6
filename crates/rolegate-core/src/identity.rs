// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authenticated identity.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::claims::Claims;

/// The authenticated user as seen by the rest of the system.
///
/// Role labels are kept verbatim from the credential, including labels that
/// are not a known [`Role`](crate::Role); such labels simply never match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// User ID (the credential subject).
    pub id: String,
    /// User's email.
    pub email: String,
    /// Role labels held by the user.
    pub roles: BTreeSet<String>,
}

impl Identity {
    /// Creates an identity.
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the identity holds the exact role label.
    pub fn has_label(&self, label: &str) -> bool {
        self.roles.contains(label)
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            roles: claims.roles.into_iter().collect(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
