// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authorization evaluator.
//!
//! Two total, side-effect-free predicates over one session snapshot. Because
//! the evaluator borrows an immutable [`SessionState`], every check made
//! through the same evaluator sees the same identity.

use crate::identity::Identity;
use crate::role::{Role, RoleSet};
use crate::session::SessionState;

/// Role-membership predicates bound to one snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    identity: Option<&'a Identity>,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator for a session snapshot.
    pub fn new(state: &'a SessionState) -> Self {
        Self {
            identity: state.identity(),
        }
    }

    /// Creates an evaluator for an optional identity.
    pub fn for_identity(identity: Option<&'a Identity>) -> Self {
        Self { identity }
    }

    /// Returns `true` if the identity holds `required`.
    ///
    /// Always `false` without an identity. There is no role hierarchy.
    pub fn has_role(&self, required: Role) -> bool {
        match self.identity {
            Some(identity) => identity.has_label(required.as_str()),
            None => false,
        }
    }

    /// Returns `true` if the identity holds at least one role in `required`.
    ///
    /// Always `false` without an identity or for an empty set.
    pub fn has_any_role(&self, required: &RoleSet) -> bool {
        match self.identity {
            Some(identity) => required.iter().any(|role| identity.has_label(role.as_str())),
            None => false,
        }
    }

    /// Returns the identity the evaluator is bound to.
    pub fn identity(&self) -> Option<&'a Identity> {
        self.identity
    }
}

// =============================================================================
// Tests
// =============================================================================
