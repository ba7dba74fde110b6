// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Observable session state.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::evaluator::Evaluator;
use crate::identity::Identity;

// =============================================================================
// SessionPhase
// =============================================================================

/// Lifecycle phase of the session.
///
/// ```text
/// Uninitialized -> Bootstrapping -> { Authenticated, Unauthenticated }
/// ```
///
/// From either terminal phase, a successful login moves to `Authenticated`
/// and a logout moves to `Unauthenticated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Bootstrap has not started.
    Uninitialized,
    /// The persisted credential is being read.
    Bootstrapping,
    /// An identity is present.
    Authenticated,
    /// No identity is present.
    Unauthenticated,
}

impl SessionPhase {
    /// Returns `true` while the initial bootstrap has not completed.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Bootstrapping)
    }

    /// Returns the phase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Bootstrapping => "bootstrapping",
            Self::Authenticated => "authenticated",
            Self::Unauthenticated => "unauthenticated",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// SessionState
// =============================================================================

/// An immutable snapshot of the authentication state.
///
/// The constructors are the only way to build a state, which keeps the
/// phase and the identity consistent: an identity is present exactly when
/// the phase is `Authenticated`. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    phase: SessionPhase,
    identity: Option<Arc<Identity>>,
}

impl SessionState {
    /// State before bootstrap has started.
    pub fn uninitialized() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            identity: None,
        }
    }

    /// State while the persisted credential is being read.
    pub fn bootstrapping() -> Self {
        Self {
            phase: SessionPhase::Bootstrapping,
            identity: None,
        }
    }

    /// Authenticated state holding an identity.
    pub fn authenticated(identity: impl Into<Arc<Identity>>) -> Self {
        Self {
            phase: SessionPhase::Authenticated,
            identity: Some(identity.into()),
        }
    }

    /// Unauthenticated terminal state.
    pub fn unauthenticated() -> Self {
        Self {
            phase: SessionPhase::Unauthenticated,
            identity: None,
        }
    }

    /// Returns the phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Returns the current identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_deref()
    }

    /// Returns a shared handle to the identity, if any.
    pub fn identity_arc(&self) -> Option<Arc<Identity>> {
        self.identity.clone()
    }

    /// Returns `true` if an identity is present.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// Returns `true` while the initial bootstrap has not completed.
    pub fn is_loading(&self) -> bool {
        self.phase.is_loading()
    }

    /// Returns an evaluator bound to this snapshot.
    pub fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(self)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::uninitialized()
    }
}

// =============================================================================
// Tests
// =============================================================================
