// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API response types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rolegate_core::{Identity, MockPersona, SessionPhase, SessionState};

// =============================================================================
// SessionResponse
// =============================================================================

/// Body of `GET /api/auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Whether an identity is present.
    pub authenticated: bool,
    /// Whether bootstrap is still running.
    pub loading: bool,
    /// Current lifecycle phase.
    pub phase: SessionPhase,
    /// Current identity.
    pub identity: Option<Identity>,
}

impl From<&SessionState> for SessionResponse {
    fn from(state: &SessionState) -> Self {
        Self {
            authenticated: state.is_authenticated(),
            loading: state.is_loading(),
            phase: state.phase(),
            identity: state.identity().cloned(),
        }
    }
}

// =============================================================================
// MessageResponse
// =============================================================================

/// Simple acknowledgement body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a successful acknowledgement.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

// =============================================================================
// PageView
// =============================================================================

/// Which gated parts of a page the caller may see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    /// Page name.
    pub page: String,
    /// The viewing identity.
    pub identity: Option<Identity>,
    /// Gated section name to visibility.
    pub sections: BTreeMap<String, bool>,
}

impl PageView {
    /// Creates an empty view.
    pub fn new(page: impl Into<String>, state: &SessionState) -> Self {
        Self {
            page: page.into(),
            identity: state.identity().cloned(),
            sections: BTreeMap::new(),
        }
    }

    /// Records a section's visibility.
    pub fn section(mut self, name: impl Into<String>, visible: bool) -> Self {
        self.sections.insert(name.into(), visible);
        self
    }

    /// Returns `true` if the named section is visible.
    pub fn is_visible(&self, name: &str) -> bool {
        self.sections.get(name).copied().unwrap_or(false)
    }
}

// =============================================================================
// PersonaSummary
// =============================================================================

/// A mock persona offered on the login page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaSummary {
    /// Persona name, usable in `/login/mock/{persona}`.
    pub name: String,
    /// Role the persona's credential carries.
    pub role: String,
}

impl From<MockPersona> for PersonaSummary {
    fn from(persona: MockPersona) -> Self {
        Self {
            name: persona.as_str().to_string(),
            role: persona.role().as_str().to_string(),
        }
    }
}
