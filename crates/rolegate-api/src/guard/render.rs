// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Render-level guard.
//!
//! The render guard only checks roles. It assumes a route guard already
//! established that the caller is authenticated, and an unspecified
//! requirement is always denied.

use rolegate_core::{RoleRequirement, SessionState};

use super::role_check;

/// Returns `true` if the granted content should be shown.
pub fn render_allowed(state: &SessionState, requirement: &RoleRequirement) -> bool {
    role_check(&state.evaluator(), requirement).unwrap_or(false)
}

/// Produces `granted` when allowed and `fallback` otherwise.
///
/// Only the chosen branch is evaluated.
pub fn render<T>(
    state: &SessionState,
    requirement: &RoleRequirement,
    granted: impl FnOnce() -> T,
    fallback: impl FnOnce() -> T,
) -> T {
    if render_allowed(state, requirement) {
        granted()
    } else {
        fallback()
    }
}

/// Produces `granted` when allowed and nothing otherwise.
pub fn render_or_nothing<T>(
    state: &SessionState,
    requirement: &RoleRequirement,
    granted: impl FnOnce() -> T,
) -> Option<T> {
    render_allowed(state, requirement).then(granted)
}

/// A render guard bound to one requirement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderGuard {
    requirement: RoleRequirement,
}

impl RenderGuard {
    /// Creates a guard.
    pub fn new(requirement: impl Into<RoleRequirement>) -> Self {
        Self {
            requirement: requirement.into(),
        }
    }

    /// Returns the requirement.
    pub fn requirement(&self) -> &RoleRequirement {
        &self.requirement
    }

    /// Returns `true` if the granted content should be shown.
    pub fn allows(&self, state: &SessionState) -> bool {
        render_allowed(state, &self.requirement)
    }

    /// Produces `granted` when allowed and `fallback` otherwise.
    pub fn render<T>(
        &self,
        state: &SessionState,
        granted: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        render(state, &self.requirement, granted, fallback)
    }
}

// =============================================================================
// Tests
// =============================================================================
