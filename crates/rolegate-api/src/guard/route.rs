// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route-level guard.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rolegate_core::{RoleRequirement, SessionState};

use super::role_check;

/// Default login destination.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Default destination for denied access.
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

// =============================================================================
// GuardPaths
// =============================================================================

/// Redirect destinations used by the route guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardPaths {
    /// Where unauthenticated callers are sent.
    pub login: String,
    /// Where authenticated callers lacking the required role are sent.
    pub unauthorized: String,
}

impl GuardPaths {
    /// Creates a set of destinations.
    pub fn new(login: impl Into<String>, unauthorized: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            unauthorized: unauthorized.into(),
        }
    }
}

impl Default for GuardPaths {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH, DEFAULT_UNAUTHORIZED_PATH)
    }
}

// =============================================================================
// RouteDecision
// =============================================================================

/// Why a route guard redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectReason {
    /// No identity is present.
    Unauthenticated,
    /// An identity is present but fails the role requirement.
    Forbidden,
}

impl RedirectReason {
    /// Returns the reason name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
        }
    }
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of a route guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// The session is still loading; show a neutral placeholder.
    Pending,
    /// Navigate elsewhere.
    Redirect {
        /// Destination path.
        to: String,
        /// Replace the current history entry instead of pushing.
        replace: bool,
        /// Why the redirect happened.
        reason: RedirectReason,
    },
    /// Render the protected content unchanged.
    Grant,
}

impl RouteDecision {
    fn redirect(to: &str, reason: RedirectReason) -> Self {
        Self::Redirect {
            to: to.to_string(),
            replace: true,
            reason,
        }
    }

    /// Returns `true` if access was granted.
    pub fn is_grant(&self) -> bool {
        matches!(self, Self::Grant)
    }

    /// Returns `true` if the session is still loading.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns the redirect destination, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Self::Redirect { to, .. } => Some(to),
            _ => None,
        }
    }
}

// =============================================================================
// RouteGuard
// =============================================================================

/// Decides route access from a session snapshot.
///
/// Checks run in fixed order: loading, then authentication, then roles.
pub fn route_decision(
    state: &SessionState,
    requirement: &RoleRequirement,
    paths: &GuardPaths,
) -> RouteDecision {
    if state.is_loading() {
        return RouteDecision::Pending;
    }

    if !state.is_authenticated() {
        debug!(requirement = requirement.kind(), "Route redirect to login");
        return RouteDecision::redirect(&paths.login, RedirectReason::Unauthenticated);
    }

    match role_check(&state.evaluator(), requirement) {
        None | Some(true) => RouteDecision::Grant,
        Some(false) => {
            debug!(requirement = requirement.kind(), "Route access denied");
            RouteDecision::redirect(&paths.unauthorized, RedirectReason::Forbidden)
        }
    }
}

/// A route guard bound to one requirement and one set of destinations.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    requirement: RoleRequirement,
    paths: Arc<GuardPaths>,
}

impl RouteGuard {
    /// Creates a guard.
    pub fn new(requirement: impl Into<RoleRequirement>, paths: impl Into<Arc<GuardPaths>>) -> Self {
        Self {
            requirement: requirement.into(),
            paths: paths.into(),
        }
    }

    /// Creates a guard that only requires authentication.
    pub fn authenticated(paths: impl Into<Arc<GuardPaths>>) -> Self {
        Self::new(RoleRequirement::none(), paths)
    }

    /// Returns the requirement.
    pub fn requirement(&self) -> &RoleRequirement {
        &self.requirement
    }

    /// Returns the redirect destinations.
    pub fn paths(&self) -> &GuardPaths {
        &self.paths
    }

    /// Decides access for a snapshot.
    pub fn decide(&self, state: &SessionState) -> RouteDecision {
        route_decision(state, &self.requirement, &self.paths)
    }
}

// =============================================================================
// Tests
// =============================================================================
