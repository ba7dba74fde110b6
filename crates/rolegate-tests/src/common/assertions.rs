// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Custom Test Assertions
//!
//! Assertion helpers for session snapshots and guard decisions.

use std::time::Duration;

use rolegate_api::{RedirectReason, RouteDecision};
use rolegate_core::{SessionPhase, SessionState};
use rolegate_session::SessionHandle;

// =============================================================================
// Session Assertions
// =============================================================================

/// Assertion extensions for session snapshots.
pub trait SessionAssertions {
    /// Assert that the session holds the identity with `id`.
    fn assert_authenticated_as(&self, id: &str);

    /// Assert that bootstrap finished without an identity.
    fn assert_signed_out(&self);

    /// Assert the lifecycle phase.
    fn assert_phase(&self, expected: SessionPhase);
}

impl SessionAssertions for SessionState {
    fn assert_authenticated_as(&self, id: &str) {
        match self.identity() {
            Some(identity) => assert_eq!(
                identity.id, id,
                "Expected identity {}, but session holds {}",
                id, identity.id
            ),
            None => panic!(
                "Expected identity {}, but session is {}",
                id,
                self.phase()
            ),
        }
        assert!(!self.is_loading(), "Authenticated session must not be loading");
    }

    fn assert_signed_out(&self) {
        assert_eq!(
            self.phase(),
            SessionPhase::Unauthenticated,
            "Expected a signed-out session"
        );
        assert!(self.identity().is_none());
        assert!(!self.is_loading());
    }

    fn assert_phase(&self, expected: SessionPhase) {
        assert_eq!(self.phase(), expected, "Unexpected session phase");
    }
}

// =============================================================================
// Route Decision Assertions
// =============================================================================

/// Assertion extensions for route guard decisions.
pub trait RouteDecisionAssertions {
    /// Assert that access was granted.
    fn assert_grant(&self);

    /// Assert that the guard is waiting for the session.
    fn assert_pending(&self);

    /// Assert a history-replacing redirect to `to` for `reason`.
    fn assert_redirect(&self, to: &str, reason: RedirectReason);
}

impl RouteDecisionAssertions for RouteDecision {
    fn assert_grant(&self) {
        assert_eq!(self, &RouteDecision::Grant, "Expected Grant");
    }

    fn assert_pending(&self) {
        assert_eq!(self, &RouteDecision::Pending, "Expected Pending");
    }

    fn assert_redirect(&self, to: &str, reason: RedirectReason) {
        assert_eq!(
            self,
            &RouteDecision::Redirect {
                to: to.to_string(),
                replace: true,
                reason,
            },
            "Unexpected route decision"
        );
    }
}

// =============================================================================
// Async Assertions
// =============================================================================

/// Wait for the next published state, failing after `timeout`.
pub async fn expect_change(handle: &mut SessionHandle, timeout: Duration) -> SessionState {
    tokio::time::timeout(timeout, handle.changed())
        .await
        .expect("Timed out waiting for session change")
        .expect("Session store dropped")
}

/// Assert that no state is published within `window`.
pub async fn expect_no_change(handle: &mut SessionHandle, window: Duration) {
    let result = tokio::time::timeout(window, handle.changed()).await;
    assert!(result.is_err(), "Unexpected session change: {:?}", result);
}
