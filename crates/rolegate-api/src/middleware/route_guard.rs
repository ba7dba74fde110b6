// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Route guard middleware.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use tower::{Layer, Service};

use rolegate_core::RoleRequirement;
use rolegate_session::SessionHandle;

use crate::guard::{GuardPaths, RouteDecision, RouteGuard};

/// Body sent while the session is still loading.
pub const PENDING_BODY: &str = "Loading...";

// =============================================================================
// RouteGuardLayer
// =============================================================================

/// Layer applying a route guard to the wrapped service.
///
/// Each request takes one session snapshot. Pending snapshots get
/// `503 Service Unavailable` with `Retry-After: 1`; redirects become
/// `303 See Other`. Granted requests carry the snapshot in their extensions
/// so handlers evaluate against the same state.
#[derive(Clone)]
pub struct RouteGuardLayer {
    handle: SessionHandle,
    guard: Arc<RouteGuard>,
}

impl RouteGuardLayer {
    /// Creates a layer from a session handle, a requirement and destinations.
    pub fn new(
        handle: SessionHandle,
        requirement: impl Into<RoleRequirement>,
        paths: impl Into<Arc<GuardPaths>>,
    ) -> Self {
        Self::from_guard(handle, RouteGuard::new(requirement, paths))
    }

    /// Creates a layer from an existing guard.
    pub fn from_guard(handle: SessionHandle, guard: RouteGuard) -> Self {
        Self {
            handle,
            guard: Arc::new(guard),
        }
    }
}

impl<S> Layer<S> for RouteGuardLayer {
    type Service = RouteGuardMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RouteGuardMiddleware {
            inner,
            handle: self.handle.clone(),
            guard: self.guard.clone(),
        }
    }
}

// =============================================================================
// RouteGuardMiddleware
// =============================================================================

/// Middleware enforcing a route guard.
#[derive(Clone)]
pub struct RouteGuardMiddleware<S> {
    inner: S,
    handle: SessionHandle,
    guard: Arc<RouteGuard>,
}

impl<S> Service<Request<Body>> for RouteGuardMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let state = self.handle.snapshot();
        let decision = self.guard.decide(&state);
        let requirement = self.guard.requirement().kind();

        // Take the service that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            match decision {
                RouteDecision::Grant => {
                    req.extensions_mut().insert(state);
                    inner.call(req).await
                }
                RouteDecision::Pending => {
                    tracing::debug!(path = %req.uri().path(), "Session loading, request deferred");
                    Ok(pending_response())
                }
                RouteDecision::Redirect { to, reason, .. } => {
                    tracing::info!(
                        path = %req.uri().path(),
                        requirement = requirement,
                        reason = %reason,
                        location = %to,
                        "Route guard redirect"
                    );
                    Ok(Redirect::to(&to).into_response())
                }
            }
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn pending_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(header::RETRY_AFTER, "1")],
        PENDING_BODY,
    )
        .into_response()
}

// =============================================================================
// Tests
// =============================================================================
