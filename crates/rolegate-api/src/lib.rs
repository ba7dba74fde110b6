// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # rolegate-api
//!
//! Access guards and the HTTP surface for rolegate.
//!
//! ## Guards
//!
//! - [`RouteGuard`]: navigation gating. Pending while the session loads,
//!   redirect to login when unauthenticated, redirect to the unauthorized
//!   page when the role requirement fails. No requirement means any
//!   authenticated identity is granted.
//! - [`RenderGuard`]: subtree gating. Checks roles only and picks the
//!   granted or fallback value. No requirement means denied.
//!
//! ## HTTP
//!
//! - [`RouteGuardLayer`]: a tower layer applying a [`RouteGuard`] to any
//!   axum route.
//! - [`ApiServer`]: the demo surface (`/api/auth/*`, `/dashboard`, `/users`,
//!   `/login`, `/unauthorized`).
//!
//! ## Example
//!
//! ```rust,ignore
//! use rolegate_api::{route_decision, GuardPaths, RouteDecision};
//! use rolegate_core::{Role, RoleRequirement};
//!
//! let state = handle.snapshot();
//! match route_decision(&state, &RoleRequirement::exactly(Role::Admin), &GuardPaths::default()) {
//!     RouteDecision::Pending => show_spinner(),
//!     RouteDecision::Redirect { to, .. } => navigate(&to),
//!     RouteDecision::Grant => show_page(),
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod error;
pub mod extractors;
pub mod guard;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;
pub mod state;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ApiError, ApiResult};
pub use guard::{
    render, render_allowed, render_or_nothing, route_decision, GuardPaths, RedirectReason,
    RenderGuard, RouteDecision, RouteGuard,
};
pub use middleware::{RouteGuardLayer, RouteGuardMiddleware};
pub use server::ApiServer;
pub use state::{AppState, AppStateBuilder};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
