// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Middleware implementations for the HTTP surface.
//!
//! - [`RouteGuardLayer`]: applies a [`RouteGuard`](crate::RouteGuard) to
//!   every request reaching the wrapped service.

mod route_guard;

pub use route_guard::{RouteGuardLayer, RouteGuardMiddleware};
