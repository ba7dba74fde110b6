// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Demo page handlers.
//!
//! Each page reports which of its gated parts the caller may see. All
//! sections of one response are evaluated against the same snapshot.

use axum::Json;

use rolegate_core::{MockPersona, Role, RoleRequirement, SessionState};

use crate::extractors::Session;
use crate::guard::render_allowed;
use crate::response::{PageView, PersonaSummary};

// =============================================================================
// Page Definitions
// =============================================================================

fn administrators() -> RoleRequirement {
    RoleRequirement::any_of([Role::Admin, Role::SuperAdmin])
}

/// Gated sections of the dashboard.
pub fn dashboard_sections() -> Vec<(&'static str, RoleRequirement)> {
    vec![
        ("user_management", administrators()),
        ("analytics", administrators()),
        ("system_settings", RoleRequirement::exactly(Role::SuperAdmin)),
    ]
}

/// Gated actions of the user list.
pub fn user_actions() -> Vec<(&'static str, RoleRequirement)> {
    vec![
        ("create", administrators()),
        ("edit", administrators()),
        ("delete", RoleRequirement::exactly(Role::SuperAdmin)),
    ]
}

fn page_view(
    page: &str,
    state: &SessionState,
    gated: Vec<(&'static str, RoleRequirement)>,
) -> PageView {
    gated
        .into_iter()
        .fold(PageView::new(page, state), |view, (name, requirement)| {
            view.section(name, render_allowed(state, &requirement))
        })
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /dashboard
pub async fn dashboard(Session(state): Session) -> Json<PageView> {
    Json(page_view("dashboard", &state, dashboard_sections()))
}

/// GET /users
pub async fn users(Session(state): Session) -> Json<PageView> {
    Json(page_view("users", &state, user_actions()))
}

/// GET /unauthorized
pub async fn unauthorized(Session(state): Session) -> Json<PageView> {
    Json(PageView::new("unauthorized", &state))
}

/// GET /login
pub async fn login_page() -> Json<Vec<PersonaSummary>> {
    Json(
        MockPersona::all()
            .iter()
            .copied()
            .map(PersonaSummary::from)
            .collect(),
    )
}

// =============================================================================
// Tests
// =============================================================================
