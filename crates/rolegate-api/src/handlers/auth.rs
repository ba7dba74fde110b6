// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Authentication handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use rolegate_core::{Identity, MockPersona};

use crate::error::{ApiError, ApiResult};
use crate::extractors::{JsonBody, Session};
use crate::response::{MessageResponse, SessionResponse};
use crate::state::AppState;

// =============================================================================
// Login
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Raw bearer credential.
    pub token: String,
}

/// POST /api/auth/login
///
/// Establishes a session from the submitted credential and returns the
/// decoded identity. A rejected credential leaves the session untouched.
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<Identity>> {
    let identity = state.store().login(&request.token)?;
    Ok(Json(Identity::clone(&identity)))
}

/// GET /login/mock/{persona}
///
/// Logs in with one of the built-in mock credentials.
pub async fn login_as_persona(
    State(state): State<AppState>,
    Path(persona): Path<String>,
) -> ApiResult<Json<Identity>> {
    let persona: MockPersona = persona
        .parse()
        .map_err(|_| ApiError::unknown_persona(&persona))?;

    tracing::debug!(persona = %persona, "Mock persona login");
    let identity = state.store().login(persona.token())?;
    Ok(Json(Identity::clone(&identity)))
}

// =============================================================================
// Logout
// =============================================================================

/// POST /api/auth/logout
///
/// Ends the session. Always succeeds.
pub async fn logout(State(state): State<AppState>) -> Json<MessageResponse> {
    state.store().logout();
    Json(MessageResponse::ok("Logged out successfully"))
}

// =============================================================================
// Current Session
// =============================================================================

/// GET /api/auth/me
pub async fn current_session(Session(session): Session) -> Json<SessionResponse> {
    Json(SessionResponse::from(&session))
}
