// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Errors surfaced by the HTTP layer.
//!
//! Bodies have the shape `{"error": {"code": "...", "message": "..."}}`.
//! Guard denials are redirects and never become an `ApiError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use rolegate_core::{DecodeError, LoginError, StorageError};

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a request handler or of the server itself.
#[derive(Debug, Error)]
pub enum ApiError {
    /// `/login/mock/{persona}` named no known persona.
    #[error("unknown persona '{name}'")]
    UnknownPersona {
        /// The path segment as received.
        name: String,
    },

    /// The request body could not be read as the expected JSON.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// The submitted credential did not decode. Session state is untouched.
    #[error(transparent)]
    InvalidCredential(DecodeError),

    /// The credential was accepted but the backend refused to persist it.
    #[error("credential storage failed: {0}")]
    Storage(StorageError),

    /// Binding, serving or wiring the application failed.
    #[error("server error: {0}")]
    Server(String),
}

impl ApiError {
    /// Creates an unknown persona error.
    pub fn unknown_persona(name: impl Into<String>) -> Self {
        Self::UnknownPersona { name: name.into() }
    }

    /// Creates a server error.
    pub fn server(message: impl std::fmt::Display) -> Self {
        Self::Server(message.to_string())
    }

    /// Status and stable code for the response body.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::UnknownPersona { .. } => (StatusCode::NOT_FOUND, "UNKNOWN_PERSONA"),
            Self::MalformedBody(_) => (StatusCode::BAD_REQUEST, "MALFORMED_BODY"),
            Self::InvalidCredential(_) => (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIAL"),
            Self::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILURE"),
            Self::Server(_) => (StatusCode::INTERNAL_SERVER_ERROR, "SERVER_ERROR"),
        }
    }

    /// Message placed in the response body. Server-side detail stays in the log.
    fn public_message(&self) -> String {
        match self {
            Self::Storage(_) => "credential could not be stored".to_string(),
            Self::Server(_) => "internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(err: LoginError) -> Self {
        match err {
            LoginError::InvalidCredential(e) => Self::InvalidCredential(e),
            LoginError::Storage(e) => Self::Storage(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code, "Request failed");
        } else {
            tracing::debug!(error = %self, code, "Request rejected");
        }

        let body = json!({
            "error": {
                "code": code,
                "message": self.public_message(),
            }
        });
        (status, Json(body)).into_response()
    }
}
