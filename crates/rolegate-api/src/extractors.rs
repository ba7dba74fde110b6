// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Request extractors shared by the handlers.

use axum::{
    body::Body,
    extract::{FromRequest, FromRequestParts},
    http::{request::Parts, Request},
    Json,
};
use serde::de::DeserializeOwned;

use rolegate_core::SessionState;

use crate::error::ApiError;
use crate::state::AppState;

/// The session snapshot a request is evaluated against.
///
/// Behind a [`RouteGuardLayer`](crate::RouteGuardLayer) this is the exact
/// snapshot the guard decided on, so a handler never sees a state newer than
/// the one that granted it. Unguarded routes read the latest committed state.
pub struct Session(pub SessionState);

impl FromRequestParts<AppState> for Session {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, app: &AppState) -> Result<Self, Self::Rejection> {
        let decided = parts.extensions.get::<SessionState>().cloned();
        Ok(Self(decided.unwrap_or_else(|| app.handle().snapshot())))
    }
}

/// JSON body whose rejection is reported as [`ApiError::MalformedBody`].
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::MalformedBody(rejection.body_text())),
        }
    }
}
