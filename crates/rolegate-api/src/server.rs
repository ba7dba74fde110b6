// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! API server implementation.

use std::future::Future;
use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::info;

use rolegate_core::RoleRequirement;

use crate::error::{ApiError, ApiResult};
use crate::handlers;
use crate::middleware::RouteGuardLayer;
use crate::state::AppState;

/// Default listen address.
pub const DEFAULT_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

// =============================================================================
// ApiServer
// =============================================================================

/// The demo HTTP server.
///
/// | Route | Guard |
/// |---|---|
/// | `GET /login`, `GET /login/mock/{persona}` | public |
/// | `GET /unauthorized` | public |
/// | `POST /api/auth/login`, `POST /api/auth/logout`, `GET /api/auth/me` | public |
/// | `GET /dashboard`, `GET /users` | route guard, no role requirement |
pub struct ApiServer {
    state: AppState,
    addr: SocketAddr,
}

impl ApiServer {
    /// Creates a server with the given state on the default address.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            addr: SocketAddr::from(DEFAULT_ADDR),
        }
    }

    /// Sets the listen address.
    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    /// Returns the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Creates the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let guard = RouteGuardLayer::new(
            self.state.handle().clone(),
            RoleRequirement::none(),
            self.state.paths().clone(),
        );

        let protected = Router::new()
            .route("/dashboard", get(handlers::dashboard))
            .route("/users", get(handlers::users))
            .route_layer(guard);

        Router::new()
            // Pages (public)
            .route("/login", get(handlers::login_page))
            .route("/login/mock/{persona}", get(handlers::login_as_persona))
            .route("/unauthorized", get(handlers::unauthorized))
            // Auth endpoints
            .route("/api/auth/login", post(handlers::login))
            .route("/api/auth/logout", post(handlers::logout))
            .route("/api/auth/me", get(handlers::current_session))
            .merge(protected)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server until `shutdown_signal` resolves.
    pub async fn run_with_shutdown(
        self,
        shutdown_signal: impl Future<Output = ()> + Send + 'static,
    ) -> ApiResult<()> {
        let router = self.router();

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| ApiError::server(format!("failed to bind {}: {}", self.addr, e)))?;

        info!(addr = %self.addr, "Starting API server");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(ApiError::server)?;

        info!("API server shutdown complete");
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use rolegate_core::MockPersona;
    use rolegate_session::{CredentialStorage, MemoryStorage, SessionStore, DEFAULT_STORAGE_KEY};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn server() -> (ApiServer, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(SessionStore::new(storage.clone()));
        store.bootstrap().await;
        (ApiServer::new(AppState::new(store)), storage)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_default_addr() {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let server = ApiServer::new(AppState::new(store));
        assert_eq!(server.addr().port(), 3000);
    }

    #[tokio::test]
    async fn test_dashboard_redirects_when_signed_out() {
        let (server, _) = server().await;
        let response = server.router().oneshot(get("/dashboard")).await.unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_login_then_dashboard() {
        let (server, storage) = server().await;
        let router = server.router();

        let response = router
            .clone()
            .oneshot(post_json(
                "/api/auth/login",
                serde_json::json!({ "token": MockPersona::Admin.token() }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["id"], "admin-456");
        assert!(storage.get(DEFAULT_STORAGE_KEY).unwrap().is_some());

        let response = router.oneshot(get("/dashboard")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["sections"]["analytics"], true);
        assert_eq!(body["sections"]["system_settings"], false);
    }

    #[tokio::test]
    async fn test_invalid_login_is_unauthorized() {
        let (server, storage) = server().await;
        let response = server
            .router()
            .oneshot(post_json(
                "/api/auth/login",
                serde_json::json!({ "token": "not-a-token" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"]["code"], "INVALID_CREDENTIAL");
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_mock_persona_and_logout() {
        let (server, storage) = server().await;
        let router = server.router();

        let response = router
            .clone()
            .oneshot(get("/login/mock/super-admin"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router.clone().oneshot(get("/users")).await.unwrap();
        assert_eq!(json_body(response).await["sections"]["delete"], true);

        let response = router
            .clone()
            .oneshot(post_json("/api/auth/logout", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(storage.is_empty());

        let response = router.oneshot(get("/api/auth/me")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body["authenticated"], false);
        assert_eq!(body["phase"], "unauthenticated");
    }

    #[tokio::test]
    async fn test_unknown_persona() {
        let (server, _) = server().await;
        let response = server
            .router()
            .oneshot(get("/login/mock/root"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_page_lists_personas() {
        let (server, _) = server().await;
        let response = server.router().oneshot(get("/login")).await.unwrap();
        let body = json_body(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(3));
    }

    #[tokio::test]
    async fn test_pending_before_bootstrap() {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let server = ApiServer::new(AppState::new(store));

        let response = server.router().oneshot(get("/users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
