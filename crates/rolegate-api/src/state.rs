// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Application state shared across handlers.

use std::sync::Arc;

use rolegate_session::{SessionHandle, SessionStore};

use crate::error::{ApiError, ApiResult};
use crate::guard::GuardPaths;

// =============================================================================
// AppState
// =============================================================================

/// Application state shared across all handlers.
///
/// Handlers mutate the session only through [`store`](Self::store) and read
/// it through [`handle`](Self::handle).
#[derive(Clone)]
pub struct AppState {
    store: Arc<SessionStore>,
    handle: SessionHandle,
    paths: Arc<GuardPaths>,
}

impl AppState {
    /// Creates state around a store with default redirect destinations.
    pub fn new(store: Arc<SessionStore>) -> Self {
        let handle = store.handle();
        Self {
            store,
            handle,
            paths: Arc::new(GuardPaths::default()),
        }
    }

    /// Creates a new app state builder.
    pub fn builder() -> AppStateBuilder {
        AppStateBuilder::new()
    }

    /// Returns the session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Returns a session read handle.
    pub fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// Returns the redirect destinations.
    pub fn paths(&self) -> &Arc<GuardPaths> {
        &self.paths
    }
}

// =============================================================================
// AppStateBuilder
// =============================================================================

/// Builder for constructing AppState.
#[derive(Default)]
pub struct AppStateBuilder {
    store: Option<Arc<SessionStore>>,
    paths: Option<GuardPaths>,
}

impl AppStateBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the session store.
    pub fn store(mut self, store: Arc<SessionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Sets the redirect destinations.
    pub fn paths(mut self, paths: GuardPaths) -> Self {
        self.paths = Some(paths);
        self
    }

    /// Builds the app state.
    pub fn build(self) -> ApiResult<AppState> {
        let store = self
            .store
            .ok_or_else(|| ApiError::server("session store is required"))?;
        let mut state = AppState::new(store);
        if let Some(paths) = self.paths {
            state.paths = Arc::new(paths);
        }
        Ok(state)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_session::MemoryStorage;

    #[test]
    fn test_builder_requires_store() {
        assert!(AppState::builder().build().is_err());
    }

    #[test]
    fn test_builder_paths() {
        let store = Arc::new(SessionStore::new(Arc::new(MemoryStorage::new())));
        let state = AppState::builder()
            .store(store)
            .paths(GuardPaths::new("/signin", "/denied"))
            .build()
            .unwrap();

        assert_eq!(state.paths().login, "/signin");
        assert!(state.handle().is_loading());
    }
}
