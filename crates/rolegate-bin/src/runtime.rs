// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Wiring from configuration to a running session store.

use std::sync::Arc;

use tracing::debug;

use rolegate_api::GuardPaths;
use rolegate_config::{ConfigLoader, RolegateConfig, StorageBackend, StorageConfig};
use rolegate_session::{CredentialStorage, FileStorage, MemoryStorage, SessionStore};

use crate::cli::{Cli, LogFormat};
use crate::error::{BinError, BinResult};
use crate::logging;

/// Loads the configuration named on the command line.
///
/// A missing file is not an error; defaults plus environment overrides are
/// used instead.
pub fn load_config(cli: &Cli) -> BinResult<RolegateConfig> {
    ConfigLoader::new()
        .load_or_default(&cli.config)
        .map_err(|e| BinError::from(e).with_context(format!("loading {}", cli.config.display())))
}

/// Installs the logger, letting command-line flags override the config.
pub fn init_logging(cli: &Cli, config: &RolegateConfig) -> BinResult<()> {
    let level = cli.effective_log_level(config.logging.level.as_str());
    let format = cli
        .log_format
        .unwrap_or_else(|| LogFormat::from(config.logging.format));
    logging::init_logging(level, format)
}

/// Opens the configured credential storage backend.
pub fn open_storage(config: &StorageConfig) -> BinResult<Arc<dyn CredentialStorage>> {
    let storage: Arc<dyn CredentialStorage> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::File => Arc::new(
            FileStorage::open(&config.path)
                .map_err(|e| BinError::from(e).with_context("opening credential storage"))?,
        ),
    };

    debug!(
        backend = storage.name(),
        path = %config.path.display(),
        "Credential storage opened"
    );
    Ok(storage)
}

/// Builds a session store over the configured storage and key.
///
/// The store is returned uninitialized; callers decide when to bootstrap.
pub fn open_store(config: &RolegateConfig) -> BinResult<Arc<SessionStore>> {
    let storage = open_storage(&config.storage)?;
    Ok(Arc::new(
        SessionStore::new(storage).with_key(config.storage.key.clone()),
    ))
}

/// Guard redirect destinations from the configuration.
pub fn guard_paths(config: &RolegateConfig) -> GuardPaths {
    GuardPaths::new(
        config.routes.login_path.clone(),
        config.routes.unauthorized_path.clone(),
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_core::{MockPersona, SessionPhase};

    fn file_config(dir: &std::path::Path) -> RolegateConfig {
        let mut config = RolegateConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.path = dir.to_path_buf();
        config
    }

    #[tokio::test]
    async fn test_file_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let config = file_config(dir.path());

        let store = open_store(&config).unwrap();
        assert_eq!(store.storage_name(), "file");
        store.bootstrap().await;
        store.login(MockPersona::Admin.token()).unwrap();

        let reopened = open_store(&config).unwrap();
        let state = reopened.bootstrap().await;
        assert_eq!(state.phase(), SessionPhase::Authenticated);
        assert_eq!(state.identity().unwrap().id, "admin-456");
    }

    #[tokio::test]
    async fn test_memory_store_starts_empty() {
        let mut config = RolegateConfig::default();
        config.storage.backend = StorageBackend::Memory;

        let store = open_store(&config).unwrap();
        assert_eq!(store.storage_name(), "memory");
        let state = store.bootstrap().await;
        assert_eq!(state.phase(), SessionPhase::Unauthenticated);
    }

    #[test]
    fn test_custom_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = file_config(dir.path());
        config.storage.key = "alt_token".to_string();

        let store = open_store(&config).unwrap();
        assert_eq!(store.key(), "alt_token");
    }

    #[test]
    fn test_guard_paths_from_config() {
        let mut config = RolegateConfig::default();
        config.routes.login_path = "/signin".to_string();

        let paths = guard_paths(&config);
        assert_eq!(paths.login, "/signin");
        assert_eq!(paths.unauthorized, "/unauthorized");
    }
}
