// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Settings for the rolegate binary.
//!
//! A [`RolegateConfig`] says where the credential lives, where the route
//! guard sends visitors, which address `serve` binds and how logs look.
//! It is read from YAML, TOML or JSON (picked by file extension), then
//! `${VAR}` / `${VAR:default}` placeholders and `ROLEGATE_*` overrides are
//! applied, and finally the result is validated.
//!
//! ```no_run
//! use rolegate_config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load_or_default("rolegate.yaml")?;
//! assert!(config.routes.login_path.starts_with('/'));
//! # Ok::<(), rolegate_config::ConfigError>(())
//! ```
//!
//! Recognised overrides: `ROLEGATE_STORAGE_BACKEND`, `ROLEGATE_STORAGE_PATH`,
//! `ROLEGATE_STORAGE_KEY`, `ROLEGATE_SERVER_PORT`, `ROLEGATE_LOG_LEVEL`.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult, INLINE_ORIGIN};
pub use loader::{load_config, load_config_str, ConfigFormat, ConfigLoader, ConfigLoaderBuilder};
pub use schema::{
    LogFormat, LogLevel, LoggingConfig, RolegateConfig, RoutesConfig, ServerConfig,
    StorageBackend, StorageConfig,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
