// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration schema definitions for rolegate.
//!
//! # Schema Structure
//!
//! ```text
//! RolegateConfig
//! ├── storage: StorageConfig
//! ├── routes: RoutesConfig
//! ├── server: ServerConfig
//! └── logging: LoggingConfig
//! ```
//!
//! Every section has defaults, so an empty file is a valid configuration.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Constants
// =============================================================================

/// Default storage directory.
pub const DEFAULT_STORAGE_PATH: &str = ".rolegate";

/// Default storage key.
pub const DEFAULT_STORAGE_KEY: &str = "auth_token";

/// Default login path.
pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Default unauthorized path.
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// Top-Level Configuration
// =============================================================================

/// The root configuration structure for rolegate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RolegateConfig {
    /// Credential storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Route guard destinations.
    #[serde(default)]
    pub routes: RoutesConfig,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RolegateConfig {
    /// Validates the entire configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        self.storage.validate()?;
        self.routes.validate()?;
        Ok(())
    }
}

// =============================================================================
// Storage Configuration
// =============================================================================

/// Where the raw credential is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Storage backend.
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend.
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,

    /// Key under which the credential is stored.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl StorageConfig {
    /// Validates the storage configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.key.is_empty() {
            return Err(ConfigError::validation("storage.key", "must not be empty"));
        }
        if self.key.starts_with('.') {
            return Err(ConfigError::validation(
                "storage.key",
                "must not start with '.'",
            ));
        }
        if let Some(c) = self
            .key
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
        {
            return Err(ConfigError::validation(
                "storage.key",
                format!("character '{}' is not allowed", c),
            ));
        }
        if self.backend == StorageBackend::File && self.path.as_os_str().is_empty() {
            return Err(ConfigError::validation(
                "storage.path",
                "must not be empty for the file backend",
            ));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

/// Credential storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; nothing survives a restart.
    Memory,
    /// One file per key in a directory.
    #[default]
    File,
}

impl StorageBackend {
    /// Returns the backend name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File => "file",
        }
    }

    /// Parses a backend name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "memory" => Some(StorageBackend::Memory),
            "file" => Some(StorageBackend::File),
            _ => None,
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_PATH)
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

// =============================================================================
// Routes Configuration
// =============================================================================

/// Redirect destinations used by the route guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesConfig {
    /// Where unauthenticated callers are sent.
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Where callers lacking a required role are sent.
    #[serde(default = "default_unauthorized_path")]
    pub unauthorized_path: String,
}

impl RoutesConfig {
    /// Validates the routes configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        for (field, value) in [
            ("routes.login_path", &self.login_path),
            ("routes.unauthorized_path", &self.unauthorized_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigError::validation(field, "must start with '/'"));
            }
        }
        Ok(())
    }
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login_path: default_login_path(),
            unauthorized_path: default_unauthorized_path(),
        }
    }
}

fn default_login_path() -> String {
    DEFAULT_LOGIN_PATH.to_string()
}

fn default_unauthorized_path() -> String {
    DEFAULT_UNAUTHORIZED_PATH.to_string()
}

// =============================================================================
// Server Configuration
// =============================================================================

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,

    /// Listen port.
    #[serde(default = "default_server_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Returns the socket address to listen on.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_server_port(),
        }
    }
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_server_port() -> u16 {
    DEFAULT_SERVER_PORT
}

// =============================================================================
// Logging Configuration
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,

    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl LogLevel {
    /// Returns the level as a filter directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }

    /// Parses a level name.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "trace" => Some(LogLevel::Trace),
            "debug" => Some(LogLevel::Debug),
            "info" => Some(LogLevel::Info),
            "warn" | "warning" => Some(LogLevel::Warn),
            "error" => Some(LogLevel::Error),
            _ => None,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Compact single-line text.
    Compact,
    /// JSON for log aggregation.
    Json,
}

// =============================================================================
// Tests
// =============================================================================
