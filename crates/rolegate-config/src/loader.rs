// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration loading and processing for rolegate.
//!
//! # Loading Pipeline
//!
//! 1. Read the file (or fall back to defaults, see [`ConfigLoader::load_or_default`])
//! 2. Resolve `${VAR}` / `${VAR:default}` placeholders in the raw content
//! 3. Parse YAML/TOML/JSON
//! 4. Apply `ROLEGATE_*` environment overrides
//! 5. Resolve a relative storage path against the config file directory
//! 6. Validate
//!
//! # Environment Variable Override
//!
//! ```text
//! ROLEGATE_STORAGE_BACKEND=memory
//! ROLEGATE_STORAGE_PATH=/var/lib/rolegate
//! ROLEGATE_STORAGE_KEY=auth_token
//! ROLEGATE_SERVER_PORT=8080
//! ROLEGATE_LOG_LEVEL=debug
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::schema::{LogLevel, RolegateConfig, StorageBackend};

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "ROLEGATE";

// =============================================================================
// ConfigLoader
// =============================================================================

/// Configuration loader for rolegate.
///
/// # Examples
///
/// ```no_run
/// use rolegate_config::loader::ConfigLoader;
///
/// let loader = ConfigLoader::new();
/// let config = loader.load("rolegate.yaml").unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Base directory for resolving relative paths.
    base_path: Option<PathBuf>,

    /// Environment variable prefix.
    env_prefix: String,

    /// Whether to resolve environment variables.
    resolve_env_vars: bool,

    /// Whether to resolve relative paths.
    resolve_paths: bool,
}

impl ConfigLoader {
    /// Creates a new configuration loader with default settings.
    pub fn new() -> Self {
        Self {
            base_path: None,
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            resolve_env_vars: true,
            resolve_paths: true,
        }
    }

    /// Creates a builder for configuring the loader.
    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder::new()
    }

    /// Loads configuration from a file.
    ///
    /// The format is determined by the extension: `.yaml`/`.yml`, `.toml`
    /// or `.json`.
    pub fn load(&self, path: impl AsRef<Path>) -> ConfigResult<RolegateConfig> {
        let path = path.as_ref();
        info!(path = %path.display(), "Loading configuration");

        let content = self.read_file(path)?;
        let format = ConfigFormat::from_path(path)?;
        let mut config = self.parse_content(&content, format, path)?;

        self.finish(&mut config, Some(path))?;

        debug!(
            backend = %config.storage.backend,
            storage_path = %config.storage.path.display(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Loads configuration from a file, or defaults if it does not exist.
    ///
    /// Environment overrides and validation still apply to the defaults.
    pub fn load_or_default(&self, path: impl AsRef<Path>) -> ConfigResult<RolegateConfig> {
        let path = path.as_ref();
        if path.exists() {
            return self.load(path);
        }

        debug!(path = %path.display(), "Config file not found, using defaults");
        let mut config = RolegateConfig::default();
        self.finish(&mut config, None)?;
        Ok(config)
    }

    /// Loads configuration from a string.
    pub fn load_from_str(&self, content: &str, format: ConfigFormat) -> ConfigResult<RolegateConfig> {
        let content = self.maybe_resolve_placeholders(content);
        let mut config = parse_str(&content, format)?;
        self.finish(&mut config, None)?;
        Ok(config)
    }

    /// Applies overrides, path resolution and validation.
    fn finish(&self, config: &mut RolegateConfig, source: Option<&Path>) -> ConfigResult<()> {
        if self.resolve_env_vars {
            self.apply_env_overrides(config)?;
        }

        if self.resolve_paths {
            let base = self.base_path.clone().or_else(|| {
                source
                    .and_then(Path::parent)
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
            });
            if let Some(base) = base {
                resolve_relative_paths(config, &base);
            }
        }

        config.validate()
    }

    /// Reads file content.
    fn read_file(&self, path: &Path) -> ConfigResult<String> {
        if !path.exists() {
            return Err(ConfigError::not_found(path));
        }

        fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))
    }

    /// Parses file content, attributing failures to the file.
    fn parse_content(
        &self,
        content: &str,
        format: ConfigFormat,
        path: &Path,
    ) -> ConfigResult<RolegateConfig> {
        let content = self.maybe_resolve_placeholders(content);

        parse_str(&content, format).map_err(|e| e.in_file(path))
    }

    fn maybe_resolve_placeholders(&self, content: &str) -> String {
        if self.resolve_env_vars {
            resolve_env_placeholders(content)
        } else {
            content.to_string()
        }
    }

    fn env_var(&self, suffix: &str) -> (String, Option<String>) {
        let name = format!("{}_{}", self.env_prefix, suffix);
        let value = env::var(&name).ok();
        (name, value)
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&self, config: &mut RolegateConfig) -> ConfigResult<()> {
        if let (name, Some(value)) = self.env_var("STORAGE_BACKEND") {
            config.storage.backend = StorageBackend::parse(&value)
                .ok_or_else(|| ConfigError::invalid_env_var(name, &value, "'memory' or 'file'"))?;
        }
        if let (_, Some(value)) = self.env_var("STORAGE_PATH") {
            config.storage.path = PathBuf::from(value);
        }
        if let (_, Some(value)) = self.env_var("STORAGE_KEY") {
            config.storage.key = value;
        }
        if let (name, Some(value)) = self.env_var("SERVER_PORT") {
            config.server.port = value
                .parse()
                .map_err(|_| ConfigError::invalid_env_var(name, &value, "a port number"))?;
        }
        if let (name, Some(value)) = self.env_var("LOG_LEVEL") {
            match LogLevel::parse(&value) {
                Some(level) => config.logging.level = level,
                None => warn!(variable = %name, value = %value, "Ignoring unknown log level"),
            }
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ConfigLoaderBuilder
// =============================================================================

/// Builder for ConfigLoader.
#[derive(Debug, Default)]
pub struct ConfigLoaderBuilder {
    base_path: Option<PathBuf>,
    env_prefix: Option<String>,
    resolve_env_vars: Option<bool>,
    resolve_paths: Option<bool>,
}

impl ConfigLoaderBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base path for relative path resolution.
    pub fn base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(path.into());
        self
    }

    /// Sets the environment prefix.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Enables or disables environment variable resolution.
    pub fn resolve_env_vars(mut self, enabled: bool) -> Self {
        self.resolve_env_vars = Some(enabled);
        self
    }

    /// Enables or disables path resolution.
    pub fn resolve_paths(mut self, enabled: bool) -> Self {
        self.resolve_paths = Some(enabled);
        self
    }

    /// Builds the ConfigLoader.
    pub fn build(self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();

        if let Some(base_path) = self.base_path {
            loader.base_path = Some(base_path);
        }
        if let Some(prefix) = self.env_prefix {
            loader.env_prefix = prefix;
        }
        if let Some(resolve_env_vars) = self.resolve_env_vars {
            loader.resolve_env_vars = resolve_env_vars;
        }
        if let Some(resolve_paths) = self.resolve_paths {
            loader.resolve_paths = resolve_paths;
        }

        loader
    }
}

// =============================================================================
// ConfigFormat
// =============================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format.
    Yaml,
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Returns the format name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    /// Determines the format from a file path.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(other) => Err(ConfigError::unsupported_format(other)),
            None => Err(ConfigError::unsupported_format("")),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse_str(content: &str, format: ConfigFormat) -> ConfigResult<RolegateConfig> {
    match format {
        ConfigFormat::Yaml => yaml_parse(content),
        ConfigFormat::Toml => {
            toml::from_str(content).map_err(|e| ConfigError::parse(format.as_str(), e))
        }
        ConfigFormat::Json => {
            serde_json::from_str(content).map_err(|e| ConfigError::parse(format.as_str(), e))
        }
    }
}

/// YAML parsing through the `config` crate.
fn yaml_parse<T: DeserializeOwned>(content: &str) -> ConfigResult<T> {
    let config = config::Config::builder()
        .add_source(config::File::from_str(content, config::FileFormat::Yaml))
        .build()
        .map_err(|e| ConfigError::parse("yaml", e))?;

    config
        .try_deserialize()
        .map_err(|e| ConfigError::parse("yaml", e))
}

/// Resolves `${VAR_NAME}` and `${VAR_NAME:default}` placeholders.
///
/// Unset variables without a default are left in place. An unterminated
/// `${` is copied through unchanged.
fn resolve_env_placeholders(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find('}') else {
            result.push_str(&rest[start..]);
            return result;
        };

        let body = &after[..end];
        let (name, default) = match body.split_once(':') {
            Some((name, default)) => (name, Some(default)),
            None => (body, None),
        };

        match (env::var(name), default) {
            (Ok(value), _) => result.push_str(&value),
            (Err(_), Some(default)) => result.push_str(default),
            (Err(_), None) => {
                warn!(variable = %name, "Environment variable not set");
                result.push_str(&rest[start..start + 2 + end + 1]);
            }
        }

        rest = &after[end + 1..];
    }

    result.push_str(rest);
    result
}

fn resolve_relative_paths(config: &mut RolegateConfig, base: &Path) {
    if config.storage.path.is_relative() && !config.storage.path.as_os_str().is_empty() {
        config.storage.path = base.join(&config.storage.path);
    }
}

// =============================================================================
// Convenience Functions
// =============================================================================

/// Loads configuration from a file with default settings.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<RolegateConfig> {
    ConfigLoader::new().load(path)
}

/// Loads configuration from a string with the specified format.
pub fn load_config_str(content: &str, format: ConfigFormat) -> ConfigResult<RolegateConfig> {
    ConfigLoader::new().load_from_str(content, format)
}

// =============================================================================
// Tests
// =============================================================================
