// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Configuration error types for rolegate-config.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Origin label for documents loaded from a string.
pub const INLINE_ORIGIN: &str = "<inline>";

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid for its format or does not fit the schema.
    #[error("invalid {format} in {origin}: {message}")]
    Parse {
        /// File path, or [`INLINE_ORIGIN`].
        origin: String,
        /// Format name (`yaml`, `toml`, `json`).
        format: &'static str,
        /// Deserializer message.
        message: String,
    },

    /// A value parsed but is not acceptable.
    #[error("{field}: {message}")]
    Validation {
        /// Dotted path of the offending field, e.g. `storage.key`.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// The file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A `ROLEGATE_*` override holds an unusable value.
    #[error("environment override {name}={value:?} rejected: {expected}")]
    InvalidEnvVar {
        /// Variable name.
        name: String,
        /// Raw value.
        value: String,
        /// Description of an acceptable value.
        expected: &'static str,
    },

    /// No file at the given path.
    #[error("config file {} does not exist", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// The file extension names no supported format.
    #[error("unsupported config extension '{extension}' (expected yaml, yml, toml or json)")]
    UnsupportedFormat {
        /// The extension, or an empty string if there was none.
        extension: String,
    },
}

impl ConfigError {
    /// Creates a parse error for an inline document.
    pub fn parse(format: &'static str, message: impl ToString) -> Self {
        Self::Parse {
            origin: INLINE_ORIGIN.to_string(),
            format,
            message: message.to_string(),
        }
    }

    /// Creates a validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a read error.
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid override error.
    pub fn invalid_env_var(
        name: impl Into<String>,
        value: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            value: value.into(),
            expected,
        }
    }

    /// Creates a missing file error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an unsupported format error.
    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    /// Attributes a parse error to `path`. Other errors pass through.
    pub fn in_file(self, path: &Path) -> Self {
        match self {
            Self::Parse {
                format, message, ..
            } => Self::Parse {
                origin: path.display().to_string(),
                format,
                message,
            },
            other => other,
        }
    }

    /// Returns `true` if the config file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        let err = ConfigError::validation("routes.login_path", "must start with '/'");
        assert_eq!(err.to_string(), "routes.login_path: must start with '/'");
        assert!(err.is_validation());
    }

    #[test]
    fn test_parse_origin() {
        let err = ConfigError::parse("toml", "expected `=`");
        assert_eq!(err.to_string(), "invalid toml in <inline>: expected `=`");

        let err = err.in_file(Path::new("/etc/rolegate.toml"));
        assert_eq!(err.to_string(), "invalid toml in /etc/rolegate.toml: expected `=`");
    }

    #[test]
    fn test_in_file_keeps_other_errors() {
        let err = ConfigError::validation("storage.key", "empty").in_file(Path::new("x.yaml"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_env_var_display() {
        let err = ConfigError::invalid_env_var("ROLEGATE_SERVER_PORT", "eighty", "a port number");
        assert_eq!(
            err.to_string(),
            "environment override ROLEGATE_SERVER_PORT=\"eighty\" rejected: a port number"
        );
    }

    #[test]
    fn test_not_found() {
        let err = ConfigError::not_found("/missing.yaml");
        assert!(err.is_not_found());
        assert!(err.to_string().contains("/missing.yaml"));
    }
}
