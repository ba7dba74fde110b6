// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Command failures and their exit codes.
//!
//! | code | meaning                                  |
//! |------|------------------------------------------|
//! | 1    | bad configuration or arguments           |
//! | 2    | runtime setup (logger, server wiring)    |
//! | 3    | reserved for a denied `check`            |
//! | 4    | writing output failed                    |
//! | 5    | credential did not decode                |
//! | 6    | credential storage failed                |
//! | 7    | HTTP server failed                       |

use std::error::Error as StdError;
use std::io;
use std::iter;

use thiserror::Error;

use rolegate_api::ApiError;
use rolegate_config::ConfigError;
use rolegate_core::{DecodeError, LoginError, StorageError};

/// Result type alias for command execution.
pub type BinResult<T> = Result<T, BinError>;

/// A failed command.
#[derive(Debug, Error)]
pub enum BinError {
    /// Arguments or settings are unusable.
    #[error("{0}")]
    Usage(String),

    /// The config file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Process setup failed before the command ran.
    #[error("setup failed: {0}")]
    Setup(String),

    /// Writing to stdout failed.
    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),

    /// Output could not be rendered as JSON.
    #[error("cannot render output: {0}")]
    Render(#[from] serde_json::Error),

    /// `login` was refused.
    #[error("login refused: {0}")]
    Login(#[from] LoginError),

    /// `decode` was given an invalid credential.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The credential backend failed.
    #[error("credential storage: {0}")]
    Storage(#[from] StorageError),

    /// `serve` failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Another error, prefixed with what was being attempted.
    #[error("{action}")]
    Context {
        /// What was being attempted.
        action: String,
        /// Why it failed.
        #[source]
        source: Box<BinError>,
    },
}

impl BinError {
    /// Creates a usage error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    /// Creates a setup error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Setup(msg.into())
    }

    /// Wraps `self` with the action that failed.
    pub fn with_context(self, action: impl Into<String>) -> Self {
        Self::Context {
            action: action.into(),
            source: Box::new(self),
        }
    }

    /// Process exit code. Never [`crate::EXIT_DENIED`].
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::Config(_) => 1,
            Self::Setup(_) => 2,
            Self::Output(_) | Self::Render(_) => 4,
            Self::Decode(_) | Self::Login(LoginError::InvalidCredential(_)) => 5,
            Self::Storage(_) | Self::Login(LoginError::Storage(_)) => 6,
            Self::Api(_) => 7,
            Self::Context { source, .. } => source.exit_code(),
        }
    }

    /// The error followed by every cause.
    pub fn chain(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        iter::successors(Some(self as &(dyn StdError + 'static)), |&e| e.source())
    }
}

/// Prints the error and its causes to stderr.
pub fn report_error(error: &BinError) {
    let mut chain = error.chain();
    if let Some(top) = chain.next() {
        eprintln!("error: {}", top);
    }
    for cause in chain {
        eprintln!("  caused by: {}", cause);
    }
}

/// Prints the error and exits with its code.
pub fn report_error_and_exit(error: BinError) -> ! {
    report_error(&error);
    std::process::exit(error.exit_code())
}
