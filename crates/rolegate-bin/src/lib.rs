// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # rolegate-bin
//!
//! CLI binary for rolegate.
//!
//! - CLI argument parsing with clap
//! - Session store construction from configuration
//! - Graceful shutdown for the HTTP server
//! - Logging initialization
//! - Command implementations
//!
//! ## Usage
//!
//! ```bash
//! # Log in with a raw credential or a built-in persona
//! rolegate login eyJhbGciOi...
//! rolegate login --as admin
//!
//! # Inspect the persisted session
//! rolegate whoami --format json
//!
//! # Ask the guards (exit code 0 = granted, 3 = denied)
//! rolegate check --role SUPER_ADMIN
//! rolegate check --any-of ADMIN,SUPER_ADMIN --render
//!
//! # Decode without persisting
//! rolegate decode eyJhbGciOi...
//!
//! # Serve the demo HTTP surface
//! rolegate -c rolegate.yaml serve --port 8080
//!
//! rolegate logout
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod shutdown;

// =============================================================================
// Re-exports
// =============================================================================

pub use cli::{Cli, Commands};
pub use error::{BinError, BinResult};
pub use logging::init_logging;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit code for a successful command.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code when `check` denies access.
pub const EXIT_DENIED: i32 = 3;
