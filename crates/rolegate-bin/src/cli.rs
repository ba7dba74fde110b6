// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.
//!
//! - `login`: Establish a session from a credential or mock persona
//! - `logout`: End the session
//! - `whoami`: Show the persisted session
//! - `check`: Evaluate a role requirement with the route or render guard
//! - `decode`: Decode a credential without persisting it
//! - `serve`: Run the demo HTTP surface
//! - `validate`: Validate configuration file
//! - `version`: Show version information

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use rolegate_core::{MockPersona, Role, RoleRequirement};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// rolegate - role-based access control demo engine
///
/// Decodes bearer credentials into identities, persists the session and
/// answers route and render guard questions against it.
#[derive(Parser, Debug)]
#[command(
    name = "rolegate",
    author = "Sylvex <contact@sylvex.io>",
    version = rolegate_core::VERSION,
    about = "Role-based access control demo engine",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Configuration file path (defaults are used if it does not exist)
    #[arg(
        short,
        long,
        default_value = "rolegate.yaml",
        env = "ROLEGATE_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Log format; overrides the config file
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

// =============================================================================
// Subcommands
// =============================================================================

/// Available subcommands for the rolegate CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Log in with a credential or a built-in mock persona
    ///
    /// The credential is decoded first; it is only persisted if it is valid
    /// and not expired.
    Login(LoginArgs),

    /// Log out
    ///
    /// Removes the persisted credential. Succeeds even without a session.
    Logout,

    /// Show the current session
    Whoami(WhoamiArgs),

    /// Check a role requirement against the current session
    ///
    /// Exits with 0 when access is granted and 3 when it is denied.
    Check(CheckArgs),

    /// Decode a credential without persisting it
    Decode(DecodeArgs),

    /// Serve the demo HTTP surface
    Serve(ServeArgs),

    /// Validate the configuration file
    Validate(ValidateArgs),

    /// Show detailed version information
    Version,
}

// =============================================================================
// Command Arguments
// =============================================================================

/// Arguments for the `login` command.
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Raw bearer credential
    #[arg(required_unless_present = "persona", conflicts_with = "persona")]
    pub token: Option<String>,

    /// Log in as a mock persona (user, admin, super-admin)
    #[arg(long = "as", value_name = "PERSONA")]
    pub persona: Option<MockPersona>,
}

impl LoginArgs {
    /// Returns the credential to log in with.
    pub fn credential(&self) -> Option<&str> {
        match (&self.token, self.persona) {
            (Some(token), _) => Some(token.as_str()),
            (None, Some(persona)) => Some(persona.token()),
            (None, None) => None,
        }
    }
}

/// Arguments for the `whoami` command.
#[derive(Args, Debug, Clone, Default)]
pub struct WhoamiArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `check` command.
#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Require exactly this role
    #[arg(long, conflicts_with = "any_of")]
    pub role: Option<Role>,

    /// Require any of these roles (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub any_of: Vec<Role>,

    /// Use render guard semantics instead of route guard semantics
    #[arg(long)]
    pub render: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

impl CheckArgs {
    /// Returns the requirement described by the flags.
    pub fn requirement(&self) -> RoleRequirement {
        match self.role {
            Some(role) => RoleRequirement::exactly(role),
            None => RoleRequirement::any_of(self.any_of.iter().copied()),
        }
    }
}

/// Arguments for the `decode` command.
#[derive(Args, Debug, Clone)]
pub struct DecodeArgs {
    /// Raw bearer credential
    pub token: String,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the `serve` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Bind address (overrides the config file)
    #[arg(long)]
    pub bind: Option<IpAddr>,

    /// Listen port (overrides the config file)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the `validate` command.
#[derive(Args, Debug, Clone, Default)]
pub struct ValidateArgs {
    /// Show parsed configuration after validation
    #[arg(short, long)]
    pub show_config: bool,

    /// Output format for validation results
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

// =============================================================================
// Enums
// =============================================================================

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for structured logging
    Json,
    /// Compact format for minimal output
    Compact,
}

impl From<rolegate_config::LogFormat> for LogFormat {
    fn from(format: rolegate_config::LogFormat) -> Self {
        match format {
            rolegate_config::LogFormat::Text => LogFormat::Text,
            rolegate_config::LogFormat::Json => LogFormat::Json,
            rolegate_config::LogFormat::Compact => LogFormat::Compact,
        }
    }
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic parsing
    Json,
}

// =============================================================================
// Helper Methods
// =============================================================================

impl Cli {
    /// Parse CLI arguments from the command line.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the log level, preferring flags over the config file.
    pub fn effective_log_level<'a>(&'a self, configured: &'a str) -> &'a str {
        if self.quiet {
            "warn"
        } else {
            self.log_level.as_deref().unwrap_or(configured)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
