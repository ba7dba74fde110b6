// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use rolegate_config::{ConfigLoader, RolegateConfig, StorageBackend};

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};
use crate::EXIT_SUCCESS;

/// Validates the configuration file named on the command line.
///
/// Unlike other commands, a missing file is an error here.
pub fn validate(cli: &Cli, args: &ValidateArgs) -> BinResult<i32> {
    let config_path = &cli.config;

    if !config_path.exists() {
        return Err(BinError::config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = ConfigLoader::new()
        .load(config_path)
        .map_err(|e| BinError::from(e).with_context("Configuration validation failed"))?;

    let warnings = collect_warnings(&config);

    match args.format {
        OutputFormat::Text => {
            println!("Configuration is valid: {}", config_path.display());
            println!();
            println!("Summary:");
            println!("  Storage:      {} ({})", config.storage.backend, config.storage.path.display());
            println!("  Storage key:  {}", config.storage.key);
            println!("  Login path:   {}", config.routes.login_path);
            println!("  Unauthorized: {}", config.routes.unauthorized_path);
            println!("  Server:       {}", config.server.socket_addr());

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  - {}", warning);
                }
            }

            if args.show_config {
                println!();
                println!("Parsed configuration:");
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "config_path": config_path.display().to_string(),
                "warnings": warnings,
                "config": if args.show_config { Some(&config) } else { None },
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(EXIT_SUCCESS)
}

/// Non-fatal issues worth reporting.
fn collect_warnings(config: &RolegateConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if config.storage.backend == StorageBackend::Memory {
        warnings.push("Memory storage does not survive a restart".to_string());
    }
    if config.routes.login_path == config.routes.unauthorized_path {
        warnings.push("Login and unauthorized paths are the same".to_string());
    }

    warnings
}
