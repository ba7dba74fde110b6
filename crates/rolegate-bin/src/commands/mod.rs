// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI command implementations.
//!
//! - `login` / `logout`: Change the persisted session
//! - `whoami`: Show the persisted session
//! - `check`: Ask the route or render guard about a requirement
//! - `decode`: Decode a credential without persisting it
//! - `serve`: Run the demo HTTP surface
//! - `validate`: Validate configuration file
//! - `version`: Show version information

mod check;
mod decode;
mod login;
mod logout;
mod serve;
mod validate;
mod version;
mod whoami;

pub use check::{check, evaluate, CheckOutcome};
pub use decode::decode;
pub use login::login;
pub use logout::logout;
pub use serve::serve;
pub use validate::validate;
pub use version::version;
pub use whoami::whoami;

use crate::cli::{Cli, Commands, LogFormat};
use crate::error::BinResult;
use crate::{logging, runtime};

/// Executes the appropriate command based on CLI arguments.
///
/// Returns the process exit code on success.
pub async fn execute(cli: Cli) -> BinResult<i32> {
    // These two must work even when the config file is broken.
    match &cli.command {
        Commands::Version => return version::version(),
        Commands::Validate(args) => {
            logging::init_logging(
                cli.effective_log_level("warn"),
                cli.log_format.unwrap_or(LogFormat::Text),
            )?;
            return validate::validate(&cli, args);
        }
        _ => {}
    }

    let config = runtime::load_config(&cli)?;
    runtime::init_logging(&cli, &config)?;

    match &cli.command {
        Commands::Login(args) => login::login(&config, args).await,
        Commands::Logout => logout::logout(&config).await,
        Commands::Whoami(args) => whoami::whoami(&config, args).await,
        Commands::Check(args) => check::check(&config, args).await,
        Commands::Decode(args) => decode::decode(args),
        Commands::Serve(args) => serve::serve(&config, args).await,
        Commands::Version | Commands::Validate(_) => Ok(crate::EXIT_SUCCESS),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::Path;

    use rolegate_config::{RolegateConfig, StorageBackend};

    /// Default configuration with file storage rooted at `dir`.
    pub(crate) fn file_config(dir: &Path) -> RolegateConfig {
        let mut config = RolegateConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.path = dir.to_path_buf();
        config
    }
}
