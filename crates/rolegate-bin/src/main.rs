// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! rolegate - role-based access control demo engine
//!
//! Main binary entry point.

use rolegate_bin::cli::Cli;
use rolegate_bin::error::report_error_and_exit;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    match rolegate_bin::commands::execute(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => report_error_and_exit(e),
    }
}
