// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::error::BinResult;
use crate::EXIT_SUCCESS;

/// Prints version information for every rolegate crate.
pub fn version() -> BinResult<i32> {
    println!("rolegate - role-based access control demo engine");
    println!();
    println!("Version Information:");
    println!("  rolegate-bin:     {}", crate::VERSION);
    println!("  rolegate-core:    {}", rolegate_core::VERSION);
    println!("  rolegate-session: {}", rolegate_session::VERSION);
    println!("  rolegate-api:     {}", rolegate_api::VERSION);
    println!("  rolegate-config:  {}", rolegate_config::VERSION);
    println!();
    println!("Build Information:");
    println!("  Target:       {}", std::env::consts::ARCH);
    println!("  OS:           {}", std::env::consts::OS);
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(EXIT_SUCCESS)
}
