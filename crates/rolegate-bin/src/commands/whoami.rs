// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `whoami` command.

use rolegate_api::response::SessionResponse;
use rolegate_config::RolegateConfig;

use crate::cli::{OutputFormat, WhoamiArgs};
use crate::error::BinResult;
use crate::{runtime, EXIT_SUCCESS};

/// Restores the persisted session and prints it.
pub async fn whoami(config: &RolegateConfig, args: &WhoamiArgs) -> BinResult<i32> {
    let store = runtime::open_store(config)?;
    let state = store.bootstrap().await;
    let response = SessionResponse::from(&state);

    match args.format {
        OutputFormat::Text => match &response.identity {
            Some(identity) => {
                println!("ID:    {}", identity.id);
                println!("Email: {}", identity.email);
                let roles: Vec<&str> = identity.roles.iter().map(String::as_str).collect();
                println!("Roles: {}", if roles.is_empty() { "(none)".to_string() } else { roles.join(", ") });
            }
            None => println!("Not logged in"),
        },
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(EXIT_SUCCESS)
}
