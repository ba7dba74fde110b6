// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `login` command.

use tracing::warn;

use rolegate_config::{RolegateConfig, StorageBackend};

use crate::cli::LoginArgs;
use crate::error::{BinError, BinResult};
use crate::{runtime, EXIT_SUCCESS};

/// Decodes the credential and persists it as the current session.
///
/// Nothing is written when the credential is malformed or expired.
pub async fn login(config: &RolegateConfig, args: &LoginArgs) -> BinResult<i32> {
    let credential = args
        .credential()
        .ok_or_else(|| BinError::config("a credential or --as persona is required"))?;

    if config.storage.backend == StorageBackend::Memory {
        warn!("Memory storage is configured; the session ends with this process");
    }

    let store = runtime::open_store(config)?;
    store.bootstrap().await;
    let identity = store.login(credential)?;

    println!("Logged in as {} ({})", identity.email, identity.id);
    if identity.roles.is_empty() {
        println!("Roles: (none)");
    } else {
        let roles: Vec<&str> = identity.roles.iter().map(String::as_str).collect();
        println!("Roles: {}", roles.join(", "));
    }

    Ok(EXIT_SUCCESS)
}
