// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `logout` command.

use rolegate_config::RolegateConfig;

use crate::error::BinResult;
use crate::{runtime, EXIT_SUCCESS};

/// Clears the persisted session. Succeeds without a session too.
pub async fn logout(config: &RolegateConfig) -> BinResult<i32> {
    let store = runtime::open_store(config)?;
    let previous = store.bootstrap().await;
    store.logout();

    match previous.identity() {
        Some(identity) => println!("Logged out {}", identity.email),
        None => println!("No active session"),
    }
    Ok(EXIT_SUCCESS)
}
