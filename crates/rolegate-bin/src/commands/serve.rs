// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `serve` command.

use std::net::SocketAddr;

use tracing::info;

use rolegate_api::{ApiServer, AppState};
use rolegate_config::RolegateConfig;

use crate::cli::ServeArgs;
use crate::error::BinResult;
use crate::shutdown::shutdown_signal;
use crate::{runtime, EXIT_SUCCESS};

/// Serves the demo HTTP surface until a shutdown signal arrives.
///
/// Bootstrap runs in the background, so requests that arrive before it
/// finishes see the loading state.
pub async fn serve(config: &RolegateConfig, args: &ServeArgs) -> BinResult<i32> {
    let store = runtime::open_store(config)?;

    let state = AppState::builder()
        .store(store.clone())
        .paths(runtime::guard_paths(config))
        .build()?;

    let bootstrap_store = store.clone();
    tokio::spawn(async move {
        let state = bootstrap_store.bootstrap().await;
        info!(phase = state.phase().as_str(), "Session restored");
    });

    let addr = listen_addr(config, args);
    info!(
        addr = %addr,
        storage = store.storage_name(),
        "Serving rolegate"
    );

    ApiServer::new(state)
        .with_addr(addr)
        .run_with_shutdown(shutdown_signal())
        .await?;

    Ok(EXIT_SUCCESS)
}

/// Resolves the listen address, letting flags override the config.
fn listen_addr(config: &RolegateConfig, args: &ServeArgs) -> SocketAddr {
    let mut addr = config.server.socket_addr();
    if let Some(bind) = args.bind {
        addr.set_ip(bind);
    }
    if let Some(port) = args.port {
        addr.set_port(port);
    }
    addr
}
