// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Graceful shutdown signal for the HTTP server.
//!
//! Resolves on SIGTERM, SIGINT or SIGQUIT (Unix) or Ctrl+C elsewhere. If a
//! handler cannot be registered the failure is logged and that signal is
//! ignored.

#[cfg(unix)]
use std::future::Future;
#[cfg(unix)]
use std::pin::Pin;

use tracing::{info, warn};

/// Future that resolves when the process is asked to stop.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let terminate = unix_signal(signal(SignalKind::terminate()), "SIGTERM");
        let interrupt = unix_signal(signal(SignalKind::interrupt()), "SIGINT");
        let quit = unix_signal(signal(SignalKind::quit()), "SIGQUIT");

        tokio::select! {
            _ = terminate => {}
            _ = interrupt => {}
            _ = quit => {}
        }
    }

    #[cfg(not(unix))]
    {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C"),
            Err(e) => {
                warn!(error = %e, "Failed to register Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(unix)]
fn unix_signal(
    registration: std::io::Result<tokio::signal::unix::Signal>,
    name: &'static str,
) -> Pin<Box<dyn Future<Output = ()> + Send>> {
    match registration {
        Ok(mut signal) => Box::pin(async move {
            signal.recv().await;
            info!(signal = name, "Received shutdown signal");
        }),
        Err(e) => {
            warn!(signal = name, error = %e, "Failed to register signal handler");
            Box::pin(std::future::pending())
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
