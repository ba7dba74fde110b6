// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Subscriber setup.
//!
//! Everything is written to stderr; stdout belongs to command output.

use std::io::{self, IsTerminal};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use crate::cli::LogFormat;
use crate::error::{BinError, BinResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Noisy crates capped regardless of the requested level.
const DEPENDENCY_CAPS: &[&str] = &["hyper=warn", "tower=warn", "axum=info", "tokio=info"];

/// Installs the global subscriber. `RUST_LOG`, when set, replaces `level`.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(level: &str, format: LogFormat) -> BinResult<()> {
    let layer = format_layer(format).with_filter(build_filter(level)?);

    tracing_subscriber::registry()
        .with(layer)
        .try_init()
        .map_err(|e| BinError::init(format!("failed to install logger: {}", e)))
}

fn format_layer(format: LogFormat) -> BoxedLayer {
    let ansi = io::stderr().is_terminal();
    match format {
        LogFormat::Text => fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(ansi)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(io::stderr)
            .with_target(false)
            .with_ansi(ansi)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
    }
}

/// Builds the filter for `level` with dependency caps applied.
pub fn build_filter(level: &str) -> BinResult<EnvFilter> {
    let mut filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::default().add_directive(level_filter(level).into()),
    };

    for cap in DEPENDENCY_CAPS {
        let directive = cap
            .parse()
            .map_err(|e| BinError::init(format!("bad log directive '{}': {}", cap, e)))?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// Maps a level name to a filter. Unknown names fall back to `info`.
pub fn level_filter(level: &str) -> LevelFilter {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}
