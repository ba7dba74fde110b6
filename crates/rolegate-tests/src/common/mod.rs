// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Helpers shared by the integration suites.

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod mocks;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use mocks::*;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tempfile::TempDir;

/// Routes `tracing` output through the test harness.
///
/// `RUST_LOG` overrides the default of `warn` plus `debug` for rolegate crates.
/// Safe to call from every test.
pub fn init_test_logging() {
    static INSTALLED: OnceLock<()> = OnceLock::new();
    INSTALLED.get_or_init(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "warn,rolegate_session=debug,rolegate_api=debug".into());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Temporary directory removed on drop.
pub struct ScratchDir(TempDir);

impl ScratchDir {
    /// Directory path.
    pub fn path(&self) -> &Path {
        self.0.path()
    }

    /// Writes `content` to `name` inside the directory and returns its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

/// Creates a scratch directory whose name starts with `label`.
pub fn scratch_dir(label: &str) -> ScratchDir {
    ScratchDir(tempfile::Builder::new().prefix(label).tempdir().unwrap())
}
