// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # rolegate Integration Tests
//!
//! Integration tests for the rolegate workspace, plus the shared utilities
//! they are built from.
//!
//! ## Module Structure
//!
//! - [`common`]: Shared test utilities
//!   - `fixtures`: Pre-built credentials and identities
//!   - `builders`: `TokenBuilder` for arbitrary credentials
//!   - `assertions`: Assertion helpers for sessions and guard decisions
//!   - `mocks`: Storage doubles that record or fail
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rolegate-tests
//!
//! cargo test -p rolegate-tests --test integration_session
//! cargo test -p rolegate-tests --test integration_guards
//! cargo test -p rolegate-tests --test integration_config
//! cargo test -p rolegate-tests --test integration_api
//! ```
//!
//! ## Test Categories
//!
//! ### Session Tests (`integration_session.rs`)
//! - Bootstrap from empty, valid, expired and malformed storage
//! - Login atomicity and logout idempotence
//! - Subscriber notifications
//!
//! ### Guard Tests (`integration_guards.rs`)
//! - Evaluator properties
//! - Route and render guard decisions, including the end-to-end scenarios
//!
//! ### Config Tests (`integration_config.rs`)
//! - Parsing every supported format into a working store
//!
//! ### API Tests (`integration_api.rs`)
//! - The HTTP surface driven end to end
//!
//! ## Writing New Tests
//!
//! ```rust,ignore
//! use rolegate_tests::prelude::*;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let token = TokenBuilder::new()
//!         .subject("u-1")
//!         .role(Role::Admin)
//!         .expires_in_secs(60)
//!         .build();
//!     let (store, storage) = recording_store();
//!     store.bootstrap().await;
//!     store.login(&token).unwrap();
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod common;

/// Re-export commonly used items for convenience.
pub mod prelude {
    pub use crate::common::assertions::*;
    pub use crate::common::builders::*;
    pub use crate::common::fixtures::*;
    pub use crate::common::mocks::*;
    pub use crate::common::{init_test_logging, scratch_dir, ScratchDir};

    pub use rolegate_core::{
        Identity, MockPersona, Role, RoleRequirement, RoleSet, SessionPhase, SessionState,
    };
}
