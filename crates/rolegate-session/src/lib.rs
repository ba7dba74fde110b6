// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # rolegate-session
//!
//! Process-wide authentication state for rolegate.
//!
//! - [`SessionStore`]: the single writer. Bootstraps from durable storage,
//!   handles login and logout, and publishes every transition.
//! - [`SessionHandle`]: a cheap, cloneable reader that always observes the
//!   latest committed [`SessionState`](rolegate_core::SessionState).
//! - [`CredentialStorage`]: durable key-value storage for the raw credential,
//!   with in-memory and file-backed implementations.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rolegate_session::{MemoryStorage, SessionStore};
//!
//! let store = SessionStore::new(Arc::new(MemoryStorage::new()));
//! let handle = store.handle();
//!
//! store.bootstrap().await;
//! store.login(token)?;
//!
//! assert!(handle.is_authenticated());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod storage;
pub mod store;

pub use storage::{CredentialStorage, FileStorage, MemoryStorage, DEFAULT_STORAGE_KEY};
pub use store::{SessionHandle, SessionStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
