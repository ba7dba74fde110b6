// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # rolegate-core
//!
//! Core authorization types for rolegate.
//!
//! This crate provides the pieces every other rolegate crate builds on:
//!
//! - **Role**: The closed role enumeration and role sets
//! - **Requirement**: Tagged role requirements used by guards
//! - **Codec**: Decoding bearer credentials into an [`Identity`]
//! - **Session**: The observable session state and its phases
//! - **Evaluator**: Role-membership predicates over a session snapshot
//! - **Error**: Decode, login and storage error types
//!
//! ## Example
//!
//! ```rust,ignore
//! use rolegate_core::{SessionCodec, SessionState, Role};
//!
//! let identity = SessionCodec::new().decode(token)?;
//! let state = SessionState::authenticated(identity);
//!
//! assert!(state.evaluator().has_role(Role::Admin));
//! ```
//!
//! Credentials are decoded without signature verification. The payload is
//! the trust boundary; deployments that accept tokens from untrusted
//! sources must verify signatures before handing them to the codec.

#![warn(missing_docs)]
#![deny(unsafe_code)]

// =============================================================================
// Modules
// =============================================================================

pub mod claims;
pub mod codec;
pub mod error;
pub mod evaluator;
pub mod identity;
pub mod mock;
pub mod requirement;
pub mod role;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use claims::Claims;
pub use codec::{decode, SessionCodec};
pub use error::{DecodeError, LoginError, StorageError};
pub use evaluator::Evaluator;
pub use identity::Identity;
pub use mock::MockPersona;
pub use requirement::RoleRequirement;
pub use role::{Role, RoleSet};
pub use session::{SessionPhase, SessionState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
