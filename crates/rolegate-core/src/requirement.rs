// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role requirements for guards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::role::{Role, RoleSet};

/// The role requirement a guard enforces.
///
/// A requirement has exactly one shape, so a caller can never ask for a
/// single role and a role set at the same time.
///
/// How [`RoleRequirement::NoRequirement`] is interpreted depends on the guard:
/// the route guard grants any authenticated identity, the render guard denies.
/// An empty [`RoleRequirement::AnyOf`] is treated like `NoRequirement` by both
/// guards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "roles", rename_all = "snake_case")]
pub enum RoleRequirement {
    /// No role specified.
    #[default]
    NoRequirement,
    /// The identity must hold this exact role.
    ExactlyOne(Role),
    /// The identity must hold at least one of these roles.
    AnyOf(RoleSet),
}

impl RoleRequirement {
    /// No role requirement.
    pub fn none() -> Self {
        Self::NoRequirement
    }

    /// Requires a single exact role.
    pub fn exactly(role: Role) -> Self {
        Self::ExactlyOne(role)
    }

    /// Requires any of the given roles.
    ///
    /// An empty iterator yields [`RoleRequirement::NoRequirement`].
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        let set = RoleSet::from_roles(roles);
        if set.is_empty() {
            Self::NoRequirement
        } else {
            Self::AnyOf(set)
        }
    }

    /// Returns `true` if no role is actually required.
    pub fn is_unspecified(&self) -> bool {
        match self {
            Self::NoRequirement => true,
            Self::ExactlyOne(_) => false,
            Self::AnyOf(set) => set.is_empty(),
        }
    }

    /// Returns the shape of the requirement, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoRequirement => "none",
            Self::ExactlyOne(_) => "exactly_one",
            Self::AnyOf(_) => "any_of",
        }
    }
}

impl From<Role> for RoleRequirement {
    fn from(role: Role) -> Self {
        Self::ExactlyOne(role)
    }
}

impl From<RoleSet> for RoleRequirement {
    fn from(set: RoleSet) -> Self {
        Self::any_of(set.iter())
    }
}

impl fmt::Display for RoleRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRequirement => write!(f, "none"),
            Self::ExactlyOne(role) => write!(f, "{}", role),
            Self::AnyOf(set) => write!(f, "any of {}", set),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
