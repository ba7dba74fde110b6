// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Role definitions.
//!
//! Roles form a closed set with no implicit hierarchy: `SUPER_ADMIN` does not
//! satisfy a check for `ADMIN` or `USER`. Callers that want broader access
//! enumerate every qualifying role in a [`RoleSet`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Role
// =============================================================================

/// Predefined roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular authenticated user.
    User,
    /// Administrator.
    Admin,
    /// Super administrator.
    SuperAdmin,
}

impl Role {
    /// Returns the role label as it appears in credential payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
        }
    }

    /// Parses a role from user input.
    ///
    /// Accepts the payload label in any case, with `-` or `_` as separator.
    /// Payload labels themselves are matched exactly by the evaluator.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            "SUPER_ADMIN" | "SUPERADMIN" => Some(Role::SuperAdmin),
            _ => None,
        }
    }

    /// Returns all roles.
    pub fn all() -> &'static [Role] {
        &[Role::User, Role::Admin, Role::SuperAdmin]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| {
            format!(
                "unknown role '{}' (expected one of: USER, ADMIN, SUPER_ADMIN)",
                s
            )
        })
    }
}

// =============================================================================
// Role Set
// =============================================================================

/// A set of roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet {
    roles: BTreeSet<Role>,
}

impl RoleSet {
    /// Creates an empty role set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a role set from a list of roles.
    pub fn from_roles(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// Adds a role to the set.
    pub fn add(&mut self, role: Role) {
        self.roles.insert(role);
    }

    /// Returns `true` if the set contains the given role.
    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns the number of roles in the set.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Returns an iterator over the roles in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        self.roles.iter().copied()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self::from_roles(iter)
    }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self {
        Self::from_roles(roles)
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<&str> = self.roles.iter().map(Role::as_str).collect();
        write!(f, "[{}]", labels.join(", "))
    }
}

// =============================================================================
// Tests
// =============================================================================
