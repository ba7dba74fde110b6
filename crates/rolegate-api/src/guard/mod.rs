// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Access guards.
//!
//! Both guards evaluate a [`RoleRequirement`] against one
//! [`SessionState`](rolegate_core::SessionState) snapshot. They differ in
//! what an unspecified requirement means and in whether session liveness
//! is checked at all.
//!
//! | Requirement | Route guard | Render guard |
//! |---|---|---|
//! | `NoRequirement` | grant if authenticated | deny |
//! | `ExactlyOne(r)` | `has_role(r)` | `has_role(r)` |
//! | `AnyOf(set)` | `has_any_role(set)` | `has_any_role(set)` |

use rolegate_core::{Evaluator, RoleRequirement};

mod render;
mod route;

pub use render::{render, render_allowed, render_or_nothing, RenderGuard};
pub use route::{route_decision, GuardPaths, RedirectReason, RouteDecision, RouteGuard};

/// Runs the role check for a requirement.
///
/// Returns `None` when no requirement is specified; an empty `AnyOf` counts
/// as unspecified.
pub(crate) fn role_check(evaluator: &Evaluator<'_>, requirement: &RoleRequirement) -> Option<bool> {
    match requirement {
        RoleRequirement::NoRequirement => None,
        RoleRequirement::ExactlyOne(role) => Some(evaluator.has_role(*role)),
        RoleRequirement::AnyOf(roles) if roles.is_empty() => None,
        RoleRequirement::AnyOf(roles) => Some(evaluator.has_any_role(roles)),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_core::{Identity, Role, RoleSet};

    #[test]
    fn test_role_check_shapes() {
        let identity = Identity::new("u-1", "u@example.com", ["ADMIN"]);
        let evaluator = Evaluator::for_identity(Some(&identity));

        assert_eq!(role_check(&evaluator, &RoleRequirement::none()), None);
        assert_eq!(
            role_check(&evaluator, &RoleRequirement::AnyOf(RoleSet::new())),
            None
        );
        assert_eq!(
            role_check(&evaluator, &RoleRequirement::exactly(Role::Admin)),
            Some(true)
        );
        assert_eq!(
            role_check(&evaluator, &RoleRequirement::exactly(Role::User)),
            Some(false)
        );
        assert_eq!(
            role_check(
                &evaluator,
                &RoleRequirement::any_of([Role::User, Role::Admin])
            ),
            Some(true)
        );
    }
}
