// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! # Guard Integration Tests
//!
//! Integration tests for the evaluator and the route and render guards:
//!
//! - Evaluator membership rules
//! - Route guard precedence (loading, authentication, roles)
//! - Render guard default-deny
//! - End-to-end scenarios through a real session store
//!
//! ## Test Categories
//!
//! - `test_evaluator_*`: Role membership
//! - `test_route_*`: Route guard decisions
//! - `test_render_*`: Render guard decisions
//! - `test_scenario_*`: Store plus guard flows

use rolegate_api::{
    render, render_allowed, render_or_nothing, route_decision, GuardPaths, RedirectReason,
    RenderGuard, RouteGuard,
};
use rolegate_core::Evaluator;
use rolegate_tests::prelude::*;

fn signed_in(identity: Identity) -> SessionState {
    SessionState::authenticated(identity)
}

fn all_requirements() -> Vec<RoleRequirement> {
    let mut requirements = vec![RoleRequirement::none(), RoleRequirement::any_of([])];
    for role in Role::all() {
        requirements.push(RoleRequirement::exactly(*role));
    }
    requirements.push(RoleRequirement::any_of([Role::Admin, Role::SuperAdmin]));
    requirements.push(RoleRequirement::any_of(Role::all().iter().copied()));
    requirements
}

// =============================================================================
// Evaluator Tests
// =============================================================================

#[test]
fn test_evaluator_has_role_is_literal_membership() {
    for persona in MockPersona::all() {
        let identity = rolegate_core::decode(persona.token()).unwrap();
        let evaluator = Evaluator::for_identity(Some(&identity));
        for role in Role::all() {
            assert_eq!(
                evaluator.has_role(*role),
                *role == persona.role(),
                "{} / {}",
                persona,
                role
            );
        }
    }
}

#[test]
fn test_evaluator_absent_identity_has_nothing() {
    let evaluator = Evaluator::for_identity(None);
    for role in Role::all() {
        assert!(!evaluator.has_role(*role));
    }
    assert!(!evaluator.has_any_role(&RoleSet::from_roles(Role::all().iter().copied())));
}

#[test]
fn test_evaluator_labels_are_case_sensitive() {
    let identity = Identity::new("u-1", "u@example.com", ["admin", "Super_Admin"]);
    let evaluator = Evaluator::for_identity(Some(&identity));

    assert!(!evaluator.has_role(Role::Admin));
    assert!(!evaluator.has_role(Role::SuperAdmin));
}

#[test]
fn test_evaluator_unknown_labels_are_ignored() {
    let identity = Identity::new("u-1", "u@example.com", ["AUDITOR", "USER"]);
    let evaluator = Evaluator::for_identity(Some(&identity));

    assert!(evaluator.has_role(Role::User));
    assert!(!evaluator.has_any_role(&RoleSet::from([Role::Admin, Role::SuperAdmin])));
}

#[test]
fn test_evaluator_any_role_is_intersection() {
    let identity = IdentityFixtures::all_roles();
    let evaluator = Evaluator::for_identity(Some(&identity));

    assert!(!evaluator.has_any_role(&RoleSet::new()));
    assert!(evaluator.has_any_role(&RoleSet::from([Role::Admin])));

    let identity = IdentityFixtures::user();
    let evaluator = Evaluator::for_identity(Some(&identity));
    assert!(evaluator.has_any_role(&RoleSet::from([Role::User, Role::SuperAdmin])));
    assert!(!evaluator.has_any_role(&RoleSet::from([Role::Admin, Role::SuperAdmin])));
}

// =============================================================================
// Route Guard Tests
// =============================================================================

#[test]
fn test_route_loading_is_pending_for_every_requirement() {
    let paths = GuardPaths::default();
    for state in [SessionState::uninitialized(), SessionState::bootstrapping()] {
        for requirement in all_requirements() {
            route_decision(&state, &requirement, &paths).assert_pending();
        }
    }
}

#[test]
fn test_route_no_requirement_admits_any_identity() {
    let paths = GuardPaths::default();
    for identity in [IdentityFixtures::no_roles(), IdentityFixtures::user()] {
        let state = signed_in(identity);
        route_decision(&state, &RoleRequirement::none(), &paths).assert_grant();
        route_decision(&state, &RoleRequirement::any_of([]), &paths).assert_grant();
    }
}

#[test]
fn test_route_authentication_checked_before_roles() {
    let paths = GuardPaths::new("/signin", "/denied");
    for requirement in all_requirements() {
        route_decision(&SessionState::unauthenticated(), &requirement, &paths)
            .assert_redirect("/signin", RedirectReason::Unauthenticated);
    }
}

#[test]
fn test_route_role_denial_goes_to_unauthorized() {
    let paths = GuardPaths::new("/signin", "/denied");
    let state = signed_in(IdentityFixtures::user());

    route_decision(&state, &RoleRequirement::exactly(Role::Admin), &paths)
        .assert_redirect("/denied", RedirectReason::Forbidden);
    route_decision(&state, &RoleRequirement::exactly(Role::User), &paths).assert_grant();
}

#[test]
fn test_route_guard_struct() {
    let guard = RouteGuard::new(
        RoleRequirement::any_of([Role::Admin, Role::SuperAdmin]),
        GuardPaths::default(),
    );

    guard.decide(&signed_in(IdentityFixtures::admin())).assert_grant();
    guard
        .decide(&signed_in(IdentityFixtures::user()))
        .assert_redirect("/unauthorized", RedirectReason::Forbidden);
    guard.decide(&SessionState::bootstrapping()).assert_pending();

    let any = RouteGuard::authenticated(GuardPaths::default());
    any.decide(&signed_in(IdentityFixtures::no_roles())).assert_grant();
}

// =============================================================================
// Render Guard Tests
// =============================================================================

#[test]
fn test_render_unspecified_always_denies() {
    let states = [
        SessionState::uninitialized(),
        SessionState::unauthenticated(),
        signed_in(IdentityFixtures::super_admin()),
        signed_in(IdentityFixtures::all_roles()),
    ];
    for state in &states {
        assert!(!render_allowed(state, &RoleRequirement::none()));
        assert!(!render_allowed(state, &RoleRequirement::any_of([])));
    }
}

#[test]
fn test_render_denies_without_identity() {
    for requirement in all_requirements() {
        assert!(!render_allowed(&SessionState::unauthenticated(), &requirement));
        assert!(!render_allowed(&SessionState::bootstrapping(), &requirement));
    }
}

#[test]
fn test_render_evaluates_only_chosen_branch() {
    let state = signed_in(IdentityFixtures::admin());
    let requirement = RoleRequirement::exactly(Role::Admin);

    let output = render(&state, &requirement, || "granted", || panic!("fallback evaluated"));
    assert_eq!(output, "granted");

    let hidden = render_or_nothing(&state, &RoleRequirement::exactly(Role::User), || {
        panic!("granted evaluated")
    });
    assert_eq!(hidden, None::<()>);
}

#[test]
fn test_render_guard_struct() {
    let guard = RenderGuard::new(Role::SuperAdmin);
    assert!(guard.allows(&signed_in(IdentityFixtures::super_admin())));
    assert!(!guard.allows(&signed_in(IdentityFixtures::admin())));
    assert_eq!(
        guard.render(&signed_in(IdentityFixtures::user()), || 1, || 0),
        0
    );

    assert!(!RenderGuard::default().allows(&signed_in(IdentityFixtures::super_admin())));
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_scenario_empty_storage_redirects_to_login() {
    let (store, _storage) = recording_store();
    let state = store.bootstrap().await;

    assert!(state.identity().is_none());
    assert!(!state.is_loading());

    let paths = GuardPaths::default();
    for requirement in all_requirements() {
        route_decision(&state, &requirement, &paths)
            .assert_redirect("/login", RedirectReason::Unauthenticated);
    }
}

#[tokio::test]
async fn test_scenario_admin_lacks_user_role() {
    let (store, _storage) = recording_store();
    store.bootstrap().await;
    store
        .login(&TokenBuilder::new().role(Role::Admin).expires_in_secs(600).build())
        .unwrap();

    route_decision(
        &store.snapshot(),
        &RoleRequirement::exactly(Role::User),
        &GuardPaths::default(),
    )
    .assert_redirect("/unauthorized", RedirectReason::Forbidden);
}

#[tokio::test]
async fn test_scenario_super_admin_renders_admin_section() {
    let (store, _storage) = recording_store();
    store.bootstrap().await;
    store.login(&TokenFixtures::super_admin()).unwrap();

    let requirement = RoleRequirement::any_of([Role::Admin, Role::SuperAdmin]);
    let shown = render(&store.snapshot(), &requirement, || "granted", || "fallback");
    assert_eq!(shown, "granted");
}

#[tokio::test]
async fn test_scenario_unspecified_render_shows_fallback() {
    let (store, _storage) = recording_store();
    store.bootstrap().await;
    store.login(&TokenFixtures::super_admin()).unwrap();

    let shown = render(
        &store.snapshot(),
        &RoleRequirement::none(),
        || "granted",
        || "fallback",
    );
    assert_eq!(shown, "fallback");
}

#[tokio::test]
async fn test_scenario_expired_login_changes_nothing() {
    let (store, storage) = recording_store();
    store.bootstrap().await;
    let before = store.snapshot();
    storage.reset();

    let err = store.login(&TokenFixtures::expired()).unwrap_err();

    assert!(err.is_invalid_credential());
    assert_eq!(store.snapshot(), before);
    assert!(storage.writes().is_empty());
    route_decision(
        &store.snapshot(),
        &RoleRequirement::none(),
        &GuardPaths::default(),
    )
    .assert_redirect("/login", RedirectReason::Unauthenticated);
}

#[tokio::test]
async fn test_scenario_one_snapshot_per_decision() {
    let (store, _storage) = recording_store();
    store.bootstrap().await;
    store.login(&TokenFixtures::admin()).unwrap();
    let handle = store.handle();

    let snapshot = handle.snapshot();
    store.logout();

    // The snapshot taken before logout still describes one consistent state.
    let requirement = RoleRequirement::exactly(Role::Admin);
    route_decision(&snapshot, &requirement, &GuardPaths::default()).assert_grant();
    assert!(render_allowed(&snapshot, &requirement));

    route_decision(&handle.snapshot(), &requirement, &GuardPaths::default())
        .assert_redirect("/login", RedirectReason::Unauthenticated);
}
