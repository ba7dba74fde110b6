// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `check` command.

use serde_json::json;

use rolegate_api::{render_allowed, route_decision, GuardPaths, RouteDecision};
use rolegate_config::RolegateConfig;
use rolegate_core::SessionState;

use crate::cli::{CheckArgs, OutputFormat};
use crate::error::BinResult;
use crate::{runtime, EXIT_DENIED, EXIT_SUCCESS};

/// Result of asking a guard about the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Route guard decision.
    Route(RouteDecision),
    /// Render guard answer.
    Render(bool),
}

impl CheckOutcome {
    /// Returns `true` if access is granted.
    pub fn is_granted(&self) -> bool {
        match self {
            Self::Route(decision) => decision.is_grant(),
            Self::Render(allowed) => *allowed,
        }
    }

    /// Returns the process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_granted() {
            EXIT_SUCCESS
        } else {
            EXIT_DENIED
        }
    }
}

/// Evaluates the requirement in `args` against one session snapshot.
pub fn evaluate(state: &SessionState, args: &CheckArgs, paths: &GuardPaths) -> CheckOutcome {
    let requirement = args.requirement();
    if args.render {
        CheckOutcome::Render(render_allowed(state, &requirement))
    } else {
        CheckOutcome::Route(route_decision(state, &requirement, paths))
    }
}

/// Restores the session, asks the guard and reports the answer.
///
/// Returns `EXIT_DENIED` when access is refused.
pub async fn check(config: &RolegateConfig, args: &CheckArgs) -> BinResult<i32> {
    let store = runtime::open_store(config)?;
    let state = store.bootstrap().await;
    let paths = runtime::guard_paths(config);

    let outcome = evaluate(&state, args, &paths);
    let requirement = args.requirement();

    match args.format {
        OutputFormat::Text => match &outcome {
            CheckOutcome::Route(RouteDecision::Grant) | CheckOutcome::Render(true) => {
                println!("granted ({})", requirement)
            }
            CheckOutcome::Render(false) => println!("hidden ({})", requirement),
            CheckOutcome::Route(RouteDecision::Pending) => println!("pending"),
            CheckOutcome::Route(RouteDecision::Redirect { to, reason, .. }) => {
                println!("denied: {} -> {}", reason, to)
            }
        },
        OutputFormat::Json => {
            let (reason, redirect) = match &outcome {
                CheckOutcome::Route(RouteDecision::Redirect { to, reason, .. }) => {
                    (Some(reason.as_str()), Some(to.as_str()))
                }
                _ => (None, None),
            };
            let output = json!({
                "guard": if args.render { "render" } else { "route" },
                "requirement": requirement.to_string(),
                "granted": outcome.is_granted(),
                "reason": reason,
                "redirect": redirect,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(outcome.exit_code())
}
