// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP handlers.

mod auth;
mod pages;

pub use auth::{current_session, login, login_as_persona, logout, LoginRequest};
pub use pages::{
    dashboard, dashboard_sections, login_page, unauthorized, user_actions, users,
};
