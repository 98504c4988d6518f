// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authentication gate for protected routes.

use crate::middleware::session::CurrentUser;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;

/// Outcome of the authentication gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToProvider,
}

pub fn require_authenticated(request_has_user: bool) -> GateDecision {
    if request_has_user {
        GateDecision::Allow
    } else {
        GateDecision::RedirectToProvider
    }
}

/// Middleware that lets authenticated requests through and sends everyone
/// else to the provider login route.
///
/// Relies on `load_session` having run earlier in the stack.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let has_user = request.extensions().get::<CurrentUser>().is_some();

    match require_authenticated(has_user) {
        GateDecision::Allow => next.run(request).await,
        GateDecision::RedirectToProvider => {
            tracing::debug!(path = %request.uri().path(), "Unauthenticated request, redirecting to login");
            Redirect::temporary(&state.config.login_path()).into_response()
        }
    }
}
