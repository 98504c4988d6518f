// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::middleware::session::CurrentUser;
use crate::models::PublicUser;
use crate::AppState;
use axum::{routing::get, Extension, Json, Router};
use std::sync::Arc;

/// API routes (require an authenticated session).
/// The gate is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/me", get(get_me))
}

/// Get current user profile.
async fn get_me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<PublicUser> {
    Json(PublicUser::from(&user))
}
