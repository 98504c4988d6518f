// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware modules (session loading, authentication gate).

pub mod auth;
pub mod session;

pub use auth::require_auth;
pub use session::{load_session, CurrentUser};
