// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Intra-Auth: log users in with their 42 intra account
//!
//! This crate resolves a normalized user profile (including the user's
//! primary campus) from the intra API after OAuth, persists it to a local
//! user file and exposes the session plumbing around it.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::UserStore;
use services::ProfileResolver;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: UserStore,
    pub profiles: ProfileResolver,
}
