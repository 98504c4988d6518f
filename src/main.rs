// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Intra-Auth API Server
//!
//! Authenticates users against the 42 intra and keeps their profiles in a
//! local user file.

use intra_auth::{
    config::Config,
    db::{JsonFileBackend, UserStore},
    services::{IntraClient, ProfileResolver},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        provider = %config.provider,
        "Starting Intra-Auth API"
    );

    // Load the user file
    let backend = JsonFileBackend::new(&config.user_db_path);
    tracing::info!(path = %backend.path().display(), "Loading user store");
    let users = UserStore::open(Arc::new(backend)).await?;

    // Initialize intra client
    let profiles = ProfileResolver::new(IntraClient::new(&config)?);
    tracing::info!(api_url = %config.api_url, "Intra client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        users,
        profiles,
    });

    // Build router
    let app = intra_auth::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("intra_auth=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
