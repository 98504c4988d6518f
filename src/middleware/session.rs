// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session bridge: user <-> session token, and the middleware that attaches
//! the current user to each request.

use crate::db::UserStore;
use crate::models::UserProfile;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "intra_session";

/// Session lifetime (30 days).
const SESSION_TTL_SECS: usize = 30 * 24 * 60 * 60;

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (intra user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// User resolved from the session, stored in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserProfile);

/// Value kept in the session for `profile`.
pub fn serialize_user(profile: &UserProfile) -> u64 {
    profile.id
}

/// User for a session value; `None` means "not authenticated".
pub async fn deserialize_user(store: &UserStore, id: u64) -> Option<UserProfile> {
    store.find_by_id(id).await
}

/// Create a signed session token for `user_id`.
pub fn create_session_token(user_id: u64, signing_key: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + SESSION_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )?)
}

/// Verify a session token and return the user ID it carries.
pub fn verify_session_token(token: &str, signing_key: &[u8]) -> Option<u64> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<Claims>(token, &key, &validation).ok()?;
    token_data.claims.sub.parse().ok()
}

/// Session cookie carrying `token`.
pub fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Attach the session's user to the request, if there is one.
///
/// Never rejects: a missing, invalid or stale session just leaves the
/// request without a [`CurrentUser`].
pub async fn load_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    // Try cookie first, then header
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => Some(cookie.value().to_string()),
        None => request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(str::to_string),
    };

    let user_id = token.and_then(|t| verify_session_token(&t, &state.config.jwt_signing_key));

    if let Some(user_id) = user_id {
        match deserialize_user(&state.users, user_id).await {
            Some(user) => {
                request.extensions_mut().insert(CurrentUser(user));
            }
            None => tracing::debug!(user_id, "Session refers to unknown user"),
        }
    }

    next.run(request).await
}
