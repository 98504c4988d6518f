// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Intra OAuth authentication routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};
use crate::middleware::session::{
    create_session_token, serialize_user, session_cookie, SESSION_COOKIE,
};
use crate::AppState;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

pub fn routes(provider: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(&format!("/auth/{}", provider), get(auth_start))
        .route(&format!("/auth/{}/callback", provider), get(auth_callback))
        .route("/auth/logout", get(logout))
}

/// Query parameters for starting OAuth flow.
#[derive(Deserialize)]
pub struct AuthStartParams {
    /// Local path to land on after login. Defaults to POST_LOGIN_REDIRECT.
    #[serde(default)]
    redirect_uri: Option<String>,
}

/// Start OAuth flow - redirect to intra authorization.
async fn auth_start(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AuthStartParams>,
) -> Result<Redirect> {
    let return_to = params
        .redirect_uri
        .filter(|uri| is_local_path(uri))
        .unwrap_or_else(|| state.config.post_login_redirect.clone());

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("System time error: {}", e)))?
        .as_millis();

    let oauth_state = sign_state(&return_to, timestamp, &state.config.oauth_state_key)?;

    let auth_url = format!(
        "{}?client_id={}&redirect_uri={}&response_type=code&scope=public&state={}",
        state.config.authorization_url,
        urlencoding::encode(&state.config.client_uid),
        urlencoding::encode(&state.config.callback_url),
        oauth_state
    );

    tracing::info!(
        client_id = %state.config.client_uid,
        return_to = %return_to,
        "Starting OAuth flow, redirecting to intra"
    );

    Ok(Redirect::temporary(&auth_url))
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback - exchange code, resolve and store the profile, start a session.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Result<(CookieJar, Redirect)> {
    let return_to = params
        .state
        .as_deref()
        .and_then(|s| verify_and_decode_state(s, &state.config.oauth_state_key))
        .unwrap_or_else(|| {
            tracing::warn!("Invalid or tampered state parameter, falling back to default redirect");
            state.config.post_login_redirect.clone()
        });

    // Check for OAuth errors
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from intra");
        return Ok((jar, Redirect::temporary(&with_error(&return_to, &error))));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("missing authorization code".to_string()))?;

    tracing::info!("Exchanging authorization code for tokens");
    let tokens = state.profiles.client().exchange_code(&code).await?;

    let profile = state
        .profiles
        .resolve_profile(&tokens.access_token, &tokens.refresh_token)
        .await
        .ok_or_else(|| AppError::IntraApi("cannot get user info".to_string()))?;

    let user_id = serialize_user(&profile);
    let login = profile.login.clone();
    state.users.upsert(profile).await?;

    tracing::info!(user_id, login = %login, "OAuth successful, user stored");

    let token = create_session_token(user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Session token creation failed: {}", e)))?;

    Ok((
        jar.add(session_cookie(token)),
        Redirect::temporary(&return_to),
    ))
}

/// Logout - drop the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Redirect::temporary("/"))
}

/// Only same-origin paths are accepted as post-login destinations.
fn is_local_path(uri: &str) -> bool {
    uri.starts_with('/') && !uri.starts_with("//") && !uri.contains('\\')
}

/// Append an `error` query parameter to `return_to`.
fn with_error(return_to: &str, error: &str) -> String {
    let separator = if return_to.contains('?') { '&' } else { '?' };
    format!("{}{}error={}", return_to, separator, urlencoding::encode(error))
}

/// Build the OAuth state parameter: base64url("return_to|timestamp_hex|signature_hex").
fn sign_state(return_to: &str, timestamp: u128, secret: &[u8]) -> Result<String> {
    let payload = format!("{}|{:x}", return_to, timestamp);

    let mut mac = HmacSha256::new_from_slice(secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("HMAC init failed: {}", e)))?;
    mac.update(payload.as_bytes());
    let signature = mac.finalize().into_bytes();

    let signed = format!("{}|{}", payload, hex::encode(signature));
    Ok(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
}

/// Verify HMAC signature and decode the return path from the OAuth state parameter.
fn verify_and_decode_state(state: &str, secret: &[u8]) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
    let state_str = String::from_utf8(bytes).ok()?;

    // The return path may itself contain '|', so split from the right.
    let mut parts = state_str.rsplitn(3, '|');
    let signature_hex = parts.next()?;
    let timestamp_hex = parts.next()?;
    let return_to = parts.next()?;

    let payload = format!("{}|{}", return_to, timestamp_hex);

    let mut mac = HmacSha256::new_from_slice(secret).ok()?;
    mac.update(payload.as_bytes());
    let expected_signature = hex::encode(mac.finalize().into_bytes());

    if !bool::from(expected_signature.as_bytes().ct_eq(signature_hex.as_bytes())) {
        tracing::error!("OAuth state signature mismatch! Potential tampering.");
        return None;
    }

    Some(return_to.to_string())
}
