// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! 42 intra API client.
//!
//! Handles:
//! - Authorization-code exchange
//! - Fetching the authenticated user's identity payload (`/me`)

use serde::{Deserialize, Deserializer};

use crate::config::Config;
use crate::error::AppError;
use crate::services::profile::ResolveError;

/// Intra API client.
#[derive(Clone)]
pub struct IntraClient {
    http: reqwest::Client,
    api_url: String,
    token_url: String,
    callback_url: String,
    client_uid: String,
    client_secret: String,
}

impl IntraClient {
    /// Create a client from the OAuth and API settings in `config`.
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token_url: config.token_url.clone(),
            callback_url: config.callback_url.clone(),
            client_uid: config.client_uid.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    /// Fetch the identity payload for the owner of `access_token`.
    ///
    /// The body is read as text first so that transport failures and
    /// undecodable payloads surface as different errors.
    pub async fn get_me(&self, access_token: &str) -> Result<IntraMe, ResolveError> {
        let url = format!("{}/me", self.api_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Exchange an authorization code for tokens.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_uid.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.callback_url.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::IntraApi(format!("Token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Intra token exchange failed");
            return Err(AppError::IntraApi(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::IntraApi(format!("Failed to parse token response: {}", e)))
    }
}

/// Token response from the intra OAuth token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
}

/// Identity payload returned by `GET /v2/me`.
///
/// Only the fields the profile needs are decoded; everything else in the
/// (large) payload is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct IntraMe {
    pub id: u64,
    pub login: String,
    pub first_name: String,
    pub displayname: String,
    pub campus: Vec<IntraCampus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub campus_users: Vec<IntraCampusUser>,
}

/// Campus entry in the identity payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IntraCampus {
    pub id: u64,
    pub name: String,
    pub time_zone: String,
}

/// Campus membership record.
#[derive(Debug, Clone, Deserialize)]
pub struct IntraCampusUser {
    pub campus_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_primary: bool,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
