// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- OAuth provider ---
    /// Provider name used in `/auth/{provider}` routes
    pub provider: String,
    /// OAuth client UID (public)
    pub client_uid: String,
    /// Provider authorization entry point
    pub authorization_url: String,
    /// Provider token endpoint (authorization-code exchange)
    pub token_url: String,
    /// Redirect URI registered with the provider
    pub callback_url: String,
    /// Intra API base URL; the "me" endpoint is `{api_url}/me`
    pub api_url: String,
    /// Timeout for every provider request
    pub request_timeout: Duration,

    // --- Storage / server ---
    /// Durable user file
    pub user_db_path: PathBuf,
    /// Where the browser lands after a successful login
    pub post_login_redirect: String,
    /// Server port
    pub port: u16,

    // --- Secrets ---
    /// OAuth client secret
    pub client_secret: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// HMAC key for the OAuth state parameter
    pub oauth_state_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            provider: "42".to_string(),
            client_uid: "test_client_uid".to_string(),
            authorization_url: "https://api.intra.42.fr/oauth/authorize".to_string(),
            token_url: "https://api.intra.42.fr/oauth/token".to_string(),
            callback_url: "http://localhost:8080/auth/42/callback".to_string(),
            api_url: "https://api.intra.42.fr/v2".to_string(),
            request_timeout: Duration::from_secs(10),
            user_db_path: PathBuf::from("data/users.json"),
            post_login_redirect: "/".to_string(),
            port: 8080,
            client_secret: "test_secret".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            oauth_state_key: b"test_state_key".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honored for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let provider = env::var("PROVIDER").unwrap_or_else(|_| "42".to_string());
        let timeout_secs = match env::var("INTRA_TIMEOUT_SECS") {
            Ok(v) => v
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::Invalid("INTRA_TIMEOUT_SECS", e.to_string()))?,
            Err(_) => 10,
        };

        Ok(Self {
            client_uid: required("CLIENT_UID")?,
            authorization_url: env::var("AUTHORIZATION_URL")
                .unwrap_or_else(|_| "https://api.intra.42.fr/oauth/authorize".to_string()),
            token_url: env::var("TOKEN_URL")
                .unwrap_or_else(|_| "https://api.intra.42.fr/oauth/token".to_string()),
            callback_url: env::var("CALLBACK_URL")
                .unwrap_or_else(|_| format!("http://localhost:8080/auth/{}/callback", provider)),
            api_url: env::var("INTRA_API_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "https://api.intra.42.fr/v2".to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
            user_db_path: env::var("USER_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/users.json")),
            post_login_redirect: env::var("POST_LOGIN_REDIRECT")
                .unwrap_or_else(|_| "/".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            provider,

            client_secret: required("CLIENT_SECRET")?,
            jwt_signing_key: required("JWT_SIGNING_KEY")?.into_bytes(),
            oauth_state_key: required("OAUTH_STATE_KEY")?.into_bytes(),
        })
    }

    /// Path of the route that starts the OAuth flow.
    pub fn login_path(&self) -> String {
        format!("/auth/{}", self.provider)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .map_err(|_| ConfigError::Missing(name))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("CLIENT_UID", "test_uid");
        env::set_var("CLIENT_SECRET", " test_secret \n");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("OAUTH_STATE_KEY", "test_state_key");
        env::set_var("INTRA_API_URL", "http://127.0.0.1:9999/v2/");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.client_uid, "test_uid");
        assert_eq!(config.client_secret, "test_secret");
        assert_eq!(config.api_url, "http://127.0.0.1:9999/v2");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.login_path(), format!("/auth/{}", config.provider));
    }
}
