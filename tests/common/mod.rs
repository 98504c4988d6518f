// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use intra_auth::config::Config;
use intra_auth::db::{JsonFileBackend, UserStore};
use intra_auth::routes::create_router;
use intra_auth::services::{IntraClient, ProfileResolver};
use intra_auth::AppState;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// App wired to a temporary user file and a mocked intra.
#[allow(dead_code)]
pub struct TestApp {
    pub router: axum::Router,
    pub state: Arc<AppState>,
    pub intra: MockServer,
    pub user_db_path: PathBuf,
    _dir: TempDir,
}

/// Config pointing every provider URL at `server`.
#[allow(dead_code)]
pub fn test_config(server_uri: &str, user_db_path: PathBuf) -> Config {
    Config {
        api_url: format!("{}/v2", server_uri),
        token_url: format!("{}/oauth/token", server_uri),
        authorization_url: format!("{}/oauth/authorize", server_uri),
        request_timeout: Duration::from_secs(1),
        user_db_path,
        ..Config::default()
    }
}

/// Resolver talking to `server_uri`.
#[allow(dead_code)]
pub fn test_resolver(server_uri: &str) -> ProfileResolver {
    let config = test_config(server_uri, PathBuf::from("unused.json"));
    ProfileResolver::new(IntraClient::new(&config).expect("client builds"))
}

#[allow(dead_code)]
pub async fn create_test_app() -> TestApp {
    let intra = MockServer::start().await;
    let dir = tempfile::tempdir().expect("temp dir");
    let user_db_path = dir.path().join("users.json");

    let config = test_config(&intra.uri(), user_db_path.clone());
    let users = UserStore::open(Arc::new(JsonFileBackend::new(&user_db_path)))
        .await
        .expect("user store opens");
    let profiles = ProfileResolver::new(IntraClient::new(&config).expect("client builds"));

    let state = Arc::new(AppState {
        config,
        users,
        profiles,
    });

    TestApp {
        router: create_router(state.clone()),
        state,
        intra,
        user_db_path,
        _dir: dir,
    }
}

/// Identity payload in the shape returned by `GET /v2/me`.
#[allow(dead_code)]
pub fn me_payload(id: u64, login: &str, campus: Value, campus_users: Value) -> Value {
    json!({
        "id": id,
        "email": format!("{}@student.42.fr", login),
        "login": login,
        "first_name": "Test",
        "displayname": format!("Test {}", login),
        "campus": campus,
        "campus_users": campus_users,
    })
}

/// Paris + Lyon, with Lyon flagged primary.
#[allow(dead_code)]
pub fn paris_lyon_payload(id: u64, login: &str) -> Value {
    me_payload(
        id,
        login,
        json!([
            {"id": 1, "name": "Paris", "time_zone": "Europe/Paris"},
            {"id": 2, "name": "Lyon", "time_zone": "Europe/Paris"}
        ]),
        json!([{"id": 77, "user_id": id, "campus_id": 2, "is_primary": true}]),
    )
}

#[allow(dead_code)]
pub async fn mount_me(server: &MockServer, access_token: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path("/v2/me"))
        .and(header("authorization", format!("Bearer {}", access_token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_token(server: &MockServer, access_token: &str, refresh_token: &str) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": access_token,
            "token_type": "bearer",
            "expires_in": 7200,
            "refresh_token": refresh_token,
            "scope": "public",
            "created_at": 1700000000
        })))
        .mount(server)
        .await;
}
