//! Shared helpers for the HTTP integration tests.
//!
//! Each test gets a fresh database from `#[sqlx::test]`; [`build_test_app`]
//! wires it into the production router with a throwaway material store.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

use rollcall_api::auth::jwt::JwtConfig;
use rollcall_api::config::ServerConfig;
use rollcall_api::router::build_app_router;
use rollcall_api::state::AppState;
use rollcall_api::storage::LocalMaterialStore;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Small upload cap so the size check is easy to exercise.
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

pub fn test_config(materials_dir: PathBuf) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        public_base_url: "https://rollcall.test".to_string(),
        materials_dir,
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
    }
}

/// Full application router over `pool`, storing materials in a fresh
/// temporary directory.
pub fn build_test_app(pool: PgPool) -> Router {
    let materials_dir = tempfile::tempdir()
        .expect("temp dir should be created")
        .keep();
    let config = test_config(materials_dir.clone());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        material_store: Arc::new(LocalMaterialStore::new(materials_dir)),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .expect("request should be handled")
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

fn builder(method: &str, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header("authorization", format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: &Router, uri: &str) -> Response {
    send(app, builder("GET", uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder("GET", uri, Some(token)).body(Body::empty()).unwrap(),
    )
    .await
}

pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder("DELETE", uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn json_request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response {
    let request = builder(method, uri, token)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response {
    json_request(app, "POST", uri, None, body).await
}

pub async fn post_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    json_request(app, "POST", uri, Some(token), body).await
}

pub async fn put_json_auth(app: &Router, uri: &str, token: &str, body: Value) -> Response {
    json_request(app, "PUT", uri, Some(token), body).await
}

const BOUNDARY: &str = "rollcall-boundary";

/// A `multipart/form-data` body with text fields and an optional file part.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart_auth(app: &Router, uri: &str, token: &str, body: Vec<u8>) -> Response {
    let request = builder("POST", uri, Some(token))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// A signed-up account: its id and a valid access token.
pub struct TestUser {
    pub id: i64,
    pub token: String,
    pub refresh_token: String,
}

/// Sign up through the API and return the new account.
pub async fn signup(app: &Router, email: &str, role: &str) -> TestUser {
    let response = post_json(
        app,
        "/api/v1/auth/signup",
        json!({ "email": email, "password": TEST_PASSWORD, "role": role }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED, "signup should succeed");
    let json = body_json(response).await;
    TestUser {
        id: json["data"]["user"]["id"].as_i64().expect("user id"),
        token: json["data"]["access_token"]
            .as_str()
            .expect("access token")
            .to_string(),
        refresh_token: json["data"]["refresh_token"]
            .as_str()
            .expect("refresh token")
            .to_string(),
    }
}

/// Create a subject for `user` and return its id.
pub async fn create_subject(app: &Router, user: &TestUser, name: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/v1/subjects",
        &user.token,
        json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("subject id")
}

pub async fn mark(app: &Router, user: &TestUser, subject_id: i64, date: &str, status: &str) -> Response {
    put_json_auth(
        app,
        "/api/v1/attendance",
        &user.token,
        json!({ "subject_id": subject_id, "date": date, "status": status }),
    )
    .await
}
