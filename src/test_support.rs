use std::sync::{Arc, OnceLock};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tower::ServiceExt;

use crate::api;
use crate::core::{config::Settings, sessions::SessionStore, state::AppState};
use crate::db;

const TEST_SECRET_KEY: &str = "test-secret";

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) app: Router,
    _guard: OwnedMutexGuard<()>,
}

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<Mutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(Mutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("SKILL4EDGE_ENV", "test");
    std::env::set_var("SKILL4EDGE_STRICT_CONFIG", "0");
    std::env::set_var("SECRET_KEY", TEST_SECRET_KEY);
    std::env::set_var("SIMULATED_LATENCY_MS", "0");
    std::env::set_var("PROMETHEUS_ENABLED", "0");
    std::env::remove_var("PROJECT_NAME");
    std::env::remove_var("API_V1_STR");
    std::env::remove_var("ALGORITHM");
    std::env::remove_var("CATALOG_PATH");
    std::env::remove_var("BACKEND_CORS_ORIGINS");
}

pub(crate) async fn setup_test_context() -> TestContext {
    setup_test_context_with(|| {}).await
}

/// Like `setup_test_context`, with extra env overrides applied after the
/// test defaults and before settings are loaded.
pub(crate) async fn setup_test_context_with(overrides: impl FnOnce()) -> TestContext {
    let guard = env_lock().await;
    set_test_env();
    overrides();

    let settings = Settings::load().expect("settings");
    let catalog = db::load(&settings).expect("catalog");
    let state = AppState::new(settings, catalog, SessionStore::new());
    let app = api::router::router(state.clone());

    TestContext { state, app, _guard: guard }
}

pub(crate) fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}

/// Opens a session over HTTP and returns its bearer token.
pub(crate) async fn open_session(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/session", None, None))
        .await
        .expect("create session");
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = read_json(response).await;
    json["token"].as_str().expect("token").to_string()
}

/// Sends a request and returns status plus parsed body (`Null` when empty).
pub(crate) async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let response =
        app.clone().oneshot(json_request(method, uri, token, body)).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    if bytes.is_empty() {
        return (status, serde_json::Value::Null);
    }
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|err| {
        panic!("json parse: {err}; body: {}", String::from_utf8_lossy(&bytes));
    });
    (status, json)
}
