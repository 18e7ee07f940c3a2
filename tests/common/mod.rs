use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use streamhub_schedule_lib::server::{
    auth::BearerTokenAuthorizer,
    routes::{build_router, ApiState},
    store::ScheduleStore,
    types::ServerInfo,
};

pub const ADMIN_TOKEN: &str = "test-admin-token";

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("streamhub_schedule_lib=debug")
        .try_init();
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<ScheduleStore>,
    pub data_dir: TempDir,
}

pub fn app() -> TestApp {
    let data_dir = tempfile::tempdir().expect("temp dir");
    app_in(data_dir)
}

pub fn app_in(data_dir: TempDir) -> TestApp {
    let store = Arc::new(ScheduleStore::load(data_dir.path()));
    let state = ApiState {
        store: store.clone(),
        authorizer: Arc::new(BearerTokenAuthorizer::new(Some(ADMIN_TOKEN.to_string()))),
        timezone: None,
        server_info: ServerInfo {
            ip: "127.0.0.1".to_string(),
            port: 23455,
            url: "http://127.0.0.1:23455".to_string(),
        },
    };
    TestApp {
        router: build_router(state),
        store,
        data_dir,
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn regenerate(router: &Router, token: Option<&str>, body: &str) -> (StatusCode, Value) {
    let mut builder = Request::post("/api/admin/schedule").header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    send(router, builder.body(Body::from(body.to_string())).unwrap()).await
}
