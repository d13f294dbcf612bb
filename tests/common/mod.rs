#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use polyglow_backend::{app, AppState, Config};

pub const UPSTREAM_PATH: &str = "/language/translate/v2";

/// One call received by the fake provider.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone)]
struct FakeUpstream {
    status: StatusCode,
    body: Arc<String>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

async fn fake_translate(State(upstream): State<FakeUpstream>, headers: HeaderMap, body: String) -> Response {
    let body = serde_json::from_str(&body).unwrap_or(Value::Null);
    upstream.calls.lock().unwrap().push(RecordedCall { headers, body });
    (
        upstream.status,
        [("content-type", "application/json")],
        upstream.body.as_str().to_owned(),
    )
        .into_response()
}

/// Starts a provider stand-in answering every call with `status` and `body`.
/// Returns its URL and the log of calls it received.
pub async fn spawn_upstream(status: StatusCode, body: &str) -> (String, Arc<Mutex<Vec<RecordedCall>>>) {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new()
        .route(UPSTREAM_PATH, post(fake_translate))
        .with_state(FakeUpstream {
            status,
            body: Arc::new(body.to_string()),
            calls: calls.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}{}", addr, UPSTREAM_PATH), calls)
}

pub fn proxy_config(upstream_url: &str) -> Config {
    let mut config = Config::default();
    config.upstream.url = upstream_url.to_string();
    config.upstream.api_key = Some("test-key".to_string());
    config
}

pub fn proxy_app(upstream_url: &str) -> Router {
    app(AppState::new(proxy_config(upstream_url)))
}

/// Serves the proxy on an ephemeral port and returns its base URL.
pub async fn spawn_proxy(upstream_url: &str) -> String {
    let router = proxy_app(upstream_url);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, headers, body)
}

pub async fn post_translate(app: Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _, body) = send(app, request).await;
    (status, body)
}
