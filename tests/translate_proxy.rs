mod common;

use axum::{body::Body, http::{Request, StatusCode}};
use serde_json::json;

use common::{post_translate, proxy_app, send, spawn_upstream};

const HINDI_REPLY: &str = r#"{"data":{"translations":{"translatedText":"नमस्ते","detectedSourceLanguage":"en"}},"usage":{"chars":5}}"#;

#[tokio::test]
async fn translates_and_reshapes_upstream_response() {
    let (url, calls) = spawn_upstream(StatusCode::OK, HINDI_REPLY).await;

    let (status, body) = post_translate(
        proxy_app(&url),
        r#"{"q":"Hello","source":"en","target":"hi","format":"text"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"translatedText": "नमस्ते"}));

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({"q": "Hello", "source": "en", "target": "hi"}));
    assert_eq!(calls[0].headers["x-rapidapi-key"], "test-key");
    assert_eq!(calls[0].headers["x-rapidapi-host"], "deep-translate1.p.rapidapi.com");
    assert_eq!(calls[0].headers["content-type"], "application/json");
}

#[tokio::test]
async fn missing_fields_are_rejected_without_upstream_call() {
    let (url, calls) = spawn_upstream(StatusCode::OK, HINDI_REPLY).await;

    for body in [
        r#"{"q":"","source":"en","target":"hi"}"#,
        r#"{"q":"Hello","target":"hi"}"#,
        r#"{"q":"Hello","source":"en"}"#,
        r#"{"q":"Hello","source":"en","target":""}"#,
        r#"{}"#,
    ] {
        let (status, response) = post_translate(proxy_app(&url), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
        assert_eq!(response, json!({"error": "Missing required fields"}), "{}", body);
    }

    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_client_error() {
    let (url, calls) = spawn_upstream(StatusCode::OK, HINDI_REPLY).await;

    let (status, body) = post_translate(proxy_app(&url), "q=Hello").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid request body"}));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unexpected_upstream_shape_is_bad_gateway_and_not_echoed() {
    let (url, calls) = spawn_upstream(
        StatusCode::OK,
        r#"{"message":"quota exceeded for key abc123"}"#,
    )
    .await;

    let (status, body) = post_translate(proxy_app(&url), r#"{"q":"Hello","source":"en","target":"hi"}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "Invalid response from translation service"}));
    assert!(!body.to_string().contains("abc123"));
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn upstream_error_status_with_json_body_is_bad_gateway() {
    let (url, _calls) = spawn_upstream(StatusCode::FORBIDDEN, r#"{"message":"You are not subscribed to this API."}"#).await;

    let (status, body) = post_translate(proxy_app(&url), r#"{"q":"Hello","source":"en","target":"hi"}"#).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body, json!({"error": "Invalid response from translation service"}));
}

#[tokio::test]
async fn unreadable_upstream_body_is_internal_error() {
    let (url, _calls) = spawn_upstream(StatusCode::OK, "<html>gateway</html>").await;

    let (status, body) = post_translate(proxy_app(&url), r#"{"q":"Hello","source":"en","target":"hi"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Translation failed. Please try again later."}));
}

#[tokio::test]
async fn unreachable_upstream_is_internal_error() {
    let (status, body) = post_translate(
        proxy_app("http://127.0.0.1:1/language/translate/v2"),
        r#"{"q":"Hello","source":"en","target":"hi"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Translation failed. Please try again later."}));
}

#[tokio::test]
async fn health_reports_credential_state() {
    let request = || Request::builder().uri("/api/health").body(Body::empty()).unwrap();

    let (status, _, body) = send(proxy_app("http://127.0.0.1:1/"), request()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "upstream_configured": true}));

    let app = polyglow_backend::app(polyglow_backend::AppState::new(polyglow_backend::Config::default()));
    let (_, _, body) = send(app, request()).await;
    assert_eq!(body["upstream_configured"], json!(false));
}

#[tokio::test]
async fn languages_endpoint_lists_reference_data() {
    let request = Request::builder().uri("/api/languages").body(Body::empty()).unwrap();

    let (status, _, body) = send(proxy_app("http://127.0.0.1:1/"), request).await;

    assert_eq!(status, StatusCode::OK);
    let languages = body.as_array().unwrap();
    assert_eq!(languages.len(), polyglow_backend::languages::LANGUAGES.len());
    assert!(languages.contains(&json!({"code": "hi", "name": "Hindi"})));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let request = Request::builder()
        .uri("/api/health")
        .header("origin", "https://polyglow.example")
        .body(Body::empty())
        .unwrap();

    let (_, headers, _) = send(proxy_app("http://127.0.0.1:1/"), request).await;

    assert_eq!(headers["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn static_dir_serves_front_end_behind_api_routes() {
    use tower::ServiceExt;

    let assets = tempfile::TempDir::new().unwrap();
    std::fs::write(assets.path().join("index.html"), "<h1>PolyGlow</h1>").unwrap();

    let mut config = common::proxy_config("http://127.0.0.1:1/");
    config.server.static_dir = Some(assets.path().to_string_lossy().into_owned());
    let app = polyglow_backend::app(polyglow_backend::AppState::new(config));

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/index.html").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>PolyGlow</h1>");

    let missing = app
        .clone()
        .oneshot(Request::builder().uri("/missing.js").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let (status, _, body) = send(app, Request::builder().uri("/api/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
}

#[tokio::test]
async fn without_static_dir_unknown_paths_are_not_found() {
    let request = Request::builder().uri("/index.html").body(Body::empty()).unwrap();

    let (status, _, _) = send(proxy_app("http://127.0.0.1:1/"), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
