//! HTTP front end tests, driving the router directly with `oneshot`

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use aozora_clean::error::{EMPTY_DOWNLOAD_URL_MESSAGE, MISSING_URL_MESSAGE, UNEXPECTED_MESSAGE};
use aozora_clean::server::{AppState, create_router};
use aozora_clean::{PipelineConfig, TextPipeline};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::*;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt; // for oneshot()
use wiremock::MockServer;

fn app() -> Router {
    let pipeline = TextPipeline::new(PipelineConfig::default()).unwrap();
    create_router(AppState::new(Arc::new(pipeline)).unwrap())
}

fn json_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_request(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

async fn mock_with_sample() -> MockServer {
    let mock_server = MockServer::start().await;
    serve_bytes(&mock_server, "/rashomon.zip", sample_archive()).await;
    serve_bytes(&mock_server, "/not-a-zip.zip", b"<html>nope</html>".to_vec()).await;
    serve_bytes(
        &mock_server,
        "/bad-encoding.zip",
        build_zip(&[("bad.txt", b"\x81\x20")]),
    )
    .await;
    mock_server
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_api_convert_json() {
    let mock_server = mock_with_sample().await;
    let url = format!("{}/rashomon.zip", mock_server.uri());

    let response = app()
        .oneshot(json_request("/api/convert", serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["text"], SAMPLE_CLEANED);
}

#[tokio::test]
async fn test_api_convert_form_with_padded_url() {
    let mock_server = mock_with_sample().await;
    let url = format!("{}/rashomon.zip", mock_server.uri());

    let response = app()
        .oneshot(form_request("/api/convert", format!("url=++{url}++")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["text"], SAMPLE_CLEANED);
}

#[tokio::test]
async fn test_api_convert_missing_url() {
    for request in [
        json_request("/api/convert", serde_json::json!({})),
        json_request("/api/convert", serde_json::json!({ "url": "   " })),
        form_request("/api/convert", String::new()),
        Request::builder()
            .method("POST")
            .uri("/api/convert")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    ] {
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], MISSING_URL_MESSAGE);
    }
}

#[tokio::test]
async fn test_api_convert_classified_failure() {
    let mock_server = mock_with_sample().await;
    let url = format!("{}/not-a-zip.zip", mock_server.uri());

    let response = app()
        .oneshot(json_request("/api/convert", serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "ZIPファイルを展開できません。");
}

#[tokio::test]
async fn test_api_convert_unexpected_failure() {
    let mock_server = mock_with_sample().await;
    let url = format!("{}/bad-encoding.zip", mock_server.uri());

    let response = app()
        .oneshot(json_request("/api/convert", serde_json::json!({ "url": url })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], UNEXPECTED_MESSAGE);
}

#[tokio::test]
async fn test_index_page() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("<form"));
    assert!(!html.contains("<pre>"));
}

#[tokio::test]
async fn test_form_convert_renders_text() {
    let mock_server = mock_with_sample().await;
    let url = format!("{}/rashomon.zip", mock_server.uri());

    let response = app()
        .oneshot(form_request("/", format!("url={url}&action=convert")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("ある日の暮方の事である。"));
    assert!(!html.contains("《くれがた》"));
}

#[tokio::test]
async fn test_form_convert_without_action_defaults_to_convert() {
    let response = app()
        .oneshot(form_request("/", "url=".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains(MISSING_URL_MESSAGE));
}

#[tokio::test]
async fn test_form_clear_skips_processing() {
    // The URL points nowhere; clear must not try to fetch it
    let response = app()
        .oneshot(form_request(
            "/",
            "url=http%3A%2F%2F127.0.0.1%3A9%2Fx.zip&action=clear".to_string(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(!html.contains("x.zip"));
    assert!(!html.contains(r#"class="error""#));
}

#[tokio::test]
async fn test_form_convert_shows_classified_error() {
    let mock_server = mock_with_sample().await;
    let url = format!("{}/not-a-zip.zip", mock_server.uri());

    let response = app()
        .oneshot(form_request("/", format!("url={url}&action=convert")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("ZIPファイルを展開できません。"));
}

#[tokio::test]
async fn test_download_attachment() {
    let mock_server = mock_with_sample().await;
    let url = format!("{}/rashomon.zip", mock_server.uri());

    let response = app()
        .oneshot(form_request("/download", format!("url={url}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"aozora_cleaned.txt\""
    );
    assert_eq!(body_string(response).await, SAMPLE_CLEANED);
}

#[tokio::test]
async fn test_download_empty_url() {
    let response = app()
        .oneshot(form_request("/download", "url=+".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(response).await.contains(EMPTY_DOWNLOAD_URL_MESSAGE));
}

#[tokio::test]
async fn test_download_classified_failure() {
    let mock_server = MockServer::start().await;
    serve_status(&mock_server, "/missing.zip", 500).await;
    let url = format!("{}/missing.zip", mock_server.uri());

    let response = app()
        .oneshot(form_request("/download", format!("url={url}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(
        body_string(response)
            .await
            .contains("ZIPファイルのダウンロードに失敗しました。")
    );
}

#[tokio::test]
async fn test_download_unexpected_failure() {
    let mock_server = mock_with_sample().await;
    let url = format!("{}/bad-encoding.zip", mock_server.uri());

    let response = app()
        .oneshot(form_request("/download", format!("url={url}")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(response).await.contains(UNEXPECTED_MESSAGE));
}
