// Integration tests for `Executor` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use watchdeck_api::{Error, Executor, Method, Payload, RequestSpec};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Executor) {
    let server = MockServer::start().await;
    let exec = Executor::new(&server.uri()).expect("executor should build");
    (server, exec)
}

// ── Header and body rules ───────────────────────────────────────────

#[tokio::test]
async fn get_sends_json_content_type() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let devices: Vec<serde_json::Value> = exec.get("api/v1/devices").await.unwrap();
    assert!(devices.is_empty());
}

#[tokio::test]
async fn post_serializes_body() {
    let (server, exec) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ssl/check"))
        .and(header("content-type", "application/json"))
        .and(wiremock::matchers::body_json(json!({"domain": "example.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let resp: serde_json::Value = exec
        .post("api/v1/ssl/check", &json!({"domain": "example.com"}))
        .await
        .unwrap();
    assert_eq!(resp["ok"], json!(true));
}

#[tokio::test]
async fn get_never_attaches_a_body() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/devices"))
        .and(body_string(""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    // Body set on the spec, but GET does not carry one.
    let spec = RequestSpec::new(Method::Get, "api/v1/devices")
        .body(&json!({"ignored": true}))
        .unwrap();
    let envelope = exec.execute(spec).await.unwrap();
    assert_eq!(envelope.status, 200);
}

#[tokio::test]
async fn header_override_replaces_content_type() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/raw"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let spec = RequestSpec::new(Method::Get, "raw").header(
        reqwest::header::CONTENT_TYPE,
        reqwest::header::HeaderValue::from_static("text/plain"),
    );
    let envelope = exec.execute(spec).await.unwrap();
    assert_eq!(envelope.payload, Payload::Text("ok".into()));
}

// ── Timeout ─────────────────────────────────────────────────────────

#[tokio::test]
async fn slow_response_fails_with_timeout() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"late": true}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let spec = RequestSpec::new(Method::Get, "slow").timeout(Duration::from_millis(50));
    let result = exec.execute(spec).await;

    match result {
        Err(Error::Timeout { timeout }) => {
            assert_eq!(timeout, Duration::from_millis(50));
        }
        other => panic!("expected Timeout, got: {other:?}"),
    }
}

// ── Response parsing ────────────────────────────────────────────────

#[tokio::test]
async fn json_content_type_parses_payload() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/dashboard/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"devices_total": 3})))
        .mount(&server)
        .await;

    let envelope = exec
        .execute(RequestSpec::new(Method::Get, "api/v1/dashboard/stats"))
        .await
        .unwrap();

    assert_eq!(envelope.payload, Payload::Json(json!({"devices_total": 3})));
}

#[tokio::test]
async fn non_json_content_type_returns_raw_text() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("OK")
                .insert_header("content-type", "text/plain"),
        )
        .mount(&server)
        .await;

    let envelope = exec
        .execute(RequestSpec::new(Method::Get, "health"))
        .await
        .unwrap();

    assert_eq!(envelope.payload, Payload::Text("OK".into()));
}

#[tokio::test]
async fn malformed_json_fails_with_parse_error() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{not json", "application/json"),
        )
        .mount(&server)
        .await;

    let result = exec.execute(RequestSpec::new(Method::Get, "broken")).await;

    match result {
        Err(Error::Parse { body, .. }) => assert_eq!(body, "{not json"),
        other => panic!("expected Parse error, got: {other:?}"),
    }
}

// ── Error statuses ──────────────────────────────────────────────────

#[tokio::test]
async fn http_500_with_json_body_still_fails() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/ssl"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"detail": "database unavailable"})),
        )
        .mount(&server)
        .await;

    let result = exec
        .execute(RequestSpec::new(Method::Get, "api/v1/ssl"))
        .await;

    match result {
        Err(Error::Http {
            status,
            ref status_text,
            ref body,
        }) => {
            assert_eq!(status, 500);
            assert_eq!(status_text, "Internal Server Error");
            assert!(body.contains("database unavailable"));
        }
        other => panic!("expected Http error, got: {other:?}"),
    }
}

#[tokio::test]
async fn http_404_is_not_found() {
    let (server, exec) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = exec
        .execute(RequestSpec::new(Method::Get, "missing"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Port 1 is never listening.
    let exec = Executor::new("http://127.0.0.1:1").expect("executor should build");

    let result = exec.execute(RequestSpec::new(Method::Get, "x")).await;

    match result {
        Err(Error::Transport(e)) => assert!(e.is_connect()),
        other => panic!("expected Transport error, got: {other:?}"),
    }
}
