//! End-to-end behaviour of the command endpoint, in process.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use command_transport::command::{BasicCommandService, CommandError, NewCommandResponse};
use command_transport::config::ServiceConfig;
use command_transport::http::{
    make_http_handlers, ErrorEnvelope, HttpServer, ServerOptions, MAX_BODY_BYTES,
};
use command_transport::CommandService;
use tower::ServiceExt;

mod common;
use common::{EchoService, FailingService, SlowService};

fn server(service: impl CommandService) -> axum::Router {
    HttpServer::new(ServiceConfig::default(), Arc::new(service)).router()
}

fn post_json(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/commands")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn small_request_round_trips_with_default_status() {
    let body = r#"{"name":"deploy","payload":{"env":"prod","n":3}}"#;
    assert!(body.len() <= 50);

    let response = server(EchoService { status: None })
        .oneshot(post_json(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let text = body_string(response).await;
    assert!(text.contains("\n  \"name\": \"deploy\""), "not pretty printed: {text}");
    let echoed: NewCommandResponse = serde_json::from_str(&text).unwrap();
    assert_eq!(echoed.name, "deploy");
    assert_eq!(echoed.payload, serde_json::json!({"env": "prod", "n": 3}));
}

#[tokio::test]
async fn explicit_status_replaces_default() {
    let response = server(EchoService { status: Some(StatusCode::ACCEPTED) })
        .oneshot(post_json(r#"{"name":"deploy"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let text = body_string(response).await;
    assert!(!text.contains("\"error\""));
}

#[tokio::test]
async fn empty_body_is_a_server_error() {
    let response = server(EchoService { status: None })
        .oneshot(post_json(Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ErrorEnvelope = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(envelope.error, "request body is empty");
}

#[tokio::test]
async fn malformed_json_is_a_server_error() {
    let response = server(EchoService { status: None })
        .oneshot(post_json(r#"{"name": "#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ErrorEnvelope = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(envelope.error.starts_with("invalid JSON request"));
}

#[tokio::test]
async fn empty_request_sentinel_is_bad_request() {
    let response = server(FailingService(CommandError::EmptyRequest))
        .oneshot(post_json(r#"{"name":"deploy"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_string(response).await,
        "{\n  \"error\": \"empty request\"\n}\n"
    );
}

#[tokio::test]
async fn other_domain_errors_are_server_errors() {
    let response = server(FailingService(CommandError::Internal("queue closed".into())))
        .oneshot(post_json(r#"{"name":"deploy"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ErrorEnvelope = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(envelope.error, "internal error: queue closed");
}

#[tokio::test]
async fn missing_name_reaches_service_as_empty_request() {
    let response = server(BasicCommandService::new())
        .oneshot(post_json("{}"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope: ErrorEnvelope = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(envelope, ErrorEnvelope { error: "empty request".into() });
}

#[tokio::test]
async fn basic_service_rejects_blank_name() {
    let response = server(BasicCommandService::new())
        .oneshot(post_json(r#"{"name":"  "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn basic_service_creates_command() {
    let response = server(BasicCommandService::new())
        .oneshot(post_json(r#"{"name":"deploy","payload":[1,2]}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created: NewCommandResponse = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(created.payload, serde_json::json!([1, 2]));
}

#[tokio::test]
async fn body_past_ceiling_is_truncated_and_rejected() {
    let filler = "x".repeat(MAX_BODY_BYTES);
    let body = format!(r#"{{"name":"deploy","payload":"{filler}"}}"#);

    // No Content-Length: the ceiling must not depend on it.
    let request = Request::builder()
        .method("POST")
        .uri("/commands")
        .body(Body::from(body))
        .unwrap();

    let response = server(EchoService { status: None }).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope: ErrorEnvelope = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(envelope.error.contains("EOF"), "unexpected message: {}", envelope.error);
}

#[tokio::test]
async fn only_post_is_routed() {
    let request = Request::builder()
        .method("GET")
        .uri("/commands")
        .body(Body::empty())
        .unwrap();

    let response = server(EchoService { status: None }).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn slow_service_hits_configured_timeout() {
    let router = make_http_handlers(
        "/commands",
        Arc::new(SlowService(Duration::from_secs(5))),
        ServerOptions::new().timeout(Duration::from_millis(50)),
    );

    let response = router.oneshot(post_json(r#"{"name":"deploy"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let envelope: ErrorEnvelope = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(envelope.error, "request timed out after 50ms");
}

#[tokio::test]
async fn custom_route_path_is_honoured() {
    let mut config = ServiceConfig::default();
    config.transport.route_path = "/v1/commands".into();
    let router = HttpServer::new(config, Arc::new(EchoService { status: None })).router();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/commands")
        .body(Body::from(r#"{"name":"deploy"}"#))
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
