#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for the realm server REST surface.
//!
//! These tests verify that:
//! 1. A successful login returns principals and groups
//! 2. Every login failure is a generic 401 Problem response
//! 3. Wiring errors surface as 500 without details
//! 4. Redeploying the delegate is invisible to HTTP clients
//! 5. Oversized bodies are rejected

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use realm_server::api::dto::{RealmInfoDto, SubjectDto};
use realm_server::api::problem::PROBLEM_CONTENT_TYPE;
use realm_server::{AppConfig, RealmServer};
use tower::ServiceExt;

fn config() -> AppConfig {
    serde_json::from_value(serde_json::json!({
        "realm": {
            "login_context": "AppContext",
            "properties": {
                "context-name": "AppContext",
                "display-name": "Application Realm",
                "backend-address": "local://app/delegate"
            }
        },
        "static_delegate": {
            "address": "local://app/delegate",
            "users": [
                {
                    "username": "alice",
                    "password": "correct",
                    "groups": ["admin", "users"],
                    "attributes": { "tenant": "acme" }
                }
            ]
        }
    }))
    .unwrap()
}

fn login_request(body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/v1/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(router: Router, req: Request<Body>) -> (StatusCode, http::HeaderMap, Vec<u8>) {
    let response = router.oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, headers, body)
}

#[tokio::test]
async fn login_returns_subject() {
    let server = RealmServer::build(config()).unwrap();

    let (status, _, body) = send(
        server.router(),
        login_request(&serde_json::json!({ "username": "alice", "password": "correct" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let subject: SubjectDto = serde_json::from_slice(&body).unwrap();
    assert_eq!(subject.principals.len(), 1);
    assert_eq!(subject.principals[0].id, "alice");
    assert_eq!(subject.principals[0].attributes["tenant"], "acme");
    assert_eq!(subject.groups, vec!["admin".to_owned(), "users".to_owned()]);
}

#[tokio::test]
async fn failed_logins_are_indistinguishable() {
    let server = RealmServer::build(config()).unwrap();

    let (wrong_status, wrong_headers, wrong_body) = send(
        server.router(),
        login_request(&serde_json::json!({ "username": "alice", "password": "wrong" })),
    )
    .await;
    let (unknown_status, _, unknown_body) = send(
        server.router(),
        login_request(&serde_json::json!({ "username": "mallory", "password": "x" })),
    )
    .await;
    let (empty_status, _, empty_body) = send(
        server.router(),
        login_request(&serde_json::json!({ "username": "", "password": "x" })),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_headers.get(header::CONTENT_TYPE).unwrap(),
        PROBLEM_CONTENT_TYPE
    );
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(empty_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body, empty_body);
}

#[tokio::test]
async fn mismatched_login_context_is_internal_error() {
    let mut cfg = config();
    cfg.realm.login_context = "OtherContext".to_owned();
    let server = RealmServer::build(cfg).unwrap();

    let (status, _, body) = send(
        server.router(),
        login_request(&serde_json::json!({ "username": "alice", "password": "correct" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let text = String::from_utf8(body).unwrap();
    assert!(!text.contains("AppContext"));
    assert!(!text.contains("OtherContext"));
}

#[tokio::test]
async fn redeployed_delegate_serves_next_login() {
    let server = RealmServer::build(config()).unwrap();
    let mut rotated = config().static_delegate;
    rotated.users = serde_json::from_value(serde_json::json!([
        { "username": "alice", "password": "rotated", "groups": ["users"] }
    ]))
    .unwrap();

    server.redeploy_delegate(&rotated).unwrap();

    let (status, _, body) = send(
        server.router(),
        login_request(&serde_json::json!({ "username": "alice", "password": "rotated" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let subject: SubjectDto = serde_json::from_slice(&body).unwrap();
    assert_eq!(subject.groups, vec!["users".to_owned()]);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let server = RealmServer::build(config()).unwrap();

    let (status, headers, _) = send(
        server.router(),
        login_request(&serde_json::json!({ "username": "alice" })),
    )
    .await;

    assert!(status.is_client_error());
    assert_ne!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), PROBLEM_CONTENT_TYPE);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut cfg = config();
    cfg.server.body_limit_bytes = 64;
    let server = RealmServer::build(cfg).unwrap();
    let big = "x".repeat(1024);

    let (status, _, _) = send(
        server.router(),
        login_request(&serde_json::json!({ "username": "alice", "password": big })),
    )
    .await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn realm_info_and_health() {
    let server = RealmServer::build(config()).unwrap();

    let (status, _, body) = send(
        server.router(),
        Request::builder().uri("/v1/realm").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let info: RealmInfoDto = serde_json::from_slice(&body).unwrap();
    assert_eq!(info.context_name, "AppContext");
    assert_eq!(info.display_name, "Application Realm");

    let (status, _, _) = send(
        server.router(),
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}
