//! Query credentials: `?access_token=<token>`.

use http::StatusCode;
use jwtgate::JwtConfig;
use serde_json::json;
use tower::ServiceExt;

use crate::common::{bearer_request, plain_request, read_response, sign, TestApp, KEY};

fn query_app() -> TestApp {
    TestApp::with_config(JwtConfig {
        token_lookup: "query:access_token".to_string(),
        ..JwtConfig::with_key(KEY)
    })
}

#[tokio::test]
async fn test_valid_query_token_reaches_handler() {
    let app = query_app();
    let token = sign(json!({ "sub": "alice" }));

    let resp = app
        .router
        .clone()
        .oneshot(plain_request(&format!("/?access_token={token}")))
        .await
        .unwrap();
    let (status, body) = read_response(resp).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sub"], "alice");
    assert_eq!(app.calls(), 1);
}

#[tokio::test]
async fn test_missing_query_param_is_bad_request() {
    let app = query_app();

    let resp = app.router.clone().oneshot(plain_request("/")).await.unwrap();
    let (status, body) = read_response(resp).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "empty credential in query parameter"
    );
    assert_eq!(app.calls(), 0);
}

#[tokio::test]
async fn test_empty_query_param_is_bad_request() {
    let app = query_app();

    let resp = app
        .router
        .clone()
        .oneshot(plain_request("/?access_token="))
        .await
        .unwrap();
    let (status, body) = read_response(resp).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "empty credential in query parameter"
    );
    assert_eq!(app.calls(), 0);
}

#[tokio::test]
async fn test_query_lookup_ignores_authorization_header() {
    let app = query_app();
    let token = sign(json!({ "sub": "alice" }));

    let resp = app
        .router
        .clone()
        .oneshot(bearer_request(&format!("Bearer {token}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.calls(), 0);
}

#[tokio::test]
async fn test_invalid_query_token_is_unauthorized() {
    let app = query_app();

    let resp = app
        .router
        .clone()
        .oneshot(plain_request("/?access_token=not.a.jwt"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(app.calls(), 0);
}
