//! Integration tests for envelope rendering through the full router.
//!
//! Each sample route produces one kind of handler result; these tests pin
//! the status and the exact body bytes it renders to.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::{body_json, get, post_json, post_raw, status_and_body};
use serde_json::json;

use responder_api::responder::{RequestContext, Respond};
use responder_core::Outcome;

// ---------------------------------------------------------------------------
// Test: plain values render as 200 with `data`
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_renders_as_data() {
    let response = get(common::build_test_app(), "/api/v1/samples/data").await;
    let (status, body) = status_and_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"data":{"n":1,"s":"s"}}"#);
}

#[tokio::test]
async fn list_renders_as_data_array() {
    let response = get(common::build_test_app(), "/api/v1/samples/list").await;
    let (status, body) = status_and_body(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"data":[{"n":1,"s":"s"},{"n":2,"s":"str"}]}"#);
}

// ---------------------------------------------------------------------------
// Test: absent result renders as 204 with no body
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_renders_204_without_body() {
    let response = get(common::build_test_app(), "/api/v1/samples/empty").await;
    assert!(response.headers().get("content-type").is_none());

    let (status, body) = status_and_body(response).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

// ---------------------------------------------------------------------------
// Test: errors render as 500 with description-only entries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_error_renders_500() {
    let response = get(common::build_test_app(), "/api/v1/samples/error").await;
    let (status, body) = status_and_body(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, r#"{"errors":[{"description":"some error"}]}"#);
}

#[tokio::test]
async fn error_list_renders_500_in_order() {
    let response = get(common::build_test_app(), "/api/v1/samples/errors").await;
    let (status, body) = status_and_body(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        r#"{"errors":[{"description":"some error"},{"description":"second error"}]}"#
    );
}

#[tokio::test]
async fn aggregate_renders_one_entry_per_error() {
    let response = get(common::build_test_app(), "/api/v1/samples/aggregate").await;
    let (status, body) = status_and_body(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        r#"{"errors":[{"description":"disk full"},{"description":"quota exceeded"}]}"#
    );
}

// ---------------------------------------------------------------------------
// Test: pre-built envelope keeps its own status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn envelope_renders_with_its_status() {
    let response = get(common::build_test_app(), "/api/v1/samples/envelope").await;
    let (status, body) = status_and_body(response).await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body, r#"{"data":{"one":1,"two":"second"}}"#);
}

// ---------------------------------------------------------------------------
// Test: lookups map found / missing / malformed to data / 204 / 500
// ---------------------------------------------------------------------------

#[tokio::test]
async fn record_lookup_covers_every_branch() {
    let found = get(common::build_test_app(), "/api/v1/samples/records/2").await;
    let (status, body) = status_and_body(found).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"data":{"n":2,"s":"str"}}"#);

    let missing = get(common::build_test_app(), "/api/v1/samples/records/9").await;
    assert_eq!(missing.status(), StatusCode::NO_CONTENT);

    let malformed = get(common::build_test_app(), "/api/v1/samples/records/abc").await;
    assert_eq!(malformed.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(malformed).await;
    assert_eq!(json["errors"][0]["description"], "invalid digit found in string");
    assert!(json.get("data").is_none());
}

// ---------------------------------------------------------------------------
// Test: validation failures carry codes and details
// ---------------------------------------------------------------------------

#[tokio::test]
async fn signup_reports_every_invalid_field() {
    let response = post_json(
        common::build_test_app(),
        "/api/v1/samples/signup",
        json!({ "name": " ", "email": "nope" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await,
        json!({
            "errors": [
                { "description": "name is required", "code": 1, "details": "name" },
                { "description": "email is not an email address", "code": 2, "details": "email" }
            ]
        })
    );
}

#[tokio::test]
async fn signup_accepts_valid_input() {
    let response = post_json(
        common::build_test_app(),
        "/api/v1/samples/signup",
        json!({ "name": "Ada", "email": "ada@example.com" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({ "data": { "name": "Ada", "email": "ada@example.com" } })
    );
}

#[tokio::test]
async fn signup_with_malformed_body_renders_error_envelope() {
    let response = post_raw(
        common::build_test_app(),
        "/api/v1/samples/signup",
        "application/json",
        "{not json",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    let json = body_json(response).await;
    assert!(json.get("data").is_none());
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["description"]
        .as_str()
        .unwrap()
        .starts_with("Failed to parse the request body as JSON"));
}

#[tokio::test]
async fn signup_without_json_content_type_renders_error_envelope() {
    let response = post_raw(
        common::build_test_app(),
        "/api/v1/samples/signup",
        "text/plain",
        r#"{"name":"Ada","email":"ada@example.com"}"#,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = body_json(response).await;
    assert!(json["errors"][0]["description"].is_string());
}

// ---------------------------------------------------------------------------
// Test: an aggregate returned through the result path is expanded
// ---------------------------------------------------------------------------

#[tokio::test]
async fn quota_reports_each_failed_check() {
    let (status, body) =
        status_and_body(get(common::build_test_app(), "/api/v1/samples/quota/2097153").await)
            .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        r#"{"errors":[{"description":"2097153 bytes exceeds the 1048576 byte quota"},{"description":"2097153 bytes is not a multiple of 512"}]}"#
    );
}

#[tokio::test]
async fn quota_accepts_aligned_request() {
    let (status, body) =
        status_and_body(get(common::build_test_app(), "/api/v1/samples/quota/4096").await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"data":{"bytes":4096}}"#);
}

// ---------------------------------------------------------------------------
// Test: repeated calls produce byte-identical output
// ---------------------------------------------------------------------------

#[tokio::test]
async fn repeated_requests_render_identically() {
    let first = status_and_body(get(common::build_test_app(), "/api/v1/samples/list").await).await;
    let second = status_and_body(get(common::build_test_app(), "/api/v1/samples/list").await).await;

    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Test: the router renders through whatever strategy it was built with
// ---------------------------------------------------------------------------

/// Strategy that reports the status it would have used in a header and
/// always answers 200 with the bare data.
struct BareResponder;

impl Respond for BareResponder {
    fn respond(&self, ctx: &RequestContext, outcome: Outcome) -> Response {
        let status = outcome.status().to_string();
        let data = outcome
            .into_envelope()
            .and_then(|env| env.data)
            .unwrap_or(serde_json::Value::Null);
        (
            [
                ("x-envelope-status", status),
                ("x-rendered-path", ctx.uri.path().to_string()),
            ],
            axum::Json(data),
        )
            .into_response()
    }
}

#[tokio::test]
async fn injected_responder_replaces_json_envelope() {
    let app = common::build_test_app_with(Arc::new(BareResponder));

    let response = get(app.clone(), "/api/v1/samples/data").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-envelope-status").unwrap(), "200");
    assert_eq!(
        response.headers().get("x-rendered-path").unwrap(),
        "/api/v1/samples/data"
    );
    assert_eq!(body_json(response).await, json!({ "n": 1, "s": "s" }));

    let response = get(app, "/api/v1/samples/error").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-envelope-status").unwrap(), "500");
}
