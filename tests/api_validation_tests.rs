// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API input validation tests.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_midpoint_requires_two_participants() {
    let (app, _state) = common::create_test_app();

    let request = post_json(
        "/api/calculate-midpoint",
        json!({
            "participants": [
                { "id": "a", "location": { "latitude": 40.0, "longitude": -75.0 } }
            ]
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_midpoint_rejects_out_of_range_latitude() {
    let (app, _state) = common::create_test_app();

    let request = post_json(
        "/api/calculate-midpoint",
        json!({
            "participants": [
                { "id": "a", "location": { "latitude": 91.0, "longitude": -75.0 } },
                { "id": "b", "location": { "latitude": 40.0, "longitude": -73.0 } }
            ]
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_midpoint_rejects_malformed_json() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/calculate-midpoint")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_midpoint_unreachable_provider_is_bad_gateway() {
    // Valid input passes validation, then venue search hits the closed
    // port configured by create_test_app.
    let (app, _state) = common::create_test_app();

    let request = post_json(
        "/api/calculate-midpoint",
        json!({
            "participants": [
                { "id": "a", "location": { "latitude": 40.0, "longitude": -75.0 } },
                { "id": "b", "location": { "latitude": 40.0, "longitude": -73.0 } }
            ]
        }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    assert_eq!(body["error"], "provider_unavailable");
}

#[tokio::test]
async fn test_geocode_requires_parameters() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/geocode")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_geocode_rejects_half_coordinates() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/geocode?latitude=40.0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_geocode_rejects_out_of_range_coordinates() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/geocode?latitude=40.0&longitude=-181.0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let (app, _state) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/sessions/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn test_unknown_category_filter_rejected() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(60).await.unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!("/api/sessions/{}/venues?category=museums", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_category_selection_rejected() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(60).await.unwrap();

    let request = post_json(
        &format!("/api/sessions/{}/category", session_id),
        json!({ "category": "museums" }),
    );

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_join_rejects_blank_display_name() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(60).await.unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(&format!("/api/sessions/{}/participants/p1", session_id))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "display_name": "",
                "location": { "latitude": 40.0, "longitude": -75.0 }
            })
            .to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
