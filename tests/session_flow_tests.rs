// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle tests: create, join, expiry, venue selection and
//! result persistence, against the in-memory store.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use meetpoint::models::{Location, RankedVenue};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn join_body(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "display_name": name,
        "location": { "latitude": latitude, "longitude": longitude }
    })
}

fn ranked(provider_id: &str, category: &str) -> RankedVenue {
    RankedVenue {
        provider_id: provider_id.to_string(),
        name: provider_id.to_string(),
        address: "1 Main St".to_string(),
        category: category.to_string(),
        location: Location::new(40.0, -74.0),
        travel_metrics: vec![],
        max_minutes: 12,
        min_minutes: 10,
        avg_minutes: 11,
        time_spread_minutes: 2,
        distance_from_midpoint_miles: 0.4,
    }
}

#[tokio::test]
async fn test_create_and_fetch_session() {
    let (app, _state) = common::create_test_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/sessions", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = body_json(response).await;
    let session_id = created["session_id"].as_str().unwrap().to_string();
    assert!(created["expires_at"].as_i64().unwrap() > created["created_at"].as_i64().unwrap());

    let response = app
        .oneshot(get(&format!("/api/sessions/{}", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let session = body_json(response).await;
    assert_eq!(session["participants"], json!({}));
    assert_eq!(session["midpoint"], Value::Null);
    assert_eq!(session["venues"], json!([]));
}

#[tokio::test]
async fn test_join_and_rejoin_preserves_join_time() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(60).await.unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/sessions/{}/participants/p1", session_id),
            join_body("Ada", 40.0, -75.0),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;
    let first_joined_at = session["participants"]["p1"]["joined_at"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/sessions/{}/participants/p2", session_id),
            join_body("Grace", 40.0, -73.0),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;
    assert_eq!(session["participants"].as_object().unwrap().len(), 2);

    // p1 moves; the join time must not change
    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/sessions/{}/participants/p1", session_id),
            join_body("Ada", 41.0, -75.5),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let session = body_json(response).await;

    let p1 = &session["participants"]["p1"];
    assert_eq!(p1["joined_at"].as_i64().unwrap(), first_joined_at);
    assert_eq!(p1["location"]["latitude"].as_f64().unwrap(), 41.0);
    assert!(p1["last_updated"].as_i64().unwrap() >= first_joined_at);
}

#[tokio::test]
async fn test_join_expired_session_is_gone() {
    let (app, state) = common::create_test_app();
    // TTL 0: expired the moment it is created
    let (session_id, _) = state.db.create_session(0).await.unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/sessions/{}/participants/p1", session_id),
            join_body("Ada", 40.0, -75.0),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::GONE);
    let body = body_json(response).await;
    assert_eq!(body["error"], "session_expired");
}

#[tokio::test]
async fn test_expired_session_still_readable() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(0).await.unwrap();

    let response = app
        .oneshot(get(&format!("/api/sessions/{}", session_id)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_write_results_skips_dead_sessions() {
    let (_, state) = common::create_test_app();
    let midpoint = Location::new(40.0, -74.0);
    let venues = vec![ranked("v1", "coffee_shop")];

    // Live session: the write lands
    let (live_id, _) = state.db.create_session(60).await.unwrap();
    assert!(state.db.write_results(&live_id, midpoint, &venues).await.unwrap());
    let session = state.db.get_session(&live_id).await.unwrap().unwrap();
    assert_eq!(session.midpoint, Some(midpoint));
    assert_eq!(session.venues.len(), 1);

    // Expired session: no-op
    let (expired_id, _) = state.db.create_session(0).await.unwrap();
    assert!(!state.db.write_results(&expired_id, midpoint, &venues).await.unwrap());
    let session = state.db.get_session(&expired_id).await.unwrap().unwrap();
    assert_eq!(session.midpoint, None);
    assert!(session.venues.is_empty());

    // Deleted session: no-op, not an error
    let (deleted_id, _) = state.db.create_session(60).await.unwrap();
    state.db.delete_session(&deleted_id).await.unwrap();
    assert!(!state.db.write_results(&deleted_id, midpoint, &venues).await.unwrap());
}

#[tokio::test]
async fn test_venue_selection_flow() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(60).await.unwrap();
    let venues = vec![ranked("v1", "coffee_shop"), ranked("v2", "gas_station")];
    state
        .db
        .write_results(&session_id, Location::new(40.0, -74.0), &venues)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{}/venue", session_id),
            json!({ "provider_id": "v2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["venue"]["provider_id"], "v2");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/sessions/{}", session_id)))
        .await
        .unwrap();
    let session = body_json(response).await;
    assert_eq!(session["selected_venue"]["provider_id"], "v2");

    // A venue the session never ranked cannot be selected
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{}/venue", session_id),
            json!({ "provider_id": "v99" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_selection_flow() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(60).await.unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{}/category", session_id),
            json!({ "category": "bars" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/sessions/{}", session_id)))
        .await
        .unwrap();
    let session = body_json(response).await;
    assert_eq!(session["selected_category"], "bars");

    // "all" clears the filter back to everything
    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/api/sessions/{}/category", session_id),
            json!({ "category": "all" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_compute_from_session_participants() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(60).await.unwrap();
    for (pid, name, longitude) in [("p1", "Ada", -75.0), ("p2", "Grace", -73.0)] {
        state
            .db
            .upsert_participant(&session_id, pid, name.to_string(), Location::new(40.0, longitude), None)
            .await
            .unwrap();
    }

    // Participants omitted: derived from the session. Validation and
    // the midpoint both succeed; the venue search then hits the closed
    // port, which proves the request reached the engine.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/calculate-midpoint",
            json!({ "session_id": session_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // A lone participant in the session is not enough
    let (small_id, _) = state.db.create_session(60).await.unwrap();
    state
        .db
        .upsert_participant(&small_id, "p1", "Ada".to_string(), Location::new(40.0, -75.0), None)
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/calculate-midpoint",
            json!({ "session_id": small_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Neither participants nor a session to take them from
    let response = app
        .oneshot(json_request("POST", "/api/calculate-midpoint", json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_venue_list_filtering() {
    let (app, state) = common::create_test_app();
    let (session_id, _) = state.db.create_session(60).await.unwrap();
    let venues = vec![
        ranked("v1", "coffee_shop"),
        ranked("v2", "gas_station"),
        ranked("v3", "wine_bar"),
    ];
    state
        .db
        .write_results(&session_id, Location::new(40.0, -74.0), &venues)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/sessions/{}/venues", session_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["venues"].as_array().unwrap().len(), 3);

    let response = app
        .clone()
        .oneshot(get(&format!(
            "/api/sessions/{}/venues?category=gas",
            session_id
        )))
        .await
        .unwrap();
    let body = body_json(response).await;
    let gas = body["venues"].as_array().unwrap();
    assert_eq!(gas.len(), 1);
    assert_eq!(gas[0]["provider_id"], "v2");

    let response = app
        .oneshot(get(&format!(
            "/api/sessions/{}/venues?category=all",
            session_id
        )))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["venues"].as_array().unwrap().len(), 3);
}
