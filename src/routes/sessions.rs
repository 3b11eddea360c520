// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session lifecycle routes: create, join, read, venue and filter selection.

use crate::error::{AppError, Result};
use crate::models::{CategoryGroup, Location, RankedVenue, Session};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session))
        .route(
            "/api/sessions/{id}/participants/{participant_id}",
            put(join_session),
        )
        .route("/api/sessions/{id}/venue", post(select_venue))
        .route("/api/sessions/{id}/category", post(set_category))
        .route("/api/sessions/{id}/venues", get(list_venues))
}

// ─── Session Lifecycle ───────────────────────────────────────────

#[derive(Serialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
    pub created_at: i64,
    pub expires_at: i64,
}

/// Create a new empty session.
async fn create_session(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CreateSessionResponse>> {
    let (session_id, session) = state
        .db
        .create_session(state.config.session_ttl_minutes)
        .await?;

    Ok(Json(CreateSessionResponse {
        session_id,
        created_at: session.created_at,
        expires_at: session.expires_at,
    }))
}

/// Get a session document.
///
/// Expired sessions are returned as-is so clients can render the
/// expired state; only joins and result writes are rejected.
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Session>> {
    let session = state
        .db
        .get_session(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {}", id)))?;

    Ok(Json(session))
}

// ─── Participants ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct JoinSessionRequest {
    #[validate(length(min = 1, max = 80))]
    pub display_name: String,
    #[validate(nested)]
    pub location: Location,
    /// Human-readable address label, if the client resolved one.
    pub address: Option<String>,
}

/// Join a session or update an existing participant's location.
async fn join_session(
    State(state): State<Arc<AppState>>,
    Path((id, participant_id)): Path<(String, String)>,
    Json(payload): Json<JoinSessionRequest>,
) -> Result<Json<Session>> {
    payload
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    tracing::info!(
        session_id = %id,
        participant_id = %participant_id,
        "Participant joining session"
    );

    let session = state
        .db
        .upsert_participant(
            &id,
            &participant_id,
            payload.display_name,
            payload.location,
            payload.address,
        )
        .await?;

    Ok(Json(session))
}

// ─── Venue & Filter Selection ────────────────────────────────────

#[derive(Deserialize)]
pub struct SelectVenueRequest {
    pub provider_id: String,
}

#[derive(Serialize)]
pub struct SelectVenueResponse {
    pub success: bool,
    pub venue: RankedVenue,
}

/// Mark one of the session's ranked venues as the agreed meeting spot.
async fn select_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<SelectVenueRequest>,
) -> Result<Json<SelectVenueResponse>> {
    let venue = state.db.select_venue(&id, &payload.provider_id).await?;

    tracing::info!(session_id = %id, venue = %venue.name, "Venue selected");

    Ok(Json(SelectVenueResponse {
        success: true,
        venue,
    }))
}

#[derive(Deserialize)]
pub struct SetCategoryRequest {
    pub category: String,
}

#[derive(Serialize)]
pub struct SetCategoryResponse {
    pub success: bool,
}

/// Set the shared venue-list filter for all participants.
async fn set_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<SetCategoryRequest>,
) -> Result<Json<SetCategoryResponse>> {
    if payload.category != "all" && CategoryGroup::parse(&payload.category).is_none() {
        return Err(AppError::InvalidInput(format!(
            "Unknown category '{}'",
            payload.category
        )));
    }

    state.db.set_category(&id, &payload.category).await?;

    Ok(Json(SetCategoryResponse { success: true }))
}

// ─── Venue Listing ───────────────────────────────────────────────

#[derive(Deserialize)]
struct VenueListQuery {
    /// Filter group (`all`, `dining`, `bars`, `gas`, `other`).
    category: Option<String>,
}

#[derive(Serialize)]
pub struct VenueListResponse {
    pub venues: Vec<RankedVenue>,
}

/// List the session's ranked venues, optionally filtered by category group.
async fn list_venues(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(params): Query<VenueListQuery>,
) -> Result<Json<VenueListResponse>> {
    let session = state
        .db
        .get_session(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Session {}", id)))?;

    let venues = filter_venues(session.venues, params.category.as_deref())?;

    Ok(Json(VenueListResponse { venues }))
}

/// Keep the venues matching the requested filter group. `None` and
/// `"all"` pass everything through; ranking order is preserved.
fn filter_venues(
    venues: Vec<RankedVenue>,
    category: Option<&str>,
) -> Result<Vec<RankedVenue>> {
    let raw = match category {
        None | Some("all") => return Ok(venues),
        Some(raw) => raw,
    };

    let group = CategoryGroup::parse(raw)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown category '{}'", raw)))?;

    Ok(venues
        .into_iter()
        .filter(|v| CategoryGroup::classify(&v.category) == group)
        .collect())
}
