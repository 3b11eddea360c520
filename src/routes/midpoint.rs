// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The computation route: runs the fairness engine over a set of
//! participant locations and optionally persists the results into a
//! session.

use crate::engine::RankingOutcome;
use crate::error::{AppError, Result};
use crate::models::{Location, Participant};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/calculate-midpoint", post(calculate_midpoint))
}

#[derive(Deserialize, Validate)]
pub struct CalculateMidpointRequest {
    /// Session to persist results into, if any.
    pub session_id: Option<String>,
    /// Omitted or empty: derived from the session's participants in
    /// join order (`session_id` is then required).
    #[serde(default)]
    #[validate(nested)]
    pub participants: Vec<ParticipantInput>,
}

#[derive(Deserialize, Validate)]
pub struct ParticipantInput {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[validate(nested)]
    pub location: Location,
}

/// Compute the midpoint and fairness-ranked venues for a group.
///
/// When `session_id` is given the results are also written to that
/// session, unless it expired or was deleted while we were computing;
/// the response carries the results either way.
async fn calculate_midpoint(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CalculateMidpointRequest>,
) -> Result<Json<RankingOutcome>> {
    payload
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    tracing::debug!(
        participants = payload.participants.len(),
        session_id = ?payload.session_id,
        "Computing midpoint ranking"
    );

    let participants: Vec<Participant> = if payload.participants.is_empty() {
        let session_id = payload.session_id.as_deref().ok_or_else(|| {
            AppError::InvalidInput("Provide participants or a session_id".to_string())
        })?;
        state
            .db
            .require_live_session(session_id)
            .await?
            .ordered_participants()
    } else {
        payload
            .participants
            .iter()
            .map(|p| {
                Participant::new(
                    p.id.clone(),
                    p.display_name.clone().unwrap_or_default(),
                    p.location,
                )
            })
            .collect()
    };

    let outcome = state.engine.compute_ranking(&participants).await?;

    if let Some(session_id) = payload.session_id.as_deref() {
        state
            .db
            .write_results(session_id, outcome.midpoint, &outcome.venues)
            .await?;
    }

    Ok(Json(outcome))
}
