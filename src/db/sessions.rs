// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store with typed operations.
//!
//! Two backends behind one handle:
//! - Firebase Realtime Database over its REST interface (documents live
//!   under `sessions/{id}.json`, partial updates via PATCH)
//! - an in-memory map, used when no database URL is configured (local
//!   development and the test suite)

use crate::error::AppError;
use crate::models::{Location, RankedVenue, Session, SessionParticipant};
use crate::time_utils::now_millis;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Session database handle.
#[derive(Clone)]
pub struct SessionDb {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    /// Firebase Realtime Database over REST.
    Firebase {
        http: reqwest::Client,
        base_url: String,
    },
    /// Process-local store.
    Memory(Arc<DashMap<String, Session>>),
}

impl SessionDb {
    /// Connect to a Firebase Realtime Database by its root URL
    /// (e.g. `https://<project>.firebaseio.com`).
    pub fn firebase(database_url: impl Into<String>) -> Self {
        Self {
            backend: Backend::Firebase {
                http: reqwest::Client::new(),
                base_url: database_url.into(),
            },
        }
    }

    /// In-memory store for local development and tests.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    // ─── Session Operations ──────────────────────────────────────

    /// Create a fresh session, returning its id and the stored document.
    pub async fn create_session(&self, ttl_minutes: i64) -> Result<(String, Session), AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let session = Session::new(now_millis(), ttl_minutes);

        match &self.backend {
            Backend::Firebase { http, base_url } => {
                rtdb_put(http, base_url, &format!("sessions/{}", id), &session).await?;
            }
            Backend::Memory(map) => {
                map.insert(id.clone(), session.clone());
            }
        }

        tracing::info!(session_id = %id, expires_at = session.expires_at, "Session created");
        Ok((id, session))
    }

    /// Fetch a session document.
    ///
    /// Expired sessions are still returned so clients can render the
    /// expired state; callers that need a live session use
    /// [`require_live_session`](Self::require_live_session).
    pub async fn get_session(&self, id: &str) -> Result<Option<Session>, AppError> {
        match &self.backend {
            Backend::Firebase { http, base_url } => {
                rtdb_get(http, base_url, &format!("sessions/{}", id)).await
            }
            Backend::Memory(map) => Ok(map.get(id).map(|entry| entry.clone())),
        }
    }

    /// Fetch a session and fail if it is missing or expired.
    pub async fn require_live_session(&self, id: &str) -> Result<Session, AppError> {
        let session = self
            .get_session(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session {}", id)))?;

        if session.is_expired(now_millis()) {
            return Err(AppError::SessionExpired);
        }
        Ok(session)
    }

    /// Delete a session document.
    pub async fn delete_session(&self, id: &str) -> Result<(), AppError> {
        match &self.backend {
            Backend::Firebase { http, base_url } => {
                rtdb_delete(http, base_url, &format!("sessions/{}", id)).await?;
            }
            Backend::Memory(map) => {
                map.remove(id);
            }
        }
        Ok(())
    }

    // ─── Participant Operations ──────────────────────────────────

    /// Insert or update a participant, returning the updated session.
    ///
    /// Rejoining with the same id keeps the original join time so the
    /// computation order stays stable across location updates.
    pub async fn upsert_participant(
        &self,
        session_id: &str,
        participant_id: &str,
        display_name: String,
        location: Location,
        address: Option<String>,
    ) -> Result<Session, AppError> {
        let session = self.require_live_session(session_id).await?;

        let now = now_millis();
        let joined_at = session
            .participants
            .get(participant_id)
            .map(|p| p.joined_at)
            .unwrap_or(now);

        let record = SessionParticipant {
            display_name,
            location,
            address,
            joined_at,
            last_updated: now,
        };

        match &self.backend {
            Backend::Firebase { http, base_url } => {
                let safe_id = urlencoding::encode(participant_id);
                let path = format!("sessions/{}/participants/{}", session_id, safe_id);
                rtdb_put(http, base_url, &path, &record).await?;

                self.get_session(session_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Session {}", session_id)))
            }
            Backend::Memory(map) => {
                let mut entry = map
                    .get_mut(session_id)
                    .ok_or_else(|| AppError::NotFound(format!("Session {}", session_id)))?;
                entry
                    .participants
                    .insert(participant_id.to_string(), record);
                Ok(entry.clone())
            }
        }
    }

    // ─── Result Operations ───────────────────────────────────────

    /// Persist computation results, re-checking liveness first.
    ///
    /// Returns false (and writes nothing) when the session is gone or
    /// has expired since the computation started.
    pub async fn write_results(
        &self,
        session_id: &str,
        midpoint: Location,
        venues: &[RankedVenue],
    ) -> Result<bool, AppError> {
        let live = matches!(
            self.get_session(session_id).await?,
            Some(session) if !session.is_expired(now_millis())
        );
        if !live {
            tracing::info!(
                session_id = %session_id,
                "Skipping result write for expired or deleted session"
            );
            return Ok(false);
        }

        match &self.backend {
            Backend::Firebase { http, base_url } => {
                let patch = json!({ "midpoint": midpoint, "venues": venues });
                rtdb_patch(http, base_url, &format!("sessions/{}", session_id), &patch).await?;
            }
            Backend::Memory(map) => match map.get_mut(session_id) {
                Some(mut entry) => {
                    entry.midpoint = Some(midpoint);
                    entry.venues = venues.to_vec();
                }
                // Deleted between the check and the write; same no-op
                None => return Ok(false),
            },
        }

        tracing::info!(
            session_id = %session_id,
            venues = venues.len(),
            "Results written to session"
        );
        Ok(true)
    }

    /// Record the venue the group settled on. The venue must be one of
    /// the session's ranked venues.
    pub async fn select_venue(
        &self,
        session_id: &str,
        provider_id: &str,
    ) -> Result<RankedVenue, AppError> {
        let session = self.require_live_session(session_id).await?;

        let venue = session
            .venues
            .iter()
            .find(|v| v.provider_id == provider_id)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Venue {} in session {}", provider_id, session_id))
            })?;

        match &self.backend {
            Backend::Firebase { http, base_url } => {
                let path = format!("sessions/{}/selected_venue", session_id);
                rtdb_put(http, base_url, &path, &venue).await?;
            }
            Backend::Memory(map) => {
                if let Some(mut entry) = map.get_mut(session_id) {
                    entry.selected_venue = Some(venue.clone());
                }
            }
        }

        Ok(venue)
    }

    /// Store the shared venue-list filter.
    pub async fn set_category(&self, session_id: &str, category: &str) -> Result<(), AppError> {
        self.require_live_session(session_id).await?;

        match &self.backend {
            Backend::Firebase { http, base_url } => {
                let path = format!("sessions/{}/selected_category", session_id);
                rtdb_put(http, base_url, &path, &category).await?;
            }
            Backend::Memory(map) => {
                if let Some(mut entry) = map.get_mut(session_id) {
                    entry.selected_category = Some(category.to_string());
                }
            }
        }

        Ok(())
    }
}

// ─── Firebase REST helpers ───────────────────────────────────────

async fn rtdb_get<T: DeserializeOwned>(
    http: &reqwest::Client,
    base_url: &str,
    path: &str,
) -> Result<Option<T>, AppError> {
    let response = http
        .get(format!("{}/{}.json", base_url, path))
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(|e| AppError::Database(format!("Firebase request failed: {}", e)))?;

    let response = check_status(response).await?;

    // Missing documents come back as a literal JSON null
    response
        .json::<Option<T>>()
        .await
        .map_err(|e| AppError::Database(format!("Firebase JSON parse error: {}", e)))
}

async fn rtdb_put<T: Serialize + ?Sized>(
    http: &reqwest::Client,
    base_url: &str,
    path: &str,
    value: &T,
) -> Result<(), AppError> {
    let response = http
        .put(format!("{}/{}.json", base_url, path))
        .timeout(REQUEST_TIMEOUT)
        .json(value)
        .send()
        .await
        .map_err(|e| AppError::Database(format!("Firebase request failed: {}", e)))?;

    check_status(response).await?;
    Ok(())
}

async fn rtdb_patch<T: Serialize>(
    http: &reqwest::Client,
    base_url: &str,
    path: &str,
    value: &T,
) -> Result<(), AppError> {
    let response = http
        .patch(format!("{}/{}.json", base_url, path))
        .timeout(REQUEST_TIMEOUT)
        .json(value)
        .send()
        .await
        .map_err(|e| AppError::Database(format!("Firebase request failed: {}", e)))?;

    check_status(response).await?;
    Ok(())
}

async fn rtdb_delete(
    http: &reqwest::Client,
    base_url: &str,
    path: &str,
) -> Result<(), AppError> {
    let response = http
        .delete(format!("{}/{}.json", base_url, path))
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await
        .map_err(|e| AppError::Database(format!("Firebase request failed: {}", e)))?;

    check_status(response).await?;
    Ok(())
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(AppError::Database(format!(
        "Firebase HTTP {}: {}",
        status, body
    )))
}
