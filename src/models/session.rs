// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared session document stored in the realtime database.

use crate::models::{Location, Participant, RankedVenue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A shared meetup session.
///
/// Stored at `sessions/{id}`. Every field except the timestamps may be
/// absent in the store (participants join and results arrive later), so
/// they all default on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Creation time (unix millis)
    pub created_at: i64,
    /// Expiry time (unix millis); the session is read-only afterwards
    pub expires_at: i64,
    /// Participants keyed by their opaque id
    #[serde(default)]
    pub participants: BTreeMap<String, SessionParticipant>,
    /// Midpoint from the latest computation
    #[serde(default)]
    pub midpoint: Option<Location>,
    /// Ranked venues from the latest computation
    #[serde(default)]
    pub venues: Vec<RankedVenue>,
    /// Venue the group settled on
    #[serde(default)]
    pub selected_venue: Option<RankedVenue>,
    /// Shared venue-list filter ("all", "dining", "bars", "gas")
    #[serde(default)]
    pub selected_category: Option<String>,
}

/// A participant as stored inside the session document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionParticipant {
    pub display_name: String,
    pub location: Location,
    /// Human-readable address from geocoding, if known
    #[serde(default)]
    pub address: Option<String>,
    /// First join time (unix millis); stable across location updates
    pub joined_at: i64,
    /// Last location/name update (unix millis)
    pub last_updated: i64,
}

impl Session {
    /// Create an empty session starting now.
    pub fn new(now_millis: i64, ttl_minutes: i64) -> Self {
        Self {
            created_at: now_millis,
            expires_at: now_millis + ttl_minutes * 60 * 1000,
            participants: BTreeMap::new(),
            midpoint: None,
            venues: Vec::new(),
            selected_venue: None,
            selected_category: None,
        }
    }

    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis >= self.expires_at
    }

    /// Participants in deterministic computation order: by join time,
    /// then by id for ties.
    pub fn ordered_participants(&self) -> Vec<Participant> {
        let mut entries: Vec<(&String, &SessionParticipant)> = self.participants.iter().collect();
        entries.sort_by(|(a_id, a), (b_id, b)| {
            a.joined_at.cmp(&b.joined_at).then_with(|| a_id.cmp(b_id))
        });

        entries
            .into_iter()
            .map(|(id, p)| Participant::new(id.clone(), p.display_name.clone(), p.location))
            .collect()
    }
}
