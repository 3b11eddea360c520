// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fairness-ranking midpoint engine.
//!
//! Handles the core workflow:
//! 1. Validate participants and compute the geographic midpoint
//! 2. Query venue candidates near the midpoint
//! 3. Fan out routing requests for every participant x venue pair
//! 4. Aggregate travel metrics and rank venues by fairness

pub mod metrics;
pub mod midpoint;
pub mod ranking;

use crate::models::{Location, Participant, RankedVenue};
use crate::providers::{Routing, VenueSearch};
use serde::Serialize;

/// Engine errors.
///
/// Per-participant routing failures are absorbed as data (a
/// `TravelMetric` with None fields) and never surface here; only the
/// two fatal conditions do.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("venue search failed: {0}")]
    ProviderUnavailable(String),
}

/// Tuning knobs for a ranking computation.
#[derive(Debug, Clone)]
pub struct RankingOptions {
    /// Provider categories requested from venue search
    pub categories: Vec<String>,
    /// Max raw candidates to retrieve
    pub search_limit: u32,
    /// Max ranked venues to return
    pub result_cap: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            categories: ["cafe", "restaurant", "bar", "gas_station"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            search_limit: 20,
            result_cap: 15,
        }
    }
}

/// Result of a ranking computation.
#[derive(Debug, Clone, Serialize)]
pub struct RankingOutcome {
    pub midpoint: Location,
    pub venues: Vec<RankedVenue>,
}

/// The fairness-ranking engine, generic over its two providers.
///
/// The engine is a pure function of its inputs plus provider responses;
/// it holds no mutable state and writes nothing. Persistence is the
/// caller's concern.
#[derive(Clone)]
pub struct RankingEngine<V, R> {
    venue_search: V,
    routing: R,
    options: RankingOptions,
}

impl<V: VenueSearch, R: Routing> RankingEngine<V, R> {
    pub fn new(venue_search: V, routing: R, options: RankingOptions) -> Self {
        Self {
            venue_search,
            routing,
            options,
        }
    }

    /// Compute the ranked venue list for a set of participants.
    ///
    /// The order of `participants` is authoritative: each ranked venue's
    /// `travel_metrics[i]` belongs to `participants[i]`.
    pub async fn compute_ranking(
        &self,
        participants: &[Participant],
    ) -> Result<RankingOutcome, EngineError> {
        if participants.len() < 2 {
            return Err(EngineError::InvalidInput(
                "at least two participants are required".to_string(),
            ));
        }

        let locations: Vec<Location> = participants.iter().map(|p| p.location).collect();
        let midpoint = midpoint::compute(&locations)?;

        let candidates = self
            .venue_search
            .search(midpoint, &self.options.categories, self.options.search_limit)
            .await
            .map_err(|e| EngineError::ProviderUnavailable(e.to_string()))?;

        tracing::debug!(
            candidates = candidates.len(),
            latitude = midpoint.latitude,
            longitude = midpoint.longitude,
            "Venue candidates near midpoint"
        );

        if candidates.is_empty() {
            return Ok(RankingOutcome {
                midpoint,
                venues: Vec::new(),
            });
        }

        let metrics = metrics::fan_out(&self.routing, participants, &candidates).await;
        let venues = ranking::rank(candidates, metrics, midpoint, self.options.result_cap);

        tracing::info!(
            participants = participants.len(),
            venues = venues.len(),
            "Ranking computed"
        );

        Ok(RankingOutcome { midpoint, venues })
    }
}
