// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Venue candidate and ranked venue models.

use crate::models::Location;
use serde::{Deserialize, Serialize};

/// Raw venue returned by the search provider, before any travel data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueCandidate {
    /// Provider's stable venue id
    pub provider_id: String,
    /// Display name
    pub name: String,
    /// Formatted address (empty when the provider omits it)
    pub address: String,
    /// Primary provider category (e.g. "coffee_shop")
    pub category: String,
    /// Venue coordinates
    pub location: Location,
}

/// Travel data for one participant to one venue.
///
/// `minutes` and `distance_miles` are None when the routing provider
/// could not produce a route for this pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelMetric {
    pub participant_id: String,
    pub minutes: Option<u32>,
    pub distance_miles: Option<f64>,
}

/// A venue with aggregated fairness metrics, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVenue {
    pub provider_id: String,
    pub name: String,
    pub address: String,
    pub category: String,
    pub location: Location,
    /// One entry per participant, in the input participant order
    pub travel_metrics: Vec<TravelMetric>,
    /// Worst travel time among participants with a route (minutes)
    pub max_minutes: u32,
    /// Best travel time among participants with a route (minutes)
    pub min_minutes: u32,
    /// Mean travel time over participants with a route, rounded (minutes)
    pub avg_minutes: u32,
    /// Fairness spread: `max_minutes - min_minutes`
    pub time_spread_minutes: u32,
    /// Straight-line distance from the computed midpoint (miles, 1 decimal)
    pub distance_from_midpoint_miles: f64,
}
