// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fairness aggregation and venue ordering.

use crate::engine::metrics::round_tenths;
use crate::models::{Location, RankedVenue, TravelMetric, VenueCandidate};

/// Flat-plane degrees-to-miles factor for midpoint distance display.
const MILES_PER_DEGREE: f64 = 69.0;

/// Aggregate per-venue metrics and produce the final fairness ordering.
///
/// Venues no participant can reach are dropped. The rest sort by
/// ascending time spread, then ascending worst-case time; the sort is
/// stable, so ties keep their search order. At most `cap` venues are
/// returned.
///
/// Spread beats worst case on purpose: a venue 20 and 22 minutes away
/// is fairer than one 5 and 40 minutes away.
pub fn rank(
    candidates: Vec<VenueCandidate>,
    metrics: Vec<Vec<TravelMetric>>,
    midpoint: Location,
    cap: usize,
) -> Vec<RankedVenue> {
    let mut ranked: Vec<RankedVenue> = candidates
        .into_iter()
        .zip(metrics)
        .filter_map(|(venue, travel_metrics)| aggregate(venue, travel_metrics, midpoint))
        .collect();

    ranked.sort_by(|a, b| {
        a.time_spread_minutes
            .cmp(&b.time_spread_minutes)
            .then_with(|| a.max_minutes.cmp(&b.max_minutes))
    });
    ranked.truncate(cap);
    ranked
}

/// Build a ranked venue, or None when no participant has a route to it.
///
/// A venue with a single usable metric still ranks (spread 0); one
/// participant reaching it is real information, even when the other
/// routing calls failed.
fn aggregate(
    venue: VenueCandidate,
    travel_metrics: Vec<TravelMetric>,
    midpoint: Location,
) -> Option<RankedVenue> {
    let times: Vec<u32> = travel_metrics.iter().filter_map(|m| m.minutes).collect();

    let (min, max) = match (times.iter().copied().min(), times.iter().copied().max()) {
        (Some(min), Some(max)) => (min, max),
        _ => {
            tracing::debug!(
                venue_id = %venue.provider_id,
                "Venue unreachable for every participant, dropping"
            );
            return None;
        }
    };

    let avg = (times.iter().sum::<u32>() as f64 / times.len() as f64).round() as u32;
    let distance_from_midpoint_miles = distance_from_midpoint(venue.location, midpoint);

    Some(RankedVenue {
        provider_id: venue.provider_id,
        name: venue.name,
        address: venue.address,
        category: venue.category,
        location: venue.location,
        travel_metrics,
        max_minutes: max,
        min_minutes: min,
        avg_minutes: avg,
        time_spread_minutes: max - min,
        distance_from_midpoint_miles,
    })
}

/// Straight-line midpoint distance in miles (degrees x 69, 1 decimal).
fn distance_from_midpoint(venue: Location, midpoint: Location) -> f64 {
    let dlat = venue.latitude - midpoint.latitude;
    let dlng = venue.longitude - midpoint.longitude;
    round_tenths((dlat * dlat + dlng * dlng).sqrt() * MILES_PER_DEGREE)
}
