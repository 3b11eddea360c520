// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Travel-metric fan-out across participants and venues.

use crate::models::{Participant, TravelMetric, VenueCandidate};
use crate::providers::Routing;
use futures_util::{future, stream, StreamExt};

/// Max venues with routing requests in flight at once. Each venue fans
/// out one request per participant, so total concurrency is this times
/// the participant count.
const MAX_CONCURRENT_VENUES: usize = 8;

const METERS_PER_MILE: f64 = 1609.34;

/// Compute travel metrics for every participant x venue pair.
///
/// Returns one Vec per venue, in venue order; each inner Vec has one
/// metric per participant, in participant order, regardless of request
/// completion order. A failed routing call becomes a metric with None
/// fields instead of failing the computation.
pub async fn fan_out<R: Routing>(
    routing: &R,
    participants: &[Participant],
    venues: &[VenueCandidate],
) -> Vec<Vec<TravelMetric>> {
    // Futures are built eagerly (they do nothing until polled) so the
    // stream holds no borrowing closure; a closure here trips rustc's
    // higher-ranked lifetime check when the handler future is proven Send.
    let requests: Vec<_> = venues
        .iter()
        .map(|venue| venue_metrics(routing, participants, venue))
        .collect();
    stream::iter(requests)
        .buffered(MAX_CONCURRENT_VENUES)
        .collect()
        .await
}

/// Metrics for one venue: one routing request per participant, all in
/// parallel. `join_all` keeps positional order.
async fn venue_metrics<R: Routing>(
    routing: &R,
    participants: &[Participant],
    venue: &VenueCandidate,
) -> Vec<TravelMetric> {
    let requests = participants.iter().map(|participant| async move {
        match routing.route(participant.location, venue.location).await {
            Ok(route) => TravelMetric {
                participant_id: participant.id.clone(),
                minutes: Some(route_minutes(route.duration_seconds)),
                distance_miles: Some(route_miles(route.distance_meters)),
            },
            Err(err) => {
                tracing::debug!(
                    participant_id = %participant.id,
                    venue_id = %venue.provider_id,
                    error = %err,
                    "No route for participant/venue pair"
                );
                TravelMetric {
                    participant_id: participant.id.clone(),
                    minutes: None,
                    distance_miles: None,
                }
            }
        }
    });

    future::join_all(requests).await
}

/// Route duration in whole minutes.
pub(crate) fn route_minutes(duration_seconds: f64) -> u32 {
    (duration_seconds / 60.0).round() as u32
}

/// Route distance in miles, one decimal place.
pub(crate) fn route_miles(distance_meters: f64) -> f64 {
    round_tenths(distance_meters / METERS_PER_MILE)
}

pub(crate) fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
