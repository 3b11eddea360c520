// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! External provider interfaces.
//!
//! The engine reaches venue search and routing through these traits so
//! tests can substitute deterministic providers. `MapboxClient`
//! implements both against the Mapbox APIs and also serves geocoding.

pub mod mapbox;

pub use mapbox::MapboxClient;

use crate::models::{Location, VenueCandidate};
use serde::Serialize;
use std::future::Future;

/// Provider call failures.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no route between points")]
    NoRoute,

    #[error("unexpected response: {0}")]
    Parse(String),
}

/// A driving route between two points.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub duration_seconds: f64,
    pub distance_meters: f64,
}

/// A geocoding match.
#[derive(Debug, Clone, Serialize)]
pub struct Place {
    pub place_name: String,
    pub location: Location,
}

/// Venue search near a coordinate.
pub trait VenueSearch: Send + Sync {
    /// Find up to `limit` venues in the given categories near `center`.
    /// Zero matches is an empty Vec, not an error.
    fn search(
        &self,
        center: Location,
        categories: &[String],
        limit: u32,
    ) -> impl Future<Output = Result<Vec<VenueCandidate>, ProviderError>> + Send;
}

/// Point-to-point driving routes.
pub trait Routing: Send + Sync {
    /// Compute a route. An unroutable pair is an error; the caller
    /// decides whether that is fatal.
    fn route(
        &self,
        from: Location,
        to: Location,
    ) -> impl Future<Output = Result<Route, ProviderError>> + Send;
}
