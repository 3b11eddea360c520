// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geocoding proxy. Keeps the provider token server-side; clients send
//! either a free-text `query` (forward) or `latitude`/`longitude`
//! (reverse) and get back a place name plus coordinates.

use crate::error::{AppError, Result};
use crate::models::Location;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/geocode", get(geocode))
}

#[derive(Deserialize)]
struct GeocodeQuery {
    query: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

#[derive(Serialize)]
pub struct GeocodeResponse {
    pub place_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug)]
enum GeocodeTarget {
    Forward(String),
    Reverse(Location),
}

fn parse_target(params: &GeocodeQuery) -> Result<GeocodeTarget> {
    match (params.query.as_deref(), params.latitude, params.longitude) {
        (Some(query), _, _) if !query.trim().is_empty() => {
            Ok(GeocodeTarget::Forward(query.trim().to_string()))
        }
        (None, Some(latitude), Some(longitude)) => {
            let location = Location::new(latitude, longitude);
            if !location.is_valid() {
                return Err(AppError::InvalidInput(
                    "Coordinates out of range".to_string(),
                ));
            }
            Ok(GeocodeTarget::Reverse(location))
        }
        _ => Err(AppError::InvalidInput(
            "Provide either 'query' or 'latitude' and 'longitude'".to_string(),
        )),
    }
}

/// Forward or reverse geocode via the provider.
async fn geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>> {
    let place = match parse_target(&params)? {
        GeocodeTarget::Forward(query) => {
            tracing::debug!(query = %query, "Forward geocoding");
            state.mapbox.forward_geocode(&query).await
        }
        GeocodeTarget::Reverse(location) => {
            tracing::debug!(
                latitude = location.latitude,
                longitude = location.longitude,
                "Reverse geocoding"
            );
            state.mapbox.reverse_geocode(location).await
        }
    };

    let place = place
        .map_err(|e| AppError::ProviderUnavailable(e.to_string()))?
        .ok_or_else(|| AppError::NotFound("No matching place".to_string()))?;

    Ok(Json(GeocodeResponse {
        place_name: place.place_name,
        latitude: place.location.latitude,
        longitude: place.location.longitude,
    }))
}
