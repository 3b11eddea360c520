// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Mapbox API client.
//!
//! Serves three endpoints:
//! - Search Box category search (venue candidates near a point)
//! - Directions v5 driving routes
//! - Geocoding v5 forward/reverse lookups

use crate::models::{Location, VenueCandidate};
use crate::providers::{Place, ProviderError, Route, Routing, VenueSearch};
use serde::Deserialize;
use std::time::Duration;

/// Per-request timeout. A directions call past this point is reported
/// as a failed route instead of stalling the whole fan-out.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Mapbox API client.
#[derive(Clone)]
pub struct MapboxClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl MapboxClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    // ─── Geocoding ───────────────────────────────────────────────

    /// Forward geocode a free-text query to its best match.
    pub async fn forward_geocode(&self, query: &str) -> Result<Option<Place>, ProviderError> {
        let url = format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url,
            urlencoding::encode(query)
        );
        let response: GeocodingResponse = self.get_json(&url, &[]).await?;

        Ok(response.features.into_iter().next().map(feature_to_place))
    }

    /// Reverse geocode coordinates to a place name.
    pub async fn reverse_geocode(&self, location: Location) -> Result<Option<Place>, ProviderError> {
        let url = format!(
            "{}/geocoding/v5/mapbox.places/{},{}.json",
            self.base_url, location.longitude, location.latitude
        );
        let response: GeocodingResponse = self.get_json(&url, &[]).await?;

        Ok(response.features.into_iter().next().map(feature_to_place))
    }

    // ─── Helpers ─────────────────────────────────────────────────

    /// Generic GET with access token and JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ProviderError> {
        let response = self
            .http
            .get(url)
            .timeout(REQUEST_TIMEOUT)
            .query(&[("access_token", self.token.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response status and parse the JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();

            if status == 429 {
                tracing::warn!("Mapbox rate limit hit (429)");
            }

            return Err(ProviderError::Status { status, body });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

impl VenueSearch for MapboxClient {
    async fn search(
        &self,
        center: Location,
        categories: &[String],
        limit: u32,
    ) -> Result<Vec<VenueCandidate>, ProviderError> {
        let url = format!(
            "{}/search/searchbox/v1/category/{}",
            self.base_url,
            categories.join(",")
        );
        let proximity = format!("{},{}", center.longitude, center.latitude);
        let limit_str = limit.to_string();

        let response: CategorySearchResponse = self
            .get_json(
                &url,
                &[
                    ("proximity", proximity.as_str()),
                    ("limit", limit_str.as_str()),
                ],
            )
            .await?;

        Ok(response
            .features
            .into_iter()
            .map(feature_to_candidate)
            .collect())
    }
}

impl Routing for MapboxClient {
    async fn route(&self, from: Location, to: Location) -> Result<Route, ProviderError> {
        let url = format!(
            "{}/directions/v5/mapbox/driving/{},{};{},{}",
            self.base_url, from.longitude, from.latitude, to.longitude, to.latitude
        );

        let response: DirectionsResponse = self.get_json(&url, &[]).await?;

        response
            .routes
            .into_iter()
            .next()
            .map(|r| Route {
                duration_seconds: r.duration,
                distance_meters: r.distance,
            })
            .ok_or(ProviderError::NoRoute)
    }
}

// ─── Wire types ──────────────────────────────────────────────────

/// Search Box category response.
#[derive(Debug, Deserialize)]
struct CategorySearchResponse {
    #[serde(default)]
    features: Vec<SearchFeature>,
}

#[derive(Debug, Deserialize)]
struct SearchFeature {
    properties: SearchProperties,
    geometry: PointGeometry,
}

#[derive(Debug, Deserialize)]
struct SearchProperties {
    mapbox_id: String,
    name: String,
    full_address: Option<String>,
    place_formatted: Option<String>,
    #[serde(default)]
    poi_category: Vec<String>,
}

/// GeoJSON point; coordinates are [longitude, latitude].
#[derive(Debug, Deserialize)]
struct PointGeometry {
    coordinates: [f64; 2],
}

fn feature_to_candidate(feature: SearchFeature) -> VenueCandidate {
    VenueCandidate {
        provider_id: feature.properties.mapbox_id,
        name: feature.properties.name,
        address: feature
            .properties
            .full_address
            .or(feature.properties.place_formatted)
            .unwrap_or_default(),
        category: feature
            .properties
            .poi_category
            .into_iter()
            .next()
            .unwrap_or_else(|| "venue".to_string()),
        location: Location::new(feature.geometry.coordinates[1], feature.geometry.coordinates[0]),
    }
}

/// Directions v5 response.
#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Debug, Deserialize)]
struct DirectionsRoute {
    /// Seconds
    duration: f64,
    /// Meters
    distance: f64,
}

/// Geocoding v5 response.
#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<GeocodingFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodingFeature {
    place_name: String,
    /// [longitude, latitude]
    center: [f64; 2],
}

fn feature_to_place(feature: GeocodingFeature) -> Place {
    Place {
        place_name: feature.place_name,
        location: Location::new(feature.center[1], feature.center[0]),
    }
}
