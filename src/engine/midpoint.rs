// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geographic midpoint calculation.

use crate::engine::EngineError;
use crate::models::Location;

/// Compute the arithmetic mean of a set of coordinates.
///
/// This is a flat-plane average with no weighting. It works well at the
/// city scale this app targets and degrades near the poles and across
/// the antimeridian.
pub fn compute(locations: &[Location]) -> Result<Location, EngineError> {
    if locations.is_empty() {
        return Err(EngineError::InvalidInput(
            "at least one location is required".to_string(),
        ));
    }

    for (index, location) in locations.iter().enumerate() {
        if !location.is_valid() {
            return Err(EngineError::InvalidInput(format!(
                "location {} out of range: ({}, {})",
                index, location.latitude, location.longitude
            )));
        }
    }

    let count = locations.len() as f64;
    let avg_latitude = locations.iter().map(|l| l.latitude).sum::<f64>() / count;
    let avg_longitude = locations.iter().map(|l| l.longitude).sum::<f64>() / count;

    Ok(Location::new(avg_latitude, avg_longitude))
}
