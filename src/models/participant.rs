//! Participant model used by the ranking computation.

use crate::models::Location;
use serde::{Deserialize, Serialize};

/// A session participant supplied to the ranking computation.
///
/// The `id` is opaque to the engine; it is only echoed back in travel
/// metrics so callers can correlate results with their inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub location: Location,
}

impl Participant {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            location,
        }
    }
}
