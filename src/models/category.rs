//! Venue category grouping for the shared list filter.
//!
//! Search providers return fine-grained categories ("coffee_shop",
//! "wine_bar", ...). The UI filters on four coarse groups, so every
//! participant sees the same buckets.

use serde::{Deserialize, Serialize};

const DINING_KEYWORDS: &[&str] = &[
    "restaurant",
    "cafe",
    "coffee",
    "food",
    "fast_food",
    "pizza",
    "bakery",
];
const BAR_KEYWORDS: &[&str] = &["bar", "pub", "nightclub", "brewery", "wine_bar"];
const GAS_KEYWORDS: &[&str] = &["gas_station", "fuel", "ev_charging"];

/// Coarse venue grouping used by the list filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryGroup {
    Dining,
    Bars,
    Gas,
    Other,
}

impl CategoryGroup {
    /// Classify a raw provider category into a group.
    ///
    /// Matching is case-insensitive substring search, so "irish_pub" and
    /// "Coffee Shop" both land where users expect.
    pub fn classify(raw_category: &str) -> Self {
        let lowered = raw_category.to_lowercase();

        if DINING_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            CategoryGroup::Dining
        } else if BAR_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            CategoryGroup::Bars
        } else if GAS_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            CategoryGroup::Gas
        } else {
            CategoryGroup::Other
        }
    }

    /// Parse a filter value from the API ("dining", "bars", "gas", "other").
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dining" => Some(CategoryGroup::Dining),
            "bars" => Some(CategoryGroup::Bars),
            "gas" => Some(CategoryGroup::Gas),
            "other" => Some(CategoryGroup::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryGroup::Dining => "dining",
            CategoryGroup::Bars => "bars",
            CategoryGroup::Gas => "gas",
            CategoryGroup::Other => "other",
        }
    }
}
