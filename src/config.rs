//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Mapbox access token (search, directions, geocoding)
    pub mapbox_token: String,
    /// Base URL for Mapbox APIs
    pub mapbox_base_url: String,
    /// Firebase Realtime Database root URL; None selects the in-memory store
    pub firebase_database_url: Option<String>,
    /// Frontend URL for CORS
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Session lifetime in minutes
    pub session_ttl_minutes: i64,
    /// Venue categories requested from the search provider
    pub venue_categories: Vec<String>,
    /// Max raw candidates requested per venue search
    pub venue_search_limit: u32,
    /// Max ranked venues returned per computation
    pub result_cap: usize,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            mapbox_token: "test_token".to_string(),
            mapbox_base_url: "https://api.mapbox.com".to_string(),
            firebase_database_url: None,
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            session_ttl_minutes: 6 * 60,
            venue_categories: default_categories(),
            venue_search_limit: 20,
            result_cap: 15,
        }
    }
}

fn default_categories() -> Vec<String> {
    ["cafe", "restaurant", "bar", "gas_station"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            mapbox_token: env::var("MAPBOX_TOKEN").map_err(|_| ConfigError::Missing("MAPBOX_TOKEN"))?,
            mapbox_base_url: env::var("MAPBOX_BASE_URL")
                .unwrap_or_else(|_| "https://api.mapbox.com".to_string()),
            firebase_database_url: env::var("FIREBASE_DATABASE_URL")
                .ok()
                .map(|url| url.trim_end_matches('/').to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            session_ttl_minutes: env::var("SESSION_TTL_MINUTES")
                .unwrap_or_else(|_| "360".to_string())
                .parse()
                .unwrap_or(360),
            venue_categories: env::var("VENUE_CATEGORIES")
                .map(|raw| {
                    raw.split(',')
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect()
                })
                .ok()
                .filter(|cats: &Vec<String>| !cats.is_empty())
                .unwrap_or_else(default_categories),
            venue_search_limit: env::var("VENUE_SEARCH_LIMIT")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .unwrap_or(20),
            result_cap: env::var("RESULT_CAP")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
