// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meetpoint API Server
//!
//! Lets a group of people find a fair place to meet: shared sessions,
//! midpoint calculation, fairness-ranked venues, and geocoding.

use meetpoint::{
    config::Config,
    db::SessionDb,
    engine::{RankingEngine, RankingOptions},
    providers::MapboxClient,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Meetpoint API");

    // Session store: Firebase when configured, otherwise process-local
    let db = match &config.firebase_database_url {
        Some(url) => {
            tracing::info!(database_url = %url, "Using Firebase session store");
            SessionDb::firebase(url.clone())
        }
        None => {
            tracing::warn!("FIREBASE_DATABASE_URL not set; using in-memory session store");
            SessionDb::in_memory()
        }
    };

    // One Mapbox client serves venue search, routing and geocoding
    let mapbox = MapboxClient::new(config.mapbox_base_url.clone(), config.mapbox_token.clone());

    let engine = RankingEngine::new(
        mapbox.clone(),
        mapbox.clone(),
        RankingOptions {
            categories: config.venue_categories.clone(),
            search_limit: config.venue_search_limit,
            result_cap: config.result_cap,
        },
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        mapbox,
        engine,
    });

    // Build router
    let app = meetpoint::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("meetpoint=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
