// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use meetpoint::config::Config;
use meetpoint::db::SessionDb;
use meetpoint::engine::{RankingEngine, RankingOptions};
use meetpoint::providers::MapboxClient;
use meetpoint::routes::create_router;
use meetpoint::AppState;
use std::sync::Arc;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIREBASE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIREBASE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Session store backed by the Realtime Database emulator.
///
/// The emulator must be started with a default database instance
/// (standard `firebase emulators:start` setup).
#[allow(dead_code)]
pub fn emulator_db() -> SessionDb {
    let host =
        std::env::var("FIREBASE_EMULATOR_HOST").expect("FIREBASE_EMULATOR_HOST must be set");
    SessionDb::firebase(format!("http://{}", host))
}

/// Create a test app with an in-memory session store.
///
/// The provider base URL points at a closed local port, so any call
/// that reaches Mapbox fails immediately instead of hitting the
/// network. Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config {
        mapbox_base_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let db = SessionDb::in_memory();
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

    let state = Arc::new(AppState {
        config,
        db,
        mapbox,
        engine,
    });

    (create_router(state.clone()), state)
}
