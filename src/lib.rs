// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Meetpoint: find a fair place to meet in the middle
//!
//! This crate provides the backend API for shared meetup sessions:
//! computing the geographic midpoint of a group and ranking nearby
//! venues by fairness of travel time.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod providers;
pub mod routes;
pub mod time_utils;

use config::Config;
use db::SessionDb;
use engine::RankingEngine;
use providers::MapboxClient;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SessionDb,
    pub mapbox: MapboxClient,
    pub engine: RankingEngine<MapboxClient, MapboxClient>,
}
