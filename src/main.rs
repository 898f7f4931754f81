// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exploragon API Server
//!
//! Streams player GPS fixes onto a hexagonal grid over the playable area
//! and serves live presence, timelines and the leaderboard.

use chrono::Duration;
use exploragon::{
    config::Config,
    db::LocationDb,
    services::{BoundingBox, ChallengeCatalog, HexGrid, LeaderboardService, TrackerService},
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
    tracing::info!(port = config.port, "Starting Exploragon API");

    // Build the grid over the playable area
    let [lng_min, lat_min, lng_max, lat_max] = config.bbox;
    let bbox = BoundingBox::new(lng_min, lat_min, lng_max, lat_max)
        .expect("Invalid playable-area bounding box");
    let grid = HexGrid::new(bbox, config.hex_radius_m).expect("Invalid hexagon radius");
    tracing::info!(
        radius_m = config.hex_radius_m,
        "Hexagon grid initialized"
    );

    // Load the challenge catalog and resolve each entry to its cell
    tracing::info!(path = %config.challenges_path, "Loading challenge catalog");
    let catalog = ChallengeCatalog::load_from_file(&config.challenges_path, &grid)
        .expect("Failed to load challenge catalog");
    tracing::info!(count = catalog.len(), "Challenge catalog loaded");

    // Initialize the location store and tracker
    let db = LocationDb::new(
        Duration::seconds(config.active_ttl_seconds),
        Duration::seconds(config.history_ttl_seconds),
        config.history_max_entries,
    );
    let tracker = TrackerService::new(db, grid);
    let leaderboard = LeaderboardService::new(config.points_per_hex);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        catalog,
        tracker,
        leaderboard,
    });

    // Build router
    let app = exploragon::routes::create_router(state);

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
                .add_directive("exploragon=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
