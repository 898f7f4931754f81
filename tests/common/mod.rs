// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::Duration;
use exploragon::config::Config;
use exploragon::db::LocationDb;
use exploragon::routes::create_router;
use exploragon::services::{
    BoundingBox, ChallengeCatalog, HexGrid, LeaderboardService, TrackerService,
};
use exploragon::AppState;
use std::sync::Arc;

/// Build the grid the default config describes.
#[allow(dead_code)]
pub fn test_grid() -> HexGrid {
    let config = Config::default();
    let [lng_min, lat_min, lng_max, lat_max] = config.bbox;
    let bbox = BoundingBox::new(lng_min, lat_min, lng_max, lat_max).unwrap();
    HexGrid::new(bbox, config.hex_radius_m).unwrap()
}

/// Create a test app over a fresh in-memory store and the committed
/// challenge catalog. Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let grid = test_grid();
    let catalog = ChallengeCatalog::load_from_file(&config.challenges_path, &grid)
        .expect("Failed to load challenge catalog - is data/ committed?");

    let db = LocationDb::new(
        Duration::seconds(config.active_ttl_seconds),
        Duration::seconds(config.history_ttl_seconds),
        config.history_max_entries,
    );
    let tracker = TrackerService::new(db, grid);
    let leaderboard = LeaderboardService::new(config.points_per_hex);

    let state = Arc::new(AppState {
        config,
        catalog,
        tracker,
        leaderboard,
    });

    (create_router(state.clone()), state)
}

/// POST body for a fix at the given coordinate.
#[allow(dead_code)]
pub fn gps_body(username: &str, timestamp: i64, lat: f64, lng: f64) -> String {
    format!(
        r#"{{"username":"{username}","timestamp":{timestamp},"coords":{{"latitude":{lat},"longitude":{lng}}}}}"#
    )
}
