// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog smoke tests against the committed challenge data.
//!
//! IMPORTANT: If these tests fail, challenges are silently missing from
//! the map and players won't notice until their rewards never arrive.

use exploragon::services::ChallengeCatalog;

mod common;

fn load_catalog() -> ChallengeCatalog {
    ChallengeCatalog::load_from_file("data/challenges.geojson", &common::test_grid())
        .expect("Failed to load challenge catalog - is data/ committed?")
}

#[test]
fn test_every_committed_challenge_resolves() {
    let catalog = load_catalog();
    // All 10 committed challenges sit inside the playable area and on a
    // cell footprint; none may be dropped at load.
    assert_eq!(catalog.len(), 10, "a committed challenge failed to resolve");

    let ids: Vec<&str> = catalog
        .challenges()
        .iter()
        .map(|r| r.challenge.id.as_str())
        .collect();
    assert!(ids.contains(&"ocean-beach-sunset"));
    assert!(ids.contains(&"twin-peaks-summit"));
    assert!(ids.contains(&"dragon-gate"));
}

#[test]
fn test_challenges_occupy_distinct_cells() {
    let catalog = load_catalog();
    let mut seen = std::collections::HashSet::new();
    for resolved in catalog.challenges() {
        assert!(
            seen.insert(resolved.cell),
            "challenge {} shares a cell with another entry",
            resolved.challenge.id
        );
    }
}

#[test]
fn test_cell_lookup_matches_resolution() {
    let grid = common::test_grid();
    let catalog = load_catalog();
    for resolved in catalog.challenges() {
        let point = geo::Point::new(
            resolved.challenge.coordinates.lng,
            resolved.challenge.coordinates.lat,
        );
        assert_eq!(grid.locate(point), Some(resolved.cell));
        assert_eq!(
            catalog.challenge_for_cell(&resolved.cell).unwrap().id,
            resolved.challenge.id
        );
    }
}
