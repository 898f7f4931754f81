// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod catalog;
pub mod grid;
pub mod leaderboard;
pub mod tracker;

pub use catalog::ChallengeCatalog;
pub use grid::{BoundingBox, HexCell, HexGrid};
pub use leaderboard::LeaderboardService;
pub use tracker::TrackerService;
