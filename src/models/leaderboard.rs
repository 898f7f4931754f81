// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard models.
//!
//! Entries are derived views recomputed on demand from the tracker's
//! history; nothing here is persisted.

use serde::Serialize;

/// One ranked row of the leaderboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub username: String,
    /// Count of distinct grid cells this user's history resolves into.
    pub hexagons_explored: u32,
    /// RFC3339 timestamp of the newest history entry, or `None` for a
    /// user with an empty timeline.
    pub last_active: Option<String>,
    /// `hexagons_explored * points_per_hex`.
    pub total_points: u32,
}
