// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard aggregation.
//!
//! A read-mostly view recomputed on demand from the tracker: every user
//! with a retained timeline is scored by the number of distinct cells
//! their history resolves into. Holds no state of its own.

use crate::error::AppError;
use crate::models::LeaderboardEntry;
use crate::services::tracker::TrackerService;
use crate::time_utils::format_ms_rfc3339;
use std::collections::HashSet;

/// Computed leaderboard plus its summary counts.
#[derive(Debug, Clone)]
pub struct Leaderboard {
    pub entries: Vec<LeaderboardEntry>,
    pub total_users: u32,
    /// Distinct cells explored across all users.
    pub total_unique_hexagons: u32,
}

/// Leaderboard aggregation service.
#[derive(Debug, Clone)]
pub struct LeaderboardService {
    points_per_hex: u32,
}

impl LeaderboardService {
    pub fn new(points_per_hex: u32) -> Self {
        Self { points_per_hex }
    }

    /// Rank every known user.
    ///
    /// Sort order: explored cells descending, then last activity
    /// descending with never-active users after everyone else; stable
    /// beyond that.
    pub fn compute(&self, tracker: &TrackerService) -> Result<Leaderboard, AppError> {
        let users = tracker.users_with_history(None)?;

        let mut all_cells = HashSet::new();
        let mut ranked: Vec<(LeaderboardEntry, Option<i64>)> = Vec::with_capacity(users.len());

        for (username, data) in users {
            let cells = TrackerService::cells_of(tracker.grid(), &data.history);
            let explored = cells.len() as u32;
            all_cells.extend(cells);

            // History is most recent first.
            let last_active_ms = data.history.first().map(|r| r.timestamp);

            ranked.push((
                LeaderboardEntry {
                    username,
                    hexagons_explored: explored,
                    last_active: last_active_ms.and_then(format_ms_rfc3339),
                    total_points: explored * self.points_per_hex,
                },
                last_active_ms,
            ));
        }

        ranked.sort_by(|(a, a_ms), (b, b_ms)| {
            b.hexagons_explored
                .cmp(&a.hexagons_explored)
                // Option orders None first ascending, so comparing b to a
                // puts larger timestamps first and None last.
                .then(b_ms.cmp(a_ms))
        });

        let entries: Vec<LeaderboardEntry> = ranked.into_iter().map(|(entry, _)| entry).collect();
        Ok(Leaderboard {
            total_users: entries.len() as u32,
            total_unique_hexagons: all_cells.len() as u32,
            entries,
        })
    }
}
