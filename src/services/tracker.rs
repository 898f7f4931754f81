// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Visit tracking: GPS fixes in, per-user state out.
//!
//! Each accepted fix updates the user's current position and timeline as
//! two independent store writes; both are idempotent replays of the same
//! device fix, so a crash between them leaves nothing to repair. Visited
//! cells are recomputed by replaying the timeline through the grid, which
//! by determinism of `locate` always equals an incrementally maintained
//! set.

use crate::db::LocationDb;
use crate::error::AppError;
use crate::models::{UserLocationRecord, UserWithHistory};
use crate::services::grid::{HexCell, HexGrid};
use std::collections::{HashMap, HashSet};

/// Service tracking live positions, timelines and visited cells.
#[derive(Clone)]
pub struct TrackerService {
    db: LocationDb,
    grid: HexGrid,
}

impl TrackerService {
    pub fn new(db: LocationDb, grid: HexGrid) -> Self {
        Self { db, grid }
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Accept a GPS fix.
    ///
    /// Fixes outside the playable area are rejected with `InvalidInput`
    /// and leave both the current position and the timeline untouched.
    /// Returns the cell the fix resolved to, or `None` for a fix in a gap
    /// between hexagon footprints.
    pub fn record_location(
        &self,
        record: &UserLocationRecord,
    ) -> Result<Option<HexCell>, AppError> {
        let point = record.coords.point();
        if !self.grid.bbox().contains(point) {
            return Err(AppError::InvalidInput(format!(
                "Coordinate ({}, {}) is outside the playable area",
                record.coords.latitude, record.coords.longitude
            )));
        }

        let cell = self.grid.locate(point);

        self.db.set_current(record)?;
        self.db.append_history(record)?;

        Ok(cell)
    }

    /// Users whose latest fix is still within the active TTL.
    pub fn active_users(&self) -> Result<HashMap<String, UserLocationRecord>, AppError> {
        self.db.scan_active()
    }

    /// A user's timeline, most recent first. Unknown users get an empty
    /// timeline, not an error.
    pub fn history(
        &self,
        username: &str,
        limit: Option<usize>,
    ) -> Result<Vec<UserLocationRecord>, AppError> {
        self.db.get_history(username, limit)
    }

    /// Distinct cells a user's retained timeline resolves into.
    pub fn visited_cells(&self, username: &str) -> Result<HashSet<HexCell>, AppError> {
        let history = self.db.get_history(username, None)?;
        Ok(Self::cells_of(&self.grid, &history))
    }

    /// Replay a timeline through the grid. Gap fixes resolve to no cell
    /// and are skipped; duplicates collapse via set union.
    pub fn cells_of(grid: &HexGrid, history: &[UserLocationRecord]) -> HashSet<HexCell> {
        history
            .iter()
            .filter_map(|record| grid.locate(record.coords.point()))
            .collect()
    }

    /// Every user with a retained timeline, joined with their current fix
    /// (absent when the active TTL has elapsed).
    pub fn users_with_history(
        &self,
        limit: Option<usize>,
    ) -> Result<HashMap<String, UserWithHistory>, AppError> {
        let mut result = HashMap::new();
        for username in self.db.history_usernames()? {
            let history = self.db.get_history(&username, limit)?;
            let current = self.db.get_current(&username)?;
            result.insert(username, UserWithHistory { current, history });
        }
        Ok(result)
    }
}
