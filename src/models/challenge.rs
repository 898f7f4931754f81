// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge location model.

use crate::services::grid::LatLng;
use serde::{Deserialize, Serialize};

/// Challenge difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// A named challenge anchored to a real-world coordinate.
///
/// Loaded once at startup from the static catalog and resolved to a grid
/// cell; immutable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Human-readable place name (e.g. "Ocean Beach")
    pub location: String,
    /// Reward for completing this challenge
    pub points: u32,
    pub difficulty: Difficulty,
    pub coordinates: LatLng,
}
