// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod challenge;
pub mod leaderboard;
pub mod location;

pub use challenge::{Challenge, Difficulty};
pub use leaderboard::LeaderboardEntry;
pub use location::{GpsCoords, UserLocationRecord, UserWithHistory};
