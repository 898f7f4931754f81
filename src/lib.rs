// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Exploragon: explore the city one hexagon at a time
//!
//! This crate provides the backend for a location-based exploration game:
//! it ingests streamed GPS fixes, resolves them onto a staggered hexagon
//! grid over the playable area, and serves live presence, per-user
//! timelines and a leaderboard of explored cells.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{ChallengeCatalog, LeaderboardService, TrackerService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub catalog: ChallengeCatalog,
    pub tracker: TrackerService,
    pub leaderboard: LeaderboardService,
}
