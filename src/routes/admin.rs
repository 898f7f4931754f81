// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin view routes: live presence, timelines, leaderboard.

use crate::error::Result;
use crate::models::{LeaderboardEntry, UserLocationRecord, UserWithHistory};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/active-users", get(get_active_users))
        .route("/api/users-with-history", get(get_users_with_history))
        .route("/api/leaderboard", get(get_leaderboard))
}

// ─── Live Presence ───────────────────────────────────────────

#[derive(Serialize)]
pub struct ActiveUsersResponse {
    pub ok: bool,
    pub data: HashMap<String, UserLocationRecord>,
}

/// Users whose latest fix is within the active TTL, with that fix.
async fn get_active_users(State(state): State<Arc<AppState>>) -> Result<Json<ActiveUsersResponse>> {
    let data = state.tracker.active_users()?;
    Ok(Json(ActiveUsersResponse { ok: true, data }))
}

// ─── Timelines ───────────────────────────────────────────────

#[derive(Deserialize)]
struct HistoryQuery {
    /// Truncate each user's timeline to the most recent N entries
    limit: Option<usize>,
}

#[derive(Serialize)]
pub struct UsersWithHistoryResponse {
    pub ok: bool,
    pub data: HashMap<String, UserWithHistory>,
}

/// Every user with retained history, joined with their current fix.
async fn get_users_with_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryQuery>,
) -> Result<Json<UsersWithHistoryResponse>> {
    let data = state.tracker.users_with_history(params.limit)?;
    Ok(Json(UsersWithHistoryResponse { ok: true, data }))
}

// ─── Leaderboard ─────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub ok: bool,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub total_users: u32,
    pub total_unique_hexagons: u32,
}

/// Ranked explored-cell counts, recomputed on demand.
async fn get_leaderboard(State(state): State<Arc<AppState>>) -> Result<Json<LeaderboardResponse>> {
    let board = state.leaderboard.compute(&state.tracker)?;

    tracing::debug!(
        users = board.total_users,
        unique_hexagons = board.total_unique_hexagons,
        "Computed leaderboard"
    );

    Ok(Json(LeaderboardResponse {
        ok: true,
        leaderboard: board.entries,
        total_users: board.total_users,
        total_unique_hexagons: board.total_unique_hexagons,
    }))
}
