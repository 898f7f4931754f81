// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Grid overlay routes.
//!
//! The full grid over the city runs to thousands of polygons, so the
//! enumeration endpoint is paginated: clients pull batches and render
//! them incrementally instead of waiting for the whole set.

use crate::error::Result;
use crate::models::Challenge;
use crate::services::grid::{CellGeometry, HexCell, LatLng};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const DEFAULT_BATCH: usize = 500;
const MAX_BATCH: usize = 2000;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/grid", get(get_grid))
        .route("/api/challenges", get(get_challenges))
}

// ─── Grid Enumeration ────────────────────────────────────────

#[derive(Deserialize)]
struct GridQuery {
    /// Skip this many cells of the enumeration
    #[serde(default)]
    offset: usize,
    /// Batch size (capped)
    limit: Option<usize>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    pub ok: bool,
    pub cells: Vec<CellGeometry>,
    /// Offset of the next batch, absent once the grid is exhausted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<usize>,
}

/// One batch of the complete hexagon grid.
///
/// The enumeration is recomputed from `(bbox, R)` on every request, so
/// batches are consistent across calls and a client can re-fetch any
/// range after an interruption.
async fn get_grid(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GridQuery>,
) -> Result<Json<GridResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_BATCH).min(MAX_BATCH);

    // Pull one extra cell to learn whether another batch exists.
    let mut cells: Vec<CellGeometry> = state
        .tracker
        .grid()
        .cells()
        .skip(params.offset)
        .take(limit + 1)
        .collect();

    let next_offset = if cells.len() > limit {
        cells.truncate(limit);
        Some(params.offset + limit)
    } else {
        None
    };

    Ok(Json(GridResponse {
        ok: true,
        cells,
        next_offset,
    }))
}

// ─── Challenges ──────────────────────────────────────────────

#[derive(Serialize)]
pub struct ChallengeWithCell {
    #[serde(flatten)]
    pub challenge: Challenge,
    pub cell: HexCell,
    pub center: LatLng,
}

#[derive(Serialize)]
pub struct ChallengesResponse {
    pub ok: bool,
    pub challenges: Vec<ChallengeWithCell>,
}

/// The challenge catalog with each entry's resolved cell and hexagon
/// center, for the task overlay.
async fn get_challenges(State(state): State<Arc<AppState>>) -> Result<Json<ChallengesResponse>> {
    let grid = state.tracker.grid();
    let challenges = state
        .catalog
        .challenges()
        .iter()
        .map(|resolved| ChallengeWithCell {
            challenge: resolved.challenge.clone(),
            cell: resolved.cell,
            // Resolved cells came from locate(), so a center always
            // exists inside the grid.
            center: grid
                .cell_center(resolved.cell)
                .map(LatLng::from)
                .unwrap_or(resolved.challenge.coordinates),
        })
        .collect();

    Ok(Json(ChallengesResponse {
        ok: true,
        challenges,
    }))
}
