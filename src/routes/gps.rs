// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPS ingest route.

use crate::error::{AppError, Result};
use crate::models::{GpsCoords, UserLocationRecord};
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/gps-stream", post(post_gps_stream))
}

/// One device fix as streamed by the client.
#[derive(Deserialize, Validate)]
pub struct GpsPayload {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    /// Milliseconds since the Unix epoch.
    #[validate(range(min = 1))]
    pub timestamp: i64,
    #[validate(nested)]
    pub coords: GpsCoords,
}

#[derive(Serialize)]
pub struct GpsAck {
    pub ok: bool,
}

/// Accept a GPS fix and update the sender's live position, timeline and
/// visited cells. Client-side throttling decides how often fixes arrive;
/// this handler takes whatever it is given.
async fn post_gps_stream(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GpsPayload>,
) -> Result<Json<GpsAck>> {
    payload
        .validate()
        .map_err(|e| AppError::InvalidInput(e.to_string()))?;

    let record = UserLocationRecord {
        username: payload.username.trim().to_string(),
        timestamp: payload.timestamp,
        coords: payload.coords,
    };
    if record.username.is_empty() {
        return Err(AppError::InvalidInput("Username not set".to_string()));
    }

    let cell = state.tracker.record_location(&record)?;

    tracing::info!(
        user = %record.username,
        timestamp = record.timestamp,
        lat = record.coords.latitude,
        lng = record.coords.longitude,
        cell = ?cell,
        "GPS update"
    );

    Ok(Json(GpsAck { ok: true }))
}
