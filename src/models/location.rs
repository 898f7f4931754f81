// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GPS fix models shared between the wire format and the store.

use geo::Point;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Device coordinates as reported by the GPS stream.
///
/// Only latitude/longitude participate in hexagon indexing; the optional
/// fields are carried through for display but never affect cell
/// resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GpsCoords {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl GpsCoords {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            altitude: None,
            altitude_accuracy: None,
            heading: None,
            speed: None,
        }
    }

    /// The point in `geo`'s (x = longitude, y = latitude) convention.
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// One GPS fix for one user. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocationRecord {
    pub username: String,
    /// Milliseconds since the Unix epoch, as reported by the device.
    pub timestamp: i64,
    pub coords: GpsCoords,
}

/// A user's latest fix plus their retained timeline, most recent first.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithHistory {
    pub current: Option<UserLocationRecord>,
    pub history: Vec<UserLocationRecord>,
}
