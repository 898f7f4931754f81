// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Challenge catalog loading and cell resolution.
//!
//! The catalog is a GeoJSON FeatureCollection of Point features. Each
//! feature is resolved to its grid cell exactly once at startup; lookups
//! afterwards are plain map reads.

use crate::models::challenge::{Challenge, Difficulty};
use crate::services::grid::{HexCell, HexGrid, LatLng};
use geojson::GeoJson;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A challenge together with the cell its coordinates resolve to.
#[derive(Debug, Clone)]
pub struct ResolvedChallenge {
    pub challenge: Challenge,
    pub cell: HexCell,
}

/// Static table of challenge locations, keyed by grid cell.
#[derive(Default, Clone)]
pub struct ChallengeCatalog {
    by_cell: HashMap<HexCell, Challenge>,
    resolved: Vec<ResolvedChallenge>,
}

impl ChallengeCatalog {
    /// Load the catalog from a GeoJSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P, grid: &HexGrid) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data, grid)
    }

    /// Load the catalog from a GeoJSON string.
    ///
    /// Entries outside the bounding box are dropped with a warning; two
    /// entries resolving to the same cell keep the last one registered,
    /// also with a warning. Neither is a startup failure.
    pub fn load_from_json(json_data: &str, grid: &HexGrid) -> Result<Self, CatalogError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| CatalogError::ParseError(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(CatalogError::ParseError(
                "expected a FeatureCollection".to_string(),
            ));
        };

        let mut catalog = Self::default();

        for feature in collection.features {
            let challenge = Self::parse_feature(&feature)?;

            let point = geo::Point::new(challenge.coordinates.lng, challenge.coordinates.lat);
            let Some(cell) = grid.locate(point) else {
                tracing::warn!(
                    id = %challenge.id,
                    lat = challenge.coordinates.lat,
                    lng = challenge.coordinates.lng,
                    "Dropping challenge outside the playable area"
                );
                continue;
            };

            if let Some(previous) = catalog.by_cell.insert(cell, challenge.clone()) {
                tracing::warn!(
                    kept = %challenge.id,
                    replaced = %previous.id,
                    row = cell.row,
                    col = cell.col,
                    "Two challenges resolve to the same cell; last registered wins"
                );
                catalog
                    .resolved
                    .retain(|r| r.challenge.id != previous.id);
            }
            catalog.resolved.push(ResolvedChallenge { challenge, cell });
        }

        tracing::info!(count = catalog.resolved.len(), "Loaded challenge catalog");
        Ok(catalog)
    }

    fn parse_feature(feature: &geojson::Feature) -> Result<Challenge, CatalogError> {
        let prop = |name: &str| -> Result<String, CatalogError> {
            feature
                .property(name)
                .and_then(|v| v.as_str())
                .map(str::to_string)
                .ok_or_else(|| CatalogError::MissingProperty(name.to_string()))
        };

        let id = prop("id")?;
        let points = feature
            .property("points")
            .and_then(|v| v.as_u64())
            .ok_or_else(|| CatalogError::MissingProperty("points".to_string()))?
            as u32;
        let difficulty = match prop("difficulty")?.as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            other => return Err(CatalogError::InvalidDifficulty(other.to_string())),
        };

        let Some(geom) = &feature.geometry else {
            return Err(CatalogError::MissingGeometry(id));
        };
        let geojson::Value::Point(position) = &geom.value else {
            return Err(CatalogError::UnsupportedGeometry);
        };
        if position.len() < 2 {
            return Err(CatalogError::MissingGeometry(id));
        }

        Ok(Challenge {
            id,
            title: prop("title")?,
            description: prop("description")?,
            location: prop("location")?,
            points,
            difficulty,
            coordinates: LatLng {
                lng: position[0],
                lat: position[1],
            },
        })
    }

    /// The challenge occupying a cell, if any.
    pub fn challenge_for_cell(&self, cell: &HexCell) -> Option<&Challenge> {
        self.by_cell.get(cell)
    }

    /// All challenges with their resolved cells, in registration order.
    pub fn challenges(&self) -> &[ResolvedChallenge] {
        &self.resolved
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Feature missing required property: {0}")]
    MissingProperty(String),

    #[error("Invalid difficulty: {0} (expected easy, medium or hard)")]
    InvalidDifficulty(String),

    #[error("Feature {0} has no point geometry")]
    MissingGeometry(String),

    #[error("Unsupported geometry type (expected Point)")]
    UnsupportedGeometry,
}
