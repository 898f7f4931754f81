// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hexagonal grid indexing over a geographic bounding box.
//!
//! The playable area is tiled with flat-topped hexagons of circumradius
//! `R` meters on a staggered lattice: columns are `DX = 1.73 * R` apart,
//! rows are `DY = sqrt(3) * R` apart, and every odd row is shifted east by
//! `DX / 2`. All offsets from the box's southwest corner are computed with
//! haversine destination/distance so a cell covers the same ground at any
//! latitude. This is the single authoritative implementation; every
//! consumer (tracker, catalog, leaderboard, grid overlay) resolves cells
//! through it.

use geo::{Destination, Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Horizontal spacing between hexagon centers in a row, in units of the
/// cell radius.
const DX_FACTOR: f64 = 1.73;

/// Bearings (degrees clockwise from north) of a flat-topped hexagon's six
/// vertices around its center.
const VERTEX_BEARINGS: [f64; 6] = [0.0, 60.0, 120.0, 180.0, 240.0, 300.0];

/// Geodesic offset that keeps a zero-distance move bit-exact.
///
/// `Haversine.destination(p, b, 0.0)` round-trips through the spherical
/// formulas and can drift `p` by ~1e-14 degrees, which is enough to push a
/// center sitting exactly on the bounding-box edge outside the box. Cells
/// on the west and south edges are placed with a 0 m offset, so those
/// moves must return the origin unchanged.
fn offset(origin: Point<f64>, bearing: f64, distance_m: f64) -> Point<f64> {
    if distance_m == 0.0 {
        origin
    } else {
        Haversine.destination(origin, bearing, distance_m)
    }
}

/// One hexagon in the staggered grid, identified by integer offset
/// coordinates. Row 0 / column 0 is the cell centered on the bounding
/// box's southwest corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCell {
    pub row: u32,
    pub col: u32,
}

/// Rectangular playable region in WGS-84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lng_min: f64,
    pub lat_min: f64,
    pub lng_max: f64,
    pub lat_max: f64,
}

impl BoundingBox {
    /// Build a bounding box from `(lng_min, lat_min, lng_max, lat_max)`.
    pub fn new(lng_min: f64, lat_min: f64, lng_max: f64, lat_max: f64) -> Result<Self, GridError> {
        if !(lng_min.is_finite()
            && lat_min.is_finite()
            && lng_max.is_finite()
            && lat_max.is_finite())
            || lng_min >= lng_max
            || lat_min >= lat_max
        {
            return Err(GridError::InvalidBoundingBox {
                lng_min,
                lat_min,
                lng_max,
                lat_max,
            });
        }
        Ok(Self {
            lng_min,
            lat_min,
            lng_max,
            lat_max,
        })
    }

    /// Southwest corner, the grid origin.
    pub fn southwest(&self) -> Point<f64> {
        Point::new(self.lng_min, self.lat_min)
    }

    /// Whether a point lies inside the box (edges inclusive).
    pub fn contains(&self, point: Point<f64>) -> bool {
        point.x() >= self.lng_min
            && point.x() <= self.lng_max
            && point.y() >= self.lat_min
            && point.y() <= self.lat_max
    }
}

/// A latitude/longitude pair as the wire format expects it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<Point<f64>> for LatLng {
    fn from(p: Point<f64>) -> Self {
        Self {
            lat: p.y(),
            lng: p.x(),
        }
    }
}

/// A grid cell together with its geometry, as produced by enumeration.
#[derive(Debug, Clone, Serialize)]
pub struct CellGeometry {
    pub cell: HexCell,
    pub center: LatLng,
    /// Six vertices at geodesic distance `R` from the center, bearings
    /// 0°, 60°, ..., 300°.
    pub vertices: Vec<LatLng>,
}

/// The staggered hexagonal grid over a bounding box.
///
/// Construction is cheap and the type is `Clone`; all methods are pure,
/// so repeated calls with the same input always return the same result.
#[derive(Debug, Clone)]
pub struct HexGrid {
    bbox: BoundingBox,
    radius_m: f64,
    dx: f64,
    dy: f64,
}

impl HexGrid {
    pub fn new(bbox: BoundingBox, radius_m: f64) -> Result<Self, GridError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(GridError::InvalidRadius(radius_m));
        }
        Ok(Self {
            bbox,
            radius_m,
            dx: DX_FACTOR * radius_m,
            dy: 3.0_f64.sqrt() * radius_m,
        })
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    pub fn radius_m(&self) -> f64 {
        self.radius_m
    }

    /// Latitude origin of a row: `row * DY` meters due north of the
    /// southwest corner.
    fn row_origin(&self, row: u32) -> Point<f64> {
        offset(self.bbox.southwest(), 0.0, f64::from(row) * self.dy)
    }

    /// Eastward stagger of a row relative to the grid origin, in meters.
    fn row_stagger(&self, row: u32) -> f64 {
        if row % 2 == 0 {
            0.0
        } else {
            self.dx / 2.0
        }
    }

    /// Center of a cell, whether or not that cell falls inside the box.
    fn raw_center(&self, cell: HexCell) -> Point<f64> {
        let east_m = self.row_stagger(cell.row) + f64::from(cell.col) * self.dx;
        offset(self.row_origin(cell.row), 90.0, east_m)
    }

    /// Center of a cell, or `None` if the cell lies outside the grid.
    pub fn cell_center(&self, cell: HexCell) -> Option<Point<f64>> {
        let center = self.raw_center(cell);
        if center.y() > self.bbox.lat_max || center.x() > self.bbox.lng_max {
            return None;
        }
        Some(center)
    }

    /// The six hexagon vertices around a center.
    pub fn vertices(&self, center: Point<f64>) -> [Point<f64>; 6] {
        VERTEX_BEARINGS.map(|bearing| Haversine.destination(center, bearing, self.radius_m))
    }

    /// Resolve a point to the cell whose center lies within `R` meters.
    ///
    /// Scans rows south to north, columns west to east, and returns the
    /// first hit. Returns `None` for points outside the bounding box and
    /// for points in the small gaps between the circular cell footprints;
    /// gap points are deliberately unassigned rather than snapped to the
    /// nearest cell.
    pub fn locate(&self, point: Point<f64>) -> Option<HexCell> {
        if !self.bbox.contains(point) {
            return None;
        }

        let mut row = 0u32;
        loop {
            let row_origin = self.row_origin(row);
            if row_origin.y() > self.bbox.lat_max {
                return None;
            }

            let stagger = self.row_stagger(row);
            let mut col = 0u32;
            loop {
                let east_m = stagger + f64::from(col) * self.dx;
                let center = offset(row_origin, 90.0, east_m);
                if center.x() > self.bbox.lng_max {
                    break;
                }

                if Haversine.distance(center, point) <= self.radius_m {
                    return Some(HexCell { row, col });
                }
                col += 1;
            }
            row += 1;
        }
    }

    /// Lazily enumerate every cell whose center lies inside the bounding
    /// box, row by row. The iterator is re-creatable from the grid alone
    /// and holds no hidden state, so callers may restart it, consume it in
    /// batches, or drop it early at no cost.
    pub fn cells(&self) -> Cells<'_> {
        Cells {
            grid: self,
            row: 0,
            col: 0,
            row_origin: self.row_origin(0),
            done: false,
        }
    }
}

/// Iterator over the full grid. See [`HexGrid::cells`].
pub struct Cells<'a> {
    grid: &'a HexGrid,
    row: u32,
    col: u32,
    row_origin: Point<f64>,
    done: bool,
}

impl Iterator for Cells<'_> {
    type Item = CellGeometry;

    fn next(&mut self) -> Option<CellGeometry> {
        if self.done {
            return None;
        }

        loop {
            let east_m = self.grid.row_stagger(self.row) + f64::from(self.col) * self.grid.dx;
            let center = offset(self.row_origin, 90.0, east_m);

            if center.x() > self.grid.bbox.lng_max {
                // Row exhausted, move north.
                self.row += 1;
                self.col = 0;
                self.row_origin = self.grid.row_origin(self.row);
                if self.row_origin.y() > self.grid.bbox.lat_max {
                    self.done = true;
                    return None;
                }
                continue;
            }

            let cell = HexCell {
                row: self.row,
                col: self.col,
            };
            self.col += 1;

            return Some(CellGeometry {
                cell,
                center: center.into(),
                vertices: self
                    .grid
                    .vertices(center)
                    .iter()
                    .copied()
                    .map(LatLng::from)
                    .collect(),
            });
        }
    }
}

/// Errors from grid construction.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("Invalid bounding box: ({lng_min}, {lat_min}, {lng_max}, {lat_max})")]
    InvalidBoundingBox {
        lng_min: f64,
        lat_min: f64,
        lng_max: f64,
        lat_max: f64,
    },

    #[error("Invalid hexagon radius: {0} (must be a positive number of meters)")]
    InvalidRadius(f64),
}
