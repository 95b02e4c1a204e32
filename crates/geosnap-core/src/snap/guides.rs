//! Axis-aligned guide matching against known vertices.

use crate::geometry::Coordinate;
use crate::store::Feature;
use geo::Coord;

/// Axis proximity, in degrees, for a vertex to raise a guide.
///
/// This is a fixed angular tolerance and is not derived from the pixel
/// tolerance used for feature snapping.
pub const GUIDE_TOLERANCE_DEG: f64 = 0.009;

/// Half-length of a guide line, in degrees along its axis.
pub const GUIDE_EXTENT_DEG: f64 = 10.0;

/// Longitudes and latitudes of every candidate vertex, in feature order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexSet {
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
}

impl VertexSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the vertices of every feature.
    pub fn from_features<'a>(features: impl IntoIterator<Item = &'a Feature>) -> Self {
        let mut set = Self::new();
        for feature in features {
            set.extend(feature.geometry.vertices());
        }
        set
    }

    pub fn extend(&mut self, vertices: impl IntoIterator<Item = Coordinate>) {
        for vertex in vertices {
            self.longitudes.push(vertex.x);
            self.latitudes.push(vertex.y);
        }
    }

    pub fn len(&self) -> usize {
        self.longitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.longitudes.is_empty()
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }
}

/// Recorded axis values the query aligns with.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GuideMatch {
    /// Longitude of the vertical guide.
    pub vertical: Option<f64>,
    /// Latitude of the horizontal guide.
    pub horizontal: Option<f64>,
}

impl GuideMatch {
    pub fn is_empty(&self) -> bool {
        self.vertical.is_none() && self.horizontal.is_none()
    }

    /// Endpoints of the vertical guide, extending north and south of the query.
    pub fn vertical_endpoints(&self, query: Coordinate) -> Option<[Coordinate; 2]> {
        self.vertical.map(|lng| {
            [
                Coord { x: lng, y: query.y + GUIDE_EXTENT_DEG },
                Coord { x: lng, y: query.y - GUIDE_EXTENT_DEG },
            ]
        })
    }

    /// Endpoints of the horizontal guide, extending east and west of the query.
    pub fn horizontal_endpoints(&self, query: Coordinate) -> Option<[Coordinate; 2]> {
        self.horizontal.map(|lat| {
            [
                Coord { x: query.x + GUIDE_EXTENT_DEG, y: lat },
                Coord { x: query.x - GUIDE_EXTENT_DEG, y: lat },
            ]
        })
    }

    /// Replace the matched axis components of `query`.
    pub fn apply(&self, query: Coordinate) -> Coordinate {
        Coord {
            x: self.vertical.unwrap_or(query.x),
            y: self.horizontal.unwrap_or(query.y),
        }
    }
}

fn first_within(values: &[f64], target: f64, tolerance: f64) -> Option<f64> {
    values.iter().copied().find(|v| (v - target).abs() < tolerance)
}

/// Find the first recorded longitude and latitude within `tolerance_deg` of
/// the query. The first match in vertex order is used, not the closest.
pub fn find_guides(vertices: &VertexSet, query: Coordinate, tolerance_deg: f64) -> GuideMatch {
    GuideMatch {
        vertical: first_within(&vertices.longitudes, query.x, tolerance_deg),
        horizontal: first_within(&vertices.latitudes, query.y, tolerance_deg),
    }
}
