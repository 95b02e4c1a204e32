//! Nearest-point computation for a single candidate geometry.

use crate::geometry::{Coordinate, Geometry};
use geo::{Coord, Distance, Haversine, Point};

/// Closest point of one geometry to a query position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest {
    /// Nearest coordinate on the geometry.
    pub coordinate: Coordinate,
    /// Great-circle distance from the query, in kilometers.
    pub distance_km: f64,
    /// Consecutive vertex pair containing `coordinate`, for line-like geometries.
    pub segment: Option<[Coordinate; 2]>,
    /// Whether the match came from a point-type geometry.
    pub is_point: bool,
}

/// Great-circle distance between two coordinates, in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let haversine = Haversine;
    haversine.distance(Point::from(a), Point::from(b)) / 1000.0
}

/// Great-circle midpoint of two coordinates.
pub fn midpoint(a: Coordinate, b: Coordinate) -> Coordinate {
    let (lon1, lat1) = (a.x.to_radians(), a.y.to_radians());
    let (lon2, lat2) = (b.x.to_radians(), b.y.to_radians());
    let d_lon = lon2 - lon1;

    let bx = lat2.cos() * d_lon.cos();
    let by = lat2.cos() * d_lon.sin();
    let lat = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
    let lon = lon1 + by.atan2(lat1.cos() + bx);

    Coord {
        x: lon.to_degrees(),
        y: lat.to_degrees(),
    }
}

/// A candidate distance wins only if it is finite and strictly below the
/// current best, so the first minimal candidate is kept.
pub(crate) fn improves(distance: f64, best: Option<f64>) -> bool {
    distance.is_finite() && best.is_none_or(|b| distance < b)
}

/// Project `query` onto segment `a`-`b`.
///
/// Works in a local equirectangular frame centered on the query, which is
/// accurate at the scale snapping operates on. Returns the projected point and
/// the clamped segment parameter.
fn project_onto_segment(query: Coordinate, a: Coordinate, b: Coordinate) -> (Coordinate, f64) {
    let scale = query.y.to_radians().cos();
    let (ax, ay) = ((a.x - query.x) * scale, a.y - query.y);
    let (dx, dy) = ((b.x - a.x) * scale, b.y - a.y);
    let len_sq = dx * dx + dy * dy;

    if len_sq <= f64::EPSILON * f64::EPSILON {
        return (a, 0.0);
    }

    let t = (-(ax * dx + ay * dy) / len_sq).clamp(0.0, 1.0);
    let point = if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        Coord {
            x: a.x + t * (b.x - a.x),
            y: a.y + t * (b.y - a.y),
        }
    };
    (point, t)
}

/// Nearest point on a polyline.
#[derive(Debug, Clone, Copy)]
struct LineHit {
    coordinate: Coordinate,
    distance_km: f64,
    /// Index of the vertex the hit is attributed to. A hit on a segment's
    /// end vertex is attributed to that vertex, not to the segment start.
    index: usize,
}

fn nearest_on_line(query: Coordinate, line: &[Coordinate]) -> Option<LineHit> {
    if line.len() < 2 {
        return None;
    }

    let mut best: Option<LineHit> = None;
    for (i, pair) in line.windows(2).enumerate() {
        let (point, t) = project_onto_segment(query, pair[0], pair[1]);
        let distance = distance_km(query, point);
        if improves(distance, best.map(|b| b.distance_km)) {
            best = Some(LineHit {
                coordinate: point,
                distance_km: distance,
                index: if t >= 1.0 { i + 1 } else { i },
            });
        }
    }
    best
}

/// The vertex pair bracketing a hit. A hit on the final vertex shifts left so
/// the pair stays in bounds.
fn segment_at(line: &[Coordinate], index: usize) -> [Coordinate; 2] {
    let start = if index + 1 >= line.len() {
        line.len() - 2
    } else {
        index
    };
    [line[start], line[start + 1]]
}

/// Evaluate every line and keep the first one with minimal distance.
fn nearest_on_lines<'a>(
    query: Coordinate,
    lines: impl IntoIterator<Item = &'a [Coordinate]>,
) -> Option<Nearest> {
    let mut best: Option<(LineHit, &[Coordinate])> = None;
    for line in lines {
        let Some(hit) = nearest_on_line(query, line) else {
            continue;
        };
        if improves(hit.distance_km, best.map(|(b, _)| b.distance_km)) {
            best = Some((hit, line));
        }
    }

    best.map(|(hit, line)| Nearest {
        coordinate: hit.coordinate,
        distance_km: hit.distance_km,
        segment: Some(segment_at(line, hit.index)),
        is_point: false,
    })
}

fn nearest_point(query: Coordinate, points: &[Coordinate]) -> Option<Nearest> {
    let mut best: Option<Nearest> = None;
    for &point in points {
        let distance = distance_km(query, point);
        if improves(distance, best.map(|b| b.distance_km)) {
            best = Some(Nearest {
                coordinate: point,
                distance_km: distance,
                segment: None,
                is_point: true,
            });
        }
    }
    best
}

/// Nearest point of `geometry` to `query`.
///
/// Returns `None` for geometries with nothing to snap to (empty coordinate
/// arrays, lines with a single vertex, non-finite coordinates).
pub fn nearest_on_geometry(query: Coordinate, geometry: &Geometry) -> Option<Nearest> {
    match geometry {
        Geometry::Point(point) => nearest_point(query, std::slice::from_ref(point)),
        Geometry::MultiPoint(points) => nearest_point(query, points),
        Geometry::LineString(coords) => nearest_on_lines(query, [coords.as_slice()]),
        Geometry::MultiLineString(lines) => {
            nearest_on_lines(query, lines.iter().map(Vec::as_slice))
        }
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) => {
            nearest_on_lines(query, geometry.boundary_lines())
        }
    }
}
