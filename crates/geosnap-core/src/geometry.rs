//! Geometry types accepted by the snapping engine.
//!
//! Geometries are read-only inputs: the engine inspects their vertices and
//! boundaries but never edits them. They (de)serialize in GeoJSON shape,
//! `{"type": "LineString", "coordinates": [[lng, lat], ...]}`.

use geo::Coord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A geographic position. `x` is longitude and `y` is latitude, in degrees.
pub type Coordinate = Coord<f64>;

/// Errors raised when reading a geometry from GeoJSON.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Geometry has no coordinates")]
    Empty,
    #[error("Non-finite coordinate: [{0}, {1}]")]
    NonFinite(f64, f64),
    #[error("{kind} needs at least {min} positions, got {got}")]
    TooFewPositions {
        kind: &'static str,
        min: usize,
        got: usize,
    },
    #[error("Unsupported geometry type: {0}")]
    Unsupported(String),
    #[error("Malformed coordinates: {0}")]
    Malformed(String),
}

/// The geometry kinds a snap candidate can have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GeoJsonGeometry", into = "GeoJsonGeometry")]
pub enum Geometry {
    Point(Coordinate),
    MultiPoint(Vec<Coordinate>),
    LineString(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    /// Linear rings, outer ring first.
    Polygon(Vec<Vec<Coordinate>>),
    MultiPolygon(Vec<Vec<Vec<Coordinate>>>),
}

impl Geometry {
    /// GeoJSON type name.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// All coordinates in nesting order (ring by ring, polygon by polygon).
    pub fn vertices(&self) -> Vec<Coordinate> {
        match self {
            Geometry::Point(c) => vec![*c],
            Geometry::MultiPoint(coords) | Geometry::LineString(coords) => coords.clone(),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                lines.iter().flatten().copied().collect()
            }
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().flatten().flatten().copied().collect()
            }
        }
    }

    /// Boundary lines of an areal geometry, one per ring.
    ///
    /// A polygon with a single ring yields exactly one line; holes add one
    /// line each. Multi-polygons contribute every ring of every member in
    /// input order. Non-areal geometries have no boundary.
    pub fn boundary_lines(&self) -> Vec<&[Coordinate]> {
        match self {
            Geometry::Polygon(rings) => rings.iter().map(Vec::as_slice).collect(),
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().flatten().map(Vec::as_slice).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Wire shape of a GeoJSON geometry object.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GeoJsonGeometry {
    #[serde(rename = "type")]
    kind: String,
    coordinates: Value,
}

type RawPosition = Vec<f64>;

fn parse<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, GeometryError> {
    serde_json::from_value(value).map_err(|e| GeometryError::Malformed(e.to_string()))
}

fn position(raw: &[f64]) -> Result<Coordinate, GeometryError> {
    if raw.len() < 2 {
        return Err(GeometryError::TooFewPositions {
            kind: "Position",
            min: 2,
            got: raw.len(),
        });
    }
    let (x, y) = (raw[0], raw[1]);
    if !x.is_finite() || !y.is_finite() {
        return Err(GeometryError::NonFinite(x, y));
    }
    Ok(Coord { x, y })
}

fn positions(raw: &[RawPosition]) -> Result<Vec<Coordinate>, GeometryError> {
    if raw.is_empty() {
        return Err(GeometryError::Empty);
    }
    raw.iter().map(|p| position(p)).collect()
}

/// Line-like sequences need at least one segment.
fn line(kind: &'static str, raw: &[RawPosition]) -> Result<Vec<Coordinate>, GeometryError> {
    let coords = positions(raw)?;
    if coords.len() < 2 {
        return Err(GeometryError::TooFewPositions {
            kind,
            min: 2,
            got: coords.len(),
        });
    }
    Ok(coords)
}

fn rings(raw: &[Vec<RawPosition>]) -> Result<Vec<Vec<Coordinate>>, GeometryError> {
    if raw.is_empty() {
        return Err(GeometryError::Empty);
    }
    raw.iter().map(|ring| line("Ring", ring)).collect()
}

impl TryFrom<GeoJsonGeometry> for Geometry {
    type Error = GeometryError;

    fn try_from(raw: GeoJsonGeometry) -> Result<Self, Self::Error> {
        match raw.kind.as_str() {
            "Point" => {
                let p: RawPosition = parse(raw.coordinates)?;
                Ok(Geometry::Point(position(&p)?))
            }
            "MultiPoint" => {
                let points: Vec<RawPosition> = parse(raw.coordinates)?;
                Ok(Geometry::MultiPoint(positions(&points)?))
            }
            "LineString" => {
                let coords: Vec<RawPosition> = parse(raw.coordinates)?;
                Ok(Geometry::LineString(line("LineString", &coords)?))
            }
            "MultiLineString" => {
                let raw_lines: Vec<Vec<RawPosition>> = parse(raw.coordinates)?;
                if raw_lines.is_empty() {
                    return Err(GeometryError::Empty);
                }
                let lines = raw_lines
                    .iter()
                    .map(|l| line("LineString", l))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Geometry::MultiLineString(lines))
            }
            "Polygon" => {
                let raw_rings: Vec<Vec<RawPosition>> = parse(raw.coordinates)?;
                Ok(Geometry::Polygon(rings(&raw_rings)?))
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<RawPosition>>> = parse(raw.coordinates)?;
                if polygons.is_empty() {
                    return Err(GeometryError::Empty);
                }
                let polygons = polygons
                    .iter()
                    .map(|p| rings(p))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Geometry::MultiPolygon(polygons))
            }
            other => Err(GeometryError::Unsupported(other.to_string())),
        }
    }
}

fn to_value(coords: &[Coordinate]) -> Value {
    Value::Array(coords.iter().map(|c| serde_json::json!([c.x, c.y])).collect())
}

impl From<Geometry> for GeoJsonGeometry {
    fn from(geometry: Geometry) -> Self {
        let kind = geometry.kind_name().to_string();
        let coordinates = match &geometry {
            Geometry::Point(c) => serde_json::json!([c.x, c.y]),
            Geometry::MultiPoint(coords) | Geometry::LineString(coords) => to_value(coords),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                Value::Array(lines.iter().map(|l| to_value(l)).collect())
            }
            Geometry::MultiPolygon(polygons) => Value::Array(
                polygons
                    .iter()
                    .map(|rings| Value::Array(rings.iter().map(|r| to_value(r)).collect()))
                    .collect(),
            ),
        };
        Self { kind, coordinates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coordinate {
        Coord { x, y }
    }

    #[test]
    fn test_parse_line_string() {
        let geometry: Geometry =
            serde_json::from_str(r#"{"type":"LineString","coordinates":[[0,0],[1,1,30]]}"#)
                .unwrap();
        assert_eq!(geometry, Geometry::LineString(vec![c(0.0, 0.0), c(1.0, 1.0)]));
    }

    #[test]
    fn test_parse_rejects_unsupported_type() {
        let result: Result<Geometry, _> =
            serde_json::from_str(r#"{"type":"GeometryCollection","coordinates":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_empty_and_short_lines() {
        let raw = GeoJsonGeometry {
            kind: "LineString".into(),
            coordinates: serde_json::json!([]),
        };
        assert_eq!(Geometry::try_from(raw), Err(GeometryError::Empty));

        let raw = GeoJsonGeometry {
            kind: "LineString".into(),
            coordinates: serde_json::json!([[1.0, 2.0]]),
        };
        assert!(matches!(
            Geometry::try_from(raw),
            Err(GeometryError::TooFewPositions { got: 1, .. })
        ));
    }

    #[test]
    fn test_parse_multi_line_string() {
        let geometry: Geometry = serde_json::from_str(
            r#"{"type":"MultiLineString","coordinates":[[[0,0],[1,0]],[[0,1],[1,1]]]}"#,
        )
        .unwrap();
        assert_eq!(
            geometry,
            Geometry::MultiLineString(vec![
                vec![c(0.0, 0.0), c(1.0, 0.0)],
                vec![c(0.0, 1.0), c(1.0, 1.0)],
            ])
        );
        assert_eq!(geometry.kind_name(), "MultiLineString");
        assert!(geometry.boundary_lines().is_empty());

        let ys: Vec<f64> = geometry.vertices().iter().map(|v| v.y).collect();
        assert_eq!(ys, vec![0.0, 0.0, 1.0, 1.0]);

        let json = serde_json::to_value(&geometry).unwrap();
        assert_eq!(json["type"], "MultiLineString");
        assert_eq!(json["coordinates"][1][0], serde_json::json!([0.0, 1.0]));
    }

    #[test]
    fn test_parse_multi_line_string_rejects_short_member() {
        let raw = GeoJsonGeometry {
            kind: "MultiLineString".into(),
            coordinates: serde_json::json!([[[0.0, 0.0], [1.0, 0.0]], [[2.0, 2.0]]]),
        };
        assert!(matches!(
            Geometry::try_from(raw),
            Err(GeometryError::TooFewPositions { kind: "LineString", got: 1, .. })
        ));

        let raw = GeoJsonGeometry {
            kind: "MultiLineString".into(),
            coordinates: serde_json::json!([]),
        };
        assert_eq!(Geometry::try_from(raw), Err(GeometryError::Empty));
    }

    #[test]
    fn test_serialize_polygon() {
        let polygon = Geometry::Polygon(vec![vec![
            c(0.0, 0.0),
            c(1.0, 0.0),
            c(1.0, 1.0),
            c(0.0, 0.0),
        ]]);
        let json = serde_json::to_value(&polygon).unwrap();
        assert_eq!(json["type"], "Polygon");
        assert_eq!(json["coordinates"][0][2], serde_json::json!([1.0, 1.0]));
    }

    #[test]
    fn test_vertices_flatten_in_order() {
        let multi = Geometry::MultiPolygon(vec![
            vec![vec![c(0.0, 0.0), c(1.0, 0.0)], vec![c(2.0, 2.0), c(3.0, 3.0)]],
            vec![vec![c(5.0, 5.0), c(6.0, 6.0)]],
        ]);
        let xs: Vec<f64> = multi.vertices().iter().map(|v| v.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 5.0, 6.0]);
    }

    #[test]
    fn test_boundary_lines_per_ring() {
        let outer = vec![c(0.0, 0.0), c(4.0, 0.0), c(4.0, 4.0), c(0.0, 0.0)];
        let hole = vec![c(1.0, 1.0), c(2.0, 1.0), c(2.0, 2.0), c(1.0, 1.0)];

        let single = Geometry::Polygon(vec![outer.clone()]);
        assert_eq!(single.boundary_lines().len(), 1);

        let holed = Geometry::Polygon(vec![outer.clone(), hole.clone()]);
        assert_eq!(holed.boundary_lines().len(), 2);

        let multi = Geometry::MultiPolygon(vec![vec![outer, hole.clone()], vec![hole]]);
        assert_eq!(multi.boundary_lines().len(), 3);

        assert!(Geometry::Point(c(0.0, 0.0)).boundary_lines().is_empty());
    }
}
