//! Vertex-priority resolution of a nearest-point match.

use super::SnapKind;
use super::kernel::{Nearest, distance_km, midpoint};
use crate::geometry::Coordinate;
use crate::options::SnapTuning;

/// Coordinate chosen for a nearest-point match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolved {
    pub coordinate: Coordinate,
    pub kind: SnapKind,
}

/// Decide between the raw nearest point and a nearby vertex or midpoint.
///
/// Point matches snap straight to the point. On a segment `A`-`B` with
/// nearest point `C`, the nearer endpoint (or the midpoint, when enabled and
/// strictly nearer than both endpoints) wins if it lies within the priority
/// distance of `C`.
pub fn resolve(nearest: &Nearest, tuning: &SnapTuning) -> Resolved {
    let Some([a, b]) = nearest.segment else {
        return Resolved {
            coordinate: nearest.coordinate,
            kind: SnapKind::Point,
        };
    };

    let c = nearest.coordinate;
    let distance_a = distance_km(a, c);
    let distance_b = distance_km(b, c);

    let (mut vertex, mut vertex_distance) = if distance_a < distance_b {
        (a, distance_a)
    } else {
        (b, distance_b)
    };
    let mut kind = SnapKind::Vertex;

    if tuning.snap_to_mid_points {
        let m = midpoint(a, b);
        let distance_m = distance_km(m, c);
        if distance_m < distance_a && distance_m < distance_b {
            vertex = m;
            vertex_distance = distance_m;
            kind = SnapKind::Midpoint;
        }
    }

    if vertex_distance < tuning.snap_vertex_priority_distance {
        Resolved {
            coordinate: vertex,
            kind,
        }
    } else {
        Resolved {
            coordinate: c,
            kind: SnapKind::Edge,
        }
    }
}
