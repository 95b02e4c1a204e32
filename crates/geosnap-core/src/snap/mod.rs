//! Snapping algorithms: nearest-point kernel, closest-feature selection,
//! vertex-priority resolution and axis guides.

mod closest;
mod guides;
mod kernel;
mod priority;

pub use closest::{ClosestFeature, closest};
pub use guides::{GUIDE_EXTENT_DEG, GUIDE_TOLERANCE_DEG, GuideMatch, VertexSet, find_guides};
pub use kernel::{Nearest, distance_km, midpoint, nearest_on_geometry};
pub use priority::{Resolved, resolve};

use serde::{Deserialize, Serialize};

/// What a resolved coordinate latched onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapKind {
    /// Raw pointer coordinate, nothing snapped.
    #[default]
    None,
    /// A point or multi-point member.
    Point,
    /// An endpoint of the nearest segment.
    Vertex,
    /// The midpoint of the nearest segment.
    Midpoint,
    /// The nearest point along an edge.
    Edge,
    /// One or both axes of a guide line.
    Guide,
}
