//! GeoSnap Core Library
//!
//! Point snapping for interactive map drawing. Given a pointer position,
//! decides whether to latch onto a nearby vertex, segment, midpoint or
//! axis-aligned guide, and reports the resolved coordinate together with the
//! guide lines to show.

pub mod geometry;
pub mod input;
pub mod options;
pub mod projection;
pub mod session;
pub mod snap;
pub mod store;

pub use geometry::{Coordinate, Geometry, GeometryError};
pub use input::{Modifiers, PointerEvent};
pub use options::{OptionsError, SnapOptions, SnapTuning};
pub use projection::{MapProjection, WebMercatorView, meters_per_pixel};
pub use session::{
    GuideAxis, GuideLine, GuideRenderer, GuideState, GuideUpdate, SnapDecision, SnapSession,
    SnapSnapshot, decide,
};
pub use snap::{SnapKind, closest, find_guides, nearest_on_geometry, resolve};
pub use store::{
    Feature, FeatureId, FeatureStore, HORIZONTAL_GUIDE_ID, MemoryFeatureStore, StoreError,
    VERTICAL_GUIDE_ID, is_guide_id,
};
