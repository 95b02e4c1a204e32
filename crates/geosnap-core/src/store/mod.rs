//! Feature store abstraction.
//!
//! The snapping engine reads drawn features through [`FeatureStore`]; it never
//! writes them back.

mod memory;

pub use memory::MemoryFeatureStore;

use crate::geometry::Geometry;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a drawn feature.
pub type FeatureId = Uuid;

/// Reserved id of the vertical guide line.
pub const VERTICAL_GUIDE_ID: FeatureId = Uuid::from_u128(0x67d6_1e00_0000_4000_8000_0000_0000_0001);

/// Reserved id of the horizontal guide line.
pub const HORIZONTAL_GUIDE_ID: FeatureId =
    Uuid::from_u128(0x67d6_1e00_0000_4000_8000_0000_0000_0002);

/// Check if `id` names one of the guide lines. Guides are never snap candidates.
pub fn is_guide_id(id: FeatureId) -> bool {
    id == VERTICAL_GUIDE_ID || id == HORIZONTAL_GUIDE_ID
}

/// A drawn feature: an id and its geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: FeatureId,
    pub geometry: Geometry,
}

impl Feature {
    /// Create a feature with a fresh id.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            geometry,
        }
    }

    /// Create a feature with a specific id.
    pub fn with_id(id: FeatureId, geometry: Geometry) -> Self {
        Self { id, geometry }
    }
}

/// Feature store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Feature not found: {0}")]
    NotFound(FeatureId),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for feature store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Read access to the current set of drawn features.
///
/// Implementations must return features in a stable order: equal-distance
/// snap matches resolve to the earliest feature.
pub trait FeatureStore {
    /// All features, in insertion order.
    fn features(&self) -> Vec<&Feature>;

    /// Look up a single feature.
    fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features().into_iter().find(|f| f.id == id)
    }
}

/// Snapshot of the features eligible for snapping.
///
/// Drops the guide lines and the feature currently being edited.
pub fn snap_candidates<S: FeatureStore + ?Sized>(
    store: &S,
    editing: Option<FeatureId>,
) -> Vec<Feature> {
    store
        .features()
        .into_iter()
        .filter(|f| !is_guide_id(f.id) && Some(f.id) != editing)
        .cloned()
        .collect()
}
