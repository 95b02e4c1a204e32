//! In-memory feature store.

use super::{Feature, FeatureId, FeatureStore, StoreError, StoreResult};
use crate::geometry::Geometry;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Ordered in-memory feature store.
#[derive(Debug, Clone, Default)]
pub struct MemoryFeatureStore {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<Value>,
}

impl MemoryFeatureStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a geometry under a fresh id.
    pub fn add(&mut self, geometry: Geometry) -> FeatureId {
        let feature = Feature::new(geometry);
        let id = feature.id;
        self.features.push(feature);
        id
    }

    /// Insert a feature, replacing an existing one with the same id in place.
    pub fn insert(&mut self, feature: Feature) {
        match self.features.iter_mut().find(|f| f.id == feature.id) {
            Some(existing) => *existing = feature,
            None => self.features.push(feature),
        }
    }

    /// Remove a feature by id.
    pub fn remove(&mut self, id: FeatureId) -> StoreResult<Feature> {
        let index = self
            .features
            .iter()
            .position(|f| f.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.features.remove(index))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Parse a GeoJSON FeatureCollection.
    ///
    /// Features without a geometry, or whose geometry is malformed or of an
    /// unsupported type, are skipped with a warning. Features without a UUID
    /// id get a fresh one.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let raw: RawCollection =
            serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut store = Self::new();
        for (index, feature) in raw.features.into_iter().enumerate() {
            let Some(geometry) = feature.geometry else {
                log::warn!("Skipping feature #{}: no geometry", index);
                continue;
            };
            let geometry: Geometry = match serde_json::from_value(geometry) {
                Ok(g) => g,
                Err(e) => {
                    log::warn!("Skipping feature #{}: {}", index, e);
                    continue;
                }
            };
            let id = feature
                .id
                .as_ref()
                .and_then(Value::as_str)
                .and_then(|s| Uuid::parse_str(s).ok())
                .unwrap_or_else(|| {
                    log::debug!("Feature #{} has no UUID id, assigning one", index);
                    Uuid::new_v4()
                });
            store.insert(Feature::with_id(id, geometry));
        }

        log::debug!("Loaded {} features", store.len());
        Ok(store)
    }

    /// Load a GeoJSON FeatureCollection from a file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }
}

impl FeatureStore for MemoryFeatureStore {
    fn features(&self) -> Vec<&Feature> {
        self.features.iter().collect()
    }

    fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use std::io::Write;

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "7a4f2c1e-0d3b-4b8a-9e61-2f5c8d9a0b12",
                "properties": {},
                "geometry": {"type": "Point", "coordinates": [2.35, 48.85]}
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "LineString", "coordinates": [[0, 0], [1, 1]]}
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [[[0, 0], [1, 0]], [[0, 1], [1, 1]]]
                }
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "LineString", "coordinates": []}
            },
            {
                "type": "Feature",
                "properties": {},
                "geometry": null
            },
            {
                "type": "Feature",
                "id": 42,
                "geometry": {"type": "GeometryCollection", "geometries": []}
            }
        ]
    }"#;

    #[test]
    fn test_from_json_skips_malformed_features() {
        let store = MemoryFeatureStore::from_json(COLLECTION).unwrap();
        assert_eq!(store.len(), 3);

        let id = Uuid::parse_str("7a4f2c1e-0d3b-4b8a-9e61-2f5c8d9a0b12").unwrap();
        let point = store.get(id).unwrap();
        assert_eq!(point.geometry, Geometry::Point(Coord { x: 2.35, y: 48.85 }));

        let features = store.features();
        assert!(matches!(features[1].geometry, Geometry::LineString(_)));
        assert!(matches!(
            &features[2].geometry,
            Geometry::MultiLineString(lines) if lines.len() == 2
        ));
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        let result = MemoryFeatureStore::from_json("{ not json");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(COLLECTION.as_bytes()).unwrap();

        let store = MemoryFeatureStore::load(file.path()).unwrap();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = MemoryFeatureStore::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut store = MemoryFeatureStore::new();
        let first = store.add(Geometry::Point(Coord { x: 0.0, y: 0.0 }));
        let second = store.add(Geometry::Point(Coord { x: 1.0, y: 1.0 }));

        store.insert(Feature::with_id(first, Geometry::Point(Coord { x: 9.0, y: 9.0 })));

        let ids: Vec<FeatureId> = store.features().iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(
            store.get(first).unwrap().geometry,
            Geometry::Point(Coord { x: 9.0, y: 9.0 })
        );
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryFeatureStore::new();
        let id = store.add(Geometry::Point(Coord { x: 0.0, y: 0.0 }));

        assert!(store.remove(id).is_ok());
        assert!(store.is_empty());
        assert!(matches!(store.remove(id), Err(StoreError::NotFound(_))));
    }
}
