//! JSON output for resolved positions.

use geosnap_core::{Coordinate, FeatureId, GuideRenderer, SnapDecision, SnapKind};
use serde::Serialize;

fn pair(c: Coordinate) -> [f64; 2] {
    [c.x, c.y]
}

/// A guide line as drawn after an event.
#[derive(Debug, Serialize)]
pub struct GuideReport {
    pub id: FeatureId,
    pub coordinates: [[f64; 2]; 2],
    pub visible: bool,
}

/// Collects guide updates instead of drawing them.
#[derive(Debug, Default)]
pub struct GuideCollector {
    guides: Vec<GuideReport>,
}

impl GuideCollector {
    pub fn into_guides(self) -> Vec<GuideReport> {
        self.guides
    }
}

impl GuideRenderer for GuideCollector {
    fn update_guide(&mut self, id: FeatureId, endpoints: [Coordinate; 2], visible: bool) {
        self.guides.push(GuideReport {
            id,
            coordinates: [pair(endpoints[0]), pair(endpoints[1])],
            visible,
        });
    }
}

/// Outcome of one pointer position.
#[derive(Debug, Serialize)]
pub struct Report {
    pub query: [f64; 2],
    pub coordinate: [f64; 2],
    pub kind: SnapKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature: Option<FeatureId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub guides: Vec<GuideReport>,
}

impl Report {
    pub fn new(query: Coordinate, decision: &SnapDecision, guides: Vec<GuideReport>) -> Self {
        Self {
            query: pair(query),
            coordinate: pair(decision.coordinate),
            kind: decision.kind,
            feature: decision.feature,
            distance_km: decision.distance_km,
            guides,
        }
    }
}
