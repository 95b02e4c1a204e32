//! Snap configuration.
//!
//! Options deserialize from the JSON shape used by map drawing front ends:
//!
//! ```json
//! { "snap": true, "guides": false,
//!   "snapOptions": { "snapPx": 50, "snapToMidPoints": true, "snapVertexPriorityDistance": 1.25 } }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default snap tolerance in screen pixels.
pub const DEFAULT_SNAP_PX: f64 = 50.0;

/// Default vertex priority distance in kilometers.
pub const DEFAULT_VERTEX_PRIORITY_KM: f64 = 1.25;

/// Options errors.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Invalid value for {field}: {value}")]
    Invalid { field: &'static str, value: f64 },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level snap options. Immutable for the duration of an interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapOptions {
    /// Snap to nearby features.
    #[serde(default = "enabled")]
    pub snap: bool,
    /// Feature snapping tuning.
    #[serde(default)]
    pub snap_options: SnapTuning,
    /// Show and snap to axis guides.
    #[serde(default = "enabled")]
    pub guides: bool,
}

fn enabled() -> bool {
    true
}

impl Default for SnapOptions {
    fn default() -> Self {
        Self {
            snap: true,
            snap_options: SnapTuning::default(),
            guides: true,
        }
    }
}

/// Feature snapping tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapTuning {
    /// Snap tolerance in screen pixels.
    pub snap_px: f64,
    /// Also consider segment midpoints.
    pub snap_to_mid_points: bool,
    /// Distance in kilometers under which a vertex or midpoint beats the raw
    /// nearest point on an edge.
    pub snap_vertex_priority_distance: f64,
}

impl Default for SnapTuning {
    fn default() -> Self {
        Self {
            snap_px: DEFAULT_SNAP_PX,
            snap_to_mid_points: false,
            snap_vertex_priority_distance: DEFAULT_VERTEX_PRIORITY_KM,
        }
    }
}

impl SnapOptions {
    /// Parse and validate options from JSON.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reject tolerances that cannot be compared against.
    pub fn validate(&self) -> Result<(), OptionsError> {
        let tuning = &self.snap_options;
        if !tuning.snap_px.is_finite() || tuning.snap_px < 0.0 {
            return Err(OptionsError::Invalid {
                field: "snapPx",
                value: tuning.snap_px,
            });
        }
        let priority = tuning.snap_vertex_priority_distance;
        if !priority.is_finite() || priority < 0.0 {
            return Err(OptionsError::Invalid {
                field: "snapVertexPriorityDistance",
                value: priority,
            });
        }
        Ok(())
    }
}
