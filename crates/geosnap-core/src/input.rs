//! Pointer input consumed by the snapping engine.

use crate::geometry::Coordinate;
use geo::Coord;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Holding Alt places the raw pointer coordinate without snapping.
    pub fn bypasses_snapping(&self) -> bool {
        self.alt
    }
}

/// A pointer move, drag or click at a geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Pointer position.
    pub lng_lat: Coordinate,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Event at `lng`, `lat` with no modifiers held.
    pub fn new(lng: f64, lat: f64) -> Self {
        Self::at(Coord { x: lng, y: lat })
    }

    pub fn at(lng_lat: Coordinate) -> Self {
        Self {
            lng_lat,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if snapping should be skipped for this event.
    pub fn bypasses_snapping(&self) -> bool {
        self.modifiers.bypasses_snapping()
    }
}
