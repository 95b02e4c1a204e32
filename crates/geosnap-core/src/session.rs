//! Snap sessions.
//!
//! A [`SnapSession`] lives for one drawing interaction. It snapshots the
//! candidate features once at start, owns the guide-line state, and resolves
//! each pointer event through [`decide`], a pure function that reports guide
//! changes as data instead of applying them.

use crate::geometry::Coordinate;
use crate::input::PointerEvent;
use crate::options::SnapOptions;
use crate::projection::MapProjection;
use crate::snap::{
    GUIDE_TOLERANCE_DEG, GuideMatch, SnapKind, VertexSet, closest, find_guides, resolve,
};
use crate::store::{
    Feature, FeatureId, FeatureStore, HORIZONTAL_GUIDE_ID, VERTICAL_GUIDE_ID, snap_candidates,
};
use geo::Coord;

/// The two guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideAxis {
    /// Constant longitude.
    Vertical,
    /// Constant latitude.
    Horizontal,
}

impl GuideAxis {
    /// Reserved feature id of this guide.
    pub fn id(self) -> FeatureId {
        match self {
            GuideAxis::Vertical => VERTICAL_GUIDE_ID,
            GuideAxis::Horizontal => HORIZONTAL_GUIDE_ID,
        }
    }
}

/// A guide line: two endpoints and a visibility flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideLine {
    pub coordinates: [Coordinate; 2],
    pub visible: bool,
}

impl Default for GuideLine {
    fn default() -> Self {
        let origin = Coord { x: 0.0, y: 0.0 };
        Self {
            coordinates: [origin, origin],
            visible: false,
        }
    }
}

/// Guide lines owned by a session, updated in place across events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideState {
    vertical: GuideLine,
    horizontal: GuideLine,
}

impl GuideState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self, axis: GuideAxis) -> &GuideLine {
        match axis {
            GuideAxis::Vertical => &self.vertical,
            GuideAxis::Horizontal => &self.horizontal,
        }
    }

    fn line_mut(&mut self, axis: GuideAxis) -> &mut GuideLine {
        match axis {
            GuideAxis::Vertical => &mut self.vertical,
            GuideAxis::Horizontal => &mut self.horizontal,
        }
    }

    pub fn set_endpoints(&mut self, axis: GuideAxis, coordinates: [Coordinate; 2]) {
        self.line_mut(axis).coordinates = coordinates;
    }

    pub fn set_visibility(&mut self, vertical: bool, horizontal: bool) {
        self.vertical.visible = vertical;
        self.horizontal.visible = horizontal;
    }

    pub fn hide(&mut self) {
        self.set_visibility(false, false);
    }

    pub fn show_vertical(&self) -> bool {
        self.vertical.visible
    }

    pub fn show_horizontal(&self) -> bool {
        self.horizontal.visible
    }
}

/// Draws guide lines.
pub trait GuideRenderer {
    /// Draw or hide the guide with the given reserved id.
    fn update_guide(&mut self, id: FeatureId, endpoints: [Coordinate; 2], visible: bool);
}

/// Candidate features and their vertices, captured at interaction start.
#[derive(Debug, Clone, Default)]
pub struct SnapSnapshot {
    candidates: Vec<Feature>,
    vertices: VertexSet,
}

impl SnapSnapshot {
    /// Capture every feature except guides and the one being edited.
    pub fn build<S: FeatureStore + ?Sized>(store: &S, editing: Option<FeatureId>) -> Self {
        Self::from_candidates(snap_candidates(store, editing))
    }

    pub fn from_candidates(candidates: Vec<Feature>) -> Self {
        let vertices = VertexSet::from_features(&candidates);
        Self {
            candidates,
            vertices,
        }
    }

    pub fn candidates(&self) -> &[Feature] {
        &self.candidates
    }

    pub fn vertices(&self) -> &VertexSet {
        &self.vertices
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// How an event changes the guide lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuideUpdate {
    /// Leave guides as they are.
    Unchanged,
    /// Hide both guides.
    Hide,
    /// Show the matched guides at these endpoints and hide the others.
    Set {
        vertical: Option<[Coordinate; 2]>,
        horizontal: Option<[Coordinate; 2]>,
    },
}

impl GuideUpdate {
    fn from_match(matched: &GuideMatch, query: Coordinate) -> Self {
        GuideUpdate::Set {
            vertical: matched.vertical_endpoints(query),
            horizontal: matched.horizontal_endpoints(query),
        }
    }
}

/// Outcome of resolving one pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapDecision {
    /// Resolved coordinate.
    pub coordinate: Coordinate,
    /// What the coordinate latched onto.
    pub kind: SnapKind,
    /// Feature snapped to, for feature snaps.
    pub feature: Option<FeatureId>,
    /// Distance from the pointer to the nearest feature, when one was measured.
    pub distance_km: Option<f64>,
    /// Guide changes to apply.
    pub guides: GuideUpdate,
}

impl SnapDecision {
    fn raw(coordinate: Coordinate, guides: GuideUpdate) -> Self {
        Self {
            coordinate,
            kind: SnapKind::None,
            feature: None,
            distance_km: None,
            guides,
        }
    }
}

/// Resolve a pointer event against a candidate snapshot.
///
/// Bypassed events and empty snapshots return the raw coordinate. Otherwise a
/// feature match within the pixel tolerance wins, then any guide match, then
/// the raw coordinate.
pub fn decide<P: MapProjection + ?Sized>(
    snapshot: &SnapSnapshot,
    options: &SnapOptions,
    event: &PointerEvent,
    projection: &P,
) -> SnapDecision {
    let raw = event.lng_lat;

    if event.bypasses_snapping() {
        return SnapDecision::raw(raw, GuideUpdate::Hide);
    }
    if snapshot.is_empty() {
        return SnapDecision::raw(raw, GuideUpdate::Unchanged);
    }

    let mut feature_snap = None;
    if options.snap {
        let Some(hit) = closest(raw, &snapshot.candidates) else {
            return SnapDecision::raw(raw, GuideUpdate::Unchanged);
        };
        let resolved = resolve(&hit.nearest, &options.snap_options);
        let tolerance_m =
            options.snap_options.snap_px * projection.meters_per_pixel(resolved.coordinate.y);
        feature_snap = Some((hit, resolved, tolerance_m));
    }

    let mut matched = GuideMatch::default();
    let mut guides = GuideUpdate::Unchanged;
    if options.guides {
        matched = find_guides(&snapshot.vertices, raw, GUIDE_TOLERANCE_DEG);
        guides = GuideUpdate::from_match(&matched, raw);
    }

    if let Some((hit, resolved, tolerance_m)) = feature_snap {
        let distance_km = hit.nearest.distance_km;
        if distance_km * 1000.0 < tolerance_m {
            return SnapDecision {
                coordinate: resolved.coordinate,
                kind: resolved.kind,
                feature: Some(hit.feature.id),
                distance_km: Some(distance_km),
                guides,
            };
        }
    }

    let distance_km = feature_snap.map(|(hit, _, _)| hit.nearest.distance_km);
    if !matched.is_empty() {
        return SnapDecision {
            coordinate: matched.apply(raw),
            kind: SnapKind::Guide,
            feature: None,
            distance_km,
            guides,
        };
    }

    SnapDecision {
        distance_km,
        ..SnapDecision::raw(raw, guides)
    }
}

/// Snapping state for one drawing interaction.
#[derive(Debug, Clone)]
pub struct SnapSession {
    options: SnapOptions,
    editing: Option<FeatureId>,
    snapshot: SnapSnapshot,
    guides: GuideState,
}

impl SnapSession {
    /// Start an interaction, capturing the current candidates from `store`.
    ///
    /// `editing` names the feature being drawn or edited, which never snaps to
    /// itself.
    pub fn start<S: FeatureStore + ?Sized>(
        store: &S,
        editing: Option<FeatureId>,
        options: SnapOptions,
    ) -> Self {
        let snapshot = SnapSnapshot::build(store, editing);
        log::debug!(
            "Snap session started: {} candidates, {} vertices",
            snapshot.candidates.len(),
            snapshot.vertices.len()
        );
        Self {
            options,
            editing,
            snapshot,
            guides: GuideState::new(),
        }
    }

    /// Recapture the candidates, e.g. after the store changed between
    /// interactions.
    pub fn refresh<S: FeatureStore + ?Sized>(&mut self, store: &S) {
        self.snapshot = SnapSnapshot::build(store, self.editing);
        log::debug!(
            "Snap candidates refreshed: {} candidates",
            self.snapshot.candidates.len()
        );
    }

    /// Resolve a pointer event to a coordinate, updating the guides.
    pub fn snap<P: MapProjection + ?Sized>(
        &mut self,
        event: &PointerEvent,
        projection: &P,
    ) -> Coordinate {
        self.snap_decision(event, projection).coordinate
    }

    /// Resolve a pointer event, updating the guides, and report the full
    /// decision.
    pub fn snap_decision<P: MapProjection + ?Sized>(
        &mut self,
        event: &PointerEvent,
        projection: &P,
    ) -> SnapDecision {
        let decision = decide(&self.snapshot, &self.options, event, projection);
        self.apply_guides(&decision.guides);
        log::trace!(
            "Snapped ({}, {}) -> ({}, {}) [{:?}]",
            event.lng_lat.x,
            event.lng_lat.y,
            decision.coordinate.x,
            decision.coordinate.y,
            decision.kind
        );
        decision
    }

    fn apply_guides(&mut self, update: &GuideUpdate) {
        match *update {
            GuideUpdate::Unchanged => {}
            GuideUpdate::Hide => self.guides.hide(),
            GuideUpdate::Set {
                vertical,
                horizontal,
            } => {
                if let Some(endpoints) = vertical {
                    self.guides.set_endpoints(GuideAxis::Vertical, endpoints);
                }
                if let Some(endpoints) = horizontal {
                    self.guides.set_endpoints(GuideAxis::Horizontal, endpoints);
                }
                self.guides
                    .set_visibility(vertical.is_some(), horizontal.is_some());
            }
        }
    }

    /// End the interaction: hide both guides.
    pub fn stop(&mut self) {
        self.guides.hide();
    }

    /// Push the current guide state to a renderer.
    pub fn render_guides<R: GuideRenderer + ?Sized>(&self, renderer: &mut R) {
        for axis in [GuideAxis::Vertical, GuideAxis::Horizontal] {
            let line = self.guides.line(axis);
            renderer.update_guide(axis.id(), line.coordinates, line.visible);
        }
    }

    pub fn options(&self) -> &SnapOptions {
        &self.options
    }

    pub fn editing(&self) -> Option<FeatureId> {
        self.editing
    }

    pub fn snapshot(&self) -> &SnapSnapshot {
        &self.snapshot
    }

    pub fn guides(&self) -> &GuideState {
        &self.guides
    }
}
