//! Selection of the closest candidate feature.

use super::kernel::{Nearest, improves, nearest_on_geometry};
use crate::geometry::Coordinate;
use crate::store::Feature;

/// The nearest match across all candidates, with its source feature.
#[derive(Debug, Clone, Copy)]
pub struct ClosestFeature<'a> {
    pub feature: &'a Feature,
    pub nearest: Nearest,
}

/// Scan `candidates` in order and keep the minimum-distance match.
///
/// Equal distances resolve to the earliest candidate. Candidates the kernel
/// cannot measure are skipped. Returns `None` for an empty list.
pub fn closest<'a>(query: Coordinate, candidates: &'a [Feature]) -> Option<ClosestFeature<'a>> {
    let mut best: Option<ClosestFeature<'a>> = None;
    for feature in candidates {
        let Some(nearest) = nearest_on_geometry(query, &feature.geometry) else {
            log::trace!("Feature {} has no snappable geometry", feature.id);
            continue;
        };
        if improves(nearest.distance_km, best.map(|b| b.nearest.distance_km)) {
            best = Some(ClosestFeature { feature, nearest });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use geo::Coord;

    fn c(x: f64, y: f64) -> Coordinate {
        Coord { x, y }
    }

    #[test]
    fn test_empty_candidates() {
        assert!(closest(c(0.0, 0.0), &[]).is_none());
    }

    #[test]
    fn test_picks_minimum_distance() {
        let far = Feature::new(Geometry::Point(c(1.0, 1.0)));
        let near = Feature::new(Geometry::LineString(vec![c(0.0, 0.1), c(1.0, 0.1)]));
        let candidates = vec![far, near.clone()];

        let best = closest(c(0.5, 0.0), &candidates).unwrap();
        assert_eq!(best.feature.id, near.id);
        assert!((best.nearest.coordinate.y - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_ties_resolve_to_first_candidate() {
        let first = Feature::new(Geometry::Point(c(0.0, 0.1)));
        let second = Feature::new(Geometry::Point(c(0.0, 0.1)));
        let candidates = vec![first.clone(), second];

        let best = closest(c(0.0, 0.0), &candidates).unwrap();
        assert_eq!(best.feature.id, first.id);
    }

    #[test]
    fn test_malformed_candidate_cannot_win() {
        let broken = Feature::new(Geometry::LineString(vec![]));
        let nan = Feature::new(Geometry::Point(c(f64::NAN, f64::NAN)));
        let good = Feature::new(Geometry::Point(c(3.0, 3.0)));
        let candidates = vec![broken, nan, good.clone()];

        let best = closest(c(0.0, 0.0), &candidates).unwrap();
        assert_eq!(best.feature.id, good.id);
    }

    #[test]
    fn test_only_malformed_candidates() {
        let candidates = vec![Feature::new(Geometry::MultiPoint(vec![]))];
        assert!(closest(c(0.0, 0.0), &candidates).is_none());
    }
}
