//! Projection between geographic coordinates and screen pixels.

use crate::geometry::Coordinate;
use geo::Coord;
use kurbo::{Point, Size, Vec2};
use std::f64::consts::PI;

/// Equatorial circumference of the Earth in meters.
pub const EARTH_CIRCUMFERENCE_METERS: f64 = 40_075_017.0;

/// Edge length of a map tile in pixels.
pub const TILE_SIZE: f64 = 256.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Zoom range of a [`WebMercatorView`].
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 22.0;

/// Ground distance covered by one screen pixel at `latitude` and `zoom`.
pub fn meters_per_pixel(latitude: f64, zoom: f64) -> f64 {
    EARTH_CIRCUMFERENCE_METERS * latitude.to_radians().cos() / 2f64.powf(zoom + 8.0)
}

/// A map view that converts between coordinates and screen pixels.
pub trait MapProjection {
    /// Current zoom level.
    fn zoom(&self) -> f64;

    /// Convert a coordinate to a screen point.
    fn project(&self, coordinate: Coordinate) -> Point;

    /// Convert a screen point to a coordinate.
    fn unproject(&self, point: Point) -> Coordinate;

    /// Ground distance of one pixel at `latitude` in the current view.
    fn meters_per_pixel(&self, latitude: f64) -> f64 {
        meters_per_pixel(latitude, self.zoom())
    }
}

/// Web Mercator view centered on a coordinate.
///
/// Screen coordinates have their origin at the top-left corner of the
/// viewport, `y` growing downwards.
#[derive(Debug, Clone, PartialEq)]
pub struct WebMercatorView {
    /// Coordinate shown at the viewport center.
    pub center: Coordinate,
    /// Current zoom level.
    pub zoom: f64,
    /// Viewport size in pixels.
    pub viewport: Size,
}

impl Default for WebMercatorView {
    fn default() -> Self {
        Self {
            center: Coord { x: 0.0, y: 0.0 },
            zoom: 0.0,
            viewport: Size::new(TILE_SIZE, TILE_SIZE),
        }
    }
}

impl WebMercatorView {
    /// View at `zoom`, clamped to the zoom levels tiles exist for.
    pub fn new(center: Coordinate, zoom: f64, viewport: Size) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            viewport,
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Coordinate to absolute world pixels at the current zoom.
    fn to_world(&self, coordinate: Coordinate) -> Point {
        let size = self.world_size();
        let lat = coordinate.y.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let sin = lat.sin();
        Point::new(
            (coordinate.x + 180.0) / 360.0 * size,
            (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size,
        )
    }

    /// Absolute world pixels to a coordinate at the current zoom.
    fn coordinate_at(&self, point: Point) -> Coordinate {
        let size = self.world_size();
        let n = PI - 2.0 * PI * point.y / size;
        Coord {
            x: point.x / size * 360.0 - 180.0,
            y: n.sinh().atan().to_degrees(),
        }
    }

    fn viewport_center(&self) -> Vec2 {
        Vec2::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }
}

impl MapProjection for WebMercatorView {
    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn project(&self, coordinate: Coordinate) -> Point {
        let offset = self.to_world(coordinate) - self.to_world(self.center);
        Point::ZERO + self.viewport_center() + offset
    }

    fn unproject(&self, point: Point) -> Coordinate {
        let offset = point.to_vec2() - self.viewport_center();
        self.coordinate_at(self.to_world(self.center) + offset)
    }
}
