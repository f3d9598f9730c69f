use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// a WGS84 position. latitude first, matching how the dashboard and the
/// severity source report locations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Coordinate {
        Coordinate { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// geo points are x/y, so longitude comes first.
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(value: Point<f64>) -> Self {
        Coordinate::new(value.y(), value.x())
    }
}

impl From<&Coordinate> for Point<f64> {
    fn from(value: &Coordinate) -> Self {
        value.to_point()
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}
