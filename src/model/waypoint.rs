use serde::{Deserialize, Serialize};

/// Center of Juiz de Fora, where the courier marker rests before a route exists.
pub const DEFAULT_MAP_CENTER: Waypoint = Waypoint {
    lat: -21.7605,
    lng: -43.3503,
};

/// One decoded point on a route, in floating point degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `[lat, lng]` pair as consumed by map markers and polylines.
    pub fn to_pair(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}
