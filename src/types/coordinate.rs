// src/types/coordinate.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in degrees.
///
/// Real coordinates live in `[-90, 90] x [-180, 180]`. Anything outside that
/// range, most notably [`LatLng::INVALID`], stands for "no coordinate".
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Sentinel for an absent or unusable coordinate.
    pub const INVALID: LatLng = LatLng {
        lat: -91.0,
        lng: -181.0,
    };

    /// Creates a new `LatLng`. No range check is performed; use
    /// [`is_valid`](Self::is_valid) for that.
    pub const fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    /// Returns `true` if latitude is within -90..=90 and longitude within
    /// -180..=180. NaN components are never valid.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }
}

impl Default for LatLng {
    fn default() -> Self {
        LatLng::INVALID
    }
}

/// Formats as `lat,lng` with eight fixed decimals, the form the API expects
/// for reverse queries and proximity hints.
impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8},{:.8}", self.lat, self.lng)
    }
}

impl From<(f64, f64)> for LatLng {
    fn from((lat, lng): (f64, f64)) -> Self {
        LatLng { lat, lng }
    }
}

/// The extent of a result, as reported by the server.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub northeast: LatLng,
    pub southwest: LatLng,
}

impl Bounds {
    pub fn new(northeast: LatLng, southwest: LatLng) -> Self {
        Bounds {
            northeast,
            southwest,
        }
    }

    /// Whether `point` falls inside this box. Boxes crossing the
    /// antimeridian (southwest.lng > northeast.lng) are handled.
    pub fn contains(&self, point: LatLng) -> bool {
        if !(self.southwest.lat..=self.northeast.lat).contains(&point.lat) {
            return false;
        }
        if self.southwest.lng <= self.northeast.lng {
            (self.southwest.lng..=self.northeast.lng).contains(&point.lng)
        } else {
            point.lng >= self.southwest.lng || point.lng <= self.northeast.lng
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_origin_are_valid() {
        for (lat, lng) in [
            (0.0, 0.0),
            (90.0, 180.0),
            (-90.0, -180.0),
            (90.0, -180.0),
            (-90.0, 180.0),
            (51.5007, -0.1246),
        ] {
            assert!(LatLng::new(lat, lng).is_valid(), "({lat}, {lng})");
        }
    }

    #[test]
    fn out_of_range_is_invalid() {
        for (lat, lng) in [
            (90.000001, 0.0),
            (-90.5, 0.0),
            (0.0, 180.1),
            (0.0, -181.0),
            (f64::NAN, 0.0),
            (0.0, f64::INFINITY),
        ] {
            assert!(!LatLng::new(lat, lng).is_valid(), "({lat}, {lng})");
        }
    }

    #[test]
    fn sentinel_is_default_and_invalid() {
        assert!(!LatLng::INVALID.is_valid());
        assert_eq!(LatLng::default(), LatLng::INVALID);
    }

    #[test]
    fn display_uses_eight_decimals() {
        assert_eq!(
            LatLng::new(51.5, -0.12).to_string(),
            "51.50000000,-0.12000000"
        );
    }

    #[test]
    fn bounds_contains_across_antimeridian() {
        let normal = Bounds::new(LatLng::new(10.0, 10.0), LatLng::new(0.0, 0.0));
        assert!(normal.contains(LatLng::new(5.0, 5.0)));
        assert!(!normal.contains(LatLng::new(5.0, 11.0)));

        let wrapped = Bounds::new(LatLng::new(10.0, -170.0), LatLng::new(0.0, 170.0));
        assert!(wrapped.contains(LatLng::new(5.0, 175.0)));
        assert!(wrapped.contains(LatLng::new(5.0, -175.0)));
        assert!(!wrapped.contains(LatLng::new(5.0, 0.0)));
    }
}
