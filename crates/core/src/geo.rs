//! Coordinates and great-circle distance.
//!
//! Meeting-point selection only ever compares distances across greater
//! Cairo, so a spherical-earth haversine is plenty of precision.

use serde::{Deserialize, Serialize};

/// Mean earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS-84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in kilometers (haversine).
    ///
    /// Symmetric, and zero for identical points.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2)
            + self.lat.to_radians().cos() * other.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

/// Rank `items` by ascending distance from `origin`.
///
/// The sort is stable: items at equal distance keep their original relative
/// order, so the caller's list order is the tie-break.
pub fn rank_by_distance<T, F>(origin: GeoPoint, items: &[T], location: F) -> Vec<(&T, f64)>
where
    F: Fn(&T) -> GeoPoint,
{
    let mut ranked: Vec<(&T, f64)> = items
        .iter()
        .map(|item| (item, origin.distance_km(&location(item))))
        .collect();
    ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAIRO: GeoPoint = GeoPoint::new(30.0444, 31.2357);
    const MAADI: GeoPoint = GeoPoint::new(29.9602, 31.2569);
    const SHEIKH_ZAYED: GeoPoint = GeoPoint::new(30.0400, 30.9800);

    #[test]
    fn test_distance_to_self_is_zero() {
        assert!(CAIRO.distance_km(&CAIRO).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let pairs = [(CAIRO, MAADI), (CAIRO, SHEIKH_ZAYED), (MAADI, SHEIKH_ZAYED)];
        for (a, b) in pairs {
            let forward = a.distance_km(&b);
            let reverse = b.distance_km(&a);
            assert!((forward - reverse).abs() < 1e-9);
        }
    }

    #[test]
    fn test_distance_magnitude_plausible() {
        // Downtown Cairo to Maadi is roughly 9-10 km as the crow flies.
        let d = CAIRO.distance_km(&MAADI);
        assert!(d > 8.0 && d < 11.0, "unexpected distance {d}");
    }

    #[test]
    fn test_ranking_is_ascending_and_stable() {
        let points = vec![SHEIKH_ZAYED, MAADI, MAADI, CAIRO];
        let ranked = rank_by_distance(CAIRO, &points, |p| *p);

        for window in ranked.windows(2) {
            assert!(window[0].1 <= window[1].1);
        }
        // CAIRO itself is nearest; the two equal MAADI entries keep order.
        assert_eq!(*ranked[0].0, CAIRO);
        assert_eq!(*ranked[1].0, MAADI);
        assert_eq!(*ranked[2].0, MAADI);
    }
}
