//! Rank the designated slaughter meeting points from the command line.

use dabeeha_core::{GeoPoint, rank_by_distance};
use dabeeha_server::catalog::{self, MEETING_POINTS};

/// Print the meeting points ranked by distance from the given origin.
///
/// Preference order for the origin matches the server: GPS fix, then
/// district centroid, then downtown Cairo.
#[allow(clippy::print_stdout)]
pub fn run(lat: Option<f64>, lng: Option<f64>, district: Option<&str>) {
    let gps = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };
    let origin = catalog::reference_point(gps, district);

    println!("Ranking from ({:.4}, {:.4}):", origin.lat, origin.lng);
    for (i, (point, distance_km)) in rank_by_distance(origin, MEETING_POINTS, |p| p.location)
        .into_iter()
        .enumerate()
    {
        let marker = if i == 0 { " (default)" } else { "" };
        println!("{:>2}. {:5.1} km  {}{marker}", i + 1, distance_km, point.name);
    }
}
