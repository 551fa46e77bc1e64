//! Meeting-point ranking route handler.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use dabeeha_core::{GeoPoint, rank_by_distance};

use crate::catalog::{self, MEETING_POINTS};
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Query string for ranking: either a GPS fix or a district name.
#[derive(Debug, Deserialize)]
pub struct RankQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub district: Option<String>,
}

/// One ranked meeting point.
#[derive(Debug, Serialize)]
pub struct RankedPoint {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub distance_km: f64,
    /// The nearest point is pre-selected as the checkout default.
    pub default: bool,
}

/// `GET /meeting-points`
///
/// Ranks the designated slaughter points by straight-line distance from
/// the customer's GPS fix, else the chosen district's centroid, else
/// downtown Cairo. Ties keep the catalog order.
pub async fn index(
    State(_state): State<AppState>,
    RequireAuth(_): RequireAuth,
    Query(query): Query<RankQuery>,
) -> Result<Json<Vec<RankedPoint>>> {
    let gps = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
        _ => None,
    };
    let origin = catalog::reference_point(gps, query.district.as_deref());

    let ranked = rank_by_distance(origin, MEETING_POINTS, |p| p.location)
        .into_iter()
        .enumerate()
        .map(|(i, (point, distance_km))| RankedPoint {
            name: point.name,
            lat: point.location.lat,
            lng: point.location.lng,
            distance_km,
            default: i == 0,
        })
        .collect();
    Ok(Json(ranked))
}
