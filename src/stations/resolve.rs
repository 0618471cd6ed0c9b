//! Nearest-station selection over the parsed directory.

use crate::stations::error::StationError;
use crate::types::station::{LatLon, Station};
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// Picks the station geographically closest to `query`.
///
/// Distance is squared planar Euclidean over raw degree coordinates. That is
/// not geodesic, but at the sub-regional scale of the Hawaiian archipelago
/// the distortion is small, and correcting it would change which station
/// wins borderline queries, so the approximation stays.
///
/// Stations without parseable coordinates are skipped, never errors.
/// Equidistant stations break to the first one encountered in map iteration
/// order, which is not stable across runs; callers must not rely on tie
/// order.
pub fn nearest_station(
    query: LatLon,
    stations: &HashMap<String, Station>,
) -> Result<&Station, StationError> {
    let mut best: Option<(&Station, OrderedFloat<f64>)> = None;
    for station in stations.values() {
        let Some(location) = station.location else {
            continue;
        };
        let distance = OrderedFloat(degree_distance_sq(query, location));
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((station, distance)),
        }
    }
    best.map(|(station, _)| station)
        .ok_or(StationError::NoStationFound)
}

/// Squared distance in degree space: longitude is the x axis, latitude the y
/// axis. Squaring preserves the ordering, so no square root is taken.
fn degree_distance_sq(a: LatLon, b: LatLon) -> f64 {
    let dx = a.longitude - b.longitude;
    let dy = a.latitude - b.latitude;
    dx * dx + dy * dy
}
