//! Data structures for HCDP weather stations: coordinates, per-station
//! metadata, and the parsed station directory.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A geographical coordinate with named fields.
///
/// The fields are named rather than positional because the distance math
/// consumes longitude and latitude separately; a swapped pair would silently
/// resolve the wrong station.
///
/// # Examples
///
/// ```
/// use hcdp_forecast::LatLon;
///
/// let laie = LatLon::new(21.688333, -157.952500);
/// assert_eq!(laie.latitude, 21.688333);
/// assert_eq!(laie.longitude, -157.952500);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon {
    /// Latitude in decimal degrees (positive for North).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East).
    pub longitude: f64,
}

impl LatLon {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        LatLon {
            latitude,
            longitude,
        }
    }
}

/// A single HCDP weather station.
///
/// Metadata records are self-describing: each names its own id column through
/// an `id_field` entry, so `id` is whatever that column held. The full record
/// is kept alongside the parsed fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    /// The station identifier, taken from the field the record's own
    /// `id_field` names.
    pub id: String,
    /// Parsed coordinates; `None` when the record's lat/lng fields were
    /// missing or unparseable. Such stations are kept but never resolved to.
    pub location: Option<LatLon>,
    /// The metadata record exactly as served.
    pub metadata: Map<String, Value>,
}

/// The parsed station directory for one fetch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationSet {
    pub stations: HashMap<String, Station>,
    /// Metadata records dropped because no id could be resolved. Dropping is
    /// a tolerance policy, not an error.
    pub skipped_records: usize,
}

impl StationSet {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }
}
