//! Fetches and caches the HCDP station-metadata directory.

use crate::api::record::{coerce_f64, coerce_string};
use crate::api::{HcdpApi, DEFAULT_PAGE_LIMIT};
use crate::stations::error::StationError;
use crate::types::station::{LatLon, Station, StationSet};
use log::{info, warn};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const METADATA_QUERY_NAME: &str = "hcdp_station_metadata";
/// Metadata entry that names the id column of its own record.
const ID_FIELD_KEY: &str = "id_field";
const LATITUDE_KEY: &str = "lat";
const LONGITUDE_KEY: &str = "lng";

/// The station directory with a time-bounded in-memory cache.
///
/// Station metadata does change (stations are added and retired), so a
/// cached directory is only reused within the configured TTL; a TTL of zero
/// refetches on every request.
pub struct StationDirectory {
    api: Arc<HcdpApi>,
    ttl: Duration,
    cached: Mutex<Option<CacheEntry>>,
}

struct CacheEntry {
    fetched_at: Instant,
    stations: Arc<StationSet>,
}

impl StationDirectory {
    pub fn new(api: Arc<HcdpApi>, ttl: Duration) -> Self {
        StationDirectory {
            api,
            ttl,
            cached: Mutex::new(None),
        }
    }

    /// Returns the full station set, refetching when the cached copy has
    /// expired.
    ///
    /// A directory fetch failure is fatal for the whole forecast request:
    /// nearest-station search needs the complete set, so no partial
    /// directory is ever served.
    pub async fn fetch_all(&self) -> Result<Arc<StationSet>, StationError> {
        // Lock held across the fetch so concurrent requests share one
        // refetch instead of racing the upstream.
        let mut cached = self.cached.lock().await;
        if let Some(entry) = cached.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&entry.stations));
            }
        }

        let records = self
            .api
            .query_records(METADATA_QUERY_NAME, Map::new(), DEFAULT_PAGE_LIMIT, 0)
            .await?;
        let set = Arc::new(parse_stations(records));
        if set.is_empty() {
            warn!("Station directory query returned no usable stations");
        } else {
            info!(
                "Station directory holds {} stations ({} records skipped)",
                set.len(),
                set.skipped_records
            );
        }
        *cached = Some(CacheEntry {
            fetched_at: Instant::now(),
            stations: Arc::clone(&set),
        });
        Ok(set)
    }
}

/// Builds the station map from raw metadata records.
///
/// Each record names its own id column through `id_field`, so the id key is
/// data-driven rather than hardcoded. Records without a resolvable id are
/// dropped and counted. Unparseable coordinates leave the station without a
/// location; the resolver skips those but the metadata is kept.
pub(crate) fn parse_stations(records: Vec<Map<String, Value>>) -> StationSet {
    let mut stations = HashMap::with_capacity(records.len());
    let mut skipped_records = 0;
    for record in records {
        let Some(id) = station_id(&record) else {
            skipped_records += 1;
            continue;
        };
        let location = station_location(&record);
        stations.insert(
            id.clone(),
            Station {
                id,
                location,
                metadata: record,
            },
        );
    }
    StationSet {
        stations,
        skipped_records,
    }
}

fn station_id(record: &Map<String, Value>) -> Option<String> {
    let id_field = record.get(ID_FIELD_KEY)?.as_str()?;
    coerce_string(record.get(id_field)?)
}

fn station_location(record: &Map<String, Value>) -> Option<LatLon> {
    let latitude = coerce_f64(record.get(LATITUDE_KEY)?)?;
    let longitude = coerce_f64(record.get(LONGITUDE_KEY)?)?;
    Some(LatLon::new(latitude, longitude))
}
