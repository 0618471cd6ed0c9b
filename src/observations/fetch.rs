//! Per-station daily value series from the HCDP API.

use crate::api::error::ApiError;
use crate::api::record::coerce_f64;
use crate::api::{HcdpApi, DEFAULT_PAGE_LIMIT};
use crate::types::observation::{Observation, ObservationSeries};
use crate::types::window::DateWindow;
use chrono::NaiveDate;
use log::info;
use serde_json::{json, Map, Value};
use std::sync::Arc;

const VALUE_QUERY_NAME: &str = "hcdp_station_value";
const DATATYPE_RAINFALL: &str = "rainfall";
const PRODUCTION_TAG: &str = "new";
const PERIOD_DAY: &str = "day";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Server-side interpolation mode applied before values are returned. The
/// service fills gaps itself; this client only names the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillPolicy {
    /// Gaps partially interpolated by the service.
    #[default]
    Partial,
    /// Values exactly as produced, gaps left in place.
    Raw,
}

impl FillPolicy {
    fn as_str(self) -> &'static str {
        match self {
            FillPolicy::Partial => "partial",
            FillPolicy::Raw => "raw",
        }
    }
}

/// One inclusive-range series request for a single station.
#[derive(Debug, Clone)]
pub struct SeriesQuery {
    pub station_id: String,
    pub window: DateWindow,
    pub fill: FillPolicy,
}

pub struct SeriesFetcher {
    api: Arc<HcdpApi>,
}

impl SeriesFetcher {
    pub fn new(api: Arc<HcdpApi>) -> Self {
        SeriesFetcher { api }
    }

    /// Fetches all daily rainfall records for one station over an inclusive
    /// date range.
    ///
    /// Observations come back in whatever order the service produced them.
    /// Callers needing chronological order sort themselves; regression
    /// fitting does not care, so the training path never sorts.
    ///
    /// An empty series is a valid outcome here, distinct from a fetch error;
    /// the caller decides whether empty data is fatal.
    pub async fn fetch(&self, query: &SeriesQuery) -> Result<ObservationSeries, ApiError> {
        let mut filters = Map::new();
        filters.insert("station_id".into(), Value::from(query.station_id.as_str()));
        filters.insert("datatype".into(), Value::from(DATATYPE_RAINFALL));
        filters.insert("production".into(), Value::from(PRODUCTION_TAG));
        filters.insert("period".into(), Value::from(PERIOD_DAY));
        filters.insert("fill".into(), Value::from(query.fill.as_str()));
        filters.insert(
            "date".into(),
            json!({
                "$gte": query.window.start.format(DATE_FORMAT).to_string(),
                "$lte": query.window.end.format(DATE_FORMAT).to_string(),
            }),
        );

        let records = self
            .api
            .query_records(VALUE_QUERY_NAME, filters, DEFAULT_PAGE_LIMIT, 0)
            .await?;
        let series = parse_observations(&query.station_id, records);
        info!(
            "Station {}: {} observations between {} and {} ({} records skipped)",
            series.station_id,
            series.observations.len(),
            query.window.start,
            query.window.end,
            series.skipped_records
        );
        Ok(series)
    }
}

/// Turns raw value records into observations.
///
/// Records without a parseable `date` or `value` are dropped and counted;
/// per-record malformation is tolerated by policy and never escalates to a
/// request-level failure. Service order is preserved.
pub(crate) fn parse_observations(
    station_id: &str,
    records: Vec<Map<String, Value>>,
) -> ObservationSeries {
    let mut observations = Vec::with_capacity(records.len());
    let mut skipped_records = 0;
    for record in &records {
        match parse_observation(record) {
            Some(observation) => observations.push(observation),
            None => skipped_records += 1,
        }
    }
    ObservationSeries {
        station_id: station_id.to_string(),
        observations,
        skipped_records,
    }
}

fn parse_observation(record: &Map<String, Value>) -> Option<Observation> {
    let date = record.get("date")?.as_str()?;
    let date = NaiveDate::parse_from_str(date, DATE_FORMAT).ok()?;
    let value = coerce_f64(record.get("value")?)?;
    Some(Observation { date, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn values_parse_from_strings_and_numbers() {
        let series = parse_observations(
            "1094",
            vec![
                record(json!({"date": "2025-04-03", "value": "1.25"})),
                record(json!({"date": "2025-04-04", "value": 0.0})),
            ],
        );
        assert_eq!(series.station_id, "1094");
        assert_eq!(series.observations.len(), 2);
        assert_eq!(series.observations[0].value, 1.25);
        assert_eq!(series.observations[1].value, 0.0);
        assert_eq!(series.skipped_records, 0);
    }

    #[test]
    fn malformed_records_are_dropped_and_counted() {
        let series = parse_observations(
            "1094",
            vec![
                record(json!({"date": "2025-04-03", "value": "1.0"})),
                // no value at all
                record(json!({"date": "2025-04-04"})),
                // value present but not numeric
                record(json!({"date": "2025-04-05", "value": "trace"})),
                // unparseable date
                record(json!({"date": "04/06/2025", "value": "0.5"})),
            ],
        );
        assert_eq!(series.observations.len(), 1);
        assert_eq!(series.skipped_records, 3);
    }

    #[test]
    fn service_order_is_preserved() {
        let series = parse_observations(
            "1094",
            vec![
                record(json!({"date": "2025-04-05", "value": "0.3"})),
                record(json!({"date": "2025-04-03", "value": "0.1"})),
                record(json!({"date": "2025-04-04", "value": "0.2"})),
            ],
        );
        let days: Vec<u32> = series
            .observations
            .iter()
            .map(|o| chrono::Datelike::day(&o.date))
            .collect();
        assert_eq!(days, vec![5, 3, 4], "fetch must not sort");
    }

    #[test]
    fn empty_result_is_valid_but_useless() {
        let series = parse_observations("1094", vec![]);
        assert!(series.is_empty());
        assert_eq!(series.skipped_records, 0);
    }
}
