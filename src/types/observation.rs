//! Time-series records: fetched observations, model predictions, and the
//! combined forecast outcome handed to a presentation layer.

use chrono::NaiveDate;
use serde::Serialize;

/// One dated rainfall measurement at a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    /// Measured value in the unit the service reports (mm for rainfall).
    pub value: f64,
}

/// One model output for a forecast-window date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub date: NaiveDate,
    pub value: f64,
}

/// A fetched value series for one station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationSeries {
    pub station_id: String,
    /// Observations in whatever order the service returned them; callers
    /// needing chronological order must sort.
    pub observations: Vec<Observation>,
    /// Records dropped for a missing or unparseable date or value.
    pub skipped_records: usize,
}

impl ObservationSeries {
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Everything a presentation layer needs from one forecast request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastOutcome {
    /// The resolved nearest station.
    pub station_id: String,
    /// One prediction per forecast-window day, in date order.
    pub predicted: Vec<Prediction>,
    /// Recent actual observations for visual comparison, sorted by date.
    /// Empty when the actuals fetch failed; that failure never aborts the
    /// forecast.
    pub actuals: Vec<Observation>,
}
