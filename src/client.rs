//! Main entry point for the HCDP rainfall-forecast client. It resolves the
//! station nearest a query point and produces a daily rainfall forecast for
//! a target month, alongside recent actual observations for comparison.

use crate::api::HcdpApi;
use crate::config::HcdpConfig;
use crate::error::HcdpError;
use crate::forecast::engine::RainfallModel;
use crate::forecast::error::ForecastError;
use crate::forecast::windows::TargetMonth;
use crate::observations::fetch::{FillPolicy, SeriesFetcher, SeriesQuery};
use crate::stations::directory::StationDirectory;
use crate::stations::resolve::nearest_station;
use crate::types::observation::{ForecastOutcome, Observation, ObservationSeries};
use crate::types::station::LatLon;
use bon::bon;
use log::warn;
use std::fmt::Display;
use std::sync::Arc;

/// The HCDP forecast client.
///
/// Holds one HTTP client plus the station-directory cache; a single `Hcdp`
/// can serve any number of forecast requests and is cheap to share behind an
/// `Arc`. Requests are otherwise independent and carry no shared mutable
/// state.
///
/// # Examples
///
/// ```no_run
/// # use hcdp_forecast::{Hcdp, HcdpConfig, HcdpError, LatLon};
/// # async fn run() -> Result<(), HcdpError> {
/// let client = Hcdp::new(&HcdpConfig::builder().api_token("token").build())?;
/// let outcome = client
///     .forecast_rainfall()
///     .target_month("04/2025")
///     .location(LatLon::new(21.688333, -157.952500))
///     .call()
///     .await?;
/// println!(
///     "station {}: {} predicted days, {} recent actuals",
///     outcome.station_id,
///     outcome.predicted.len(),
///     outcome.actuals.len()
/// );
/// # Ok(())
/// # }
/// ```
pub struct Hcdp {
    directory: StationDirectory,
    fetcher: SeriesFetcher,
}

#[bon]
impl Hcdp {
    pub fn new(config: &HcdpConfig) -> Result<Self, HcdpError> {
        let api = Arc::new(HcdpApi::new(config)?);
        Ok(Hcdp {
            directory: StationDirectory::new(Arc::clone(&api), config.station_cache_ttl),
            fetcher: SeriesFetcher::new(api),
        })
    }

    /// Creates a client from [`HcdpConfig::from_env`].
    pub fn from_env() -> Result<Self, HcdpError> {
        Self::new(&HcdpConfig::from_env()?)
    }

    /// Forecasts daily rainfall for the station nearest to `location`.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.target_month(&str)`: **Required.** The month to forecast, as `MM/YYYY`.
    /// * `.location(LatLon)`: **Required.** The query point to resolve a station for.
    /// * `.fill(FillPolicy)`: Optional. Server-side fill mode. Defaults to [`FillPolicy::Partial`].
    ///
    /// # Stages
    ///
    /// 1. Fetch the station directory and resolve the nearest station; any
    ///    failure here is terminal.
    /// 2. Fetch the 36-month training window and the 4-month actuals window
    ///    concurrently. A training failure (or an empty training series) is
    ///    terminal; an actuals failure degrades to an empty comparison
    ///    series. That asymmetry is deliberate: the forecast is the product,
    ///    the actuals are garnish.
    /// 3. Fit the rainfall model and predict the 3rd-through-last-day of the
    ///    target month.
    ///
    /// # Errors
    ///
    /// Returns [`HcdpError::Forecast`] for an unparseable target month, an
    /// empty training window, or a model failure; [`HcdpError::Station`] if
    /// the directory is unreachable or holds no usable station; and
    /// [`HcdpError::Api`] if the training fetch fails.
    #[builder]
    pub async fn forecast_rainfall(
        &self,
        target_month: &str,
        location: LatLon,
        fill: Option<FillPolicy>,
    ) -> Result<ForecastOutcome, HcdpError> {
        let month = TargetMonth::parse(target_month)?;
        let fill = fill.unwrap_or_default();

        let stations = self.directory.fetch_all().await?;
        let station = nearest_station(location, &stations.stations)?;
        let station_id = station.id.clone();

        let training_query = SeriesQuery {
            station_id: station_id.clone(),
            window: month.training_window(),
            fill,
        };
        let actuals_query = SeriesQuery {
            station_id: station_id.clone(),
            window: month.actuals_window(),
            fill,
        };

        // The two windows are independent, so fetch them concurrently. The
        // failure semantics stay sequential-equivalent: training is fatal,
        // actuals are best-effort.
        let (training, actuals) = tokio::join!(
            self.fetcher.fetch(&training_query),
            self.fetcher.fetch(&actuals_query),
        );

        let training = training?;
        if training.is_empty() {
            return Err(ForecastError::NoTrainingData.into());
        }

        let model = RainfallModel::fit(&training.observations)?;
        let predicted = model.predict(month.forecast_window().days())?;
        let actuals = actuals_or_empty(actuals, &station_id);

        Ok(ForecastOutcome {
            station_id,
            predicted,
            actuals,
        })
    }
}

/// Converts the best-effort actuals fetch into a date-sorted series, or an
/// empty one when the fetch failed. The failure is logged, never surfaced.
fn actuals_or_empty<E: Display>(
    result: Result<ObservationSeries, E>,
    station_id: &str,
) -> Vec<Observation> {
    match result {
        Ok(series) => {
            let mut observations = series.observations;
            observations.sort_by_key(|o| o.date);
            observations
        }
        Err(e) => {
            warn!("Actuals fetch failed for station {station_id}, returning empty comparison series: {e}");
            Vec::new()
        }
    }
}
