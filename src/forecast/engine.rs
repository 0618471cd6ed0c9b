//! Random-forest regression over calendar features.

use crate::forecast::error::ForecastError;
use crate::types::observation::{Observation, Prediction};
use chrono::{Datelike, NaiveDate};
use log::info;
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Trees in the bagged ensemble.
pub const TREE_COUNT: u16 = 100;

/// Seed for tree bagging. Together with [`TREE_COUNT`] this is part of the
/// observable contract: refitting identical input yields identical trees and
/// identical predictions.
pub const RANDOM_SEED: u64 = 42;

/// A fitted daily-rainfall model for one station.
#[derive(Debug)]
pub struct RainfallModel {
    forest: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

impl RainfallModel {
    /// Fits the ensemble on (day, month, year) features against the observed
    /// value.
    ///
    /// The whole window is used for fitting: no scaling, no validation
    /// split, and no goodness-of-fit is reported. Tree ensembles also do not
    /// extrapolate beyond the observed feature range, so predictions far
    /// outside the training calendar flatten rather than trend; both are
    /// known limitations of this model, not conditions this code detects.
    pub fn fit(observations: &[Observation]) -> Result<Self, ForecastError> {
        if observations.is_empty() {
            return Err(ForecastError::NoTrainingData);
        }
        let features: Vec<Vec<f64>> = observations
            .iter()
            .map(|o| calendar_features(o.date))
            .collect();
        let targets: Vec<f64> = observations.iter().map(|o| o.value).collect();

        let x = DenseMatrix::from_2d_vec(&features);
        let parameters = RandomForestRegressorParameters::default()
            .with_n_trees(TREE_COUNT.into())
            .with_seed(RANDOM_SEED);
        let forest = RandomForestRegressor::fit(&x, &targets, parameters)
            .map_err(ForecastError::Fit)?;
        info!(
            "Fitted rainfall model on {} observations",
            observations.len()
        );
        Ok(RainfallModel { forest })
    }

    /// Evaluates the model for each date, in input order.
    pub fn predict(
        &self,
        dates: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Vec<Prediction>, ForecastError> {
        let dates: Vec<NaiveDate> = dates.into_iter().collect();
        if dates.is_empty() {
            return Ok(Vec::new());
        }
        let features: Vec<Vec<f64>> = dates.iter().map(|d| calendar_features(*d)).collect();
        let x = DenseMatrix::from_2d_vec(&features);
        let values = self.forest.predict(&x).map_err(ForecastError::Predict)?;

        dates
            .into_iter()
            .zip(values)
            .map(|(date, value)| {
                if value.is_finite() {
                    Ok(Prediction { date, value })
                } else {
                    Err(ForecastError::NonFinitePrediction { date })
                }
            })
            .collect()
    }
}

/// (day-of-month, month, year) as floats. Month stays a linear 1-12 integer
/// with no cyclical encoding, so December and January sit far apart in
/// feature space; a known modeling limitation kept as-is.
fn calendar_features(date: NaiveDate) -> Vec<f64> {
    vec![date.day() as f64, date.month() as f64, date.year() as f64]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Three years of synthetic daily rainfall with a wet-season bump.
    fn synthetic_training() -> Vec<Observation> {
        let start = date(2022, 4, 1);
        (0u64..365 * 3)
            .map(|i| {
                let day = start + Days::new(i);
                let wet = matches!(day.month(), 11 | 12 | 1 | 2 | 3);
                let value = if wet { 6.0 } else { 1.5 } + (i % 7) as f64 * 0.1;
                Observation { date: day, value }
            })
            .collect()
    }

    #[test]
    fn empty_training_data_refuses_to_fit() {
        let err = RainfallModel::fit(&[]).unwrap_err();
        assert!(matches!(err, ForecastError::NoTrainingData));
    }

    #[test]
    fn single_observation_fits_and_predicts() {
        let model = RainfallModel::fit(&[Observation {
            date: date(2025, 3, 15),
            value: 2.0,
        }])
        .unwrap();
        let predictions = model.predict(vec![date(2025, 3, 15)]).unwrap();
        assert_eq!(predictions.len(), 1);
        assert!(predictions[0].value.is_finite());
    }

    #[test]
    fn predictions_are_finite_inside_training_range() {
        let model = RainfallModel::fit(&synthetic_training()).unwrap();
        let window_dates: Vec<NaiveDate> =
            (3..=30).map(|d| date(2024, 6, d)).collect();
        let predictions = model.predict(window_dates.clone()).unwrap();
        assert_eq!(predictions.len(), window_dates.len());
        for (prediction, expected_date) in predictions.iter().zip(window_dates) {
            assert_eq!(prediction.date, expected_date);
            assert!(prediction.value.is_finite());
        }
    }

    #[test]
    fn refitting_identical_input_is_deterministic() {
        let training = synthetic_training();
        let dates: Vec<NaiveDate> = (1..=28).map(|d| date(2025, 4, d)).collect();

        let first = RainfallModel::fit(&training)
            .unwrap()
            .predict(dates.clone())
            .unwrap();
        let second = RainfallModel::fit(&training)
            .unwrap()
            .predict(dates)
            .unwrap();
        assert_eq!(first, second, "fixed seed must reproduce predictions");
    }

    #[test]
    fn empty_prediction_window_yields_empty_series() {
        let model = RainfallModel::fit(&synthetic_training()).unwrap();
        assert!(model.predict(Vec::new()).unwrap().is_empty());
    }
}
