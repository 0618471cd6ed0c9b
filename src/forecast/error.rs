use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("Target month '{raw}' is not in MM/YYYY format")]
    InvalidTargetMonth {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The training window held zero usable observations. There is no
    /// fallback model, so the request stops here.
    #[error("No training data available for the requested window")]
    NoTrainingData,

    #[error("Failed to fit the rainfall model")]
    Fit(#[source] smartcore::error::Failed),

    #[error("Failed to evaluate the rainfall model")]
    Predict(#[source] smartcore::error::Failed),

    #[error("Model produced a non-finite prediction for {date}")]
    NonFinitePrediction { date: NaiveDate },
}
