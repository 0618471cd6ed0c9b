use crate::api::error::ApiError;
use crate::config::ConfigError;
use crate::forecast::error::ForecastError;
use crate::stations::error::StationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HcdpError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Station(#[from] StationError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}
