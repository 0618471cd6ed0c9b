mod api;
mod client;
mod config;
mod error;
mod forecast;
mod observations;
mod stations;
mod types;

pub use error::HcdpError;

pub use client::Hcdp;
pub use config::{ConfigError, HcdpConfig};

pub use types::observation::{ForecastOutcome, Observation, ObservationSeries, Prediction};
pub use types::station::{LatLon, Station, StationSet};
pub use types::window::DateWindow;

pub use forecast::engine::{RainfallModel, RANDOM_SEED, TREE_COUNT};
pub use forecast::windows::{TargetMonth, ACTUALS_MONTHS, TRAINING_MONTHS};
pub use observations::fetch::FillPolicy;
pub use stations::resolve::nearest_station;

pub use api::error::ApiError;
pub use forecast::error::ForecastError;
pub use stations::error::StationError;
