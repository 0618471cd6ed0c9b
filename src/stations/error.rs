use crate::api::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// No station in the directory carried parseable coordinates. Nearest
    /// search needs a complete directory, so this aborts the request.
    #[error("No station with usable coordinates found")]
    NoStationFound,
}
