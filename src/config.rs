//! Runtime configuration for the HCDP client.
//!
//! The service base URL and bearer token are injected here rather than
//! compiled in; [`HcdpConfig::from_env`] covers the common deployment case.

use bon::bon;
use std::env;
use std::time::Duration;
use thiserror::Error;

/// The public HCDP API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.hcdp.ikewai.org";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STATION_TTL_SECS: u64 = 600;

const TOKEN_VAR: &str = "HCDP_API_TOKEN";
const BASE_URL_VAR: &str = "HCDP_BASE_URL";
const TIMEOUT_VAR: &str = "HCDP_TIMEOUT_SECS";
const STATION_TTL_VAR: &str = "HCDP_STATION_TTL_SECS";

/// Connection settings shared by every remote call the client makes.
///
/// # Examples
///
/// ```
/// use hcdp_forecast::HcdpConfig;
/// use std::time::Duration;
///
/// let config = HcdpConfig::builder()
///     .api_token("my-token")
///     .timeout(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.base_url, "https://api.hcdp.ikewai.org");
/// ```
#[derive(Debug, Clone)]
pub struct HcdpConfig {
    pub base_url: String,
    pub api_token: String,
    /// Request timeout applied to every remote call. Timeouts surface as
    /// [`crate::ApiError::Timeout`].
    pub timeout: Duration,
    /// How long a fetched station directory may be reused before it is
    /// refetched. Zero disables the cache entirely.
    pub station_cache_ttl: Duration,
}

#[bon]
impl HcdpConfig {
    #[builder]
    pub fn new(
        #[builder(into)] api_token: String,
        #[builder(into)] base_url: Option<String>,
        timeout: Option<Duration>,
        station_cache_ttl: Option<Duration>,
    ) -> Self {
        HcdpConfig {
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_token,
            timeout: timeout.unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            station_cache_ttl: station_cache_ttl
                .unwrap_or(Duration::from_secs(DEFAULT_STATION_TTL_SECS)),
        }
    }

    /// Reads configuration from the environment.
    ///
    /// `HCDP_API_TOKEN` is required; `HCDP_BASE_URL`, `HCDP_TIMEOUT_SECS` and
    /// `HCDP_STATION_TTL_SECS` override the defaults when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = env::var(TOKEN_VAR).map_err(|_| ConfigError::MissingEnv(TOKEN_VAR))?;
        Ok(Self::builder()
            .api_token(api_token)
            .maybe_base_url(env::var(BASE_URL_VAR).ok())
            .maybe_timeout(env_secs(TIMEOUT_VAR)?)
            .maybe_station_cache_ttl(env_secs(STATION_TTL_VAR)?)
            .build())
    }
}

fn env_secs(key: &'static str) -> Result<Option<Duration>, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map(Some)
            .map_err(|source| ConfigError::InvalidEnv { key, raw, source }),
        Err(_) => Ok(None),
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    #[error("Environment variable {key} has invalid value '{raw}'")]
    InvalidEnv {
        key: &'static str,
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },
}
