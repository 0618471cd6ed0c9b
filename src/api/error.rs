use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client")]
    HttpClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    /// The configured request timeout elapsed. Kept distinct from other
    /// network failures so callers can tell a slow upstream from a broken one.
    #[error("Request to {0} timed out")]
    Timeout(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to decode response from {0}")]
    ResponseDecode(String, #[source] reqwest::Error),
}
