//! Thin client for the HCDP mesonet query API.
//!
//! Station metadata and per-station value series both come from the same
//! `/stations` endpoint: a JSON query object is passed through the `q`
//! parameter, filter keys are nested under the record `value`, and records
//! come back wrapped in a `result` envelope of `{"value": {...}}` entries.

pub mod error;
pub(crate) mod record;

use crate::api::error::ApiError;
use crate::config::HcdpConfig;
use log::info;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Page size used when a query should effectively be unbounded.
pub(crate) const DEFAULT_PAGE_LIMIT: u32 = 10_000;

#[derive(Debug, Clone)]
pub struct HcdpApi {
    http: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Vec<RecordEnvelope>,
}

#[derive(Debug, Deserialize)]
struct RecordEnvelope {
    value: Map<String, Value>,
}

impl HcdpApi {
    pub fn new(config: &HcdpConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ApiError::HttpClientBuild)?;
        Ok(HcdpApi {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    /// Runs one query by name and unwraps the record envelopes.
    pub async fn query_records(
        &self,
        name: &str,
        filters: Map<String, Value>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Map<String, Value>>, ApiError> {
        let url = format!("{}/stations", self.base_url);
        let q = build_query(name, filters);
        let limit_param = limit.to_string();
        let offset_param = offset.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", q.as_str()),
                ("limit", limit_param.as_str()),
                ("offset", offset_param.as_str()),
            ])
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::Timeout(url.clone(), e)
                } else {
                    ApiError::NetworkRequest(url.clone(), e)
                }
            })?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                return Err(if let Some(status) = e.status() {
                    ApiError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    ApiError::NetworkRequest(url, e)
                });
            }
        };

        let envelope: QueryResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(url.clone(), e)
            } else {
                ApiError::ResponseDecode(url, e)
            }
        })?;
        info!("Query '{}' returned {} records", name, envelope.result.len());
        Ok(envelope.result.into_iter().map(|r| r.value).collect())
    }
}

/// Serializes the `q` query object: the query name plus each filter key
/// nested under `value.`.
fn build_query(name: &str, filters: Map<String, Value>) -> String {
    let mut query = Map::new();
    query.insert("name".to_string(), Value::from(name));
    for (field, value) in filters {
        query.insert(format!("value.{field}"), value);
    }
    Value::Object(query).to_string()
}
