//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::graphite::QueryParams;

/// Query-string parameters for `GET /metrics`.
///
/// `m` may be repeated once per metric; single-valued parameters arrive
/// as scalars and deserialize the same way.
#[derive(Debug, Deserialize)]
pub struct MetricsParams {
    #[serde(default)]
    pub m: Vec<String>,

    #[serde(default = "default_from")]
    pub from: String,

    #[serde(default = "default_until")]
    pub until: String,

    #[serde(default = "default_interval")]
    pub interval: String,

    #[serde(default)]
    pub align_to_from: bool,
}

fn default_from() -> String {
    "-24h".to_string()
}

fn default_until() -> String {
    "-0s".to_string()
}

fn default_interval() -> String {
    "1hour".to_string()
}

impl From<MetricsParams> for QueryParams {
    fn from(params: MetricsParams) -> Self {
        QueryParams {
            metrics: params.m.into(),
            from: params.from,
            until: params.until,
            interval: params.interval,
            align_to_from: params.align_to_from,
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: healthy, degraded, unhealthy
    pub status: String,
    /// Graphite backend status
    pub graphite: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Version of the service
    pub version: String,
}
