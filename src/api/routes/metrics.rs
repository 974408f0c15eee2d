//! Metrics Routes
//!
//! The proxy endpoint that translates simplified metric queries into
//! Graphite render calls.
//!
//! - GET /metrics - Fetch summarized point series for an owner's metrics

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::Query;
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::MetricsParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::graphite::{interval_to_seconds, parse_time, QueryParams};

/// Header carrying the per-call owner identifier.
///
/// The deployment's auth layer is expected to set this; authenticating
/// the caller is out of scope here.
pub const OWNER_ID_HEADER: &str = "x-owner-id";

/// GET /metrics
///
/// Validates the time and interval parameters, builds one Graphite
/// target per requested metric and proxies the render call. The response
/// is a JSON object mapping each requested metric name to its point
/// series.
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<MetricsParams>,
) -> ApiResult<impl IntoResponse> {
    let owner_id = owner_id(&headers)?;
    let params: QueryParams = params.into();
    validate_params(&params)?;

    tracing::debug!(
        owner_id = %owner_id,
        metrics = params.metrics.len(),
        interval = %params.interval,
        "Metrics query"
    );

    let series = state.graphite.get_metrics(&owner_id, &params).await?;

    Ok((StatusCode::OK, Json(series)))
}

/// Extract the owner identifier from the request headers.
fn owner_id(headers: &HeaderMap) -> ApiResult<String> {
    let value = headers
        .get(OWNER_ID_HEADER)
        .ok_or_else(|| ApiError::Validation("Missing X-Owner-Id header".to_string()))?;

    let owner_id = value
        .to_str()
        .map_err(|_| ApiError::Validation("Invalid X-Owner-Id header".to_string()))?;

    if owner_id.is_empty() {
        return Err(ApiError::Validation("Empty X-Owner-Id header".to_string()));
    }

    Ok(owner_id.to_string())
}

/// Reject malformed time and interval parameters before going to the
/// backend, so bad input surfaces as 400 instead of a backend error.
///
/// The validated `from`/`until` strings are still forwarded verbatim;
/// Graphite resolves its own relative-time syntax server-side.
fn validate_params(params: &QueryParams) -> ApiResult<()> {
    interval_to_seconds(&params.interval)?;

    let now = Utc::now();
    parse_time(&params.from, now)?;
    parse_time(&params.until, now)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphite::MetricNames;

    fn params(from: &str, until: &str, interval: &str) -> QueryParams {
        QueryParams {
            metrics: MetricNames::default(),
            from: from.to_string(),
            until: until.to_string(),
            interval: interval.to_string(),
            align_to_from: false,
        }
    }

    #[test]
    fn default_params_validate() {
        assert!(validate_params(&QueryParams::default()).is_ok());
    }

    #[test]
    fn keyword_bounds_validate() {
        assert!(validate_params(&params("yesterday", "now", "1hour")).is_ok());
    }

    #[test]
    fn malformed_interval_is_rejected() {
        assert!(validate_params(&params("-24h", "-0s", "2fortnights")).is_err());
    }

    #[test]
    fn oversized_relative_bounds_are_rejected() {
        assert!(validate_params(&params("-400000y", "-0s", "1hour")).is_err());
        assert!(validate_params(&params("-100000000000000000s", "-0s", "1hour")).is_err());
    }

    #[test]
    fn absolute_time_bounds_are_rejected() {
        assert!(validate_params(&params("2014-01-01", "-0s", "1hour")).is_err());
    }

    #[test]
    fn missing_owner_header_is_a_validation_error() {
        let headers = HeaderMap::new();
        assert!(matches!(owner_id(&headers), Err(ApiError::Validation(_))));
    }

    #[test]
    fn owner_header_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(OWNER_ID_HEADER, "owner-1".parse().unwrap());
        assert_eq!(owner_id(&headers).unwrap(), "owner-1");
    }
}
