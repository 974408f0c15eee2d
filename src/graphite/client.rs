//! Graphite render API client.
//!
//! One non-persistent GET per query against Graphite's `/render/`
//! endpoint, with `target` repeated once per metric. No retries; backend
//! and transport failures propagate directly to the caller.

use reqwest::Client;

use crate::graphite::error::{GraphiteError, GraphiteResult};
use crate::graphite::query::{parse_render_response, PointSeries, QueryParams, RenderQuery};
use crate::graphite::target::TargetBuilder;

/// Configuration for the Graphite client.
#[derive(Debug, Clone)]
pub struct GraphiteConfig {
    /// Base URL of the Graphite web endpoint
    pub url: String,
    /// Namespace prefix prepended as `<prefix>.<ownerId>.<metricName>`
    pub prefix: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for GraphiteConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8080".to_string(),
            prefix: "go.campaigns".to_string(),
            request_timeout_ms: 5000,
        }
    }
}

/// HTTP client for the Graphite render API.
pub struct GraphiteClient {
    client: Client,
    config: GraphiteConfig,
    targets: TargetBuilder,
}

impl GraphiteClient {
    pub fn new(config: GraphiteConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");
        let targets = TargetBuilder::new(config.prefix.clone());

        Self {
            client,
            config,
            targets,
        }
    }

    pub fn config(&self) -> &GraphiteConfig {
        &self.config
    }

    /// Check whether Graphite is reachable.
    pub async fn health_check(&self) -> GraphiteResult<()> {
        let url = format!("{}/render/", self.config.url);

        let response = self
            .client
            .get(&url)
            .query(&[("format", "json")])
            .send()
            .await
            .map_err(classify_transport_error)?;

        if response.status().as_u16() < 500 {
            Ok(())
        } else {
            Err(GraphiteError::Unavailable)
        }
    }

    /// Fetch summarized point series for one owner's metrics.
    ///
    /// Builds one target expression per requested metric (caller order
    /// preserved), forwards `from`/`until` verbatim, and reshapes the
    /// response rows into a [`PointSeries`] keyed by the original metric
    /// names.
    pub async fn get_metrics(
        &self,
        owner_id: &str,
        params: &QueryParams,
    ) -> GraphiteResult<PointSeries> {
        let query = RenderQuery::build(&self.targets, owner_id, params);
        let url = format!("{}/render/", self.config.url);

        let mut pairs: Vec<(&str, &str)> = vec![("format", "json")];
        for target in &query.targets {
            pairs.push(("target", target));
        }
        pairs.push(("from", &query.from));
        pairs.push(("until", &query.until));

        tracing::debug!(
            owner_id = %owner_id,
            targets = query.targets.len(),
            from = %query.from,
            until = %query.until,
            "Fetching from graphite"
        );

        let response = self
            .client
            .get(&url)
            .query(&pairs)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            // Raw body text, never JSON-parsed, per the error contract.
            let body = response.text().await.unwrap_or_default();
            return Err(GraphiteError::ErrorResponse {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(GraphiteError::Request)?;
        parse_render_response(&body)
    }
}

fn classify_transport_error(e: reqwest::Error) -> GraphiteError {
    if e.is_timeout() {
        GraphiteError::Timeout
    } else if e.is_connect() {
        GraphiteError::Unavailable
    } else {
        GraphiteError::Request(e)
    }
}
