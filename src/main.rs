//! Metrics gateway server
//!
//! # Configuration
//!
//! Loaded from the first of `$XDG_CONFIG_HOME/metrics-gateway/config.toml`,
//! `/etc/metrics-gateway/config.toml` or `./config.toml`, with environment
//! overrides:
//!
//! - `METRICS_GATEWAY_HOST`: Host to bind to (default: 0.0.0.0)
//! - `METRICS_GATEWAY_PORT`: Port to listen on (default: 8125)
//! - `METRICS_GATEWAY_GRAPHITE_URL`: Graphite base URL (default: http://127.0.0.1:8080)
//! - `METRICS_GATEWAY_PREFIX`: Series namespace prefix (default: go.campaigns)
//! - `METRICS_GATEWAY_LOG_LEVEL` / `METRICS_GATEWAY_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the log filter entirely when set

use metrics_gateway::api::{serve, ApiConfig, AppState};
use metrics_gateway::config::Config;
use metrics_gateway::graphite::{GraphiteClient, GraphiteConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();

    init_tracing(&config);

    tracing::info!(
        "Starting metrics gateway v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Graphite backend: {}", config.graphite.url);

    let graphite = Arc::new(GraphiteClient::new(GraphiteConfig {
        url: config.graphite.url.clone(),
        prefix: config.graphite.prefix.clone(),
        request_timeout_ms: config.graphite.request_timeout_ms,
    }));

    match graphite.health_check().await {
        Ok(()) => tracing::info!("Graphite connection verified"),
        Err(e) => tracing::warn!("Graphite not available: {} (queries will fail until it is)", e),
    }

    let api_config = ApiConfig {
        host: config.api.host.clone(),
        port: config.api.port,
        request_timeout_ms: config.api.request_timeout_secs * 1000,
    };

    let state = AppState::new(graphite, api_config.clone());

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Metrics gateway stopped");
    Ok(())
}

/// Initialize tracing from the logging config, with `RUST_LOG` taking
/// precedence when set.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "metrics_gateway={},tower_http=debug",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
