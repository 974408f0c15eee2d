//! # Metrics Gateway
//!
//! A small HTTP API that proxies metric-query requests to a Graphite
//! time-series backend. It translates a simplified query interface into
//! Graphite's `render` query language and reshapes the response into a
//! plain JSON point-series format that dashboard clients can chart
//! directly.
//!
//! ## Modules
//!
//! - [`graphite`]: the translation core - interval/time parsing, target
//!   expression building, query assembly and the render API client
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML + environment configuration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use metrics_gateway::graphite::{GraphiteClient, GraphiteConfig, QueryParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GraphiteClient::new(GraphiteConfig::default());
//!
//!     let params = QueryParams {
//!         metrics: vec!["stores.a.b.last".to_string()].into(),
//!         from: "-48h".to_string(),
//!         until: "-24h".to_string(),
//!         interval: "1day".to_string(),
//!         align_to_from: false,
//!     };
//!
//!     let series = client.get_metrics("owner-1", &params).await?;
//!     println!("Fetched {} series", series.len());
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod graphite;

// Re-export top-level types for convenience
pub use graphite::{
    interval_to_seconds, parse_time, GraphiteClient, GraphiteConfig, GraphiteError, MetricNames,
    Point, PointSeries, QueryParams, RenderQuery, TargetBuilder, TimeParseError,
};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{Config, ConfigError, LoggingConfig};
