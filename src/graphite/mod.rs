//! Graphite query translation.
//!
//! Everything needed to turn a simplified metric query into a Graphite
//! render call and back:
//!
//! - [`time`]: interval and relative-time expression parsing
//! - [`target`]: render target expression builder
//! - [`query`]: query assembly and response reshaping
//! - [`client`]: the outbound HTTP client

pub mod client;
pub mod error;
pub mod query;
pub mod target;
pub mod time;

pub use client::{GraphiteClient, GraphiteConfig};
pub use error::{GraphiteError, GraphiteResult};
pub use query::{MetricNames, Point, PointSeries, QueryParams, RenderQuery};
pub use target::TargetBuilder;
pub use time::{interval_to_seconds, parse_time, TimeParseError};
