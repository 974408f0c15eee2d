//! Query assembly and response reshaping.
//!
//! Turns caller-supplied query parameters into the outbound render query
//! (one target expression per metric, `from`/`until` passed through
//! verbatim) and turns Graphite's response rows back into the gateway's
//! point-series shape.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::graphite::error::GraphiteError;
use crate::graphite::target::TargetBuilder;

/// One or more metric names.
///
/// Callers may supply a bare string or a list; both normalize into one
/// canonical sequence before any query logic runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MetricNames {
    One(String),
    Many(Vec<String>),
}

impl Default for MetricNames {
    fn default() -> Self {
        MetricNames::Many(Vec::new())
    }
}

impl MetricNames {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let names: &[String] = match self {
            MetricNames::One(name) => std::slice::from_ref(name),
            MetricNames::Many(names) => names,
        };
        names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        match self {
            MetricNames::One(_) => 1,
            MetricNames::Many(names) => names.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<String>> for MetricNames {
    fn from(names: Vec<String>) -> Self {
        MetricNames::Many(names)
    }
}

/// Caller-supplied query parameters with the gateway's defaults applied
/// for any omitted field.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryParams {
    #[serde(default, rename = "m")]
    pub metrics: MetricNames,

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

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            metrics: MetricNames::default(),
            from: default_from(),
            until: default_until(),
            interval: default_interval(),
            align_to_from: false,
        }
    }
}

/// The assembled outbound render query.
///
/// `from` and `until` are forwarded verbatim; Graphite resolves its own
/// relative-time syntax server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderQuery {
    pub targets: Vec<String>,
    pub from: String,
    pub until: String,
}

impl RenderQuery {
    /// Build one target expression per requested metric, in caller order.
    pub fn build(targets: &TargetBuilder, owner_id: &str, params: &QueryParams) -> Self {
        Self {
            targets: params
                .metrics
                .iter()
                .map(|metric| targets.build(owner_id, metric, &params.interval, params.align_to_from))
                .collect(),
            from: params.from.clone(),
            until: params.until.clone(),
        }
    }
}

/// A single chart point: epoch milliseconds and a value.
///
/// Null datapoints from Graphite are kept as `y: null` rather than
/// dropped; consumers decide how to render gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: Option<f64>,
}

/// Point sequences keyed by metric name (the target alias), preserving
/// Graphite's series order.
///
/// Serializes as a JSON object; a plain map would lose the ordering, so
/// this keeps the entries as a vector and writes the object by hand.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSeries(pub Vec<(String, Vec<Point>)>);

impl PointSeries {
    pub fn get(&self, metric: &str) -> Option<&[Point]> {
        self.0
            .iter()
            .find(|(name, _)| name == metric)
            .map(|(_, points)| points.as_slice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for PointSeries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, points) in &self.0 {
            map.serialize_entry(name, points)?;
        }
        map.end()
    }
}

/// One row of Graphite's render response.
#[derive(Debug, Deserialize)]
struct RenderRow {
    target: String,
    // Graphite convention: value first, epoch seconds second.
    datapoints: Vec<(Option<f64>, i64)>,
}

/// Parse a Graphite render response body into a [`PointSeries`].
///
/// Each `[value, epochSeconds]` pair becomes `{x: epochSeconds * 1000,
/// y: value}`; point and series order are preserved.
pub fn parse_render_response(body: &str) -> Result<PointSeries, GraphiteError> {
    let rows: Vec<RenderRow> = serde_json::from_str(body)?;

    Ok(PointSeries(
        rows.into_iter()
            .map(|row| {
                let points = row
                    .datapoints
                    .into_iter()
                    .map(|(y, seconds)| Point {
                        x: seconds * 1000,
                        y,
                    })
                    .collect();
                (row.target, points)
            })
            .collect(),
    ))
}
