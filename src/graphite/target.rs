//! Graphite target expression builder.
//!
//! A target expression is the function-call string Graphite's render API
//! uses to identify and aggregate one series, e.g.
//!
//! ```text
//! alias(summarize(go.campaigns.owner-1.stores.a.b.last, '1day', 'last', false), 'stores.a.b.last')
//! ```
//!
//! The alias is always the caller's original metric name, so response rows
//! can be re-associated with the requested metric without extra state.

/// Builds Graphite target expressions under a fixed namespace prefix.
#[derive(Debug, Clone)]
pub struct TargetBuilder {
    prefix: String,
}

impl TargetBuilder {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Build the target expression for one metric.
    ///
    /// The aggregation function is the metric name's trailing dot-segment
    /// and is passed through verbatim; unknown suffixes are Graphite's
    /// problem, which keeps the builder forward-compatible with functions
    /// it has never heard of.
    pub fn build(&self, owner_id: &str, metric: &str, interval: &str, align_to_from: bool) -> String {
        let aggregation = metric.rsplit('.').next().unwrap_or(metric);
        let full_name = format!("{}.{}.{}", self.prefix, owner_id, metric);

        format!(
            "alias(summarize({}, '{}', '{}', {}), '{}')",
            full_name, interval, aggregation, align_to_from, metric
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> TargetBuilder {
        TargetBuilder::new("go.campaigns")
    }

    #[test]
    fn builds_summarize_alias_expression() {
        assert_eq!(
            builder().build("owner-1", "stores.a.b.last", "1day", false),
            "alias(summarize(go.campaigns.owner-1.stores.a.b.last, \
             '1day', 'last', false), 'stores.a.b.last')"
        );
    }

    #[test]
    fn align_to_from_renders_as_bare_boolean() {
        assert_eq!(
            builder().build("owner-1", "stores.a.b.max", "1hour", true),
            "alias(summarize(go.campaigns.owner-1.stores.a.b.max, \
             '1hour', 'max', true), 'stores.a.b.max')"
        );
    }

    #[test]
    fn unknown_aggregation_suffix_passes_through() {
        assert_eq!(
            builder().build("owner-1", "stores.a.b.p99", "1day", false),
            "alias(summarize(go.campaigns.owner-1.stores.a.b.p99, \
             '1day', 'p99', false), 'stores.a.b.p99')"
        );
    }

    #[test]
    fn dotless_metric_uses_whole_name_as_aggregation() {
        assert_eq!(
            builder().build("owner-1", "last", "1day", false),
            "alias(summarize(go.campaigns.owner-1.last, '1day', 'last', false), 'last')"
        );
    }

    #[test]
    fn build_is_pure() {
        let a = builder().build("owner-1", "stores.a.b.last", "1day", false);
        let b = builder().build("owner-1", "stores.a.b.last", "1day", false);
        assert_eq!(a, b);
    }
}
