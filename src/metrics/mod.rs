//! Metrics collection for verification runs

use crate::facts::LiteralKind;
use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_with_registry, CounterVec, Histogram,
    Opts, Registry,
};
use std::sync::Arc;
use std::time::Duration;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> =
    Lazy::new(|| Arc::new(Metrics::new().expect("Failed to initialize metrics")));

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    // SPARQL metrics
    pub ask_queries: CounterVec,
    pub ask_duration: Histogram,

    // Resolution metrics
    pub resolutions: CounterVec,

    // Batch metrics
    pub triples: CounterVec,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let ask_queries = register_counter_vec_with_registry!(
            Opts::new("sparql_ask_queries_total", "Total SPARQL ASK queries"),
            &["outcome"],
            registry
        )?;

        let ask_duration = register_histogram_with_registry!(
            "sparql_ask_duration_seconds",
            "SPARQL ASK round trip duration in seconds",
            registry
        )?;

        let resolutions = register_counter_vec_with_registry!(
            Opts::new("triple_resolutions_total", "Decisive resolutions by cascade rule"),
            &["rule", "kind", "exists"],
            registry
        )?;

        let triples = register_counter_vec_with_registry!(
            Opts::new("triples_verified_total", "Input triple entries by status"),
            &["status"],
            registry
        )?;

        Ok(Self {
            registry,
            ask_queries,
            ask_duration,
            resolutions,
            triples,
        })
    }

    /// Record an answered ASK query
    pub fn record_ask(&self, exists: bool, elapsed: Duration) {
        let outcome = if exists { "true" } else { "false" };
        self.ask_queries.with_label_values(&[outcome]).inc();
        self.ask_duration.observe(elapsed.as_secs_f64());
    }

    /// Record an ASK query that failed in transport or parsing
    pub fn record_ask_failure(&self, elapsed: Duration) {
        self.ask_queries.with_label_values(&["error"]).inc();
        self.ask_duration.observe(elapsed.as_secs_f64());
    }

    /// Record the decisive result of one resolution
    pub fn record_resolution(&self, rule: &str, kind: LiteralKind, exists: bool) {
        let exists = if exists { "true" } else { "false" };
        self.resolutions
            .with_label_values(&[rule, kind.as_str(), exists])
            .inc();
    }

    /// Record a triple entry by status (found, not_found, skipped)
    pub fn record_triple(&self, status: &str) {
        self.triples.with_label_values(&[status]).inc();
    }

    /// Export metrics in Prometheus text format
    pub fn export_prometheus(&self) -> String {
        use prometheus::Encoder;

        let encoder = prometheus::TextEncoder::new();
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap_or_default();

        String::from_utf8(buffer).unwrap_or_default()
    }
}
