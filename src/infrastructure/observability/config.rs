//! `[observability]` section: OTLP span export and the Prometheus endpoint

use opentelemetry_sdk::trace::Sampler;
use serde::Deserialize;

/// Upper bounds in seconds for `truthio_pipeline_duration_seconds`. A single
/// run makes several model calls and web searches, so the range goes well
/// past the exporter's default buckets.
pub const DEFAULT_PIPELINE_BUCKETS: [f64; 9] = [1.0, 2.5, 5.0, 10.0, 20.0, 40.0, 60.0, 120.0, 300.0];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub tracing: TracingConfig,
    pub metrics: MetricsConfig,
}

/// Span export over OTLP/gRPC; off unless `enabled`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    pub enabled: bool,
    pub otlp_endpoint: String,
    pub service_name: String,
    /// Fraction of traces kept; values outside `0.0..=1.0` are clamped
    pub sampling_ratio: f64,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            otlp_endpoint: "http://localhost:4317".to_string(),
            service_name: env!("CARGO_PKG_NAME").to_string(),
            sampling_ratio: 1.0,
        }
    }
}

impl TracingConfig {
    pub fn sampler(&self) -> Sampler {
        match self.sampling_ratio {
            r if r.is_nan() || r <= 0.0 => Sampler::AlwaysOff,
            r if r >= 1.0 => Sampler::AlwaysOn,
            r => Sampler::TraceIdRatioBased(r),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    /// Route the exposition is served on by `truthio serve`
    pub path: String,
    pub pipeline_duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "/metrics".to_string(),
            pipeline_duration_buckets: DEFAULT_PIPELINE_BUCKETS.to_vec(),
        }
    }
}
