//! Observability infrastructure - Tracing and Metrics

mod config;
mod metrics;
mod tracing_setup;

pub use config::{MetricsConfig, ObservabilityConfig, TracingConfig};
pub use metrics::{
    create_metrics_router, init_metrics, record_claim, record_http_request, record_pipeline_run,
    record_search_call, record_stage_tokens, PrometheusMetrics,
};
pub use tracing_setup::{init_tracing, shutdown_tracing};
