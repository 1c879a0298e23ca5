//! Metrics for the season ladder
//!
//! Prometheus counters and gauges, exposed by the HTTP service on `/metrics`.

pub mod collector;

pub use collector::{MatchMetrics, MetricsCollector, MetricsTimer, ReportMetrics};
