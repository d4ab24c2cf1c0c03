//! Observability: counters for contract calls, routed through a sink boundary.

pub mod metrics;
pub mod sink;

pub use metrics::{EventOps, EventPerf, MetricsReport};
pub use sink::{MetricsEvent, MetricsSink, OpKind, metrics_report, metrics_reset_all, with_metrics_sink};
