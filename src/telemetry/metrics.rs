//! Prometheus metrics

use crate::decision::Decision;
use metrics_exporter_prometheus::PrometheusBuilder;
use rust_decimal::prelude::ToPrimitive;
use std::net::{Ipv4Addr, SocketAddr};

const GOAL_PROBABILITY: &str = "cashout_goal_probability";
const MOMENTUM_DEPTH: &str = "cashout_momentum_depth";

/// Counter metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterMetric {
    /// Successful evaluations
    Evaluations,
    /// Decisions by label
    Decisions,
    /// Rejected inputs
    InputErrors,
    /// Session resets
    SessionResets,
}

impl CounterMetric {
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::Evaluations => "cashout_evaluations_total",
            CounterMetric::Decisions => "cashout_decisions_total",
            CounterMetric::InputErrors => "cashout_input_errors_total",
            CounterMetric::SessionResets => "cashout_session_resets_total",
        }
    }
}

/// Install the Prometheus exporter on `0.0.0.0:port`
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;

    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}

/// Record a completed evaluation
pub fn record_decision(decision: &Decision, momentum_depth: usize) {
    metrics::counter!(CounterMetric::Evaluations.name()).increment(1);
    metrics::counter!(
        CounterMetric::Decisions.name(),
        "decision" => decision.label.as_str(),
        "rule" => decision.triggered_by.unwrap_or("default")
    )
    .increment(1);
    metrics::histogram!(GOAL_PROBABILITY).record(decision.p_goal.to_f64().unwrap_or_default());
    metrics::gauge!(MOMENTUM_DEPTH).set(momentum_depth as f64);
}

/// Record a rejected input
pub fn record_input_error() {
    metrics::counter!(CounterMetric::InputErrors.name()).increment(1);
}

/// Record a session reset
pub fn record_session_reset() {
    metrics::counter!(CounterMetric::SessionResets.name()).increment(1);
    metrics::gauge!(MOMENTUM_DEPTH).set(0.0);
}
