// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Prometheus metrics for the elby operator.
//!
//! This module provides metrics collection with the namespace prefix `elby_`
//! and the HTTP server that exposes them.
//!
//! # Metrics Categories
//!
//! - **Cycle Metrics** - Track reconcile cycles and their duration
//! - **Record Metrics** - Track upserted alias records
//! - **Skip Metrics** - Track skipped services by failing stage
//!
//! # Example
//!
//! ```rust,no_run
//! use elby::metrics::record_cycle_success;
//!
//! // Record a successful reconcile cycle
//! record_cycle_success(std::time::Duration::from_secs(1));
//! ```

use std::net::SocketAddr;
use std::sync::LazyLock;
use std::time::Duration;

use axum::{routing::get, Router};
use prometheus::{
    CounterVec, Encoder, Histogram, HistogramOpts, IntCounter, Opts, Registry, TextEncoder,
};

use crate::constants::METRICS_SERVER_PATH;

/// Namespace prefix for all elby metrics
const METRICS_NAMESPACE: &str = "elby";

/// Global Prometheus metrics registry
///
/// All metrics are registered in this registry and exposed via the
/// `/metrics` endpoint.
pub static METRICS_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

// ============================================================================
// Cycle Metrics
// ============================================================================

/// Total number of reconcile cycles by status
///
/// Labels:
/// - `status`: Outcome (`success`, `error`)
pub static CYCLES_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_reconcile_cycles_total"),
        "Total number of reconcile cycles by status",
    );
    let counter = CounterVec::new(opts, &["status"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

/// Duration of reconcile cycles in seconds
pub static CYCLE_DURATION_SECONDS: LazyLock<Histogram> = LazyLock::new(|| {
    let opts = HistogramOpts::new(
        format!("{METRICS_NAMESPACE}_reconcile_cycle_duration_seconds"),
        "Duration of reconcile cycles in seconds",
    )
    .buckets(vec![0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]);
    let histogram = Histogram::with_opts(opts).unwrap();
    METRICS_REGISTRY
        .register(Box::new(histogram.clone()))
        .unwrap();
    histogram
});

// ============================================================================
// Record Metrics
// ============================================================================

/// Total number of alias records upserted
pub static RECORDS_UPSERTED_TOTAL: LazyLock<IntCounter> = LazyLock::new(|| {
    let counter = IntCounter::new(
        format!("{METRICS_NAMESPACE}_records_upserted_total"),
        "Total number of alias records upserted",
    )
    .unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Skip Metrics
// ============================================================================

/// Total number of services skipped by failing stage
///
/// Labels:
/// - `stage`: Failing stage (`actionability`, `load_balancer`, `zone`,
///   `build`, `mutation`)
pub static SERVICES_SKIPPED_TOTAL: LazyLock<CounterVec> = LazyLock::new(|| {
    let opts = Opts::new(
        format!("{METRICS_NAMESPACE}_services_skipped_total"),
        "Total number of services skipped by failing stage",
    );
    let counter = CounterVec::new(opts, &["stage"]).unwrap();
    METRICS_REGISTRY
        .register(Box::new(counter.clone()))
        .unwrap();
    counter
});

// ============================================================================
// Helper Functions
// ============================================================================

/// Record a completed reconcile cycle
///
/// # Arguments
/// * `duration` - Duration of the cycle
pub fn record_cycle_success(duration: Duration) {
    CYCLES_TOTAL.with_label_values(&["success"]).inc();
    CYCLE_DURATION_SECONDS.observe(duration.as_secs_f64());
}

/// Record a reconcile cycle that failed before per-service processing
pub fn record_cycle_error() {
    CYCLES_TOTAL.with_label_values(&["error"]).inc();
}

/// Record an upserted alias record
pub fn record_upsert() {
    RECORDS_UPSERTED_TOTAL.inc();
}

/// Record a skipped service
///
/// # Arguments
/// * `stage` - The failing stage, from `SkipReason::stage`
pub fn record_skip(stage: &str) {
    SERVICES_SKIPPED_TOTAL.with_label_values(&[stage]).inc();
}

/// Gather and encode all metrics in Prometheus text format
///
/// # Returns
/// Prometheus-formatted metrics as a String
///
/// # Errors
/// Returns error if encoding fails
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = METRICS_REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(format!("UTF-8 error: {e}")))
}

/// Serve the metrics endpoint until the process exits.
///
/// # Errors
/// Returns error if the listener cannot bind or the server fails.
pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let app = Router::new().route(METRICS_SERVER_PATH, get(metrics_handler));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn metrics_handler() -> String {
    gather_metrics().unwrap_or_default()
}
