// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the elby operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// Service Discovery Constants
// ============================================================================

/// Label selector identifying Services under DNS management
pub const DNS_LABEL_SELECTOR: &str = "dns=route53";

/// Annotation naming the domain to bind to a Service
pub const ANNOTATION_DOMAIN_NAME: &str = "domainName";

// ============================================================================
// Environment Variables
// ============================================================================

/// Namespace whose Services are watched (required)
pub const ENV_NAMESPACE: &str = "NAMESPACE";

/// Top-level domain owning the destination hosted zone (required)
pub const ENV_TLD: &str = "TLD";

/// Override for the poll interval, in seconds (optional)
pub const ENV_POLL_INTERVAL: &str = "POLL_INTERVAL_SECS";

// ============================================================================
// Reconciler Constants
// ============================================================================

/// Seconds between reconcile cycles when not overridden
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;

/// Comment attached to every submitted change batch
pub const CHANGE_BATCH_COMMENT: &str = "Kubernetes Update to Service";

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for the Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 4;

// ============================================================================
// Metrics Server Constants
// ============================================================================

/// Port for the Prometheus metrics HTTP server
pub const METRICS_SERVER_PORT: u16 = 8080;

/// Path for the Prometheus metrics endpoint
pub const METRICS_SERVER_PATH: &str = "/metrics";

/// Bind address for the metrics HTTP server
pub const METRICS_SERVER_BIND_ADDRESS: &str = "0.0.0.0";
