// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the service-to-alias-record reconciliation.
//!
//! This module provides specialized error types for:
//! - Startup configuration validation
//! - Service catalog fetches against the Kubernetes API server
//! - Load balancer and hosted zone resolution
//! - Alias record construction and submission
//!
//! The composite [`SyncError`] classifies every failure as fatal or
//! per-service recoverable, which drives the reconciler's skip-vs-abort
//! decisions.

use thiserror::Error;

/// Errors raised while building the startup configuration.
///
/// Configuration is resolved once from the environment before the first
/// reconcile cycle; any of these terminates the process.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// A required environment variable is unset or empty
    #[error("environment variable {0} is required")]
    MissingVariable(&'static str),

    /// An optional environment variable is set but unparseable
    #[error("invalid value for {variable}: {reason}")]
    InvalidValue {
        /// The offending environment variable
        variable: &'static str,
        /// Explanation of what is invalid
        reason: String,
    },
}

/// Errors raised while fetching the service catalog.
///
/// A catalog failure means the reconciler has no valid view of desired state
/// at all; it is fatal to the process rather than skipped.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    /// Control plane unreachable, non-success status, or undecodable body
    #[error("failed to list services in namespace '{namespace}': {reason}")]
    ListFailed {
        /// The namespace that was queried
        namespace: String,
        /// Underlying API failure
        reason: String,
    },
}

/// Errors raised while resolving an ingress hostname to a load balancer.
///
/// All variants are recoverable at the per-service level: the service is
/// skipped for the cycle and retried on the next poll.
#[derive(Error, Debug, Clone)]
pub enum LoadBalancerError {
    /// The provider lookup returned no matching load balancer
    #[error("no load balancer named '{name}' (derived from hostname '{hostname}')")]
    NotFound {
        /// Name extracted from the ingress hostname
        name: String,
        /// The hostname the name was derived from
        hostname: String,
    },

    /// The provider lookup returned more than one match
    #[error("{count} load balancers matched '{name}', expected exactly one")]
    MultipleMatches {
        /// Name extracted from the ingress hostname
        name: String,
        /// Number of descriptions returned
        count: usize,
    },

    /// The matched description carries no canonical hosted zone id
    #[error("load balancer '{name}' has no canonical hosted zone id")]
    MissingHostedZoneId {
        /// The matched load balancer name
        name: String,
    },

    /// Transport or API failure during the lookup
    #[error("describe load balancer '{name}' failed: {reason}")]
    DescribeFailed {
        /// The load balancer name that was queried
        name: String,
        /// Underlying API failure
        reason: String,
    },
}

/// Errors raised while resolving a top-level domain to a hosted zone.
///
/// Recoverable per service.
#[derive(Error, Debug, Clone)]
pub enum ZoneError {
    /// The provider returned no zones for the domain
    #[error("no hosted zone found for '{tld}'")]
    ZoneNotFound {
        /// The top-level domain that was queried
        tld: String,
    },

    /// The closest zone returned by the provider is not an exact match
    ///
    /// The zone listing API returns the closest or a parent zone when no
    /// exact match exists, so a mismatch means no usable zone exists.
    #[error("zone '{found}' does not match tld '{expected}'")]
    ZoneNameMismatch {
        /// The first zone name the provider returned
        found: String,
        /// The required name, `<tld>` with its trailing dot
        expected: String,
    },

    /// Transport or API failure during the lookup
    #[error("hosted zone lookup for '{tld}' failed: {reason}")]
    LookupFailed {
        /// The top-level domain that was queried
        tld: String,
        /// Underlying API failure
        reason: String,
    },
}

/// Errors raised while building or submitting an alias record change.
///
/// Recoverable per service.
#[derive(Error, Debug, Clone)]
pub enum RecordError {
    /// Change construction rejected its inputs
    #[error("invalid alias record change: {reason}")]
    InvalidChange {
        /// Explanation of what is invalid
        reason: String,
    },

    /// The mutation API rejected or failed the submission
    #[error("record upsert in zone '{zone_id}' failed: {reason}")]
    UpsertFailed {
        /// The hosted zone the batch was submitted against
        zone_id: String,
        /// Underlying API failure
        reason: String,
    },
}

/// Composite error type that encompasses all reconciliation errors.
///
/// This is the unified interface for classifying failures across the
/// reconciliation pipeline.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// Startup configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Service catalog fetch error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Load balancer resolution error
    #[error(transparent)]
    LoadBalancer(#[from] LoadBalancerError),

    /// Hosted zone resolution error
    #[error(transparent)]
    Zone(#[from] ZoneError),

    /// Record construction or submission error
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl SyncError {
    /// Returns true if this error must terminate the process.
    ///
    /// Fatal errors mean no reconciliation decision can be made safely this
    /// cycle or, likely, the next: missing configuration and catalog
    /// failures. Everything else is isolated to one service and retried by
    /// the next scheduled cycle.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Config(_) | Self::Catalog(_) => true,
            Self::LoadBalancer(_) | Self::Zone(_) | Self::Record(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "sync_errors_tests.rs"]
mod sync_errors_tests;
