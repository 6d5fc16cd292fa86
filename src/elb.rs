// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Load balancer resolution via the classic Elastic Load Balancing API.
//!
//! An ingress hostname maps to exactly one load balancer; the resolver
//! extracts the load balancer name from the hostname, describes it, and
//! returns the canonical hosted zone id required to build a valid alias
//! target. Zero or multiple matches is a resolution failure, recoverable at
//! the per-service level.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_elasticloadbalancing::error::DisplayErrorContext;
use aws_sdk_elasticloadbalancing::Client;
use tracing::debug;

use crate::sync_errors::LoadBalancerError;

/// Load balancer attributes required to build an alias target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBalancerInfo {
    /// Hosted zone id of the load balancer itself, one-to-one with the load
    /// balancer and stable for its lifetime
    pub canonical_hosted_zone_id: String,
}

/// Extract the load balancer name from its auto-generated hostname.
///
/// ELB hostnames take the form `<name>-<suffix>.<region>.elb.amazonaws.com`;
/// the name is the substring before the first hyphen. A hostname without a
/// hyphen is returned unchanged.
///
/// # Example
///
/// ```rust
/// use elby::elb::load_balancer_name;
///
/// assert_eq!(
///     load_balancer_name("abcd1234-1234567890.us-east-1.elb.amazonaws.com"),
///     "abcd1234"
/// );
/// ```
#[must_use]
pub fn load_balancer_name(hostname: &str) -> &str {
    match hostname.split_once('-') {
        Some((name, _)) => name,
        None => hostname,
    }
}

/// Resolves an ingress hostname to its load balancer description.
#[async_trait]
pub trait LoadBalancers {
    /// Resolve `hostname` to exactly one load balancer.
    ///
    /// # Errors
    ///
    /// Returns [`LoadBalancerError`] when zero or multiple load balancers
    /// match, the description lacks a canonical hosted zone id, or the
    /// lookup itself fails. All variants are recoverable at the per-service
    /// level: log, skip the service, continue the cycle.
    async fn resolve(&self, hostname: &str) -> Result<LoadBalancerInfo, LoadBalancerError>;
}

/// Production resolver backed by the classic Elastic Load Balancing API.
#[derive(Clone)]
pub struct ElbLoadBalancers {
    client: Client,
}

impl ElbLoadBalancers {
    /// Create a resolver from the shared SDK configuration.
    #[must_use]
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    /// Create from a pre-built client (for tests against a mock endpoint).
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LoadBalancers for ElbLoadBalancers {
    async fn resolve(&self, hostname: &str) -> Result<LoadBalancerInfo, LoadBalancerError> {
        let name = load_balancer_name(hostname);
        debug!(%hostname, load_balancer = %name, "Describing load balancer");

        let output = self
            .client
            .describe_load_balancers()
            .load_balancer_names(name)
            .send()
            .await
            .map_err(|e| LoadBalancerError::DescribeFailed {
                name: name.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        match output.load_balancer_descriptions() {
            [] => Err(LoadBalancerError::NotFound {
                name: name.to_string(),
                hostname: hostname.to_string(),
            }),
            [description] => description
                .canonical_hosted_zone_name_id()
                .map(|id| LoadBalancerInfo {
                    canonical_hosted_zone_id: id.to_string(),
                })
                .ok_or_else(|| LoadBalancerError::MissingHostedZoneId {
                    name: name.to_string(),
                }),
            many => Err(LoadBalancerError::MultipleMatches {
                name: name.to_string(),
                count: many.len(),
            }),
        }
    }
}

#[cfg(test)]
#[path = "elb_tests.rs"]
mod elb_tests;
