// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosted zone resolution and record submission via the Route53 API.
//!
//! Zone resolution anchors a `ListHostedZonesByName` query at the configured
//! top-level domain. The provider returns the closest zone when no exact
//! match exists, so the first entry must equal `<tld>.` exactly; anything
//! else means no usable zone exists and the service is skipped. Accepted zone
//! identifiers are normalized from their path-prefixed form
//! (`/hostedzone/XYZ`) to the bare id.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::ChangeBatch;
use aws_sdk_route53::Client;
use tracing::debug;

use crate::sync_errors::{RecordError, ZoneError};

/// A hosted zone accepted as the destination for alias records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostedZone {
    /// Zone identifier with the path prefix stripped
    pub id: String,

    /// Registered zone name, always with a trailing dot
    pub name: String,
}

/// Strip the path-style namespace from a provider zone identifier.
///
/// # Example
///
/// ```rust
/// use elby::route53::normalize_zone_id;
///
/// assert_eq!(normalize_zone_id("/hostedzone/ABC123"), "ABC123");
/// assert_eq!(normalize_zone_id("ABC123"), "ABC123");
/// ```
#[must_use]
pub fn normalize_zone_id(id: &str) -> &str {
    match id.rsplit_once('/') {
        Some((_, tail)) => tail,
        None => id,
    }
}

/// Resolves a top-level domain to its hosted zone.
#[async_trait]
pub trait Zones {
    /// Resolve `tld` to the hosted zone that exactly matches it.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError`] when no zone exists, the closest zone returned
    /// by the provider is not an exact match, or the lookup fails.
    /// Recoverable per service.
    async fn resolve(&self, tld: &str) -> Result<HostedZone, ZoneError>;
}

/// Submits record mutations to a hosted zone.
#[async_trait]
pub trait Records {
    /// Apply a one-change upsert batch to the zone identified by `zone_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] when the mutation API rejects or fails the
    /// submission. Recoverable per service; the next cycle re-upserts.
    async fn upsert_alias(&self, zone_id: &str, change: ChangeBatch) -> Result<(), RecordError>;
}

/// Production zone resolver and record writer over the Route53 API.
#[derive(Clone)]
pub struct Route53Dns {
    client: Client,
}

impl Route53Dns {
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
impl Zones for Route53Dns {
    async fn resolve(&self, tld: &str) -> Result<HostedZone, ZoneError> {
        debug!(%tld, "Listing hosted zones by name");

        let output = self
            .client
            .list_hosted_zones_by_name()
            .dns_name(tld)
            .send()
            .await
            .map_err(|e| ZoneError::LookupFailed {
                tld: tld.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        let Some(zone) = output.hosted_zones().first() else {
            return Err(ZoneError::ZoneNotFound {
                tld: tld.to_string(),
            });
        };

        // The listing is ordered; only the first entry can be the exact match.
        let expected = format!("{tld}.");
        if zone.name() != expected {
            return Err(ZoneError::ZoneNameMismatch {
                found: zone.name().to_string(),
                expected,
            });
        }

        Ok(HostedZone {
            id: normalize_zone_id(zone.id()).to_string(),
            name: zone.name().to_string(),
        })
    }
}

#[async_trait]
impl Records for Route53Dns {
    async fn upsert_alias(&self, zone_id: &str, change: ChangeBatch) -> Result<(), RecordError> {
        debug!(%zone_id, "Submitting record change batch");

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(change)
            .send()
            .await
            .map_err(|e| RecordError::UpsertFailed {
                zone_id: zone_id.to_string(),
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "route53_tests.rs"]
mod route53_tests;
