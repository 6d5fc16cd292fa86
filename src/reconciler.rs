// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The fixed-interval reconciliation loop.
//!
//! Each cycle fetches the full service catalog, then maps every actionable
//! Service to one idempotent alias upsert: resolve the load balancer behind
//! the ingress hostname, resolve the destination hosted zone, build the
//! change, submit it. Per-service failures are logged and skipped so one
//! failing Service never blocks its siblings; a catalog failure aborts the
//! process, which otherwise has no valid view of desired state.
//!
//! All state is recomputed from live upstream state every cycle. Nothing is
//! cached or diffed: the record is re-upserted even when no drift occurred.

use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::catalog::{Catalog, ServiceDescription};
use crate::config::Config;
use crate::elb::LoadBalancers;
use crate::metrics;
use crate::records::build_alias_upsert;
use crate::route53::{Records, Zones};
use crate::sync_errors::{CatalogError, LoadBalancerError, RecordError, ZoneError};

/// Why a service was set aside for the remainder of a cycle.
///
/// Every variant is recoverable: the service is retried from scratch on the
/// next poll. There is no intra-cycle retry.
#[derive(Error, Debug, Clone)]
pub enum SkipReason {
    /// Ingress not yet provisioned
    #[error("no ingress hostname assigned")]
    IngressPending,

    /// More than one ingress point, not supported
    #[error("{count} ingress hostnames assigned, expected exactly one")]
    MultipleIngress {
        /// Number of hostnames on the Service status
        count: usize,
    },

    /// The domain annotation is absent or empty
    #[error("domain annotation not set")]
    DomainMissing,

    /// Load balancer resolution failed
    #[error(transparent)]
    LoadBalancer(#[from] LoadBalancerError),

    /// Hosted zone resolution failed
    #[error(transparent)]
    Zone(#[from] ZoneError),

    /// Change construction or submission failed
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl SkipReason {
    /// The pipeline stage that produced this skip, as a metrics label.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::IngressPending | Self::MultipleIngress { .. } | Self::DomainMissing => {
                "actionability"
            }
            Self::LoadBalancer(_) => "load_balancer",
            Self::Zone(_) => "zone",
            Self::Record(RecordError::InvalidChange { .. }) => "build",
            Self::Record(RecordError::UpsertFailed { .. }) => "mutation",
        }
    }
}

/// A record successfully upserted during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncedRecord {
    /// Service the record was derived from
    pub service: String,

    /// Record name that was upserted
    pub domain: String,

    /// Load balancer hostname the alias points at
    pub hostname: String,
}

/// A service set aside during a cycle, with the failing stage's reason.
#[derive(Debug, Clone)]
pub struct SkippedService {
    /// Service name, for diagnostics
    pub service: String,

    /// Why the service was skipped
    pub reason: SkipReason,
}

/// Aggregated outcome of one reconcile cycle.
#[derive(Debug, Clone, Default)]
pub struct CycleReport {
    /// Records upserted, in catalog order
    pub synced: Vec<SyncedRecord>,

    /// Services skipped, in catalog order
    pub skipped: Vec<SkippedService>,
}

impl CycleReport {
    /// True when every service in the catalog produced an upsert.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Drives the service-to-alias-record reconciliation on a fixed interval.
///
/// Generic over its four collaborators so tests can run single cycles
/// against in-memory substitutes without real time or network.
pub struct Reconciler<C, L, Z, R> {
    catalog: C,
    load_balancers: L,
    zones: Z,
    records: R,
    tld: String,
    poll_interval: Duration,
}

impl<C, L, Z, R> Reconciler<C, L, Z, R>
where
    C: Catalog,
    L: LoadBalancers,
    Z: Zones,
    R: Records,
{
    /// Assemble a reconciler from its collaborators and the startup
    /// configuration.
    pub fn new(catalog: C, load_balancers: L, zones: Z, records: R, config: &Config) -> Self {
        Self {
            catalog,
            load_balancers,
            zones,
            records,
            tld: config.tld.clone(),
            poll_interval: config.poll_interval,
        }
    }

    /// Run reconcile cycles until `shutdown` completes.
    ///
    /// The first cycle starts immediately; later cycles start one poll
    /// interval apart. The shutdown future interrupts both the sleep and
    /// the wait for the next tick promptly.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when a cycle cannot fetch the catalog. The
    /// loop does not continue past it: without a catalog the process is
    /// operating blind, and surfacing immediately beats stalling silently.
    pub async fn run<F>(&self, shutdown: F) -> Result<(), CatalogError>
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        info!(
            interval_secs = self.poll_interval.as_secs(),
            "Starting service polling"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let report = self.run_cycle().await?;
                    info!(
                        synced = report.synced.len(),
                        skipped = report.skipped.len(),
                        "Reconcile cycle complete"
                    );
                }
                () = &mut shutdown => {
                    info!("Shutdown requested, stopping service polling");
                    return Ok(());
                }
            }
        }
    }

    /// Run a single reconcile cycle.
    ///
    /// Services are processed sequentially in catalog order; every
    /// per-service failure is logged with the service name and failing
    /// stage, counted, and isolated so the remaining services still make
    /// progress.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the catalog fetch fails, before any
    /// per-service processing.
    pub async fn run_cycle(&self) -> Result<CycleReport, CatalogError> {
        let started = Instant::now();

        let services = match self.catalog.fetch().await {
            Ok(services) => services,
            Err(e) => {
                metrics::record_cycle_error();
                return Err(e);
            }
        };

        info!(count = services.len(), "Found DNS services");

        let mut report = CycleReport::default();
        for service in &services {
            match self.reconcile_service(service).await {
                Ok(synced) => {
                    info!(
                        service = %synced.service,
                        domain = %synced.domain,
                        hostname = %synced.hostname,
                        "Upserted alias record"
                    );
                    metrics::record_upsert();
                    report.synced.push(synced);
                }
                Err(reason) => {
                    warn!(
                        service = %service.name,
                        stage = reason.stage(),
                        %reason,
                        "Skipping service"
                    );
                    metrics::record_skip(reason.stage());
                    report.skipped.push(SkippedService {
                        service: service.name.clone(),
                        reason,
                    });
                }
            }
        }

        metrics::record_cycle_success(started.elapsed());
        Ok(report)
    }

    /// Map one service description to at most one alias upsert.
    async fn reconcile_service(
        &self,
        service: &ServiceDescription,
    ) -> Result<SyncedRecord, SkipReason> {
        // Actionable means exactly one ingress hostname and a non-empty
        // domain annotation; any other shape is skipped, not fatal.
        let hostname = match service.ingress_hostnames.as_slice() {
            [hostname] => hostname.as_str(),
            [] => return Err(SkipReason::IngressPending),
            many => {
                return Err(SkipReason::MultipleIngress { count: many.len() });
            }
        };

        let domain = match service.domain.as_deref() {
            Some(domain) if !domain.is_empty() => domain,
            _ => return Err(SkipReason::DomainMissing),
        };

        let load_balancer = self.load_balancers.resolve(hostname).await?;
        let zone = self.zones.resolve(&self.tld).await?;

        let change = build_alias_upsert(domain, hostname, &load_balancer.canonical_hosted_zone_id)?;
        self.records.upsert_alias(&zone.id, change).await?;

        Ok(SyncedRecord {
            service: service.name.clone(),
            domain: domain.to_string(),
            hostname: hostname.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "reconciler_tests.rs"]
mod reconciler_tests;
