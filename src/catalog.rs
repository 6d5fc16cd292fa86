// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Service discovery against the Kubernetes API server.
//!
//! The catalog is the reconciler's only source of desired state: a namespaced
//! list of Services matching the DNS management label selector, reduced to
//! the three fields the reconciler decides on. The list is re-fetched in full
//! every cycle; nothing is cached.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Service;
use kube::{api::ListParams, Api, Client};
use tracing::debug;

use crate::constants::ANNOTATION_DOMAIN_NAME;
use crate::sync_errors::CatalogError;

/// One Service from the catalog fetch, reduced to the fields that drive
/// reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescription {
    /// Service name, used for diagnostics only
    pub name: String,

    /// The fully qualified domain the operator wants bound to this Service,
    /// from the `domainName` annotation
    pub domain: Option<String>,

    /// Externally visible hostnames assigned to the Service's load balancer,
    /// in status order. Populated asynchronously by cloud provisioning and
    /// empty while provisioning is in progress.
    pub ingress_hostnames: Vec<String>,
}

impl ServiceDescription {
    /// Reduce a Kubernetes `Service` to the fields that drive reconciliation.
    ///
    /// Ingress entries that only carry an IP address contribute no hostname.
    #[must_use]
    pub fn from_service(service: &Service) -> Self {
        let name = service.metadata.name.clone().unwrap_or_default();

        let domain = service
            .metadata
            .annotations
            .as_ref()
            .and_then(|annotations| annotations.get(ANNOTATION_DOMAIN_NAME))
            .cloned();

        let ingress_hostnames = service
            .status
            .as_ref()
            .and_then(|status| status.load_balancer.as_ref())
            .and_then(|lb| lb.ingress.as_ref())
            .map(|ingress| {
                ingress
                    .iter()
                    .filter_map(|entry| entry.hostname.clone())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            name,
            domain,
            ingress_hostnames,
        }
    }
}

/// Source of the current set of DNS-tagged service descriptions.
#[async_trait]
pub trait Catalog {
    /// Fetch the full catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the control plane is unreachable,
    /// returns a non-success status, or the response cannot be decoded.
    /// Catalog failures are fatal to the reconciler: without a catalog no
    /// reconciliation decision can be made safely.
    async fn fetch(&self) -> Result<Vec<ServiceDescription>, CatalogError>;
}

/// Catalog backed by the Kubernetes API server.
///
/// Read-only: listing Services never mutates cluster state.
pub struct KubeCatalog {
    services: Api<Service>,
    namespace: String,
    label_selector: String,
}

impl KubeCatalog {
    /// Create a catalog listing Services in `namespace` matching
    /// `label_selector`.
    #[must_use]
    pub fn new(client: Client, namespace: &str, label_selector: &str) -> Self {
        Self {
            services: Api::namespaced(client, namespace),
            namespace: namespace.to_string(),
            label_selector: label_selector.to_string(),
        }
    }
}

#[async_trait]
impl Catalog for KubeCatalog {
    async fn fetch(&self) -> Result<Vec<ServiceDescription>, CatalogError> {
        let params = ListParams::default().labels(&self.label_selector);

        let services =
            self.services
                .list(&params)
                .await
                .map_err(|e| CatalogError::ListFailed {
                    namespace: self.namespace.clone(),
                    reason: e.to_string(),
                })?;

        debug!(
            namespace = %self.namespace,
            selector = %self.label_selector,
            count = services.items.len(),
            "Listed DNS-tagged services"
        );

        Ok(services
            .items
            .iter()
            .map(ServiceDescription::from_service)
            .collect())
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod catalog_tests;
