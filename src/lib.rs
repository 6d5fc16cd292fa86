// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Elby - Route53 alias operator for Kubernetes Services
//!
//! Elby keeps Route53 alias records synchronized with the ELB endpoints of
//! Kubernetes Services tagged for DNS management.
//!
//! ## Overview
//!
//! On a fixed interval, elby lists the Services in a configured namespace
//! that carry the `dns=route53` label, and for each one binds the domain
//! named in its `domainName` annotation to the Service's load balancer by
//! upserting an A-type alias record in the hosted zone of a configured
//! top-level domain. Upserts are unconditional and idempotent: the hosted
//! zone is the source of truth to converge toward, not to diff against.
//!
//! ## Modules
//!
//! - [`catalog`] - Service discovery against the Kubernetes API server
//! - [`elb`] - Load balancer resolution via the classic ELB API
//! - [`route53`] - Hosted zone resolution and record submission
//! - [`records`] - Alias record change construction
//! - [`reconciler`] - The fixed-interval reconciliation loop
//! - [`config`] - Startup configuration from the environment
//! - [`sync_errors`] - Error types and the fatal/recoverable split
//! - [`metrics`] - Prometheus metrics and the `/metrics` server
//!
//! ## Example
//!
//! ```rust
//! use elby::records::build_alias_upsert;
//!
//! let change = build_alias_upsert(
//!     "web.example.com",
//!     "elbname-123.us-east-1.elb.amazonaws.com",
//!     "ZXYZ",
//! )
//! .unwrap();
//!
//! assert_eq!(change.changes().len(), 1);
//! ```
//!
//! ## Features
//!
//! - **Per-service isolation** - One failing Service never blocks its siblings
//! - **Idempotent mutations** - UPSERT semantics survive load balancer churn
//! - **Deterministic testing** - Every provider sits behind a trait seam

pub mod catalog;
pub mod config;
pub mod constants;
pub mod elb;
pub mod metrics;
pub mod reconciler;
pub mod records;
pub mod route53;
pub mod sync_errors;
