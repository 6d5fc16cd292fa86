// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Alias record change construction.
//!
//! Pure functions only: the reconciler builds the change here and submits it
//! through [`crate::route53::Records`].

use aws_sdk_route53::error::BuildError;
use aws_sdk_route53::types::{
    AliasTarget, Change, ChangeAction, ChangeBatch, ResourceRecordSet, RrType,
};

use crate::constants::CHANGE_BATCH_COMMENT;
use crate::sync_errors::RecordError;

/// Build the one-change batch that binds `domain` to `hostname`.
///
/// The change is always an UPSERT of an A-type alias record: a previous
/// cycle's record for the same domain is silently replaced when the backing
/// hostname changes, e.g. after load balancer replacement. Health evaluation
/// on the alias target stays disabled; the load balancer's own health
/// management is the single source of truth for endpoint health.
///
/// # Arguments
///
/// * `domain` - Fully qualified record name to upsert
/// * `hostname` - The load balancer hostname the alias points at
/// * `lb_hosted_zone_id` - Canonical hosted zone id of the load balancer
///
/// # Errors
///
/// Returns [`RecordError::InvalidChange`] when any input is empty. No I/O.
///
/// # Example
///
/// ```rust
/// use aws_sdk_route53::types::ChangeAction;
/// use elby::records::build_alias_upsert;
///
/// let batch = build_alias_upsert(
///     "web.example.com",
///     "elbname-123.us-east-1.elb.amazonaws.com",
///     "ZXYZ",
/// )
/// .unwrap();
///
/// assert_eq!(batch.changes()[0].action(), &ChangeAction::Upsert);
/// ```
pub fn build_alias_upsert(
    domain: &str,
    hostname: &str,
    lb_hosted_zone_id: &str,
) -> Result<ChangeBatch, RecordError> {
    if domain.is_empty() {
        return Err(invalid("domain is empty"));
    }
    if hostname.is_empty() {
        return Err(invalid("hostname is empty"));
    }
    if lb_hosted_zone_id.is_empty() {
        return Err(invalid("load balancer hosted zone id is empty"));
    }

    let alias_target = AliasTarget::builder()
        .dns_name(hostname)
        .hosted_zone_id(lb_hosted_zone_id)
        .evaluate_target_health(false)
        .build()
        .map_err(build_error)?;

    let record_set = ResourceRecordSet::builder()
        .name(domain)
        .r#type(RrType::A)
        .alias_target(alias_target)
        .build()
        .map_err(build_error)?;

    let change = Change::builder()
        .action(ChangeAction::Upsert)
        .resource_record_set(record_set)
        .build()
        .map_err(build_error)?;

    ChangeBatch::builder()
        .changes(change)
        .comment(CHANGE_BATCH_COMMENT)
        .build()
        .map_err(build_error)
}

fn invalid(reason: &str) -> RecordError {
    RecordError::InvalidChange {
        reason: reason.to_string(),
    }
}

fn build_error(e: BuildError) -> RecordError {
    RecordError::InvalidChange {
        reason: e.to_string(),
    }
}

#[cfg(test)]
#[path = "records_tests.rs"]
mod records_tests;
