// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Startup configuration for the elby operator.
//!
//! All configuration is environment-sourced and resolved exactly once, before
//! the first reconcile cycle. Resolver logic never reads the ambient
//! environment; it receives this struct.

use std::time::Duration;

use crate::constants::{
    DEFAULT_POLL_INTERVAL_SECS, DNS_LABEL_SELECTOR, ENV_NAMESPACE, ENV_POLL_INTERVAL, ENV_TLD,
};
use crate::sync_errors::ConfigError;

/// Operator configuration, validated at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Namespace whose Services are watched
    pub namespace: String,

    /// Top-level domain whose hosted zone receives the alias records
    pub tld: String,

    /// Label selector identifying DNS-managed Services
    pub label_selector: String,

    /// Interval between reconcile cycles
    pub poll_interval: Duration,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Reads `NAMESPACE` (required), `TLD` (required) and
    /// `POLL_INTERVAL_SECS` (optional, default 30).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a required variable is unset or empty,
    /// or the poll interval is not a number of seconds. Both are
    /// misconfigurations, not transient conditions: the caller terminates
    /// the process.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|variable| std::env::var(variable).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Same contract as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let namespace = require(&lookup, ENV_NAMESPACE)?;
        let tld = require(&lookup, ENV_TLD)?;

        let poll_interval = match lookup(ENV_POLL_INTERVAL) {
            Some(raw) if !raw.is_empty() => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    variable: ENV_POLL_INTERVAL,
                    reason: format!("'{raw}' is not a number of seconds"),
                })?;
                Duration::from_secs(secs)
            }
            _ => Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        };

        Ok(Self {
            namespace,
            tld,
            label_selector: DNS_LABEL_SELECTOR.to_string(),
            poll_interval,
        })
    }
}

fn require<F>(lookup: &F, variable: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(variable) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVariable(variable)),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
