// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for startup configuration resolution

#[cfg(test)]
mod tests {
    use super::super::Config;
    use crate::constants::DNS_LABEL_SELECTOR;
    use crate::sync_errors::ConfigError;
    use std::time::Duration;

    fn lookup(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v).to_string())
        }
    }

    // ========================================================================
    // Valid Configuration Tests
    // ========================================================================

    #[test]
    fn test_full_configuration() {
        let config = Config::from_lookup(lookup(&[
            ("NAMESPACE", "production"),
            ("TLD", "example.com"),
            ("POLL_INTERVAL_SECS", "60"),
        ]))
        .unwrap();

        assert_eq!(config.namespace, "production");
        assert_eq!(config.tld, "example.com");
        assert_eq!(config.label_selector, DNS_LABEL_SELECTOR);
        assert_eq!(config.poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_poll_interval_defaults_to_thirty_seconds() {
        let config = Config::from_lookup(lookup(&[
            ("NAMESPACE", "default"),
            ("TLD", "example.com"),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_poll_interval_uses_default() {
        let config = Config::from_lookup(lookup(&[
            ("NAMESPACE", "default"),
            ("TLD", "example.com"),
            ("POLL_INTERVAL_SECS", ""),
        ]))
        .unwrap();

        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    // ========================================================================
    // Missing/Invalid Configuration Tests
    // ========================================================================

    #[test]
    fn test_missing_namespace_is_rejected() {
        let result = Config::from_lookup(lookup(&[("TLD", "example.com")]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingVariable("NAMESPACE"))
        ));
    }

    #[test]
    fn test_empty_namespace_counts_as_missing() {
        let result = Config::from_lookup(lookup(&[
            ("NAMESPACE", ""),
            ("TLD", "example.com"),
        ]));

        assert!(matches!(
            result,
            Err(ConfigError::MissingVariable("NAMESPACE"))
        ));
    }

    #[test]
    fn test_missing_tld_is_rejected() {
        let result = Config::from_lookup(lookup(&[("NAMESPACE", "default")]));

        assert!(matches!(result, Err(ConfigError::MissingVariable("TLD"))));
    }

    #[test]
    fn test_unparseable_poll_interval_is_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("NAMESPACE", "default"),
            ("TLD", "example.com"),
            ("POLL_INTERVAL_SECS", "soon"),
        ]));

        let err = result.unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                variable: "POLL_INTERVAL_SECS",
                ..
            }
        ));
        assert!(err.to_string().contains("soon"));
    }
}
