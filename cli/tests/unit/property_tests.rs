//! Property-based tests for validation and parsing logic.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use kindpush_cli::domain::config::{
    KindpushConfig, VALID_CONFIG_KEYS, apply_config_value, resolve_cluster_name,
    validate_config_key, validate_config_value,
};
use kindpush_cli::domain::{AggregateError, NodeFailure, parse_node_listing};

// ============================================================================
// Config validation
// ============================================================================

proptest! {
    /// Keys outside the whitelist are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,20}\\.[a-z_]{1,20}") {
        if !VALID_CONFIG_KEYS.contains(&key.as_str()) {
            prop_assert!(validate_config_key(&key).is_err(), "accepted invalid key: {key}");
        }
    }

    /// Every DNS label is a valid cluster name and round-trips into the config.
    #[test]
    fn prop_dns_labels_accepted(name in "[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?") {
        let mut cfg = KindpushConfig::default();
        prop_assert!(apply_config_value(&mut cfg, "cluster.name", &name).is_ok());
        prop_assert_eq!(&cfg.cluster.name, &name);
    }

    /// Upper-case letters never make a valid cluster name.
    #[test]
    fn prop_uppercase_cluster_names_rejected(name in "[a-z]{0,5}[A-Z][a-zA-Z]{0,5}") {
        prop_assert!(validate_config_value("cluster.name", &name).is_err());
    }

    /// Any positive timeout is accepted.
    #[test]
    fn prop_positive_timeouts_accepted(secs in 1u64..=86_400) {
        prop_assert!(validate_config_value("exec.timeout_secs", &secs.to_string()).is_ok());
    }

    /// An explicit non-blank cluster name always wins over the config file.
    #[test]
    fn prop_explicit_cluster_wins(name in "[a-z][a-z0-9-]{0,20}") {
        let mut cfg = KindpushConfig::default();
        cfg.cluster.name = "from-config".into();
        prop_assert_eq!(resolve_cluster_name(Some(&name), &cfg), name);
    }
}

#[test]
fn test_zero_timeout_rejected() {
    assert!(validate_config_value("exec.timeout_secs", "0").is_err());
    assert!(validate_config_value("exec.max_concurrency", "0").is_ok());
}

// ============================================================================
// Node listing
// ============================================================================

proptest! {
    /// Parsed nodes are sorted, unique-per-line, and never the load balancer.
    #[test]
    fn prop_node_listing_sorted_without_load_balancer(
        names in prop::collection::btree_set("[a-z]{1,8}-(worker|control-plane)[0-9]?", 0..8),
        with_lb in any::<bool>(),
    ) {
        let mut lines: Vec<String> = names
            .iter()
            .rev()
            .map(|n| {
                let role = if n.contains("control-plane") { "control-plane" } else { "worker" };
                format!("{n}\t{role}")
            })
            .collect();
        if with_lb {
            lines.push("x-external-load-balancer\texternal-load-balancer".into());
        }
        let parsed = parse_node_listing(&lines.join("\n"));
        let got: Vec<&str> = parsed.iter().map(|e| e.name.as_str()).collect();
        let want: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(got, want);
    }
}

// ============================================================================
// Error aggregation
// ============================================================================

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("node error {0}")]
struct Tagged(u8);

proptest! {
    /// Every failure's cause is discoverable, and nothing else is.
    #[test]
    fn prop_aggregate_contains_exactly_its_causes(
        tags in prop::collection::btree_set(0u8..32, 1..6),
        probe in 0u8..32,
    ) {
        let failures = tags
            .iter()
            .map(|t| NodeFailure {
                node: format!("n{t}"),
                error: anyhow::Error::new(Tagged(*t)).context("running ctr"),
            })
            .collect();
        let err = AggregateError::new(tags.len() + 1, failures);
        for t in &tags {
            prop_assert!(err.contains(&Tagged(*t)));
        }
        prop_assert_eq!(err.contains(&Tagged(probe)), tags.contains(&probe));
    }
}
