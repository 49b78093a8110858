//! Domain types and validators for kindpush configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "cluster.name",
    "cluster.provider",
    "exec.timeout_secs",
    "exec.max_concurrency",
];
pub const VALID_ENGINES: &[&str] = &["docker", "podman", "nerdctl"];

/// Cluster name used by `kind create cluster` when none is given.
pub const DEFAULT_CLUSTER_NAME: &str = "kind";

const DEFAULT_EXEC_TIMEOUT_SECS: u64 = 300;

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.kindpush/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct KindpushConfig {
    pub cluster: ClusterConfig,
    pub exec: ExecConfig,
}

/// Which cluster to target and which engine runs its nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClusterConfig {
    pub name: String,
    pub provider: Engine,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CLUSTER_NAME.to_string(),
            provider: Engine::default(),
        }
    }
}

/// Limits applied to every per-node command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExecConfig {
    /// Per-command timeout in seconds.
    pub timeout_secs: u64,
    /// Nodes worked on at once; `0` means all of them.
    pub max_concurrency: usize,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_EXEC_TIMEOUT_SECS,
            max_concurrency: 0,
        }
    }
}

impl ExecConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Host container engine that runs the node containers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Docker,
    Podman,
    Nerdctl,
}

impl Engine {
    /// Binary name on `PATH`.
    #[must_use]
    pub fn binary(self) -> &'static str {
        match self {
            Self::Docker => "docker",
            Self::Podman => "podman",
            Self::Nerdctl => "nerdctl",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

impl FromStr for Engine {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "docker" => Ok(Self::Docker),
            "podman" => Ok(Self::Podman),
            "nerdctl" => Ok(Self::Nerdctl),
            other => Err(ConfigError::InvalidValue {
                key: "cluster.provider".to_string(),
                value: other.to_string(),
                valid: VALID_ENGINES.join(", "),
            }),
        }
    }
}

// ── Resolution ───────────────────────────────────────────────────────────────

/// Pick the cluster name: explicit (flag or `KIND_CLUSTER_NAME`) wins over
/// the config file, which wins over `kind`.
#[must_use]
pub fn resolve_cluster_name(explicit: Option<&str>, config: &KindpushConfig) -> String {
    match explicit.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ if !config.cluster.name.is_empty() => config.cluster.name.clone(),
        _ => DEFAULT_CLUSTER_NAME.to_string(),
    }
}

/// Pick the engine: a non-empty `KIND_EXPERIMENTAL_PROVIDER` value wins
/// over `cluster.provider`.
///
/// # Errors
///
/// Returns an error if the override names an unsupported engine.
pub fn resolve_engine(provider_env: Option<&str>, config: &KindpushConfig) -> Result<Engine> {
    match provider_env.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.parse()?),
        _ => Ok(config.cluster.provider),
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

/// Validates a configuration value for the given key.
///
/// # Errors
///
/// Returns an error if the value is not valid for the key.
pub fn validate_config_value(key: &str, value: &str) -> Result<()> {
    let invalid = |valid: &str| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    };
    match key {
        "cluster.name" if !is_dns_label(value) => {
            Err(invalid("lowercase letters, digits and '-', at most 63 characters").into())
        }
        "cluster.provider" => value.parse::<Engine>().map(|_| ()).map_err(Into::into),
        "exec.timeout_secs" => match value.parse::<u64>() {
            Ok(n) if n >= 1 => Ok(()),
            _ => Err(invalid("a whole number of seconds, at least 1").into()),
        },
        "exec.max_concurrency" if value.parse::<usize>().is_err() => {
            Err(invalid("a whole number, 0 for unbounded").into())
        }
        _ => Ok(()),
    }
}

/// Validate `key`/`value` and write the value into `config`.
///
/// # Errors
///
/// Returns an error if the key or value is invalid.
pub fn apply_config_value(config: &mut KindpushConfig, key: &str, value: &str) -> Result<()> {
    validate_config_key(key)?;
    validate_config_value(key, value)?;
    match key {
        "cluster.name" => config.cluster.name = value.to_string(),
        "cluster.provider" => config.cluster.provider = value.parse()?,
        "exec.timeout_secs" => config.exec.timeout_secs = value.parse()?,
        "exec.max_concurrency" => config.exec.max_concurrency = value.parse()?,
        _ => {}
    }
    Ok(())
}

/// RFC 1123 label: what kind accepts as a cluster name.
fn is_dns_label(s: &str) -> bool {
    let bytes = s.as_bytes();
    !bytes.is_empty()
        && bytes.len() <= 63
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        && bytes.first() != Some(&b'-')
        && bytes.last() != Some(&b'-')
}

// ── Unit tests ───────────────────────────────────────────────────────────────
