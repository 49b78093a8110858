//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `std::error::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use std::error::Error as StdError;
use std::fmt;

use kindpush_common::ErrorCode;
use thiserror::Error;

/// Boxed cause carried by error variants that wrap port failures.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// ── Rollout errors ────────────────────────────────────────────────────────────

/// Why a `publish` or `tag` rollout failed.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("no nodes found for cluster '{cluster}'. Is the cluster running? Check with: kindpush nodes")]
    NoNodes { cluster: String },

    #[error("failed to list nodes for cluster '{cluster}'")]
    ListNodes {
        cluster: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to export image {target}")]
    Export {
        target: String,
        #[source]
        source: BoxError,
    },

    #[error(transparent)]
    Nodes(#[from] AggregateError),
}

impl PublishError {
    /// Returns `true` if `needle` is among the causes of this error,
    /// including every per-node failure of a [`PublishError::Nodes`].
    pub fn contains<E>(&self, needle: &E) -> bool
    where
        E: StdError + PartialEq + 'static,
    {
        match self {
            Self::Nodes(aggregate) => aggregate.contains(needle),
            other => chain_contains(other, needle),
        }
    }

    /// Stable code for machine-readable output.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoNodes { .. } => ErrorCode::NoNodes,
            Self::ListNodes { .. } => ErrorCode::ListNodesFailed,
            Self::Export { .. } => ErrorCode::ExportFailed,
            Self::Nodes(_) => ErrorCode::NodesFailed,
        }
    }
}

// ── Per-node failures ─────────────────────────────────────────────────────────

/// One node's failure: which node, and the full cause chain.
#[derive(Debug)]
pub struct NodeFailure {
    pub node: String,
    pub error: anyhow::Error,
}

/// Every per-node failure of one fan-out.
///
/// Keeps each node's original `anyhow::Error` instead of flattening them into
/// a string, so callers can still ask whether a particular cause was hit.
#[derive(Debug, Default)]
pub struct AggregateError {
    attempted: usize,
    failures: Vec<NodeFailure>,
}

impl AggregateError {
    #[must_use]
    pub fn new(attempted: usize, failures: Vec<NodeFailure>) -> Self {
        Self {
            attempted,
            failures,
        }
    }

    /// Number of nodes the action ran against.
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    #[must_use]
    pub fn failures(&self) -> &[NodeFailure] {
        &self.failures
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Returns `true` if any node's cause chain holds an error equal to `needle`.
    pub fn contains<E>(&self, needle: &E) -> bool
    where
        E: StdError + PartialEq + 'static,
    {
        self.failures
            .iter()
            .any(|f| f.error.chain().any(|cause| cause.downcast_ref::<E>() == Some(needle)))
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} nodes failed",
            self.failures.len(),
            self.attempted
        )?;
        for failure in &self.failures {
            write!(f, "\n  - {}: {:#}", failure.node, failure.error)?;
        }
        Ok(())
    }
}

// Every failure is already part of `Display`; exposing one of them as the
// source would print it twice under `{:#}`.
impl StdError for AggregateError {}

fn chain_contains<E>(err: &(dyn StdError + 'static), needle: &E) -> bool
where
    E: StdError + PartialEq + 'static,
{
    let mut current = Some(err);
    while let Some(e) = current {
        if e.downcast_ref::<E>() == Some(needle) {
            return true;
        }
        current = e.source();
    }
    false
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
