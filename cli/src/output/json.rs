//! JSON output helpers.
//!
//! Every `--json` code path prints exactly one document on stdout: the
//! command's result on success, an [`ErrorOutput`] on failure.

use anyhow::{Context, Result};
use kindpush_common::{ErrorCode, ErrorOutput, NodeFailureOutput, ReferenceError};
use serde::Serialize;

use crate::domain::{ConfigError, PublishError};

/// Pretty-print any output type.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn to_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

/// Build the error object for a failed command.
///
/// `interrupted` wins over the error's own code: a cancelled rollout also
/// reports per-node failures, but the cause is the interrupt.
#[must_use]
pub fn error_output(err: &anyhow::Error, interrupted: bool) -> ErrorOutput {
    let publish = err.downcast_ref::<PublishError>();
    let code = if interrupted {
        ErrorCode::Interrupted
    } else if let Some(publish) = publish {
        publish.code()
    } else if err.downcast_ref::<ConfigError>().is_some()
        || err.downcast_ref::<ReferenceError>().is_some()
    {
        ErrorCode::InvalidInput
    } else {
        ErrorCode::Internal
    };

    let failures = match publish {
        Some(PublishError::Nodes(aggregate)) => aggregate
            .failures()
            .iter()
            .map(|f| NodeFailureOutput {
                node: f.node.clone(),
                message: format!("{:#}", f.error),
            })
            .collect(),
        _ => Vec::new(),
    };

    ErrorOutput {
        error: true,
        message: format!("{err:#}"),
        code,
        failures,
    }
}

/// Format the error object for a failed command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(err: &anyhow::Error, interrupted: bool) -> Result<String> {
    to_pretty(&error_output(err, interrupted))
}
