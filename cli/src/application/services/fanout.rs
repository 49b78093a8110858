//! Fan-out: run one action against every node and gather every failure.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::future::Future;
use std::time::Instant;

use futures_util::stream::{self, StreamExt as _};

use crate::application::ports::NodeHandle;
use crate::domain::{AggregateError, NodeFailure};

/// Run `action` once for each node, at most `max_concurrency` at a time
/// (`0` means all nodes at once).
///
/// A failing node never stops the others: every node is attempted and every
/// failure is kept, in node order. An empty `nodes` slice succeeds.
///
/// # Errors
///
/// Returns an [`AggregateError`] holding one entry per failed node.
pub async fn run_on_all<'n, N, F, Fut>(
    nodes: &'n [N],
    max_concurrency: usize,
    action: F,
) -> Result<(), AggregateError>
where
    N: NodeHandle,
    F: Fn(&'n N) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let limit = match max_concurrency {
        0 => nodes.len().max(1),
        n => n,
    };

    let outcomes: Vec<(&str, anyhow::Result<()>)> = stream::iter(nodes)
        .map(|node| {
            let pending = action(node);
            async move {
                let started = Instant::now();
                let outcome = pending.await;
                let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
                match &outcome {
                    Ok(()) => tracing::info!(node = node.display_name(), elapsed_ms, "node done"),
                    Err(e) => tracing::warn!(
                        node = node.display_name(),
                        elapsed_ms,
                        error = %format!("{e:#}"),
                        "node failed"
                    ),
                }
                (node.display_name(), outcome)
            }
        })
        .buffered(limit)
        .collect()
        .await;

    let failures = outcomes
        .into_iter()
        .filter_map(|(node, outcome)| {
            outcome.err().map(|error| NodeFailure {
                node: node.to_string(),
                error,
            })
        })
        .collect();

    AggregateError::new(nodes.len(), failures).into_result()
}
