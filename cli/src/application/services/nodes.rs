//! Node resolution for a single rollout.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use crate::application::ports::{NodeHandle, NodeSource};
use crate::domain::PublishError;

/// List the internal nodes of `cluster`. An empty cluster is not an error here.
///
/// # Errors
///
/// Returns [`PublishError::ListNodes`] if the node source fails.
pub async fn list_nodes<S: NodeSource>(
    source: &S,
    cluster: &str,
) -> Result<Vec<S::Node>, PublishError> {
    let nodes = source
        .list_nodes(cluster)
        .await
        .map_err(|e| PublishError::ListNodes {
            cluster: cluster.to_string(),
            source: e.into(),
        })?;
    tracing::debug!(
        cluster,
        nodes = ?nodes.iter().map(NodeHandle::display_name).collect::<Vec<_>>(),
        "listed nodes"
    );
    Ok(nodes)
}

/// List the nodes a rollout targets, refusing an empty cluster.
///
/// Succeeding against zero nodes would look the same as doing nothing, so
/// `publish` and `tag` both go through here.
///
/// # Errors
///
/// Returns [`PublishError::NoNodes`] for an empty cluster, or
/// [`PublishError::ListNodes`] if the node source fails.
pub async fn resolve_nodes<S: NodeSource>(
    source: &S,
    cluster: &str,
) -> Result<Vec<S::Node>, PublishError> {
    let nodes = list_nodes(source, cluster).await?;
    if nodes.is_empty() {
        return Err(PublishError::NoNodes {
            cluster: cluster.to_string(),
        });
    }
    Ok(nodes)
}
