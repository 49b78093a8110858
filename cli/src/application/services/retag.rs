//! Retag: point a new reference at an image already imported on every node.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use kindpush_common::ImageRef;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{NodeHandle, NodeSource};
use crate::application::services::fanout::run_on_all;
use crate::application::services::nodes::resolve_nodes;
use crate::application::services::publish::Publisher;
use crate::domain::{PublishError, Rollout, tag_command};

impl<S: NodeSource> Publisher<'_, S> {
    /// Tag `old` as `new` on every node, replacing any existing `new`.
    ///
    /// No stream is attached. Nodes that succeed before another fails keep
    /// the new tag.
    ///
    /// # Errors
    ///
    /// - [`PublishError::NoNodes`] if the cluster has no nodes
    /// - [`PublishError::ListNodes`] if the nodes cannot be listed
    /// - [`PublishError::Nodes`] if tagging failed on one or more nodes
    pub async fn tag(
        &self,
        old: &ImageRef,
        new: &ImageRef,
        cancel: &CancellationToken,
    ) -> Result<Rollout, PublishError> {
        let nodes = resolve_nodes(self.source, &self.cluster).await?;
        tracing::info!(cluster = %self.cluster, %old, %new, nodes = nodes.len(), "tagging image");

        let cmd = tag_command(old, new);
        let args = cmd.arg_refs();
        self.reporter
            .step(&format!("Tagging {old} as {new} on {} node(s)...", nodes.len()));
        run_on_all(&nodes, self.max_concurrency, |node| {
            let (cmd, args) = (&cmd, &args);
            async move {
                let outcome = node.run_with_stdin(cancel, &cmd.program, args, None).await;
                self.report(node.display_name(), outcome, &format!("tagged {new}"))
            }
        })
        .await?;

        Ok(Rollout {
            cluster: self.cluster.clone(),
            nodes: nodes.iter().map(|n| n.display_name().to_string()).collect(),
            archive: None,
        })
    }
}
