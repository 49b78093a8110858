//! Publish: stream an image tarball into every node's containerd.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::io::Cursor;

use kindpush_common::ImageRef;
use tokio_util::sync::CancellationToken;

use crate::application::ports::{
    ImageExporter, NodeHandle, NodeSource, ProgressReporter, SilentReporter, StdinStream,
};
use crate::application::services::fanout::run_on_all;
use crate::application::services::nodes::resolve_nodes;
use crate::domain::{ArchiveSummary, PublishError, Rollout, import_command};

/// Rolls images out to the nodes of one cluster.
///
/// The node source is a constructor parameter: production wires the
/// container-engine source, tests wire in-memory fakes.
pub struct Publisher<'a, S: NodeSource> {
    pub(super) source: &'a S,
    pub(super) cluster: String,
    pub(super) max_concurrency: usize,
    pub(super) reporter: &'a dyn ProgressReporter,
}

impl<'a, S: NodeSource> Publisher<'a, S> {
    #[must_use]
    pub fn new(source: &'a S, cluster: impl Into<String>) -> Self {
        Self {
            source,
            cluster: cluster.into(),
            max_concurrency: 0,
            reporter: &SilentReporter,
        }
    }

    /// Limit how many nodes are worked on at once (`0` = all).
    #[must_use]
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    #[must_use]
    pub fn with_reporter(mut self, reporter: &'a dyn ProgressReporter) -> Self {
        self.reporter = reporter;
        self
    }

    #[must_use]
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    /// Surface one node's outcome on the reporter and pass it through.
    pub(super) fn report(
        &self,
        node: &str,
        outcome: anyhow::Result<()>,
        done: &str,
    ) -> anyhow::Result<()> {
        match &outcome {
            Ok(()) => self.reporter.success(&format!("{node}: {done}")),
            Err(e) => self.reporter.warn(&format!("{node}: {e:#}")),
        }
        outcome
    }

    /// Import `image` into every node, named `target`.
    ///
    /// The image is exported once; each node then reads its own cursor over
    /// the same buffer, so every node receives the complete tarball.
    ///
    /// # Errors
    ///
    /// - [`PublishError::NoNodes`] if the cluster has no nodes (nothing is exported)
    /// - [`PublishError::ListNodes`] if the nodes cannot be listed
    /// - [`PublishError::Export`] if the image cannot be rendered
    /// - [`PublishError::Nodes`] if the import failed on one or more nodes
    pub async fn write(
        &self,
        target: &ImageRef,
        image: &impl ImageExporter,
        cancel: &CancellationToken,
    ) -> Result<Rollout, PublishError> {
        let nodes = resolve_nodes(self.source, &self.cluster).await?;

        self.reporter.step(&format!("Exporting {target}..."));
        let tarball = image
            .export(target)
            .await
            .map_err(|e| PublishError::Export {
                target: target.to_string(),
                source: e.into(),
            })?;
        let archive = ArchiveSummary::of(&tarball);
        tracing::info!(
            cluster = %self.cluster,
            %target,
            digest = %archive.digest,
            size_bytes = archive.size_bytes,
            nodes = nodes.len(),
            "publishing image"
        );

        let cmd = import_command();
        let args = cmd.arg_refs();
        self.reporter
            .step(&format!("Importing {target} into {} node(s)...", nodes.len()));
        run_on_all(&nodes, self.max_concurrency, |node| {
            let (cmd, args, tarball) = (&cmd, &args, &tarball);
            async move {
                let stdin: StdinStream<'_> = Box::new(Cursor::new(tarball.as_slice()));
                let outcome = node
                    .run_with_stdin(cancel, &cmd.program, args, Some(stdin))
                    .await;
                self.report(node.display_name(), outcome, &format!("imported {target}"))
            }
        })
        .await?;

        Ok(Rollout {
            cluster: self.cluster.clone(),
            nodes: nodes.iter().map(|n| n.display_name().to_string()).collect(),
            archive: Some(archive),
        })
    }
}
