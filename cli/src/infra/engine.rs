//! Container-engine adapters for kind-style clusters.
//!
//! `EngineNodeSource<R>` lists a cluster's node containers through the host
//! engine CLI and hands out `EngineNode<R>` handles that run commands inside
//! those containers with `<engine> exec`. Both route every call through a
//! `CommandRunner`, so tests can inject a recording runner.

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::application::ports::{CommandRunner, NodeHandle, NodeSource, StdinStream};
use crate::domain::Engine;
use crate::domain::node::{cluster_filter, listing_format, parse_node_listing};
use crate::infra::command_runner::DEFAULT_CMD_TIMEOUT;

/// Lists nodes by the kind cluster label on their containers.
pub struct EngineNodeSource<R: CommandRunner> {
    engine: Engine,
    runner: Arc<R>,
}

impl<R: CommandRunner> EngineNodeSource<R> {
    pub fn new(engine: Engine, runner: Arc<R>) -> Self {
        Self { engine, runner }
    }
}

impl<R: CommandRunner> NodeSource for EngineNodeSource<R> {
    type Node = EngineNode<R>;

    async fn list_nodes(&self, cluster: &str) -> Result<Vec<EngineNode<R>>> {
        let bin = self.engine.binary();
        let filter = cluster_filter(cluster);
        let format = listing_format();
        let output = self
            .runner
            .run_with_timeout(
                bin,
                &["ps", "-a", "--filter", &filter, "--format", &format],
                DEFAULT_CMD_TIMEOUT,
            )
            .await
            .with_context(|| format!("failed to run {bin} ps"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{bin} ps failed: {}", stderr.trim());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_node_listing(&stdout)
            .into_iter()
            .map(|entry| EngineNode {
                name: entry.name,
                engine: self.engine,
                runner: Arc::clone(&self.runner),
            })
            .collect())
    }
}

/// One node container, addressed by name.
pub struct EngineNode<R: CommandRunner> {
    name: String,
    engine: Engine,
    runner: Arc<R>,
}

impl<R: CommandRunner> fmt::Debug for EngineNode<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineNode")
            .field("name", &self.name)
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<R: CommandRunner> NodeHandle for EngineNode<R> {
    fn display_name(&self) -> &str {
        &self.name
    }

    async fn run_with_stdin(
        &self,
        cancel: &CancellationToken,
        command: &str,
        args: &[&str],
        stdin: Option<StdinStream<'_>>,
    ) -> Result<()> {
        let bin = self.engine.binary();
        let mut full_args = vec!["exec", "--privileged"];
        if stdin.is_some() {
            full_args.push("-i");
        }
        full_args.push(&self.name);
        full_args.push(command);
        full_args.extend_from_slice(args);

        let command_line = std::iter::once(command)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        tracing::debug!(node = %self.name, command = %command_line, "running on node");

        let output = self
            .runner
            .run_with_stdin(bin, &full_args, stdin, cancel)
            .await
            .with_context(|| format!("failed to run `{command_line}` on node {}", self.name))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let code = output
                .status
                .code()
                .map_or_else(|| "a signal".to_string(), |c| format!("code {c}"));
            anyhow::bail!("`{command_line}` exited with {code}: {}", stderr.trim());
        }
        Ok(())
    }
}
