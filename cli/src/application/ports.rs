//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and shared types, never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::process::Output;
use std::time::Duration;

use anyhow::Result;
use kindpush_common::ImageRef;
use tokio::io::AsyncRead;
use tokio_util::sync::CancellationToken;

use crate::domain::KindpushConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Byte stream attached to a command's standard input.
pub type StdinStream<'a> = Box<dyn AsyncRead + Send + Unpin + 'a>;

// ── Cluster Port Traits ───────────────────────────────────────────────────────

/// One member of a cluster that can run commands.
#[allow(async_fn_in_trait)]
pub trait NodeHandle {
    /// Name used in diagnostics and output.
    fn display_name(&self) -> &str;

    /// Run `command args...` inside the node, feeding `stdin` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be started, exits non-zero,
    /// times out, or `cancel` fires before it finishes.
    async fn run_with_stdin(
        &self,
        cancel: &CancellationToken,
        command: &str,
        args: &[&str],
        stdin: Option<StdinStream<'_>>,
    ) -> Result<()>;
}

/// Enumerates the nodes of a named cluster.
#[allow(async_fn_in_trait)]
pub trait NodeSource {
    type Node: NodeHandle;

    /// List the cluster's internal nodes. A cluster with no nodes yields an
    /// empty `Vec`, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the nodes cannot be enumerated.
    async fn list_nodes(&self, cluster: &str) -> Result<Vec<Self::Node>>;
}

/// Renders an image as a container-image tarball.
#[allow(async_fn_in_trait)]
pub trait ImageExporter {
    /// Produce the full tarball, with `target` as the embedded image name.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be read or rendered.
    async fn export(&self, target: &ImageRef) -> Result<Vec<u8>>;
}

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;

    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output>;

    /// Run a program with stdin streamed from `stdin` (or closed when `None`).
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned, exceeds the default
    /// timeout, or `cancel` fires. The child process is killed in both cases.
    async fn run_with_stdin(
        &self,
        program: &str,
        args: &[&str],
        stdin: Option<StdinStream<'_>>,
        cancel: &CancellationToken,
    ) -> Result<Output>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

/// Reporter that drops every event.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading and saving the user configuration.
pub trait ConfigStore {
    /// Load the configuration, falling back to defaults when none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<KindpushConfig>;

    /// Persist `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, config: &KindpushConfig) -> Result<()>;

    /// Location of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<std::path::PathBuf>;
}
