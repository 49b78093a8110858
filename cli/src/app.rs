//! Application context: unified state passed to every command handler.
//!
//! Built once from the top-level flags: output settings, the loaded config,
//! the resolved cluster and engine, and the cancellation token wired to
//! Ctrl-C.

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::application::ports::ConfigStore;
use crate::domain::{Engine, KindpushConfig, resolve_cluster_name, resolve_engine};
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::config::YamlConfigStore;
use crate::infra::engine::EngineNodeSource;
use crate::output::OutputContext;

/// Selects the node provider, as `kind` itself does.
pub const PROVIDER_ENV: &str = "KIND_EXPERIMENTAL_PROVIDER";

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// `--cluster` / `KIND_CLUSTER_NAME`.
    pub cluster: Option<String>,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Where the configuration lives.
    pub config_store: YamlConfigStore,
    /// Configuration as loaded at startup.
    pub config: KindpushConfig,
    /// Cluster every command targets.
    pub cluster: String,
    /// Engine running the node containers.
    pub engine: Engine,
    /// Process runner shared by the node source and exporters.
    pub runner: Arc<TokioCommandRunner>,
    /// Cancelled on Ctrl-C.
    pub cancel: CancellationToken,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file is unreadable or names an
    /// unsupported engine.
    pub fn new(flags: &AppFlags, cancel: CancellationToken) -> Result<Self> {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };

        let config_store = YamlConfigStore;
        let config = config_store.load()?;
        let cluster = resolve_cluster_name(flags.cluster.as_deref(), &config);
        let engine = resolve_engine(std::env::var(PROVIDER_ENV).ok().as_deref(), &config)?;
        let runner = Arc::new(TokioCommandRunner::new(config.exec.timeout()));
        tracing::debug!(%cluster, %engine, "context ready");

        Ok(Self {
            // JSON mode keeps stdout to the single result document.
            output: OutputContext::new(flags.output.no_color, flags.output.quiet || flags.output.json),
            mode,
            config_store,
            config,
            cluster,
            engine,
            runner,
            cancel,
        })
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Node source for the configured engine.
    #[must_use]
    pub fn node_source(&self) -> EngineNodeSource<TokioCommandRunner> {
        EngineNodeSource::new(self.engine, Arc::clone(&self.runner))
    }
}
