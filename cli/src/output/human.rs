//! Human-readable terminal renderer.

use kindpush_common::types::{NodeListOutput, Operation, RolloutOutput};

use crate::domain::KindpushConfig;
use crate::output::OutputContext;

/// Renders command results as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render a finished publish or tag rollout.
    pub fn render_rollout(&self, rollout: &RolloutOutput) {
        let verb = match rollout.operation {
            Operation::Publish => "Published",
            Operation::Tag => "Tagged",
        };
        self.ctx.success(&format!(
            "{verb} {} on {} node(s) of cluster {}",
            rollout.target,
            rollout.nodes.len(),
            rollout.cluster
        ));
        if let Some(source) = &rollout.source {
            self.ctx.kv("Source:", source);
        }
        if let Some(digest) = &rollout.digest {
            self.ctx.kv("Archive:", digest);
        }
        if let Some(size) = rollout.size_bytes {
            self.ctx.kv("Size:", &format_bytes(size));
        }
        self.ctx.kv("Nodes:", &rollout.nodes.join(", "));
    }

    /// Render the node list of a cluster.
    pub fn render_nodes(&self, list: &NodeListOutput) {
        if list.nodes.is_empty() {
            self.ctx
                .warn(&format!("No nodes found for cluster {}", list.cluster));
            self.ctx.info("Create one with: kind create cluster");
            return;
        }
        self.ctx.header(&format!("Cluster {}:", list.cluster));
        for node in &list.nodes {
            self.ctx.item(node);
        }
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &KindpushConfig, path: &str) {
        self.ctx.header("Configuration:");
        self.ctx.kv("File:", path);
        self.ctx.kv("cluster.name:", &config.cluster.name);
        self.ctx
            .kv("cluster.provider:", config.cluster.provider.binary());
        self.ctx
            .kv("exec.timeout_secs:", &config.exec.timeout_secs.to_string());
        self.ctx.kv(
            "exec.max_concurrency:",
            &match config.exec.max_concurrency {
                0 => "0 (unbounded)".to_string(),
                n => n.to_string(),
            },
        );
    }
}

/// `1536` → `1.5 KiB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}
