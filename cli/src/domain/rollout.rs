//! Result of a successful rollout.

use kindpush_common::{NodeListOutput, Operation, RolloutOutput};
use sha2::{Digest, Sha256};

/// Digest and size of the tarball streamed to every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSummary {
    /// `sha256:<hex>`
    pub digest: String,
    pub size_bytes: u64,
}

impl ArchiveSummary {
    /// Summarise a rendered tarball.
    #[must_use]
    pub fn of(tarball: &[u8]) -> Self {
        Self {
            digest: format!("sha256:{:x}", Sha256::digest(tarball)),
            size_bytes: tarball.len() as u64,
        }
    }
}

/// What a successful `publish` or `tag` touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rollout {
    pub cluster: String,
    /// Display names of every node, in listing order.
    pub nodes: Vec<String>,
    /// Set by `publish` only.
    pub archive: Option<ArchiveSummary>,
}

impl Rollout {
    /// Machine-readable form for `--json` output.
    #[must_use]
    pub fn to_output(&self, operation: Operation, target: &str, source: Option<&str>) -> RolloutOutput {
        RolloutOutput {
            operation,
            cluster: self.cluster.clone(),
            target: target.to_string(),
            source: source.map(ToString::to_string),
            digest: self.archive.as_ref().map(|a| a.digest.clone()),
            size_bytes: self.archive.as_ref().map(|a| a.size_bytes),
            nodes: self.nodes.clone(),
        }
    }
}

/// Machine-readable node listing.
#[must_use]
pub fn node_list_output(cluster: &str, nodes: &[String]) -> NodeListOutput {
    NodeListOutput {
        cluster: cluster.to_string(),
        nodes: nodes.to_vec(),
    }
}
