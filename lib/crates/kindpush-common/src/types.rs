use serde::{Deserialize, Serialize};

/// Which rollout produced an output document.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Publish,
    Tag,
}

/// Output of a successful `publish` or `tag`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RolloutOutput {
    pub operation: Operation,
    pub cluster: String,
    /// Reference the nodes now serve.
    pub target: String,
    /// Where the image came from: the old reference for `tag`, the archive
    /// path or host-engine reference for `publish`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// `sha256:<hex>` of the tarball streamed to each node (`publish` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Display names of every node touched, in listing order.
    pub nodes: Vec<String>,
}

/// Output of `nodes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeListOutput {
    pub cluster: String,
    pub nodes: Vec<String>,
}

/// Stable machine-readable error codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NoNodes,
    ListNodesFailed,
    ExportFailed,
    NodesFailed,
    Interrupted,
    InvalidInput,
    Internal,
}

/// One failing node inside an [`ErrorOutput`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeFailureOutput {
    pub node: String,
    pub message: String,
}

/// Error object printed in `--json` mode when a command fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorOutput {
    pub error: bool,
    pub message: String,
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<NodeFailureOutput>,
}
