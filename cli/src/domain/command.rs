//! Commands run inside cluster nodes.
//!
//! The node's containerd is driven through `ctr` in the namespace the kubelet
//! reads images from. The rendered strings are a fixed contract with the
//! runtime and must not change shape.

use std::fmt;

use kindpush_common::ImageRef;

/// containerd CLI available in every node image.
pub const CTR: &str = "ctr";

/// containerd namespace used by the kubelet's CRI plugin.
pub const K8S_NAMESPACE: &str = "k8s.io";

/// A program plus its arguments, as run inside a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl NodeCommand {
    fn ctr(args: &[&str]) -> Self {
        let mut full = vec![format!("--namespace={K8S_NAMESPACE}")];
        full.extend(args.iter().map(ToString::to_string));
        Self {
            program: CTR.to_string(),
            args: full,
        }
    }

    /// Arguments as borrowed slices, for port calls.
    #[must_use]
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for NodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// `ctr --namespace=k8s.io images import -`
///
/// No reference argument: the image name travels inside the tarball manifest.
#[must_use]
pub fn import_command() -> NodeCommand {
    NodeCommand::ctr(&["images", "import", "-"])
}

/// `ctr --namespace=k8s.io images tag --force <old> <new>`
#[must_use]
pub fn tag_command(old: &ImageRef, new: &ImageRef) -> NodeCommand {
    NodeCommand::ctr(&["images", "tag", "--force", old.as_str(), new.as_str()])
}
