//! Node discovery rules for kind-style clusters.
//!
//! Pure functions only; the engine call lives in `crate::infra::engine`.

/// Label every node container of a cluster carries, valued with the cluster name.
pub const CLUSTER_LABEL: &str = "io.x-k8s.kind.cluster";

/// Label holding the node's role (`control-plane`, `worker`, ...).
pub const ROLE_LABEL: &str = "io.x-k8s.kind.role";

/// Role of the HA load balancer container. It has no containerd and is not
/// an image target.
pub const EXTERNAL_LOAD_BALANCER_ROLE: &str = "external-load-balancer";

/// One row of the engine's container listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeEntry {
    pub name: String,
    pub role: Option<String>,
}

impl NodeEntry {
    /// Whether this node runs a container runtime that can hold images.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.role.as_deref() != Some(EXTERNAL_LOAD_BALANCER_ROLE)
    }
}

/// Go template passed to `<engine> ps --format`: `name<TAB>role`.
#[must_use]
pub fn listing_format() -> String {
    format!("{{{{.Names}}}}\t{{{{.Label \"{ROLE_LABEL}\"}}}}")
}

/// Filter passed to `<engine> ps --filter` for the given cluster.
#[must_use]
pub fn cluster_filter(cluster: &str) -> String {
    format!("label={CLUSTER_LABEL}={cluster}")
}

/// Parse the `name<TAB>role` listing into the cluster's internal nodes,
/// sorted by name.
///
/// Blank lines are skipped, a missing or empty role is `None`, and the
/// external load balancer is dropped.
#[must_use]
pub fn parse_node_listing(stdout: &str) -> Vec<NodeEntry> {
    let mut nodes: Vec<NodeEntry> = stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let (name, role) = match line.split_once('\t') {
                Some((name, role)) => (name.trim(), role.trim()),
                None => (line, ""),
            };
            NodeEntry {
                name: name.to_string(),
                role: (!role.is_empty() && role != "<no value>").then(|| role.to_string()),
            }
        })
        .filter(NodeEntry::is_internal)
        .collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));
    nodes
}
