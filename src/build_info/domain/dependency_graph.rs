use super::Dependency;
use std::collections::HashMap;

/// Parent id to child ids, in the order the tool reported them
pub type Adjacency = HashMap<String, Vec<String>>;

/// DependencyGraph aggregate: the normalized adjacency and the resolved nodes
///
/// `adjacency` may reference ids missing from `nodes` (dependencies whose
/// checksum could not be resolved). Those edges are kept and skipped during
/// propagation.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    root: String,
    adjacency: Adjacency,
    nodes: HashMap<String, Dependency>,
}

impl DependencyGraph {
    pub fn new(
        root: impl Into<String>,
        adjacency: Adjacency,
        nodes: HashMap<String, Dependency>,
    ) -> Self {
        Self {
            root: root.into(),
            adjacency,
            nodes,
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn adjacency(&self) -> &Adjacency {
        &self.adjacency
    }

    pub fn nodes(&self) -> &HashMap<String, Dependency> {
        &self.nodes
    }

    pub fn into_parts(self) -> (String, Adjacency, HashMap<String, Dependency>) {
        (self.root, self.adjacency, self.nodes)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|children| children.len()).sum()
    }

    /// Number of edges whose target has no resolved node
    pub fn dangling_edge_count(&self) -> usize {
        self.adjacency
            .values()
            .flatten()
            .filter(|child| !self.nodes.contains_key(*child))
            .count()
    }
}
