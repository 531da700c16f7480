use crate::build_info::domain::{Adjacency, Dependency, RequestPath};
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::debug;

/// Default upper bound on the number of ids in one requested-by path
pub const DEFAULT_MAX_PATH_LENGTH: usize = 50;

/// Default upper bound on the number of requested-by paths per dependency
pub const DEFAULT_MAX_PATHS_PER_DEPENDENCY: usize = 50;

/// Outcome of a propagation run
#[derive(Debug, Default)]
pub struct Propagation {
    /// Every node with its accumulated requested-by paths
    pub dependencies: HashMap<String, Dependency>,
    /// Ids flagged as their own ancestor
    pub looped: BTreeSet<String>,
    /// Paths dropped because a length or count limit was reached
    pub truncated: usize,
}

impl Propagation {
    /// Dependencies ordered by id
    pub fn into_sorted_dependencies(self) -> Vec<Dependency> {
        let mut dependencies: Vec<Dependency> = self.dependencies.into_values().collect();
        dependencies.sort_by(|a, b| a.id.cmp(&b.id));
        dependencies
    }
}

/// RequestedByPropagator service computing provenance chains
///
/// Starting from a root, every reachable dependency receives each distinct
/// path back to the root, nearest parent first and root id last. Diamond
/// dependencies keep one path per route; identical paths are stored once.
///
/// A dependency that shows up inside one of its own paths is flagged as
/// looped. It forwards the paths it received in that step exactly once, so
/// every member of the cycle gets flagged, and is closed afterwards. A closed
/// dependency still collects new distinct paths within the limits but is
/// never traversed again.
pub struct RequestedByPropagator {
    max_path_length: usize,
    max_paths: usize,
}

impl Default for RequestedByPropagator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl RequestedByPropagator {
    pub fn new(max_path_length: usize, max_paths: usize) -> Self {
        Self {
            max_path_length: max_path_length.max(1),
            max_paths: max_paths.max(1),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_MAX_PATH_LENGTH, DEFAULT_MAX_PATHS_PER_DEPENDENCY)
    }

    /// Propagates requested-by paths from `root` through `adjacency`
    ///
    /// `nodes` is consumed and returned inside the [`Propagation`] with the
    /// paths filled in. Children missing from `nodes` are skipped. A root
    /// that already has a loop is returned untouched.
    pub fn propagate(
        &self,
        root: &Dependency,
        nodes: HashMap<String, Dependency>,
        adjacency: &Adjacency,
    ) -> Propagation {
        let mut traversal = Traversal {
            adjacency,
            nodes,
            states: HashMap::new(),
            looped: BTreeSet::new(),
            truncated: 0,
            max_path_length: self.max_path_length,
            max_paths: self.max_paths,
        };

        if root.has_loop() {
            debug!(root = %root.id, "root already contains a loop, nothing to propagate");
        } else {
            let root_paths: Vec<TrackedPath> =
                root.requested_by.iter().map(TrackedPath::from_ids).collect();
            traversal.visit(&root.id, &root_paths);
        }

        if traversal.truncated > 0 {
            debug!(
                root = %root.id,
                truncated = traversal.truncated,
                "requested-by paths truncated by length or count limits"
            );
        }

        Propagation {
            dependencies: traversal.nodes,
            looped: traversal.looped,
            truncated: traversal.truncated,
        }
    }
}

/// A path together with its member set for constant-time ancestry checks
struct TrackedPath {
    ids: RequestPath,
    members: HashSet<String>,
}

impl TrackedPath {
    fn from_ids(ids: &RequestPath) -> Self {
        Self {
            ids: ids.clone(),
            members: ids.iter().cloned().collect(),
        }
    }

    /// `[parent] ++ self`
    fn prepend(&self, parent: &str) -> Self {
        let mut ids = Vec::with_capacity(self.ids.len() + 1);
        ids.push(parent.to_string());
        ids.extend(self.ids.iter().cloned());
        let mut members = self.members.clone();
        members.insert(parent.to_string());
        Self { ids, members }
    }
}

#[derive(Default)]
struct NodeState {
    seen: HashSet<RequestPath>,
    closed: bool,
}

struct Traversal<'a> {
    adjacency: &'a Adjacency,
    nodes: HashMap<String, Dependency>,
    states: HashMap<String, NodeState>,
    looped: BTreeSet<String>,
    truncated: usize,
    max_path_length: usize,
    max_paths: usize,
}

impl Traversal<'_> {
    fn visit(&mut self, parent_id: &str, parent_paths: &[TrackedPath]) {
        let Some(children) = self.adjacency.get(parent_id) else {
            return;
        };

        for child_id in children {
            let added = self.extend_child(parent_id, child_id, parent_paths);
            if !added.is_empty() {
                self.visit(child_id, &added);
            }
        }
    }

    /// Appends `[parent] ++ p` for each parent path to the child and returns
    /// the added paths that should be forwarded to its own children
    fn extend_child(
        &mut self,
        parent_id: &str,
        child_id: &str,
        parent_paths: &[TrackedPath],
    ) -> Vec<TrackedPath> {
        let Some(child) = self.nodes.get_mut(child_id) else {
            return Vec::new();
        };

        let state = self
            .states
            .entry(child_id.to_string())
            .or_insert_with(|| NodeState {
                seen: child.requested_by.iter().cloned().collect(),
                closed: child.has_loop(),
            });
        let was_closed = state.closed;

        let mut added = Vec::new();
        let mut found_loop = false;
        for path in parent_paths {
            let candidate = path.prepend(parent_id);
            if state.seen.contains(&candidate.ids) {
                continue;
            }
            if candidate.ids.len() > self.max_path_length
                || child.requested_by.len() >= self.max_paths
            {
                self.truncated += 1;
                continue;
            }
            if candidate.members.contains(child_id) {
                found_loop = true;
            }
            state.seen.insert(candidate.ids.clone());
            child.requested_by.push(candidate.ids.clone());
            added.push(candidate);
        }

        if found_loop {
            state.closed = true;
            self.looped.insert(child_id.to_string());
        }

        // Closed children keep their new paths but are not traversed again,
        // except for the step that flags the loop.
        if was_closed {
            Vec::new()
        } else {
            added
        }
    }
}
