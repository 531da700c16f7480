use std::collections::BTreeSet;
use std::path::PathBuf;

/// Summary of one recorded module's dependency fragment
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedModule {
    pub module_id: String,
    pub dependency_count: usize,
    pub fragment_path: PathBuf,
}

/// CollectDependenciesResponse - What the dependency collection recorded
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectDependenciesResponse {
    pub modules: Vec<CollectedModule>,
    /// Ids flagged as part of a dependency cycle, across all modules
    pub looped: BTreeSet<String>,
    /// Requested-by paths dropped by the length or count limits
    pub truncated_paths: usize,
    /// Packages left without a checksum
    pub unresolved_checksums: usize,
}
