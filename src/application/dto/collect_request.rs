use crate::application::dto::RecordRequest;
use crate::build_info::services::{
    RawPackage, DEFAULT_MAX_PATHS_PER_DEPENDENCY, DEFAULT_MAX_PATH_LENGTH,
};

/// Default number of concurrent checksum resolutions
pub const DEFAULT_CHECKSUM_WORKERS: usize = 3;

/// Tool output a dependency graph is built from
#[derive(Debug, Clone)]
pub enum DependencySource {
    /// Normalized package list produced by a tool adapter
    Packages {
        root_id: String,
        packages: Vec<RawPackage>,
    },
    /// Text printed by `cargo tree --prefix depth`
    CargoTree(String),
}

/// CollectDependenciesRequest - Input of the dependency collection use case
#[derive(Debug, Clone)]
pub struct CollectDependenciesRequest {
    pub record: RecordRequest,
    pub source: DependencySource,
    pub max_path_length: usize,
    pub max_paths_per_dependency: usize,
    pub checksum_workers: usize,
    /// Drop dependencies whose checksum cannot be resolved
    pub require_checksums: bool,
}

impl CollectDependenciesRequest {
    pub fn new(record: RecordRequest, source: DependencySource) -> Self {
        Self {
            record,
            source,
            max_path_length: DEFAULT_MAX_PATH_LENGTH,
            max_paths_per_dependency: DEFAULT_MAX_PATHS_PER_DEPENDENCY,
            checksum_workers: DEFAULT_CHECKSUM_WORKERS,
            require_checksums: true,
        }
    }

    pub fn with_limits(mut self, max_path_length: usize, max_paths_per_dependency: usize) -> Self {
        self.max_path_length = max_path_length;
        self.max_paths_per_dependency = max_paths_per_dependency;
        self
    }

    pub fn with_checksum_workers(mut self, workers: usize) -> Self {
        self.checksum_workers = workers.max(1);
        self
    }

    pub fn require_checksums(mut self, require: bool) -> Self {
        self.require_checksums = require;
        self
    }
}

/// File format accepted by `add-deps`: the root module and every package
/// reachable from it
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct PackageList {
    /// `name:version` id of the package that is the module itself
    pub root: String,
    #[serde(default)]
    pub packages: Vec<RawPackage>,
}

impl From<PackageList> for DependencySource {
    fn from(list: PackageList) -> Self {
        DependencySource::Packages {
            root_id: list.root,
            packages: list.packages,
        }
    }
}
