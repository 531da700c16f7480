pub mod artifact;
pub mod build_info;
pub mod checksum;
pub mod dependency;
pub mod dependency_graph;
pub mod dependency_id;
pub mod module;
pub mod partial;

pub use artifact::Artifact;
pub use build_info::{AffectedIssue, Agent, BuildInfo, GeneralDetails, Issues, Tracker, Vcs};
pub use checksum::Checksum;
pub use dependency::{Dependency, RequestPath};
pub use dependency_graph::{Adjacency, DependencyGraph};
pub use dependency_id::DependencyId;
pub use module::{Module, ModuleType};
pub use partial::{BuildCoordinates, Partial, PartialPayload};
