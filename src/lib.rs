//! build-info-collector - incremental build-info collection for CI pipelines
//!
//! Build steps record write-once fragments (dependencies, artifacts,
//! environment, VCS state) under a per-build directory. Publishing merges
//! every fragment into a single build-info document with per-dependency
//! requested-by paths, following hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! - **Domain Layer** (`build_info`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use build_info_collector::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<()> {
//! let coordinates = BuildCoordinates::new("my-build", "42", None);
//! let store = FileSystemPartialStore::new(PathBuf::from("/tmp/build-info"));
//!
//! let use_case = AssembleBuildInfoUseCase::new(store, StderrProgressReporter::new());
//! let request = PublishRequest::new(coordinates, BuildIdentity::default_agent());
//! let build_info = use_case.execute(&request)?;
//!
//! println!("{}", serde_json::to_string_pretty(&build_info)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod build_info;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        CacheLayout, CacheLocator, FileChecksumCalculator, FileSystemPartialStore,
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::resolver::{
        CacheChecksumResolver, CachingChecksumResolver, OfflineChecksumResolver,
    };
    pub use crate::adapters::outbound::system::ProcessEnvironmentReader;
    pub use crate::application::dto::{
        CollectDependenciesRequest, CollectDependenciesResponse, DependencySource, PackageList,
        PublishRequest, RecordRequest,
    };
    pub use crate::application::use_cases::{
        AssembleBuildInfoUseCase, CleanBuildUseCase, CollectDependenciesUseCase,
        RecordPartialUseCase, StartBuildUseCase,
    };
    pub use crate::build_info::domain::{
        Artifact, BuildCoordinates, BuildInfo, Checksum, Dependency, GeneralDetails, Module,
        ModuleType, Partial, PartialPayload,
    };
    pub use crate::build_info::services::{
        BuildIdentity, FragmentMerger, GraphBuilder, PropertyFilter, RawPackage,
        RequestedByPropagator,
    };
    pub use crate::ports::outbound::{
        ChecksumCalculator, ChecksumResolver, EnvironmentReader, OutputPresenter, PackageCache,
        PartialStore, ProgressReporter, ProjectConfigReader,
    };
    pub use crate::shared::Result;
}
