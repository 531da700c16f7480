/// Use cases module containing application business logic orchestration
mod assemble_build_info;
mod clean_build;
mod collect_dependencies;
mod record_partial;
mod start_build;

pub use assemble_build_info::AssembleBuildInfoUseCase;
pub use clean_build::CleanBuildUseCase;
pub use collect_dependencies::CollectDependenciesUseCase;
pub use record_partial::RecordPartialUseCase;
pub use start_build::StartBuildUseCase;
