/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, package caches, console, etc.).
pub mod checksum_calculator;
pub mod checksum_resolver;
pub mod environment_reader;
pub mod output_presenter;
pub mod package_cache;
pub mod partial_store;
pub mod progress_reporter;
pub mod project_config_reader;

pub use checksum_calculator::ChecksumCalculator;
pub use checksum_resolver::ChecksumResolver;
pub use environment_reader::EnvironmentReader;
pub use output_presenter::OutputPresenter;
pub use package_cache::PackageCache;
pub use partial_store::PartialStore;
pub use progress_reporter::ProgressReporter;
pub use project_config_reader::ProjectConfigReader;
