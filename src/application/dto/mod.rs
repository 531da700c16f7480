/// Data Transfer Objects for application layer
///
/// DTOs carry use case input and output between the CLI and the
/// application layer, keeping the domain layer isolated.
mod collect_request;
mod collect_response;
mod publish_request;
mod record_request;

pub use collect_request::{
    CollectDependenciesRequest, DependencySource, PackageList, DEFAULT_CHECKSUM_WORKERS,
};
pub use collect_response::{CollectDependenciesResponse, CollectedModule};
pub use publish_request::PublishRequest;
pub use record_request::RecordRequest;
