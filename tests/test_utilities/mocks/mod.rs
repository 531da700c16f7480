/// Mock implementations for testing
mod mock_checksum_resolver;
mod mock_environment_reader;
mod mock_progress_reporter;

pub use mock_checksum_resolver::MockChecksumResolver;
pub use mock_environment_reader::MockEnvironmentReader;
pub use mock_progress_reporter::MockProgressReporter;
