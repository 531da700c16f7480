use crate::build_info::domain::Checksum;
use crate::shared::Result;
use async_trait::async_trait;

/// ChecksumResolver port for resolving the checksum of a dependency
///
/// # Async Support
/// Resolution runs for many graph nodes at once.
/// Implementations must be `Send + Sync` to support concurrent access.
#[async_trait]
pub trait ChecksumResolver: Send + Sync {
    /// Resolves the checksum triple of `name` at `version`
    ///
    /// # Returns
    /// `None` if the package cannot be found
    ///
    /// # Errors
    /// Returns an error if the package was found but could not be hashed.
    async fn resolve(&self, name: &str, version: &str) -> Result<Option<Checksum>>;
}
