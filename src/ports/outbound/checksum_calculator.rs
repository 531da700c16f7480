use crate::build_info::domain::Checksum;
use crate::shared::Result;
use std::path::Path;

/// ChecksumCalculator port for hashing files
pub trait ChecksumCalculator: Send + Sync {
    /// Computes the sha1, md5 and sha256 digests of a file
    ///
    /// # Errors
    /// Returns an error only when the file cannot be read.
    fn calculate(&self, path: &Path) -> Result<Checksum>;
}
