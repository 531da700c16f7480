use std::path::PathBuf;

/// PackageCache port for locating downloaded packages on disk
pub trait PackageCache: Send + Sync {
    /// Finds the archive of `name` at `version`
    ///
    /// A package missing from the cache is not an error.
    fn locate(&self, name: &str, version: &str) -> Option<PathBuf>;
}
