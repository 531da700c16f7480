use crate::shared::Result;
use std::path::Path;

/// ProjectConfigReader port for reading project configuration
///
/// This port abstracts the file system operations needed to derive a
/// module id from a project manifest (e.g., Cargo.toml).
pub trait ProjectConfigReader {
    /// Reads the module id (`name:version`) of the project
    ///
    /// # Arguments
    /// * `project_path` - Path to the project directory
    ///
    /// # Errors
    /// Returns an error if:
    /// - The manifest does not exist
    /// - The file cannot be parsed
    /// - The package name field is missing
    fn read_module_id(&self, project_path: &Path) -> Result<String>;
}
