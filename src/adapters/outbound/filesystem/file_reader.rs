use crate::build_info::domain::DependencyId;
use crate::ports::outbound::ProjectConfigReader;
use crate::shared::error::BuildInfoError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use serde::Deserialize;
use std::path::Path;

const CARGO_MANIFEST: &str = "Cargo.toml";

#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: String,
    #[serde(default)]
    version: Option<toml::Value>,
}

/// FileSystemReader adapter for reading project manifests and input files
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads an input file (package list, `cargo tree` output, artifact list)
    ///
    /// # Errors
    /// Returns [`BuildInfoError::FileReadError`] if the file is missing, a
    /// symbolic link, or too large.
    pub fn read_input(&self, path: &Path) -> Result<String> {
        read_regular_file(path, "input file").map_err(|e| {
            BuildInfoError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectConfigReader for FileSystemReader {
    fn read_module_id(&self, project_path: &Path) -> Result<String> {
        let manifest_path = project_path.join(CARGO_MANIFEST);

        if !manifest_path.exists() {
            anyhow::bail!(
                "{} not found in project directory {}",
                CARGO_MANIFEST,
                project_path.display()
            );
        }

        let content = read_regular_file(&manifest_path, CARGO_MANIFEST)?;
        let manifest: CargoManifest = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", CARGO_MANIFEST, e))?;

        let package = manifest.package.ok_or_else(|| {
            anyhow::anyhow!(
                "No [package] table in {} (workspace manifests need --module)",
                manifest_path.display()
            )
        })?;

        // `version.workspace = true` has no literal version to report.
        let version = package
            .version
            .as_ref()
            .and_then(|v| v.as_str())
            .unwrap_or_default();

        Ok(DependencyId::new(&package.name, version)?.into_string())
    }
}
