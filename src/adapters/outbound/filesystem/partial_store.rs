use crate::build_info::domain::{BuildCoordinates, GeneralDetails, Partial};
use crate::ports::outbound::PartialStore;
use crate::shared::error::BuildInfoError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use uuid::Uuid;

/// Directory holding the fragments of one build
pub const PARTIALS_DIR: &str = "partials";

/// File holding the start marker of one build
pub const DETAILS_FILE: &str = "details";

const PARTIAL_PREFIX: &str = "partial-";
const PARTIAL_EXTENSION: &str = ".json";

/// FileSystemPartialStore adapter persisting fragments as JSON files
///
/// Layout: `<root>/<build dir>/partials/partial-<uuid>.json` plus a sibling
/// `details` file. Every write is staged in a temp file inside the target
/// directory and renamed into place, so concurrent writers never observe
/// each other's half-written files.
pub struct FileSystemPartialStore {
    root: PathBuf,
}

impl FileSystemPartialStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Store rooted at `<system temp>/build-info`
    pub fn with_default_root() -> Self {
        Self::new(std::env::temp_dir().join("build-info"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn build_dir(&self, coordinates: &BuildCoordinates) -> PathBuf {
        self.root.join(coordinates.dir_name())
    }

    fn partials_dir(&self, coordinates: &BuildCoordinates) -> PathBuf {
        self.build_dir(coordinates).join(PARTIALS_DIR)
    }

    fn details_path(&self, coordinates: &BuildCoordinates) -> PathBuf {
        self.build_dir(coordinates).join(DETAILS_FILE)
    }

    fn create_dir(path: &Path) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| {
            BuildInfoError::FileWriteError {
                path: path.to_path_buf(),
                details: format!("Failed to create directory: {}", e),
            }
            .into()
        })
    }

    /// Stages `content` next to `target` and renames it into place
    fn write_atomically(target: &Path, content: &str) -> Result<()> {
        let dir = target.parent().unwrap_or_else(|| Path::new("."));
        let write_error = |details: String| BuildInfoError::FileWriteError {
            path: target.to_path_buf(),
            details,
        };

        let mut staged = NamedTempFile::new_in(dir).map_err(|e| write_error(e.to_string()))?;
        staged
            .write_all(content.as_bytes())
            .map_err(|e| write_error(e.to_string()))?;
        staged
            .as_file()
            .sync_all()
            .map_err(|e| write_error(e.to_string()))?;
        staged
            .persist(target)
            .map_err(|e| write_error(e.error.to_string()))?;
        Ok(())
    }

    fn is_partial_file(path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(PARTIAL_PREFIX) && name.ends_with(PARTIAL_EXTENSION))
            .unwrap_or(false)
    }

    fn read_partial(path: &Path) -> Result<Partial> {
        let content =
            read_regular_file(path, "build fragment").map_err(|e| BuildInfoError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        serde_json::from_str(&content).map_err(|e| {
            BuildInfoError::CorruptFragment {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl PartialStore for FileSystemPartialStore {
    fn save_partial(&self, coordinates: &BuildCoordinates, partial: &Partial) -> Result<PathBuf> {
        let dir = self.partials_dir(coordinates);
        Self::create_dir(&dir)?;

        let content = serde_json::to_string_pretty(partial)?;
        let target = dir.join(format!(
            "{}{}{}",
            PARTIAL_PREFIX,
            Uuid::new_v4(),
            PARTIAL_EXTENSION
        ));
        Self::write_atomically(&target, &content)?;

        info!(
            path = %target.display(),
            module = %partial.module_id,
            kind = partial.payload.as_ref().map(|p| p.kind()).unwrap_or("empty"),
            "Recorded build fragment"
        );
        Ok(target)
    }

    fn read_partials(&self, coordinates: &BuildCoordinates) -> Result<Vec<Partial>> {
        let dir = self.partials_dir(coordinates);
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "No fragments recorded");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|e| BuildInfoError::FileReadError {
            path: dir.clone(),
            details: e.to_string(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BuildInfoError::FileReadError {
                path: dir.clone(),
                details: e.to_string(),
            })?;
            let path = entry.path();
            if Self::is_partial_file(&path) {
                paths.push(path);
            }
        }
        // Directory order is platform dependent; the merger re-sorts by timestamp.
        paths.sort();

        paths.iter().map(|path| Self::read_partial(path)).collect()
    }

    fn save_general_details(
        &self,
        coordinates: &BuildCoordinates,
        details: &GeneralDetails,
    ) -> Result<()> {
        Self::create_dir(&self.build_dir(coordinates))?;
        let content = serde_json::to_string_pretty(details)?;
        Self::write_atomically(&self.details_path(coordinates), &content)
    }

    fn read_general_details(
        &self,
        coordinates: &BuildCoordinates,
    ) -> Result<Option<GeneralDetails>> {
        let path = self.details_path(coordinates);
        if !path.exists() {
            return Ok(None);
        }

        let content =
            read_regular_file(&path, "build details").map_err(|e| BuildInfoError::FileReadError {
                path: path.clone(),
                details: e.to_string(),
            })?;
        let details = serde_json::from_str(&content).map_err(|e| {
            BuildInfoError::CorruptFragment {
                path: path.clone(),
                details: e.to_string(),
            }
        })?;
        Ok(Some(details))
    }

    fn clean(&self, coordinates: &BuildCoordinates) -> Result<bool> {
        let dir = self.build_dir(coordinates);
        if !dir.exists() {
            return Ok(false);
        }

        fs::remove_dir_all(&dir).map_err(|e| BuildInfoError::FileWriteError {
            path: dir.clone(),
            details: format!("Failed to remove build directory: {}", e),
        })?;
        debug!(dir = %dir.display(), "Removed build directory");
        Ok(true)
    }
}
