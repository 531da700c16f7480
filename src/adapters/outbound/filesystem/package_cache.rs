use crate::build_info::services::ModulePathCodec;
use crate::ports::outbound::PackageCache;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// On-disk layout of a package cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheLayout {
    /// Go module download cache: `<root>/<encoded module>/@v/<encoded version>.zip`
    GoModules,
    /// Cargo registry cache: `<root>/<name>-<version>.crate`
    CargoRegistry,
}

impl CacheLayout {
    fn relative_path(self, name: &str, version: &str) -> PathBuf {
        match self {
            CacheLayout::GoModules => {
                let mut path = PathBuf::new();
                for segment in ModulePathCodec::encode(name).split('/') {
                    path.push(segment);
                }
                path.push("@v");
                path.push(format!("{}.zip", ModulePathCodec::encode(version)));
                path
            }
            CacheLayout::CargoRegistry => PathBuf::from(format!("{}-{}.crate", name, version)),
        }
    }
}

impl FromStr for CacheLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "go" | "gomodules" => Ok(CacheLayout::GoModules),
            "cargo" => Ok(CacheLayout::CargoRegistry),
            _ => Err(format!(
                "Invalid cache layout: {}. Valid values are: go, cargo",
                s
            )),
        }
    }
}

impl fmt::Display for CacheLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheLayout::GoModules => write!(f, "go"),
            CacheLayout::CargoRegistry => write!(f, "cargo"),
        }
    }
}

/// CacheLocator adapter probing a package cache for downloaded archives
///
/// Both the configured root and its parent directory are probed, since
/// callers commonly point at either the cache itself or one level inside it.
pub struct CacheLocator {
    root: PathBuf,
    layout: CacheLayout,
}

impl CacheLocator {
    pub fn new(root: PathBuf, layout: CacheLayout) -> Self {
        Self { root, layout }
    }

    fn candidate_roots(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.root.as_path()).chain(self.root.parent())
    }
}

impl PackageCache for CacheLocator {
    fn locate(&self, name: &str, version: &str) -> Option<PathBuf> {
        let relative = self.layout.relative_path(name, version);
        let found = self
            .candidate_roots()
            .map(|root| root.join(&relative))
            .find(|candidate| candidate.is_file());

        if found.is_none() {
            debug!(
                name,
                version,
                root = %self.root.display(),
                layout = %self.layout,
                "Package not found in cache"
            );
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"archive").unwrap();
    }

    #[test]
    fn test_go_layout_encodes_uppercase() {
        let relative = CacheLayout::GoModules.relative_path("github.com/BurntSushi/toml", "v1.2.0");
        assert_eq!(
            relative,
            PathBuf::from("github.com/!burnt!sushi/toml/@v/v1.2.0.zip")
        );
    }

    #[test]
    fn test_locate_in_root() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("serde-1.0.200.crate");
        touch(&archive);

        let locator = CacheLocator::new(temp_dir.path().to_path_buf(), CacheLayout::CargoRegistry);
        assert_eq!(locator.locate("serde", "1.0.200"), Some(archive));
    }

    #[test]
    fn test_locate_falls_back_to_parent() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir
            .path()
            .join("github.com/!burnt!sushi/toml/@v/v1.2.0.zip");
        touch(&archive);
        let nested = temp_dir.path().join("cache");
        fs::create_dir_all(&nested).unwrap();

        let locator = CacheLocator::new(nested, CacheLayout::GoModules);
        assert_eq!(
            locator.locate("github.com/BurntSushi/toml", "v1.2.0"),
            Some(archive)
        );
    }

    #[test]
    fn test_missing_package_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let locator = CacheLocator::new(temp_dir.path().to_path_buf(), CacheLayout::CargoRegistry);
        assert_eq!(locator.locate("serde", "1.0.200"), None);
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("go".parse::<CacheLayout>(), Ok(CacheLayout::GoModules));
        assert_eq!("Cargo".parse::<CacheLayout>(), Ok(CacheLayout::CargoRegistry));
        assert!("maven".parse::<CacheLayout>().is_err());
    }
}
