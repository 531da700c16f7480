use crate::shared::Result;

/// Maximum length for dependency names (security limit)
const MAX_NAME_LENGTH: usize = 512;

/// Maximum length for dependency versions (security limit)
const MAX_VERSION_LENGTH: usize = 256;

/// NewType wrapper for the canonical `name:version` dependency identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyId(String);

impl DependencyId {
    /// Builds the canonical identifier from a name and a version
    ///
    /// # Errors
    /// Returns an error if the name is empty, or if either part exceeds
    /// its length limit or contains whitespace.
    pub fn new(name: &str, version: &str) -> Result<Self> {
        let name = name.trim();
        let version = version.trim();

        if name.is_empty() {
            anyhow::bail!("Dependency name cannot be empty");
        }

        if name.len() > MAX_NAME_LENGTH {
            anyhow::bail!(
                "Dependency name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_NAME_LENGTH
            );
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Dependency version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if name.chars().chain(version.chars()).any(char::is_whitespace) {
            anyhow::bail!("Dependency identifier '{}:{}' contains whitespace", name, version);
        }

        if version.is_empty() {
            return Ok(Self(name.to_string()));
        }

        Ok(Self(format!("{}:{}", name, version)))
    }

    /// Splits the identifier back into name and version
    ///
    /// The split happens on the last `:` so names carrying a group prefix
    /// (`org.example:lib:1.0`) keep it.
    pub fn split(&self) -> (&str, Option<&str>) {
        match self.0.rsplit_once(':') {
            Some((name, version)) => (name, Some(version)),
            None => (&self.0, None),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DependencyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
