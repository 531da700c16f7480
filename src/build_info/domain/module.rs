use super::{Artifact, Checksum, Dependency};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of module kinds a build-info can describe
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    Go,
    Maven,
    Gradle,
    Npm,
    Python,
    Nuget,
    Cargo,
    #[default]
    Generic,
    Build,
}

impl std::str::FromStr for ModuleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "go" => Ok(ModuleType::Go),
            "maven" => Ok(ModuleType::Maven),
            "gradle" => Ok(ModuleType::Gradle),
            "npm" | "yarn" | "pnpm" => Ok(ModuleType::Npm),
            "python" | "pip" | "pipenv" => Ok(ModuleType::Python),
            "nuget" | "dotnet" => Ok(ModuleType::Nuget),
            "cargo" => Ok(ModuleType::Cargo),
            "generic" => Ok(ModuleType::Generic),
            "build" => Ok(ModuleType::Build),
            _ => Err(format!(
                "Invalid module type: {}. Expected one of go, maven, gradle, npm, python, nuget, cargo, generic, build",
                s
            )),
        }
    }
}

impl std::fmt::Display for ModuleType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModuleType::Go => "go",
            ModuleType::Maven => "maven",
            ModuleType::Gradle => "gradle",
            ModuleType::Npm => "npm",
            ModuleType::Python => "python",
            ModuleType::Nuget => "nuget",
            ModuleType::Cargo => "cargo",
            ModuleType::Generic => "generic",
            ModuleType::Build => "build",
        };
        write!(f, "{}", name)
    }
}

/// One buildable unit of a build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Module {
    #[serde(rename = "type")]
    pub module_type: ModuleType,
    pub id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

impl Module {
    pub fn new(id: impl Into<String>, module_type: ModuleType) -> Self {
        Self {
            module_type,
            id: id.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_module_type_from_str_aliases() {
        assert_eq!(ModuleType::from_str("yarn").unwrap(), ModuleType::Npm);
        assert_eq!(ModuleType::from_str("PIP").unwrap(), ModuleType::Python);
        assert_eq!(ModuleType::from_str("dotnet").unwrap(), ModuleType::Nuget);
        assert_eq!(ModuleType::from_str("cargo").unwrap(), ModuleType::Cargo);
    }

    #[test]
    fn test_module_type_from_str_invalid() {
        let err = ModuleType::from_str("ant").unwrap_err();
        assert!(err.contains("Invalid module type"));
    }

    #[test]
    fn test_module_type_serializes_lowercase() {
        let json = serde_json::to_string(&ModuleType::Nuget).unwrap();
        assert_eq!(json, "\"nuget\"");
    }

    #[test]
    fn test_module_type_display_matches_serde() {
        for module_type in [ModuleType::Go, ModuleType::Build, ModuleType::Generic] {
            let json = serde_json::to_string(&module_type).unwrap();
            assert_eq!(json, format!("\"{}\"", module_type));
        }
    }
}
