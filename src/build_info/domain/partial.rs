use super::{Artifact, Checksum, Dependency, Issues, ModuleType, Vcs};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Identifies the build a fragment belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BuildCoordinates {
    pub name: String,
    pub number: String,
    pub project: Option<String>,
}

impl BuildCoordinates {
    pub fn new(name: impl Into<String>, number: impl Into<String>, project: Option<String>) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            project: project.filter(|p| !p.is_empty()),
        }
    }

    /// Directory name holding this build's fragments: `<name>-<number>[-<project>]`
    ///
    /// Path separators inside the coordinates are replaced with `_` so a
    /// build name such as `team/app` stays a single path component.
    pub fn dir_name(&self) -> String {
        let raw = match &self.project {
            Some(project) => format!("{}-{}-{}", self.name, self.number, project),
            None => format!("{}-{}", self.name, self.number),
        };
        raw.replace(['/', '\\'], "_")
    }
}

impl std::fmt::Display for BuildCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "build '{}' number '{}'", self.name, self.number)?;
        if let Some(project) = &self.project {
            write!(f, " in project '{}'", project)?;
        }
        Ok(())
    }
}

/// The single payload carried by a fragment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartialPayload {
    Artifacts(Vec<Artifact>),
    Dependencies(Vec<Dependency>),
    Env(BTreeMap<String, String>),
    Vcs {
        #[serde(rename = "vcsList", default)]
        vcs_list: Vec<Vcs>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        issues: Option<Issues>,
    },
    Checksum(Checksum),
}

impl PartialPayload {
    /// Keys under which a payload is stored in a fragment
    pub const KINDS: [&'static str; 5] = ["artifacts", "dependencies", "env", "vcs", "checksum"];

    pub fn kind(&self) -> &'static str {
        match self {
            PartialPayload::Artifacts(_) => "artifacts",
            PartialPayload::Dependencies(_) => "dependencies",
            PartialPayload::Env(_) => "env",
            PartialPayload::Vcs { .. } => "vcs",
            PartialPayload::Checksum(_) => "checksum",
        }
    }
}

/// One incrementally recorded, write-once piece of a build-info
///
/// A fragment without a payload key deserializes with `payload: None` and
/// contributes nothing when merged. A payload key holding a malformed value
/// is a deserialization error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Partial {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub module_id: String,
    #[serde(default)]
    pub module_type: ModuleType,
    pub timestamp: i64,
    #[serde(flatten)]
    pub payload: Option<PartialPayload>,
}

impl Partial {
    pub fn new(
        module_id: impl Into<String>,
        module_type: ModuleType,
        timestamp: i64,
        payload: PartialPayload,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            module_type,
            timestamp,
            payload: Some(payload),
        }
    }
}

/// Wire shape of a fragment before its payload is decoded
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPartial {
    #[serde(default)]
    module_id: String,
    #[serde(default)]
    module_type: ModuleType,
    timestamp: i64,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl RawPartial {
    fn take_payload(&mut self) -> Result<Option<PartialPayload>, serde_json::Error> {
        let Some(key) = PartialPayload::KINDS
            .iter()
            .find(|key| self.rest.contains_key(**key))
        else {
            return Ok(None);
        };
        let Some(value) = self.rest.remove(*key) else {
            return Ok(None);
        };

        let tagged: Map<String, Value> = std::iter::once((key.to_string(), value)).collect();
        serde_json::from_value(Value::Object(tagged)).map(Some)
    }
}

impl<'de> Deserialize<'de> for Partial {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw = RawPartial::deserialize(deserializer)?;
        let payload = raw.take_payload().map_err(de::Error::custom)?;
        Ok(Self {
            module_id: raw.module_id,
            module_type: raw.module_type,
            timestamp: raw.timestamp,
            payload,
        })
    }
}
