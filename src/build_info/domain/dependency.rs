use super::Checksum;
use serde::{Deserialize, Serialize};

/// One requested-by path: ids ordered from the immediate parent to the root module
pub type RequestPath = Vec<String>;

/// Dependency entity as recorded in a module of the build-info
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub id: String,
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub dependency_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checksum: Option<Checksum>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub requested_by: Vec<RequestPath>,
}

impl Dependency {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Creates the root of a dependency tree
    ///
    /// The root carries a single empty path so that its direct children
    /// receive `[root.id]` as their first requested-by path.
    pub fn root(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            requested_by: vec![Vec::new()],
            ..Default::default()
        }
    }

    pub fn with_type(mut self, dependency_type: impl Into<String>) -> Self {
        self.dependency_type = dependency_type.into();
        self
    }

    pub fn with_checksum(mut self, checksum: Checksum) -> Self {
        self.checksum = Some(checksum);
        self
    }

    pub fn with_scopes(mut self, scopes: Vec<String>) -> Self {
        self.scopes = scopes;
        self
    }

    /// True when the dependency's own id occurs inside one of its requested-by paths
    pub fn has_loop(&self) -> bool {
        self.requested_by
            .iter()
            .any(|path| path.iter().any(|ancestor| ancestor == &self.id))
    }
}
