use crate::build_info::domain::{Adjacency, Checksum, Dependency, DependencyGraph, DependencyId};
use crate::build_info::services::Locator;
use crate::shared::Result;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// Normalized intermediate produced by a tool adapter for one package
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPackage {
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Tool-native reference used by other packages' `children`
    #[serde(default)]
    pub locator: String,
    #[serde(rename = "type", default)]
    pub dependency_type: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub checksum: Option<Checksum>,
    #[serde(default)]
    pub children: Vec<String>,
}

impl RawPackage {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn id(&self) -> Result<DependencyId> {
        DependencyId::new(&self.name, &self.version)
    }

    /// The locator other packages use to point at this one
    pub fn effective_locator(&self) -> String {
        if self.locator.is_empty() {
            format!("{}@{}", self.name, self.version)
        } else {
            Locator::normalize(&self.locator)
        }
    }
}

/// Result of parsing `cargo tree --prefix depth` output
#[derive(Debug, Clone, Default)]
pub struct CargoTree {
    /// Depth-0 packages, one per workspace member
    pub roots: Vec<String>,
    pub packages: Vec<RawPackage>,
}

/// GraphBuilder service turning tool output into a normalized DependencyGraph
///
/// This is pure business logic; checksum lookups happen before building.
pub struct GraphBuilder {
    require_checksums: bool,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            require_checksums: true,
        }
    }

    /// When disabled, packages without a checksum are kept as nodes
    pub fn require_checksums(mut self, require: bool) -> Self {
        self.require_checksums = require;
        self
    }

    /// Builds the dependency graph rooted at `root_id`
    ///
    /// Children are given as locators; each one is resolved through the
    /// locators of the supplied packages, falling back to parsing the
    /// locator itself. Packages without a checksum are left out of the
    /// node map (when checksums are required) but their edges stay in the
    /// adjacency.
    pub fn build(&self, root_id: &str, packages: &[RawPackage]) -> Result<DependencyGraph> {
        let mut locator_ids: HashMap<String, String> = HashMap::new();
        for package in packages {
            let id = package.id()?.into_string();
            locator_ids.insert(package.effective_locator(), id);
        }

        let mut adjacency = Adjacency::new();
        let mut nodes: HashMap<String, Dependency> = HashMap::new();

        for package in packages {
            let id = package.id()?.into_string();

            let children = adjacency.entry(id.clone()).or_default();
            for child in &package.children {
                let normalized = Locator::normalize(child);
                let child_id = match locator_ids.get(&normalized) {
                    Some(known) => known.clone(),
                    None => Locator::to_id(&normalized)?.into_string(),
                };
                if !children.contains(&child_id) {
                    children.push(child_id);
                }
            }

            if id == root_id {
                continue;
            }

            match (&package.checksum, self.require_checksums) {
                (None, true) => {
                    debug!(dependency = %id, "no checksum resolved, leaving dependency out of the graph");
                }
                (checksum, _) => {
                    let mut dependency = Dependency::new(id.clone())
                        .with_type(package.dependency_type.clone())
                        .with_scopes(package.scopes.clone());
                    dependency.checksum = checksum.clone();
                    nodes.insert(id, dependency);
                }
            }
        }

        Ok(DependencyGraph::new(root_id, adjacency, nodes))
    }

    /// Parses depth-prefixed tree text as printed by `cargo tree --prefix depth`
    ///
    /// Each line looks like `{depth}{name} v{version}` optionally followed by
    /// a source path, `(*)` or feature annotations. The parent of a line is
    /// the most recent line with a smaller depth, which also covers depth
    /// values that skip levels. Lines that do not match are ignored.
    pub fn parse_cargo_tree(text: &str) -> Result<CargoTree> {
        let mut tree = CargoTree::default();
        let mut index_by_id: HashMap<String, usize> = HashMap::new();
        let mut ancestors: Vec<(usize, String)> = Vec::new();

        for line in text.lines() {
            let Some(captures) = cargo_tree_line().captures(line.trim_end()) else {
                continue;
            };
            let depth: usize = captures[1].parse()?;
            let name = &captures[2];
            let version = &captures[3];
            let id = DependencyId::new(name, version)?.into_string();

            while ancestors.last().is_some_and(|(d, _)| *d >= depth) {
                ancestors.pop();
            }

            if !index_by_id.contains_key(&id) {
                index_by_id.insert(id.clone(), tree.packages.len());
                let mut package = RawPackage::new(name, version);
                package.dependency_type = "cargo".to_string();
                tree.packages.push(package);
            }

            match ancestors.last() {
                Some((_, parent)) => {
                    let locator = format!("{}@{}", name, version);
                    let parent_index = index_by_id[parent];
                    let siblings = &mut tree.packages[parent_index].children;
                    if !siblings.contains(&locator) {
                        siblings.push(locator);
                    }
                }
                None => {
                    if !tree.roots.contains(&id) {
                        tree.roots.push(id.clone());
                    }
                }
            }

            ancestors.push((depth, id));
        }

        Ok(tree)
    }
}

fn cargo_tree_line() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(\d+)(\S+) v(\S+)(?:\s.*)?$").expect("cargo tree line pattern is valid")
    })
}
