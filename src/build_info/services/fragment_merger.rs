use crate::build_info::domain::{
    AffectedIssue, Artifact, Checksum, Dependency, Issues, Module, ModuleType, Partial,
    PartialPayload, Tracker, Vcs,
};
use crate::build_info::policies::IdentityKey;
use std::collections::{BTreeMap, HashMap};

/// Everything the fragments of one build add up to
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedBuild {
    pub modules: Vec<Module>,
    pub env: BTreeMap<String, String>,
    pub vcs_list: Vec<Vcs>,
    /// Present only when some fragment named an issue tracker
    pub issues: Option<Issues>,
}

/// FragmentMerger service folding partial fragments into modules
///
/// Fragments are processed in timestamp order (stable for equal
/// timestamps). Modules are emitted in the order they were first seen;
/// their artifacts and dependencies are emitted sorted by identity key.
pub struct FragmentMerger;

impl FragmentMerger {
    /// Merges the fragments of one build
    ///
    /// # Arguments
    /// * `partials` - All fragments recorded for the build, in any order
    /// * `build_name` - Used as module id for fragments that carry none
    pub fn merge(mut partials: Vec<Partial>, build_name: &str) -> MergedBuild {
        partials.sort_by_key(|partial| partial.timestamp);

        let mut modules = ModuleAccumulator::default();
        let mut env = BTreeMap::new();
        let mut vcs_list = Vec::new();
        let mut issues = IssuesAccumulator::default();

        for partial in partials {
            let module_id = if partial.module_id.is_empty() {
                build_name.to_string()
            } else {
                partial.module_id
            };

            let Some(payload) = partial.payload else {
                continue;
            };

            match payload {
                PartialPayload::Artifacts(artifacts) => {
                    modules.add_artifacts(&module_id, partial.module_type, artifacts)
                }
                PartialPayload::Dependencies(dependencies) => {
                    modules.add_dependencies(&module_id, partial.module_type, dependencies)
                }
                PartialPayload::Env(variables) => env.extend(variables),
                PartialPayload::Vcs {
                    vcs_list: entries,
                    issues: partial_issues,
                } => {
                    vcs_list.extend(entries);
                    if let Some(partial_issues) = partial_issues {
                        issues.merge(partial_issues);
                    }
                }
                PartialPayload::Checksum(checksum) => {
                    modules.set_checksum(&module_id, partial.module_type, checksum)
                }
            }
        }

        MergedBuild {
            modules: modules.into_modules(),
            env,
            vcs_list,
            issues: issues.into_issues(),
        }
    }
}

#[derive(Default)]
struct ModuleEntry {
    module_type: ModuleType,
    checksum: Option<Checksum>,
    artifacts: BTreeMap<String, Artifact>,
    dependencies: BTreeMap<String, Dependency>,
}

#[derive(Default)]
struct ModuleAccumulator {
    order: Vec<String>,
    entries: HashMap<String, ModuleEntry>,
}

impl ModuleAccumulator {
    /// Returns the module entry, creating it on first sight
    ///
    /// The first non-generic type recorded for a module sticks; a later
    /// generic fragment never downgrades it.
    fn entry(&mut self, module_id: &str, module_type: ModuleType) -> &mut ModuleEntry {
        if !self.entries.contains_key(module_id) {
            self.order.push(module_id.to_string());
        }
        let entry = self
            .entries
            .entry(module_id.to_string())
            .or_insert_with(|| ModuleEntry {
                module_type,
                ..Default::default()
            });
        if entry.module_type == ModuleType::Generic {
            entry.module_type = module_type;
        }
        entry
    }

    fn add_artifacts(&mut self, module_id: &str, module_type: ModuleType, artifacts: Vec<Artifact>) {
        let entry = self.entry(module_id, module_type);
        for artifact in artifacts {
            entry.artifacts.insert(IdentityKey::artifact(&artifact), artifact);
        }
    }

    fn add_dependencies(
        &mut self,
        module_id: &str,
        module_type: ModuleType,
        dependencies: Vec<Dependency>,
    ) {
        let entry = self.entry(module_id, module_type);
        for dependency in dependencies {
            entry
                .dependencies
                .insert(IdentityKey::dependency(&dependency), dependency);
        }
    }

    fn set_checksum(&mut self, module_id: &str, module_type: ModuleType, checksum: Checksum) {
        self.entry(module_id, module_type).checksum = Some(checksum);
    }

    fn into_modules(mut self) -> Vec<Module> {
        self.order
            .into_iter()
            .filter_map(|id| {
                let entry = self.entries.remove(&id)?;
                Some(Module {
                    module_type: entry.module_type,
                    id,
                    properties: BTreeMap::new(),
                    checksum: entry.checksum,
                    artifacts: entry.artifacts.into_values().collect(),
                    dependencies: entry.dependencies.into_values().collect(),
                })
            })
            .collect()
    }
}

#[derive(Default)]
struct IssuesAccumulator {
    tracker: Option<Tracker>,
    aggregate_build_issues: bool,
    aggregation_build_status: String,
    affected: BTreeMap<String, AffectedIssue>,
}

impl IssuesAccumulator {
    fn merge(&mut self, issues: Issues) {
        if issues.tracker_name().is_some() {
            self.tracker = issues.tracker;
            self.aggregate_build_issues = issues.aggregate_build_issues;
            self.aggregation_build_status = issues.aggregation_build_status;
        }
        for issue in issues.affected_issues {
            self.affected.insert(issue.key.clone(), issue);
        }
    }

    fn into_issues(self) -> Option<Issues> {
        let tracker = self.tracker?;
        Some(Issues {
            tracker: Some(tracker),
            aggregate_build_issues: self.aggregate_build_issues,
            aggregation_build_status: self.aggregation_build_status,
            affected_issues: self.affected.into_values().collect(),
        })
    }
}
