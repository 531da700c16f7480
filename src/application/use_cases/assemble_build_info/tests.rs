use super::*;
use crate::build_info::domain::{
    Artifact, BuildCoordinates, Checksum, Dependency, GeneralDetails, ModuleType, Partial,
    PartialPayload, Vcs,
};
use crate::build_info::services::BuildIdentity;
use chrono::DateTime;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::PathBuf;

struct FixedStore {
    general: Option<GeneralDetails>,
    partials: Vec<Partial>,
    corrupt: bool,
}

impl FixedStore {
    fn started(partials: Vec<Partial>) -> Self {
        Self {
            general: Some(GeneralDetails::new(
                DateTime::parse_from_rfc3339("2024-03-01T10:00:00+00:00").unwrap(),
            )),
            partials,
            corrupt: false,
        }
    }
}

impl PartialStore for FixedStore {
    fn save_partial(&self, _: &BuildCoordinates, _: &Partial) -> Result<PathBuf> {
        unreachable!("publishing never records fragments")
    }

    fn read_partials(&self, _: &BuildCoordinates) -> Result<Vec<Partial>> {
        if self.corrupt {
            anyhow::bail!("Corrupt build fragment: partial-1.json");
        }
        Ok(self.partials.clone())
    }

    fn save_general_details(&self, _: &BuildCoordinates, _: &GeneralDetails) -> Result<()> {
        Ok(())
    }

    fn read_general_details(&self, _: &BuildCoordinates) -> Result<Option<GeneralDetails>> {
        Ok(self.general.clone())
    }

    fn clean(&self, _: &BuildCoordinates) -> Result<bool> {
        Ok(false)
    }
}

#[derive(Default)]
struct RecordingReporter {
    messages: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn report(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
    fn report_progress(&self, _: usize, _: usize, _: Option<&str>) {}
    fn report_error(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
    fn report_completion(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn request() -> PublishRequest {
    PublishRequest::new(
        BuildCoordinates::new("b1", "1", None),
        BuildIdentity::default_agent(),
    )
}

fn dependency_partial() -> Partial {
    let mut x = Dependency::new("x:1.0").with_checksum(Checksum::new("aaa", "bbb", ""));
    x.requested_by = vec![vec!["mod:1.0".to_string()]];
    Partial::new(
        "mod:1.0",
        ModuleType::Npm,
        1,
        PartialPayload::Dependencies(vec![x]),
    )
}

fn artifact_partial() -> Partial {
    Partial::new(
        "mod:1.0",
        ModuleType::Npm,
        2,
        PartialPayload::Artifacts(vec![
            Artifact::new("a.jar").with_checksum(Checksum::new("123", "456", ""))
        ]),
    )
}

#[test]
fn test_publish_merges_dependencies_and_artifacts() {
    let use_case = AssembleBuildInfoUseCase::new(
        FixedStore::started(vec![artifact_partial(), dependency_partial()]),
        RecordingReporter::default(),
    );

    let build_info = use_case.execute(&request()).unwrap();

    assert_eq!(build_info.name, "b1");
    assert_eq!(build_info.number, "1");
    assert_eq!(build_info.started, "2024-03-01T10:00:00.000+0000");
    assert_eq!(build_info.modules.len(), 1);

    let module = &build_info.modules[0];
    assert_eq!(module.id, "mod:1.0");
    assert_eq!(module.dependencies.len(), 1);
    assert_eq!(module.dependencies[0].id, "x:1.0");
    assert_eq!(
        module.dependencies[0].requested_by,
        vec![vec!["mod:1.0".to_string()]]
    );
    assert_eq!(module.artifacts.len(), 1);
    assert_eq!(module.artifacts[0].name, "a.jar");
}

#[test]
fn test_publish_without_start_fails() {
    let store = FixedStore {
        general: None,
        ..FixedStore::started(vec![dependency_partial()])
    };
    let use_case = AssembleBuildInfoUseCase::new(store, RecordingReporter::default());

    let err = use_case.execute(&request()).unwrap_err();
    assert!(err.to_string().contains("has not been started"));
}

#[test]
fn test_publish_start_check_precedes_fragment_read() {
    let store = FixedStore {
        general: None,
        corrupt: true,
        ..FixedStore::started(Vec::new())
    };
    let use_case = AssembleBuildInfoUseCase::new(store, RecordingReporter::default());

    let err = use_case.execute(&request()).unwrap_err();
    assert!(err.to_string().contains("has not been started"));
}

#[test]
fn test_publish_corrupt_fragment_is_fatal() {
    let store = FixedStore {
        corrupt: true,
        ..FixedStore::started(Vec::new())
    };
    let use_case = AssembleBuildInfoUseCase::new(store, RecordingReporter::default());

    let err = use_case.execute(&request()).unwrap_err();
    assert!(err.to_string().contains("partial-1.json"));
}

#[test]
fn test_publish_applies_env_patterns() {
    let env: BTreeMap<String, String> = [("FOO_A", "1"), ("FOO_B", "2"), ("BAR", "3")]
        .into_iter()
        .map(|(k, v)| (format!("buildInfo.env.{}", k), v.to_string()))
        .collect();
    let env_partial = Partial::new("", ModuleType::Generic, 1, PartialPayload::Env(env));
    let use_case = AssembleBuildInfoUseCase::new(
        FixedStore::started(vec![env_partial]),
        RecordingReporter::default(),
    );

    let build_info = use_case
        .execute(
            &request().with_env_patterns(vec!["FOO_*".to_string()], vec!["*_B".to_string()]),
        )
        .unwrap();

    assert_eq!(
        build_info.properties.keys().collect::<Vec<_>>(),
        vec!["buildInfo.env.FOO_A"]
    );
    assert!(build_info.modules.is_empty());
}

#[test]
fn test_publish_rejects_invalid_pattern() {
    let use_case = AssembleBuildInfoUseCase::new(
        FixedStore::started(Vec::new()),
        RecordingReporter::default(),
    );

    let result = use_case.execute(&request().with_env_patterns(vec!["[".to_string()], vec![]));
    assert!(result.unwrap_err().to_string().contains("Invalid property pattern"));
}

#[test]
fn test_publish_carries_vcs() {
    let vcs = Partial::new(
        "",
        ModuleType::Generic,
        1,
        PartialPayload::Vcs {
            vcs_list: vec![Vcs {
                url: "https://git.example/repo.git".to_string(),
                revision: "abc123".to_string(),
                ..Default::default()
            }],
            issues: None,
        },
    );
    let use_case =
        AssembleBuildInfoUseCase::new(FixedStore::started(vec![vcs]), RecordingReporter::default());

    let build_info = use_case.execute(&request()).unwrap();

    assert_eq!(build_info.vcs_list.len(), 1);
    assert_eq!(build_info.vcs_list[0].revision, "abc123");
    assert!(build_info.issues.is_none());
    assert!(use_case.progress_reporter.messages.borrow()[0].contains("1 fragment(s)"));
}
