/// Integration tests for the application layer
mod test_utilities;

use chrono::DateTime;
use std::path::Path;
use tempfile::TempDir;
use test_utilities::mocks::*;

use build_info_collector::prelude::*;

fn coordinates() -> BuildCoordinates {
    BuildCoordinates::new("b1", "1", None)
}

fn store(root: &Path) -> FileSystemPartialStore {
    FileSystemPartialStore::new(root.to_path_buf())
}

fn start(root: &Path) {
    StartBuildUseCase::new(store(root), MockProgressReporter::new())
        .execute(
            &coordinates(),
            DateTime::parse_from_rfc3339("2024-03-01T10:00:00+00:00").unwrap(),
        )
        .unwrap();
}

fn raw(name: &str, version: &str, children: &[&str]) -> RawPackage {
    let mut package = RawPackage::new(name, version);
    package.children = children.iter().map(|c| c.to_string()).collect();
    package
}

fn publish(root: &Path) -> Result<BuildInfo> {
    let request = PublishRequest::new(coordinates(), BuildIdentity::default_agent());
    AssembleBuildInfoUseCase::new(store(root), MockProgressReporter::new()).execute(&request)
}

#[tokio::test]
async fn test_record_and_publish_single_module() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    start(root);

    let resolver = MockChecksumResolver::new().with_checksum("x", "1.0", "sha1-x");
    let record = RecordRequest::new(coordinates(), "", ModuleType::Generic).with_timestamp(1);
    let source = DependencySource::Packages {
        root_id: "mod:1.0".to_string(),
        packages: vec![raw("mod", "1.0", &["x@1.0"]), raw("x", "1.0", &[])],
    };
    let response = CollectDependenciesUseCase::new(store(root), resolver, MockProgressReporter::new())
        .execute(CollectDependenciesRequest::new(record, source))
        .await
        .unwrap();
    assert_eq!(response.modules.len(), 1);
    assert_eq!(response.modules[0].module_id, "mod:1.0");
    assert!(response.modules[0].fragment_path.exists());

    let artifacts = RecordRequest::new(coordinates(), "mod:1.0", ModuleType::Generic)
        .with_timestamp(2);
    RecordPartialUseCase::new(store(root), MockProgressReporter::new())
        .execute(
            &artifacts,
            PartialPayload::Artifacts(vec![
                Artifact::new("a.jar").with_checksum(Checksum::new("123", "456", ""))
            ]),
        )
        .unwrap();

    let build_info = publish(root).unwrap();

    assert_eq!(build_info.name, "b1");
    assert_eq!(build_info.number, "1");
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

#[tokio::test]
async fn test_cargo_tree_records_one_module_per_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    start(root);

    let tree = "\
0app v0.1.0 (/work/app)
1serde v1.0.200
2serde_derive v1.0.200
0cli v0.1.0 (/work/cli)
1app v0.1.0 (/work/app)
1clap v4.5.0
";
    let resolver = MockChecksumResolver::new()
        .with_checksum("serde", "1.0.200", "s1")
        .with_checksum("serde_derive", "1.0.200", "s2")
        .with_checksum("clap", "4.5.0", "c1");
    let reporter = MockProgressReporter::new();

    let record = RecordRequest::new(coordinates(), "", ModuleType::Cargo);
    let response =
        CollectDependenciesUseCase::new(store(root), resolver.clone(), reporter.clone())
            .execute(CollectDependenciesRequest::new(
                record,
                DependencySource::CargoTree(tree.to_string()),
            ))
            .await
            .unwrap();

    // Roots are modules and are never resolved.
    assert_eq!(resolver.call_count(), 3);
    assert!(reporter.contains("2 root module(s)"));

    let modules: Vec<_> = response.modules.iter().map(|m| m.module_id.as_str()).collect();
    assert_eq!(modules, vec!["app:0.1.0", "cli:0.1.0"]);

    let build_info = publish(root).unwrap();
    let app = build_info
        .modules
        .iter()
        .find(|m| m.id == "app:0.1.0")
        .unwrap();
    let derive = app
        .dependencies
        .iter()
        .find(|d| d.id == "serde_derive:1.0.200")
        .unwrap();
    assert_eq!(
        derive.requested_by,
        vec![vec!["serde:1.0.200".to_string(), "app:0.1.0".to_string()]]
    );
    assert!(build_info.modules.iter().all(|m| m.module_type == ModuleType::Cargo));
}

#[tokio::test]
async fn test_unresolved_checksum_drops_dependency() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    start(root);

    let reporter = MockProgressReporter::new();
    let record = RecordRequest::new(coordinates(), "mod:1.0", ModuleType::Npm);
    let source = DependencySource::Packages {
        root_id: "mod:1.0".to_string(),
        packages: vec![raw("mod", "1.0", &["x@1.0"]), raw("x", "1.0", &[])],
    };
    let response =
        CollectDependenciesUseCase::new(store(root), MockChecksumResolver::new(), reporter.clone())
            .execute(CollectDependenciesRequest::new(record, source))
            .await
            .unwrap();

    assert_eq!(response.unresolved_checksums, 1);
    assert_eq!(response.modules[0].dependency_count, 0);
    assert!(reporter.contains("left out of the build info"));
}

#[test]
fn test_env_is_filtered_when_recorded_and_published() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    start(root);

    let environment = MockEnvironmentReader::new(&[
        ("CI_JOB", "42"),
        ("CI_TOKEN", "s3cr3t"),
        ("HOME", "/root"),
    ]);
    let record = RecordRequest::new(coordinates(), "", ModuleType::Generic);
    RecordPartialUseCase::new(store(root), MockProgressReporter::new())
        .record_env(
            &record,
            &environment,
            &PropertyFilter::with_default_excludes().unwrap(),
        )
        .unwrap();

    let request = PublishRequest::new(coordinates(), BuildIdentity::default_agent())
        .with_env_patterns(vec!["CI_*".to_string()], Vec::new());
    let build_info = AssembleBuildInfoUseCase::new(store(root), MockProgressReporter::new())
        .execute(&request)
        .unwrap();

    let keys: Vec<_> = build_info.properties.keys().cloned().collect();
    assert_eq!(keys, vec!["buildInfo.env.CI_JOB".to_string()]);
}

#[test]
fn test_publish_without_start_reports_build_not_started() {
    let temp_dir = TempDir::new().unwrap();

    let err = publish(temp_dir.path()).unwrap_err();

    assert!(err.to_string().contains("has not been started"));
    assert_eq!(
        build_info_collector::shared::error::ExitCode::for_error(&err),
        build_info_collector::shared::error::ExitCode::BuildNotStarted
    );
}

#[test]
fn test_projects_are_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    start(root);

    let other = BuildCoordinates::new("b1", "1", Some("other".to_string()));
    let record = RecordRequest::new(other, "m:1", ModuleType::Generic);
    RecordPartialUseCase::new(store(root), MockProgressReporter::new())
        .execute(&record, PartialPayload::Checksum(Checksum::new("a", "b", "c")))
        .unwrap();

    let build_info = publish(root).unwrap();
    assert!(build_info.modules.is_empty());
}

#[test]
fn test_clean_removes_build() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    start(root);

    let reporter = MockProgressReporter::new();
    let removed = CleanBuildUseCase::new(store(root), reporter.clone())
        .execute(&coordinates())
        .unwrap();
    assert!(removed);
    assert!(reporter.contains("Cleaned"));

    assert!(publish(root).is_err());
    assert!(!CleanBuildUseCase::new(store(root), MockProgressReporter::new())
        .execute(&coordinates())
        .unwrap());
}
