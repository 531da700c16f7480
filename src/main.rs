mod cli;

use anyhow::Context;
use build_info_collector::adapters::outbound::console::StderrProgressReporter;
use build_info_collector::adapters::outbound::filesystem::{
    CacheLocator, FileChecksumCalculator, FileSystemPartialStore, FileSystemReader,
    FileSystemWriter, StdoutPresenter,
};
use build_info_collector::adapters::outbound::resolver::{
    CacheChecksumResolver, CachingChecksumResolver, OfflineChecksumResolver,
};
use build_info_collector::adapters::outbound::system::ProcessEnvironmentReader;
use build_info_collector::application::dto::{
    CollectDependenciesRequest, DependencySource, PackageList, PublishRequest, RecordRequest,
};
use build_info_collector::application::use_cases::{
    AssembleBuildInfoUseCase, CleanBuildUseCase, CollectDependenciesUseCase,
    RecordPartialUseCase, StartBuildUseCase,
};
use build_info_collector::build_info::domain::{
    AffectedIssue, Artifact, Issues, ModuleType, PartialPayload, Tracker, Vcs,
};
use build_info_collector::build_info::services::{BuildIdentity, PropertyFilter};
use build_info_collector::config::{discover_config, load_config_from_path, Settings};
use build_info_collector::ports::outbound::{
    ChecksumCalculator, ChecksumResolver, OutputPresenter, ProjectConfigReader,
};
use build_info_collector::shared::error::{BuildInfoError, ExitCode};
use build_info_collector::shared::Result;
use chrono::{DateTime, Local};
use cli::{Args, BuildArgs, Command, GraphArgs, ModuleArgs};
use std::io::Read;
use std::path::Path;
use std::process;
use tracing::{debug, warn, Level};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::DEBUG,
        (false, _) => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("build_info_collector={}", level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

async fn run(args: Args) -> Result<()> {
    let settings = load_settings(&args)?;
    debug!(?settings, "Effective settings");

    let store = FileSystemPartialStore::new(settings.temp_dir.clone());
    let reporter = || {
        if args.quiet {
            StderrProgressReporter::quiet()
        } else {
            StderrProgressReporter::new()
        }
    };

    match args.command {
        Command::Start { build, started } => {
            let started = match started {
                Some(raw) => DateTime::parse_from_rfc3339(&raw).map_err(|e| {
                    BuildInfoError::Validation {
                        message: format!("Invalid --started value '{}': {}", raw, e),
                    }
                })?,
                None => Local::now().fixed_offset(),
            };
            StartBuildUseCase::new(store, reporter()).execute(&build.coordinates(), started)?;
        }

        Command::AddDeps {
            build,
            module,
            module_type,
            input,
            graph,
        } => {
            let content = FileSystemReader::new().read_input(&input)?;
            let list: PackageList = serde_json::from_str(&content).with_context(|| {
                format!("Failed to parse package list: {}", input.display())
            })?;

            let record =
                RecordRequest::new(build.coordinates(), module.unwrap_or_default(), module_type);
            let request = collect_request(record, list.into(), &graph, &settings);
            collect(store, &graph, reporter(), request).await?;
        }

        Command::AddCargoTree {
            build,
            input,
            graph,
        } => {
            let text = match input {
                Some(path) => FileSystemReader::new().read_input(&path)?,
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("Failed to read cargo tree output from stdin")?;
                    buffer
                }
            };

            let record = RecordRequest::new(build.coordinates(), "", ModuleType::Cargo);
            let request =
                collect_request(record, DependencySource::CargoTree(text), &graph, &settings);
            collect(store, &graph, reporter(), request).await?;
        }

        Command::AddArtifacts {
            build,
            module,
            artifact_type,
            files,
        } => {
            let record = module_record(&build, &module)?;
            let calculator = FileChecksumCalculator::new();
            let mut artifacts = Vec::with_capacity(files.len());
            for file in &files {
                artifacts.push(describe_artifact(&calculator, file, artifact_type.as_deref())?);
            }
            RecordPartialUseCase::new(store, reporter())
                .execute(&record, PartialPayload::Artifacts(artifacts))?;
        }

        Command::AddEnv {
            build,
            include,
            exclude,
        } => {
            let include = override_patterns(include, &settings.env_include);
            let exclude = override_patterns(exclude, &settings.env_exclude);
            let filter = PropertyFilter::new(&include, &exclude)?;

            let record = RecordRequest::new(build.coordinates(), "", ModuleType::Generic);
            RecordPartialUseCase::new(store, reporter()).record_env(
                &record,
                &ProcessEnvironmentReader::new(),
                &filter,
            )?;
        }

        Command::AddVcs {
            build,
            url,
            revision,
            branch,
            message,
            tracker,
            tracker_version,
            issues,
            aggregate,
            aggregation_status,
        } => {
            let vcs = Vcs {
                url: url.unwrap_or_default(),
                revision: revision.unwrap_or_default(),
                branch: branch.unwrap_or_default(),
                message: message.unwrap_or_default(),
            };
            let issues = tracked_issues(
                tracker,
                tracker_version,
                issues,
                aggregate,
                aggregation_status,
            );

            let record = RecordRequest::new(build.coordinates(), "", ModuleType::Generic);
            RecordPartialUseCase::new(store, reporter()).execute(
                &record,
                PartialPayload::Vcs {
                    vcs_list: vec![vcs],
                    issues,
                },
            )?;
        }

        Command::AddChecksum {
            build,
            module,
            file,
        } => {
            let record = module_record(&build, &module)?;
            let checksum = FileChecksumCalculator::new().calculate(&file)?;
            RecordPartialUseCase::new(store, reporter())
                .execute(&record, PartialPayload::Checksum(checksum))?;
        }

        Command::Publish {
            build,
            output,
            principal,
            build_url,
            env_include,
            env_exclude,
        } => {
            let identity = BuildIdentity {
                principal,
                url: build_url,
                ..BuildIdentity::default_agent()
            };
            let request = PublishRequest::new(build.coordinates(), identity).with_env_patterns(
                override_patterns(env_include, &settings.env_include),
                override_patterns(env_exclude, &settings.env_exclude),
            );

            let build_info = AssembleBuildInfoUseCase::new(store, reporter())
                .execute(&request)
                .with_context(|| format!("Failed to publish {}", request.coordinates))?;
            let document = serde_json::to_string_pretty(&build_info)?;

            let presenter: Box<dyn OutputPresenter> = match output {
                Some(path) => Box::new(FileSystemWriter::new(path)),
                None => Box::new(StdoutPresenter::new()),
            };
            presenter.present(&document)?;
        }

        Command::Clean { build } => {
            CleanBuildUseCase::new(store, reporter()).execute(&build.coordinates())?;
        }
    }

    Ok(())
}

/// Defaults, then the config file, then `--temp-dir`
fn load_settings(args: &Args) -> Result<Settings> {
    let config = match &args.config {
        Some(path) => Some(load_config_from_path(path)?),
        None => discover_config(Path::new("."))?,
    };

    let mut settings = Settings::from_config(config);
    if let Some(temp_dir) = &args.temp_dir {
        settings.temp_dir = temp_dir.clone();
    }
    Ok(settings)
}

/// Command-line patterns replace the configured ones when any are given
fn override_patterns(cli: Vec<String>, configured: &[String]) -> Vec<String> {
    if cli.is_empty() {
        configured.to_vec()
    } else {
        cli
    }
}

fn collect_request(
    record: RecordRequest,
    source: DependencySource,
    graph: &GraphArgs,
    settings: &Settings,
) -> CollectDependenciesRequest {
    CollectDependenciesRequest::new(record, source)
        .with_limits(
            graph.max_path_length.unwrap_or(settings.max_path_length),
            graph.max_paths.unwrap_or(settings.max_paths_per_dependency),
        )
        .with_checksum_workers(graph.workers.unwrap_or(settings.checksum_workers))
        .require_checksums(!graph.allow_missing_checksums)
}

/// Runs dependency collection against the package cache, if one is configured
async fn collect(
    store: FileSystemPartialStore,
    graph: &GraphArgs,
    reporter: StderrProgressReporter,
    request: CollectDependenciesRequest,
) -> Result<()> {
    match &graph.cache_dir {
        Some(dir) => {
            let resolver = CachingChecksumResolver::new(CacheChecksumResolver::new(
                CacheLocator::new(dir.clone(), graph.cache_layout),
                FileChecksumCalculator::new(),
            ));
            run_collection(store, resolver, reporter, request).await
        }
        None => run_collection(store, OfflineChecksumResolver::new(), reporter, request).await,
    }
}

async fn run_collection<R: ChecksumResolver>(
    store: FileSystemPartialStore,
    resolver: R,
    reporter: StderrProgressReporter,
    request: CollectDependenciesRequest,
) -> Result<()> {
    let response = CollectDependenciesUseCase::new(store, resolver, reporter)
        .execute(request)
        .await?;

    if response.truncated_paths > 0 {
        warn!(
            truncated = response.truncated_paths,
            "Some requested-by paths were cut at the configured limits"
        );
    }
    for module in &response.modules {
        debug!(
            module = %module.module_id,
            dependencies = module.dependency_count,
            fragment = %module.fragment_path.display(),
            "Recorded dependency fragment"
        );
    }
    Ok(())
}

/// Record request for commands that belong to a single module
fn module_record(build: &BuildArgs, module: &ModuleArgs) -> Result<RecordRequest> {
    let module_id = match &module.module {
        Some(id) => id.clone(),
        None => {
            validate_project_path(&module.path)?;
            FileSystemReader::new().read_module_id(&module.path)?
        }
    };
    Ok(RecordRequest::new(
        build.coordinates(),
        module_id,
        module.module_type,
    ))
}

fn describe_artifact<C: ChecksumCalculator>(
    calculator: &C,
    file: &Path,
    artifact_type: Option<&str>,
) -> Result<Artifact> {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| BuildInfoError::Validation {
            message: format!("Artifact path has no file name: {}", file.display()),
        })?;
    let artifact_type = artifact_type
        .map(str::to_string)
        .or_else(|| {
            file.extension()
                .map(|ext| ext.to_string_lossy().into_owned())
        })
        .unwrap_or_default();

    let checksum = calculator.calculate(file)?;
    Ok(Artifact::new(name)
        .with_type(artifact_type)
        .with_path(file.display().to_string())
        .with_checksum(checksum))
}

/// Issues are only recorded when a tracker is named
fn tracked_issues(
    tracker: Option<String>,
    tracker_version: Option<String>,
    affected: Vec<AffectedIssue>,
    aggregate: bool,
    aggregation_status: Option<String>,
) -> Option<Issues> {
    let Some(name) = tracker else {
        if !affected.is_empty() {
            warn!(
                issues = affected.len(),
                "Ignoring --issue values because no --tracker was given"
            );
        }
        return None;
    };

    Some(Issues {
        tracker: Some(Tracker {
            name,
            version: tracker_version.unwrap_or_default(),
        }),
        aggregate_build_issues: aggregate,
        aggregation_build_status: aggregation_status.unwrap_or_default(),
        affected_issues: affected,
    })
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(BuildInfoError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| BuildInfoError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(BuildInfoError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(BuildInfoError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
