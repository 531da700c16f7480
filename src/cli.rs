use build_info_collector::adapters::outbound::filesystem::CacheLayout;
use build_info_collector::build_info::domain::{AffectedIssue, BuildCoordinates, ModuleType};
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Collect build fragments and assemble them into a build-info manifest
#[derive(Parser, Debug)]
#[command(name = "build-info")]
#[command(version)]
#[command(about = "Collect build fragments and assemble them into a build-info manifest", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a config file (defaults to ./build-info.config.yml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding per-build fragment directories
    #[arg(long, global = true, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mark a build as started
    Start {
        #[command(flatten)]
        build: BuildArgs,

        /// Start time as RFC 3339 (defaults to now)
        #[arg(long, value_name = "TIME")]
        started: Option<String>,
    },

    /// Record dependencies from a normalized package list (JSON)
    AddDeps {
        #[command(flatten)]
        build: BuildArgs,

        /// Module id (defaults to the root of the package list)
        #[arg(short, long, value_name = "ID")]
        module: Option<String>,

        #[arg(long = "module-type", default_value = "generic", value_name = "TYPE")]
        module_type: ModuleType,

        /// JSON array of packages: name, version, locator, type, scopes, checksum, children
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Record dependencies from `cargo tree --prefix depth` output
    AddCargoTree {
        #[command(flatten)]
        build: BuildArgs,

        /// File with the tree output (defaults to stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        graph: GraphArgs,
    },

    /// Record produced artifacts with their checksums
    AddArtifacts {
        #[command(flatten)]
        build: BuildArgs,

        #[command(flatten)]
        module: ModuleArgs,

        /// Artifact type (defaults to the file extension)
        #[arg(long = "type", value_name = "TYPE")]
        artifact_type: Option<String>,

        /// Artifact files
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Record the process environment
    AddEnv {
        #[command(flatten)]
        build: BuildArgs,

        /// Include patterns (glob, case-insensitive)
        #[arg(long = "env-include", value_name = "PATTERN")]
        include: Vec<String>,

        /// Exclude patterns (glob, case-insensitive)
        #[arg(long = "env-exclude", value_name = "PATTERN")]
        exclude: Vec<String>,
    },

    /// Record version control state and tracked issues
    AddVcs {
        #[command(flatten)]
        build: BuildArgs,

        #[arg(long)]
        url: Option<String>,

        #[arg(long)]
        revision: Option<String>,

        #[arg(long)]
        branch: Option<String>,

        #[arg(long)]
        message: Option<String>,

        /// Issue tracker name; issues are only published when set
        #[arg(long)]
        tracker: Option<String>,

        #[arg(long)]
        tracker_version: Option<String>,

        /// Affected issue as KEY or KEY=SUMMARY (repeatable)
        #[arg(long = "issue", value_name = "KEY[=SUMMARY]", value_parser = parse_issue)]
        issues: Vec<AffectedIssue>,

        /// Aggregate issues of previous builds
        #[arg(long)]
        aggregate: bool,

        /// Status of the previous build to aggregate from
        #[arg(long, value_name = "STATUS")]
        aggregation_status: Option<String>,
    },

    /// Record the checksum of the module's own build output
    AddChecksum {
        #[command(flatten)]
        build: BuildArgs,

        #[command(flatten)]
        module: ModuleArgs,

        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Merge every recorded fragment and print the build-info JSON
    Publish {
        #[command(flatten)]
        build: BuildArgs,

        /// Output file path (if not specified, outputs to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// User or service that ran the build
        #[arg(long, default_value = "")]
        principal: String,

        /// Link to the CI job
        #[arg(long, default_value = "")]
        build_url: String,

        /// Include patterns for environment properties (overrides config)
        #[arg(long = "env-include", value_name = "PATTERN")]
        env_include: Vec<String>,

        /// Exclude patterns for environment properties (overrides config)
        #[arg(long = "env-exclude", value_name = "PATTERN")]
        env_exclude: Vec<String>,
    },

    /// Delete everything recorded for a build
    Clean {
        #[command(flatten)]
        build: BuildArgs,
    },
}

/// Coordinates shared by every subcommand
#[derive(clap::Args, Debug, Clone)]
pub struct BuildArgs {
    #[arg(long = "build-name", value_name = "NAME")]
    pub name: String,

    #[arg(long = "build-number", value_name = "NUMBER")]
    pub number: String,

    #[arg(long, value_name = "KEY")]
    pub project: Option<String>,
}

impl BuildArgs {
    pub fn coordinates(&self) -> BuildCoordinates {
        BuildCoordinates::new(&self.name, &self.number, self.project.clone())
    }
}

/// Module a fragment is recorded for
#[derive(clap::Args, Debug, Clone)]
pub struct ModuleArgs {
    /// Module id (defaults to name:version from ./Cargo.toml)
    #[arg(short, long, value_name = "ID")]
    pub module: Option<String>,

    #[arg(long = "module-type", default_value = "generic", value_name = "TYPE")]
    pub module_type: ModuleType,

    /// Project directory used to derive the module id
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,
}

/// Graph limits and checksum resolution for dependency commands
#[derive(clap::Args, Debug, Clone)]
pub struct GraphArgs {
    /// Package cache to resolve missing checksums from
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Layout of the package cache: go or cargo
    #[arg(long, default_value = "cargo", value_name = "LAYOUT")]
    pub cache_layout: CacheLayout,

    /// Keep dependencies whose checksum cannot be resolved
    #[arg(long)]
    pub allow_missing_checksums: bool,

    /// Maximum ids per requested-by path (overrides config)
    #[arg(long, value_name = "N")]
    pub max_path_length: Option<usize>,

    /// Maximum requested-by paths per dependency (overrides config)
    #[arg(long, value_name = "N")]
    pub max_paths: Option<usize>,

    /// Concurrent checksum resolutions (overrides config)
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,
}

fn parse_issue(raw: &str) -> Result<AffectedIssue, String> {
    let (key, summary) = match raw.split_once('=') {
        Some((key, summary)) => (key.trim(), summary.trim()),
        None => (raw.trim(), ""),
    };
    if key.is_empty() {
        return Err(format!("Invalid issue '{}': the key must not be empty", raw));
    }
    Ok(AffectedIssue {
        key: key.to_string(),
        summary: summary.to_string(),
        ..Default::default()
    })
}
