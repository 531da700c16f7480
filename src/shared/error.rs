use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a publish attempted on a
/// build that was never started from other failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// Publish requested for a build without a start marker
    BuildNotStarted = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (corrupt fragment, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code matching the root cause of an error chain
    pub fn for_error(error: &anyhow::Error) -> Self {
        match error.downcast_ref::<BuildInfoError>() {
            Some(BuildInfoError::BuildNotStarted { .. }) => ExitCode::BuildNotStarted,
            _ => ExitCode::ApplicationError,
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::BuildNotStarted => write!(f, "Build Not Started (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for build-info collection.
#[derive(Debug, Error)]
pub enum BuildInfoError {
    #[error("Build '{name}' number '{number}' (project: '{project}') has not been started\n\n💡 Hint: Run `build-info start` with the same build name, number and project first")]
    BuildNotStarted {
        name: String,
        number: String,
        project: String,
    },

    #[error("Corrupt build fragment: {path}\nDetails: {details}\n\n💡 Hint: Run `build-info clean` for this build and record its fragments again")]
    CorruptFragment { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid property pattern: '{pattern}'\nDetails: {details}\n\n💡 Hint: Patterns use glob syntax, e.g. 'CI_*' or '*_TOKEN'")]
    InvalidPattern { pattern: String, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Pass a project directory containing Cargo.toml with --path, or set the module id with --module")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Invalid module path: '{path}'\nReason: {reason}")]
    InvalidModulePath { path: String, reason: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },
}
