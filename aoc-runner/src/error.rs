//! Error types for the CLI

use aoc_calendar::{CalendarError, Date, Year};
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Year, day or date range rejected by the calendar
    #[error(transparent)]
    Calendar(#[from] CalendarError),

    /// No year directory to build
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    /// Compiling the year failed
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The compiled library could not be opened
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Solver discovery error
    #[error(transparent)]
    Discovery(#[from] aoc_plugin::DiscoveryError),

    /// Input fetch or cache error
    #[error(transparent)]
    Input(#[from] InputError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Workspace resolution errors
#[derive(Error, Debug)]
pub enum WorkspaceError {
    /// No available year has a directory under the workspace
    #[error("no year directory found in {}", .dir.display())]
    NoWorkspaceFound { dir: PathBuf },

    /// The requested year has no directory
    #[error("no workspace found for year {year} (expected {})", .path.display())]
    NoWorkspaceForYear { year: Year, path: PathBuf },
}

/// Build collaborator errors
#[derive(Error, Debug)]
pub enum BuildError {
    /// The build tool could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The build tool exited unsuccessfully
    #[error("build failed ({status}):\n{diagnostics}")]
    Failed { status: ExitStatus, diagnostics: String },

    /// The build succeeded but produced no loadable library
    #[error("build of {} produced no cdylib; set crate-type = [\"cdylib\"] in its Cargo.toml", .workspace.display())]
    NoArtifact { workspace: PathBuf },
}

/// Library loading errors
#[derive(Error, Debug)]
#[error("failed to load {}: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: libloading::Error,
}

/// Input cache errors
#[derive(Error, Debug)]
pub enum InputError {
    /// Input fetch failed
    #[error("failed to fetch input for {date}: {source}")]
    Fetch {
        date: Date,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading or writing the cache failed
    #[error("input cache error at {}: {source}", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input is not text
    #[error("input for {date} is not valid UTF-8")]
    Encoding { date: Date },
}
