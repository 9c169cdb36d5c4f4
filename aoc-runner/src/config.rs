//! Configuration resolution from CLI args

use crate::cli::Args;
use crate::error::CliError;
use aoc_calendar::{CalendarError, Date, Day, Year, validate_year};
use aoc_plugin::{BenchConfig, Mode};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;
use zeroize::Zeroizing;

/// Name of the per-user cache and config directories
const APP_NAME: &str = "aoc-run";

/// Environment variable holding the session credential
pub const SESSION_ENV: &str = "AOC_SESSION";

/// Where the runner keeps its files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Downloaded inputs and compiled years
    pub cache_root: PathBuf,
    /// The stored session credential
    pub config_root: PathBuf,
}

impl AppDirs {
    pub fn new(cache_root: PathBuf, config_root: PathBuf) -> Self {
        Self {
            cache_root,
            config_root,
        }
    }

    /// Per-user directories, with an optional cache override
    pub fn resolve(cache_override: Option<&Path>) -> Result<Self, CliError> {
        let cache_root = match cache_override {
            Some(path) => expand_tilde(path),
            None => dirs::cache_dir()
                .map(|dir| dir.join(APP_NAME))
                .ok_or_else(|| {
                    CliError::Config("cannot determine a cache directory, pass --cache-dir".to_string())
                })?,
        };
        let config_root = dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or_else(|| CliError::Config("cannot determine a config directory".to_string()))?;
        Ok(Self::new(cache_root, config_root))
    }

    /// Root of the input cache: `<cache-root>/aoc-inputs`
    pub fn inputs_dir(&self) -> PathBuf {
        self.cache_root.join("aoc-inputs")
    }

    /// Cargo target directory for one year: `<cache-root>/builds/<year>`
    pub fn build_dir(&self, year: Year) -> PathBuf {
        self.cache_root.join("builds").join(year.to_string())
    }

    /// File holding the session credential: `<config-root>/aoc_session`
    pub fn session_file(&self) -> PathBuf {
        self.config_root.join("aoc_session")
    }
}

/// Resolved runtime configuration
#[derive(Debug)]
pub struct Config {
    /// Year to run (None = latest year with a workspace)
    pub year: Option<Year>,
    /// Day to run (None = latest day with solvers)
    pub day: Option<Day>,
    /// Timed or benchmarked execution
    pub mode: Mode,
    /// Directory holding one sub-directory per year
    pub workspace: PathBuf,
    /// Cache and config roots
    pub dirs: AppDirs,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, validating year and day against the calendar
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let year = args
            .year
            .map(validate_year)
            .transpose()
            .map_err(CalendarError::from)?;
        let day = args
            .day
            .map(Day::new)
            .transpose()
            .map_err(CalendarError::from)?;

        let mode = if args.benchmark {
            Mode::Benchmark(BenchConfig {
                target: args.bench_time,
                ..BenchConfig::default()
            })
        } else {
            Mode::Timed
        };

        let workspace = std::env::current_dir()?;
        let dirs = AppDirs::resolve(args.cache_dir.as_deref())?;
        debug!(?dirs, workspace = %workspace.display(), "resolved directories");

        Ok(Config {
            year,
            day,
            mode,
            workspace,
            dirs,
            quiet: args.quiet,
        })
    }
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Some(path_str) = path.to_str()
        && (path_str.starts_with("~/") || path_str == "~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path_str.trim_start_matches('~').trim_start_matches('/'));
    }
    path.to_path_buf()
}

/// Session credential needed to fetch the input for `date`
///
/// `AOC_SESSION` wins over the session file; with neither the user is
/// prompted.
pub fn resolve_session(dirs: &AppDirs, date: Date) -> Result<Zeroizing<String>, CliError> {
    if let Some(session) = stored_session(std::env::var(SESSION_ENV).ok(), &dirs.session_file())? {
        return Ok(session);
    }
    prompt_session(&format!(
        "Session token required to fetch the input for {} (set {} or write it to {})",
        date,
        SESSION_ENV,
        dirs.session_file().display()
    ))
}

/// Credential from the environment value or, failing that, the session file
fn stored_session(env: Option<String>, file: &Path) -> Result<Option<Zeroizing<String>>, CliError> {
    if let Some(value) = env.map(Zeroizing::new) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            debug!("using session from {}", SESSION_ENV);
            return Ok(Some(Zeroizing::new(trimmed.to_string())));
        }
    }

    let content = match fs::read_to_string(file) {
        Ok(content) => Zeroizing::new(content),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(CliError::Config(format!(
                "Failed to read {}: {}",
                file.display(),
                e
            )));
        }
    };

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    debug!(file = %file.display(), "using session from file");
    Ok(Some(Zeroizing::new(trimmed.to_string())))
}

/// Prompt user for session token
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    eprintln!("{}", reason);
    let s = Zeroizing::new(
        rpassword::prompt_password("Enter AOC session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {}", e)))?,
    );
    if s.trim().is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(Zeroizing::new(s.trim().to_string()))
}
