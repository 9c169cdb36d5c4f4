//! Locating the year directory to build

use crate::error::WorkspaceError;
use aoc_calendar::{Year, available_years_at};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Which year directory to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSelector {
    /// Newest available year that has a directory
    Latest,
    /// Exactly this year
    Specific(Year),
}

impl From<Option<Year>> for YearSelector {
    fn from(year: Option<Year>) -> Self {
        year.map_or(YearSelector::Latest, YearSelector::Specific)
    }
}

/// Find `<cwd>/<year>` for the selected year
pub fn find_year_directory(cwd: &Path, selector: YearSelector) -> Result<(Year, PathBuf), WorkspaceError> {
    find_year_directory_at(cwd, selector, Utc::now())
}

/// [`find_year_directory`] with an explicit current time
pub fn find_year_directory_at(
    cwd: &Path,
    selector: YearSelector,
    now: DateTime<Utc>,
) -> Result<(Year, PathBuf), WorkspaceError> {
    match selector {
        YearSelector::Latest => available_years_at(now)
            .into_iter()
            .rev()
            .map(|year| (year, cwd.join(year.to_string())))
            .inspect(|(_, path)| debug!(path = %path.display(), "probing year directory"))
            .find(|(_, path)| path.is_dir())
            .ok_or_else(|| WorkspaceError::NoWorkspaceFound {
                dir: cwd.to_path_buf(),
            }),
        YearSelector::Specific(year) => {
            let path = cwd.join(year.to_string());
            if path.is_dir() {
                Ok((year, path))
            } else {
                Err(WorkspaceError::NoWorkspaceForYear { year, path })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap()
    }

    fn year(y: u16) -> Year {
        Year::new(y).unwrap()
    }

    #[test]
    fn test_latest_picks_newest_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2015")).unwrap();
        fs::create_dir(temp.path().join("2017")).unwrap();

        let (found, path) = find_year_directory_at(temp.path(), YearSelector::Latest, now()).unwrap();
        assert_eq!(found, year(2017));
        assert_eq!(path, temp.path().join("2017"));
    }

    #[test]
    fn test_latest_ignores_locked_years_and_files() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2016")).unwrap();
        // 2020 has not unlocked yet in June 2020
        fs::create_dir(temp.path().join("2020")).unwrap();
        // A file named like a year is not a workspace
        fs::write(temp.path().join("2019"), "").unwrap();

        let (found, _) = find_year_directory_at(temp.path(), YearSelector::Latest, now()).unwrap();
        assert_eq!(found, year(2016));
    }

    #[test]
    fn test_latest_without_directories() {
        let temp = TempDir::new().unwrap();
        let err = find_year_directory_at(temp.path(), YearSelector::Latest, now()).unwrap_err();
        assert!(matches!(err, WorkspaceError::NoWorkspaceFound { .. }));
    }

    #[test]
    fn test_specific_year() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("2018")).unwrap();

        let (found, path) =
            find_year_directory_at(temp.path(), YearSelector::Specific(year(2018)), now()).unwrap();
        assert_eq!(found, year(2018));
        assert_eq!(path, temp.path().join("2018"));

        let err = find_year_directory_at(temp.path(), YearSelector::Specific(year(2015)), now())
            .unwrap_err();
        assert!(err.to_string().starts_with("no workspace found for year 2015"));
    }

    #[test]
    fn test_selector_from_option() {
        assert_eq!(YearSelector::from(None), YearSelector::Latest);
        assert_eq!(
            YearSelector::from(Some(year(2021))),
            YearSelector::Specific(year(2021))
        );
    }
}
