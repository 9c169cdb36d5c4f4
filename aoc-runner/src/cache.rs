//! Input cache for storing puzzle inputs locally

use crate::error::InputError;
use aoc_calendar::Date;
use aoc_http_client::{AocClient, AocError};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Somewhere puzzle inputs can be downloaded from
pub trait InputSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch(&self, date: Date, session: &str) -> Result<Vec<u8>, Self::Error>;
}

impl InputSource for AocClient {
    type Error = AocError;

    fn fetch(&self, date: Date, session: &str) -> Result<Vec<u8>, AocError> {
        self.get_input(date.year.get(), date.day.get(), session)
    }
}

/// File-based cache for puzzle inputs in front of an [`InputSource`]
///
/// Directory structure: `{root}/{year}/{day}.txt`. Entries are never
/// invalidated.
pub struct InputCache<S> {
    root: PathBuf,
    source: S,
}

impl<S: InputSource> InputCache<S> {
    pub fn new(root: PathBuf, source: S) -> Self {
        Self { root, source }
    }

    /// Get the cache path for a specific date
    pub fn cache_path(&self, date: Date) -> PathBuf {
        self.root
            .join(date.year.to_string())
            .join(format!("{}.txt", date.day))
    }

    /// Check if input is cached
    pub fn contains(&self, date: Date) -> bool {
        self.cache_path(date).is_file()
    }

    /// Cached input for `date`, fetching and storing it first if needed
    ///
    /// `session` is only sent when the input is not cached yet. A failed
    /// fetch leaves the cache untouched.
    pub fn get_input(&self, date: Date, session: &str) -> Result<Vec<u8>, InputError> {
        let path = self.cache_path(date);

        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), "input cache hit");
                return Ok(bytes);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(InputError::Cache { path, source }),
        }

        info!(%date, "fetching input");
        let bytes = self
            .source
            .fetch(date, session)
            .map_err(|e| InputError::Fetch {
                date,
                source: Box::new(e),
            })?;

        self.put(&path, &bytes)?;
        Ok(bytes)
    }

    /// Store input in cache, creating the year directory if needed
    fn put(&self, path: &Path, bytes: &[u8]) -> Result<(), InputError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| InputError::Cache {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, bytes).map_err(|source| InputError::Cache {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), bytes = bytes.len(), "input cached");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_calendar::{Day, Year};
    use proptest::prelude::*;
    use std::cell::{Cell, RefCell};
    use tempfile::TempDir;

    #[derive(Debug, thiserror::Error)]
    #[error("fake fetch failed")]
    struct FakeError;

    /// Source that counts fetches and remembers the sessions it was given
    #[derive(Default)]
    struct CountingSource {
        fetches: Cell<usize>,
        sessions: RefCell<Vec<String>>,
        fail: bool,
    }

    impl InputSource for CountingSource {
        type Error = FakeError;

        fn fetch(&self, date: Date, session: &str) -> Result<Vec<u8>, FakeError> {
            self.fetches.set(self.fetches.get() + 1);
            self.sessions.borrow_mut().push(session.to_string());
            if self.fail {
                return Err(FakeError);
            }
            Ok(format!("input for {}\n\n", date).into_bytes())
        }
    }

    fn date(year: u16, day: u8) -> Date {
        Date::new(Year::new(year).unwrap(), Day::new(day).unwrap())
    }

    #[test]
    fn test_cache_path_format() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().join("aoc-inputs"), CountingSource::default());

        assert_eq!(
            cache.cache_path(date(2015, 1)),
            temp.path().join("aoc-inputs").join("2015").join("1.txt")
        );
        assert_eq!(
            cache.cache_path(date(2023, 25)),
            temp.path().join("aoc-inputs").join("2023").join("25.txt")
        );
    }

    #[test]
    fn test_fetches_once_then_serves_from_disk() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf(), CountingSource::default());
        let key = date(2015, 1);

        assert!(!cache.contains(key));
        let first = cache.get_input(key, "secret").unwrap();
        assert_eq!(cache.source.fetches.get(), 1);
        assert!(cache.contains(key));
        assert_eq!(fs::read(cache.cache_path(key)).unwrap(), first);

        let second = cache.get_input(key, "").unwrap();
        assert_eq!(cache.source.fetches.get(), 1);
        assert_eq!(first, second);
        assert_eq!(*cache.source.sessions.borrow(), vec!["secret".to_string()]);
    }

    #[test]
    fn test_failed_fetch_caches_nothing() {
        let temp = TempDir::new().unwrap();
        let source = CountingSource {
            fail: true,
            ..CountingSource::default()
        };
        let cache = InputCache::new(temp.path().to_path_buf(), source);
        let key = date(2016, 3);

        let err = cache.get_input(key, "secret").unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to fetch input for 2016 day 3: fake fetch failed"
        );
        assert!(!cache.contains(key));
        assert!(!temp.path().join("2016").exists());
    }

    #[test]
    fn test_existing_file_is_never_refetched() {
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf(), CountingSource::default());
        let key = date(2017, 9);
        fs::create_dir_all(temp.path().join("2017")).unwrap();
        fs::write(cache.cache_path(key), b"hand placed").unwrap();

        assert_eq!(cache.get_input(key, "secret").unwrap(), b"hand placed");
        assert_eq!(cache.source.fetches.get(), 0);
    }

    #[test]
    fn test_fetch_through_http_client() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2015/day/1/input")
            .match_header("cookie", "session=abc123")
            .with_status(200)
            .with_body("()())\n")
            .expect(1)
            .create();

        let client = AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap();
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf(), client);

        assert_eq!(cache.get_input(date(2015, 1), "abc123").unwrap(), b"()())\n");
        assert_eq!(cache.get_input(date(2015, 1), "abc123").unwrap(), b"()())\n");
        mock.assert();
    }

    #[test]
    fn test_http_error_status_is_fetch_failure() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/2015/day/2/input")
            .with_status(400)
            .create();

        let client = AocClient::builder()
            .base_url(server.url())
            .unwrap()
            .build()
            .unwrap();
        let temp = TempDir::new().unwrap();
        let cache = InputCache::new(temp.path().to_path_buf(), client);

        let err = cache.get_input(date(2015, 2), "bad").unwrap_err();
        assert!(matches!(err, InputError::Fetch { .. }));
        assert!(err.to_string().ends_with("400 Bad Request"));
        assert!(!cache.contains(date(2015, 2)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        // **Feature: input-cache, Property 1: Entries are keyed by year and day**
        #[test]
        fn prop_cache_path_layout(year in 2015u16..2100, day in 1u8..=25) {
            let cache = InputCache::new(PathBuf::from("/inputs"), CountingSource::default());
            let path = cache.cache_path(date(year, day));

            prop_assert_eq!(
                path,
                PathBuf::from("/inputs").join(year.to_string()).join(format!("{}.txt", day))
            );
        }
    }
}
