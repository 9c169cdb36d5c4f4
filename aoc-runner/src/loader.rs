//! Opening a compiled year as a [`SolverModule`]

use crate::error::LoadError;
use aoc_calendar::{Day, Part};
use aoc_plugin::{DeclaredSolver, Lookup, SolverDecl, SolverModule, symbol_name};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A shared library exporting `Day{N}{Part}` solver declarations
#[derive(Debug)]
pub struct LibraryModule {
    library: libloading::Library,
    path: PathBuf,
}

impl LibraryModule {
    /// Load the library at `path`
    ///
    /// Loading runs the library's initializers; only libraries built from the
    /// user's own workspace are opened.
    pub fn open(path: &Path) -> Result<Self, LoadError> {
        let library = unsafe { libloading::Library::new(path) }.map_err(|source| LoadError {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded solver library");
        Ok(Self {
            library,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SolverModule for LibraryModule {
    fn lookup(&self, day: Day, part: Part) -> Lookup<'_> {
        let name = symbol_name(day, part);

        // A data symbol resolves to its address
        let symbol = match unsafe { self.library.get::<*const SolverDecl>(name.as_bytes()) } {
            Ok(symbol) => symbol,
            Err(e) => {
                debug!(symbol = %name, error = %e, "symbol not exported");
                return Lookup::Absent;
            }
        };

        match unsafe { SolverDecl::from_symbol(*symbol) } {
            Ok(decl) => Lookup::Found(Box::new(DeclaredSolver::new(decl))),
            Err(reason) => {
                debug!(symbol = %name, %reason, "symbol is not a solver");
                Lookup::Mismatch(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::build_year;
    use aoc_plugin::{DiscoveryError, SignatureMismatch, SolverFn, Strategy, find_solvers};
    use tempfile::TempDir;

    fn day(d: u8) -> Day {
        Day::new(d).unwrap()
    }

    /// Build the fixture library into a fresh target directory
    fn fixture_library() -> (TempDir, PathBuf) {
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/solver-lib");
        let target = TempDir::new().unwrap();
        let artifact = build_year(&fixture, target.path()).unwrap();
        (target, artifact)
    }

    #[test]
    fn test_lookup_in_compiled_library() {
        let (_target, artifact) = fixture_library();
        let module = LibraryModule::open(&artifact).unwrap();
        assert_eq!(module.path(), artifact);

        match module.lookup(day(1), Part::A) {
            Lookup::Found(solver) => assert_eq!(solver.solve("a\nb\nc\n"), Ok("3".to_string())),
            Lookup::Absent => panic!("Day1A should be exported"),
            Lookup::Mismatch(reason) => panic!("Day1A rejected: {}", reason),
        }
        assert!(matches!(module.lookup(day(1), Part::B), Lookup::Absent));
        assert!(matches!(module.lookup(day(25), Part::A), Lookup::Absent));
        assert!(matches!(
            module.lookup(day(3), Part::A),
            Lookup::Mismatch(SignatureMismatch::NotADeclaration(7))
        ));

        let err = find_solvers(&module, Strategy::Latest).unwrap_err();
        assert!(matches!(
            err,
            DiscoveryError::InvalidSignature { day: d, part: Part::A, .. } if d == day(3)
        ));

        let found = find_solvers(&module, Strategy::Specific(day(1))).unwrap();
        assert!(found.part_b.is_none());
        assert_eq!(found.part_a.solve("x\n"), Ok("1".to_string()));
    }

    #[test]
    fn test_open_missing_library() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(format!("missing.{}", std::env::consts::DLL_EXTENSION));

        let err = LibraryModule::open(&path).unwrap_err();
        assert_eq!(err.path, path);
        assert!(err.to_string().starts_with("failed to load"));
    }

    #[test]
    fn test_open_rejects_non_library() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(format!("garbage.{}", std::env::consts::DLL_EXTENSION));
        std::fs::write(&path, b"not a shared object").unwrap();

        assert!(LibraryModule::open(&path).is_err());
    }
}
