//! Advent of Code solver plugins
//!
//! A year of solutions is compiled into a `cdylib` that exports one symbol per
//! solver, named `Day{day}{Part}` (for example `Day3A`). This crate is linked
//! by both sides of that boundary:
//!
//! - **Plugins** annotate solver functions with [`solver`], which exports a
//!   [`SolverDecl`] under the conventional name. [`count_allocations!`]
//!   optionally installs a counting allocator so benchmarks can report
//!   allocations.
//! - **The runner** looks symbols up through the [`SolverModule`] trait,
//!   selects a day with [`find_solvers`] and executes each part with
//!   [`run_solver`], producing a printable [`SolveResult`].
//!
//! # Writing solvers
//!
//! ```ignore
//! use aoc_plugin::solver;
//!
//! aoc_plugin::count_allocations!();
//!
//! #[solver(day = 1, part = A)]
//! fn floor(input: &str) -> Result<i64, String> {
//!     Ok(input.chars().map(|c| if c == '(' { 1 } else { -1 }).sum())
//! }
//! ```
//!
//! # Running solvers
//!
//! Discovery and execution only see the [`SolverModule`] seam, so any
//! in-memory module works:
//!
//! ```
//! use aoc_plugin::{find_solvers, run_solver, Lookup, Mode, SolverModule, Strategy};
//! use aoc_calendar::{Day, Part, Year};
//!
//! struct OneSolver;
//!
//! impl SolverModule for OneSolver {
//!     fn lookup(&self, day: Day, part: Part) -> Lookup<'_> {
//!         if day.get() == 2 && part == Part::A {
//!             Lookup::Found(Box::new(|input: &str| Ok::<_, String>(input.len().to_string())))
//!         } else {
//!             Lookup::Absent
//!         }
//!     }
//! }
//!
//! let found = find_solvers(&OneSolver, Strategy::Latest).unwrap();
//! assert_eq!(found.day.get(), 2);
//! assert!(found.part_b.is_none());
//!
//! let result = run_solver(Year::FIRST, &found.part_a, "abc", &Mode::Timed);
//! assert!(result.to_string().ends_with(":\n3"));
//! ```

pub mod abi;
pub mod alloc_counter;
mod discovery;
mod error;
mod harness;
mod module;
mod result;

pub use abi::{DeclaredSolver, SolverDecl};
pub use alloc_counter::AllocStats;
pub use discovery::{Discovered, Strategy, find_solvers};
pub use error::{DiscoveryError, SignatureMismatch};
pub use harness::{BenchConfig, Mode, run_solver};
pub use module::{Lookup, SolverEntry, SolverFn, SolverModule, symbol_name};
pub use result::{BenchStats, Outcome, SolveResult, Timing, format_duration};

// Re-export the attribute macro
pub use aoc_plugin_macros::solver;
