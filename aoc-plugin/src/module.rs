//! The boundary between discovery and whatever loaded the solvers

use crate::alloc_counter::AllocStats;
use crate::error::SignatureMismatch;
use aoc_calendar::{Day, Part};

/// A callable solver: puzzle text in, answer text or failure message out
pub trait SolverFn {
    fn solve(&self, input: &str) -> Result<String, String>;

    /// Allocation counters of the solver's allocator, if it keeps any
    fn alloc_stats(&self) -> AllocStats {
        AllocStats::default()
    }
}

impl<F> SolverFn for F
where
    F: Fn(&str) -> Result<String, String>,
{
    fn solve(&self, input: &str) -> Result<String, String> {
        self(input)
    }
}

/// Result of looking up one solver symbol
pub enum Lookup<'m> {
    /// The symbol exists and satisfies the call contract
    Found(Box<dyn SolverFn + 'm>),
    /// No such symbol
    Absent,
    /// The symbol exists but is not a valid solver
    Mismatch(SignatureMismatch),
}

/// A loaded collection of solvers addressable by day and part
pub trait SolverModule {
    fn lookup(&self, day: Day, part: Part) -> Lookup<'_>;
}

/// Exported symbol name for a solver, e.g. `Day3A`
pub fn symbol_name(day: Day, part: Part) -> String {
    format!("Day{}{}", day, part)
}

/// A solver resolved for a specific day and part
pub struct SolverEntry<'m> {
    day: Day,
    part: Part,
    solver: Box<dyn SolverFn + 'm>,
}

impl<'m> SolverEntry<'m> {
    pub fn new(day: Day, part: Part, solver: Box<dyn SolverFn + 'm>) -> Self {
        Self { day, part, solver }
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn part(&self) -> Part {
        self.part
    }

    pub fn solve(&self, input: &str) -> Result<String, String> {
        self.solver.solve(input)
    }

    pub fn alloc_stats(&self) -> AllocStats {
        self.solver.alloc_stats()
    }
}

impl std::fmt::Debug for SolverEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverEntry")
            .field("day", &self.day)
            .field("part", &self.part)
            .finish_non_exhaustive()
    }
}
