//! Selecting which day's solvers to run

use crate::error::DiscoveryError;
use crate::module::{Lookup, SolverEntry, SolverModule};
use aoc_calendar::{Day, Part};

/// How to pick the day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The highest day exporting a part A solver
    Latest,
    /// Exactly this day
    Specific(Day),
}

/// Solvers selected for one day
#[derive(Debug)]
pub struct Discovered<'m> {
    pub day: Day,
    pub part_a: SolverEntry<'m>,
    pub part_b: Option<SolverEntry<'m>>,
}

impl<'m> Discovered<'m> {
    /// Present parts in order, A first
    pub fn entries(&self) -> impl Iterator<Item = &SolverEntry<'m>> {
        std::iter::once(&self.part_a).chain(self.part_b.as_ref())
    }
}

/// Find the solvers to run in `module`
///
/// With [`Strategy::Latest`] days are scanned from 25 down to 1 and days
/// without a part A are skipped. A symbol that exists but fails the signature
/// check always aborts discovery, whatever the strategy. Part B is optional.
pub fn find_solvers<'m, M>(module: &'m M, strategy: Strategy) -> Result<Discovered<'m>, DiscoveryError>
where
    M: SolverModule + ?Sized,
{
    match strategy {
        Strategy::Latest => {
            for day in Day::all().rev() {
                if let Some(found) = solvers_for_day(module, day)? {
                    return Ok(found);
                }
            }
            Err(DiscoveryError::NoSolversFound)
        }
        Strategy::Specific(day) => {
            solvers_for_day(module, day)?.ok_or(DiscoveryError::NoSolversForDay(day))
        }
    }
}

fn solvers_for_day<'m, M>(module: &'m M, day: Day) -> Result<Option<Discovered<'m>>, DiscoveryError>
where
    M: SolverModule + ?Sized,
{
    let Some(part_a) = resolve(module, day, Part::A)? else {
        return Ok(None);
    };
    let part_b = resolve(module, day, Part::B)?;
    Ok(Some(Discovered { day, part_a, part_b }))
}

fn resolve<'m, M>(module: &'m M, day: Day, part: Part) -> Result<Option<SolverEntry<'m>>, DiscoveryError>
where
    M: SolverModule + ?Sized,
{
    match module.lookup(day, part) {
        Lookup::Found(solver) => Ok(Some(SolverEntry::new(day, part, solver))),
        Lookup::Absent => Ok(None),
        Lookup::Mismatch(reason) => Err(DiscoveryError::InvalidSignature { day, part, reason }),
    }
}
