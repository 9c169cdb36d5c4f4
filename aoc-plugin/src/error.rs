//! Error types for solver discovery

use aoc_calendar::{Day, Part};
use thiserror::Error;

/// Why an exported symbol cannot be used as a solver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureMismatch {
    #[error("symbol resolves to a null pointer")]
    Null,
    #[error("symbol is not a solver declaration (found tag {0:#018x}), export it with #[solver]")]
    NotADeclaration(u64),
    #[error("solver ABI version {found} is not supported, expected {expected}")]
    Version { found: u32, expected: u32 },
    #[error("solver declaration is misaligned")]
    Misaligned,
}

/// Error type for discovering solvers in a module
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryError {
    /// No day in 1..=25 exports a part A solver
    #[error("no solvers found")]
    NoSolversFound,
    /// The requested day has no part A solver
    #[error("no solvers found for day {0}")]
    NoSolversForDay(Day),
    /// A solver symbol exists but does not satisfy the call contract
    #[error("found invalid solver signature for day {day} part {part}: {reason}")]
    InvalidSignature {
        day: Day,
        part: Part,
        reason: SignatureMismatch,
    },
}
