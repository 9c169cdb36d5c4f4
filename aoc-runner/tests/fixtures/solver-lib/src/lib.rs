//! One real solver and one symbol that only borrows the naming convention

use aoc_plugin::solver;

#[solver(day = 1, part = A)]
fn count_lines(input: &str) -> Result<usize, String> {
    Ok(input.lines().count())
}

/// Named like a solver but not a declaration
#[allow(non_upper_case_globals)]
#[unsafe(no_mangle)]
pub static Day3A: [u64; 4] = [7, 0, 0, 0];
