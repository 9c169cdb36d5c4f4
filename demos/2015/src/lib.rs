//! Advent of Code 2015 solutions
//!
//! Run from the `demos` directory with `aoc-run --year 2015`.

use anyhow::{Context, anyhow, bail};
use aoc_plugin::solver;

aoc_plugin::count_allocations!();

fn floor_steps(input: &str) -> impl Iterator<Item = anyhow::Result<i64>> + '_ {
    input.trim().chars().map(|c| match c {
        '(' => Ok(1),
        ')' => Ok(-1),
        other => Err(anyhow!("unexpected character {:?}", other)),
    })
}

#[solver(day = 1, part = A)]
fn final_floor(input: &str) -> anyhow::Result<i64> {
    floor_steps(input).sum()
}

#[solver(day = 1, part = B)]
fn basement_position(input: &str) -> anyhow::Result<usize> {
    let mut floor = 0;
    for (i, step) in floor_steps(input).enumerate() {
        floor += step?;
        if floor < 0 {
            return Ok(i + 1);
        }
    }
    bail!("Santa never enters the basement")
}

/// Box dimensions, one `LxWxH` per line
fn boxes(input: &str) -> anyhow::Result<Vec<[u64; 3]>> {
    input
        .lines()
        .enumerate()
        .map(|(line_idx, line)| {
            let mut dims = [0u64; 3];
            let mut parts = line.trim().split('x');
            for dim in dims.iter_mut() {
                let part = parts
                    .next()
                    .with_context(|| format!("(line {}) expected LxWxH", line_idx + 1))?;
                *dim = part
                    .parse()
                    .with_context(|| format!("(line {}) invalid dimension {:?}", line_idx + 1, part))?;
            }
            dims.sort_unstable();
            Ok(dims)
        })
        .collect()
}

#[solver(day = 2, part = A)]
fn wrapping_paper(input: &str) -> anyhow::Result<u64> {
    Ok(boxes(input)?
        .iter()
        .map(|[a, b, c]| 2 * (a * b + b * c + a * c) + a * b)
        .sum())
}

#[solver(day = 2, part = B)]
fn ribbon(input: &str) -> anyhow::Result<u64> {
    Ok(boxes(input)?
        .iter()
        .map(|[a, b, c]| 2 * (a + b) + a * b * c)
        .sum())
}
