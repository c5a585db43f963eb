//! Slide and merge primitives over a row-major cell slice.
//!
//! Every direction is reduced to a set of lines, each listed from the target
//! edge outward (for `Left`: column 0, 1, 2, ...). Sliding and merging then
//! work on one line at a time with the same code for all four directions.

use super::{Direction, Tile};

/// Whether lock states constrain sliding and merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockPolicy {
    /// Double-locked tiles stay put, only unlocked tiles merge.
    Honor,
    /// Every tile moves and merges. Used by the solver's search.
    Ignore,
}

impl LockPolicy {
    #[inline]
    fn movable(self, tile: &Tile) -> bool {
        match self {
            LockPolicy::Honor => tile.is_movable(),
            LockPolicy::Ignore => true,
        }
    }

    #[inline]
    fn mergeable(self, tile: &Tile) -> bool {
        match self {
            LockPolicy::Honor => tile.is_merge_eligible(),
            LockPolicy::Ignore => true,
        }
    }
}

/// Flat indices of every line for `dir`, each ordered from the target edge.
pub(crate) fn lines(rows: usize, cols: usize, dir: Direction) -> Vec<Vec<usize>> {
    match dir {
        Direction::Left => (0..rows).map(|r| (0..cols).map(|c| r * cols + c).collect()).collect(),
        Direction::Right => (0..rows).map(|r| (0..cols).rev().map(|c| r * cols + c).collect()).collect(),
        Direction::Up => (0..cols).map(|c| (0..rows).map(|r| r * cols + c).collect()).collect(),
        Direction::Down => (0..cols).map(|c| (0..rows).rev().map(|r| r * cols + c).collect()).collect(),
    }
}

/// Move every movable tile as far toward the edge as the first occupied
/// cell allows. Returns true if any tile changed cell.
pub(crate) fn slide(cells: &mut [Option<Tile>], rows: usize, cols: usize, dir: Direction, policy: LockPolicy) -> bool {
    let mut moved = false;
    for line in lines(rows, cols, dir) {
        moved |= slide_line(cells, &line, policy);
    }
    moved
}

fn slide_line(cells: &mut [Option<Tile>], line: &[usize], policy: LockPolicy) -> bool {
    let mut moved = false;
    for i in 1..line.len() {
        let movable = match &cells[line[i]] {
            Some(tile) => policy.movable(tile),
            None => false,
        };
        if !movable {
            continue;
        }
        let mut target = i;
        while target > 0 && cells[line[target - 1]].is_none() {
            target -= 1;
        }
        if target != i {
            cells[line[target]] = cells[line[i]].take();
            moved = true;
        }
    }
    moved
}

/// Merge equal neighbours along each line. The tile nearer the edge
/// advances a letter, the other is removed. Returns true if any merge
/// happened.
pub(crate) fn merge(cells: &mut [Option<Tile>], rows: usize, cols: usize, dir: Direction, policy: LockPolicy) -> bool {
    let mut merged = false;
    for line in lines(rows, cols, dir) {
        merged |= merge_line(cells, &line, policy);
    }
    merged
}

fn merge_line(cells: &mut [Option<Tile>], line: &[usize], policy: LockPolicy) -> bool {
    let mut merged = false;
    for pair in line.windows(2) {
        let (near, far) = (pair[0], pair[1]);
        let equal = match (&cells[near], &cells[far]) {
            (Some(a), Some(b)) => {
                a.letter() == b.letter() && policy.mergeable(a) && policy.mergeable(b)
            }
            _ => false,
        };
        if equal {
            if let Some(tile) = cells[near].as_mut() {
                tile.advance();
            }
            cells[far] = None;
            merged = true;
        }
    }
    merged
}
