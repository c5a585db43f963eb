//! Win and loss predicates.

use serde::{Deserialize, Serialize};

use super::{Grid, TargetWord, Tile};

/// Position of a tile on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    pub row: usize,
    pub col: usize,
}

/// Three contiguous cells spelling the target word, in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningRun {
    pub tiles: [TileRef; 3],
}

impl WinningRun {
    /// The tiles of the run, borrowed from `grid`.
    pub fn resolve<'g>(&self, grid: &'g Grid) -> Option<[&'g Tile; 3]> {
        let [a, b, c] = self.tiles;
        Some([grid.tile(a.row, a.col)?, grid.tile(b.row, b.col)?, grid.tile(c.row, c.col)?])
    }
}

fn run_matches(grid: &Grid, cells: [TileRef; 3], target: &TargetWord) -> bool {
    cells
        .iter()
        .zip(target.letters())
        .all(|(at, want)| grid.tile(at.row, at.col).map(|t| t.letter()) == Some(want))
}

/// First run of three cells spelling `target`, scanning rows top to bottom
/// (left to right within a row) and then columns left to right (top to
/// bottom within a column).
///
/// ```
/// use word_2048::engine::{check_win, Grid, TargetWord, TileRef};
/// let g = Grid::from_rows(&[".BAD", "....", "....", "...."], "BAD").unwrap();
/// let run = check_win(&g, &g.target()).unwrap();
/// assert_eq!(run.tiles[0], TileRef { row: 0, col: 1 });
/// assert!(check_win(&g, &TargetWord::new("DAB").unwrap()).is_none());
/// ```
pub fn check_win(grid: &Grid, target: &TargetWord) -> Option<WinningRun> {
    let (rows, cols) = (grid.rows(), grid.cols());
    for row in 0..rows {
        for col in 0..cols.saturating_sub(2) {
            let cells = [0, 1, 2].map(|k| TileRef { row, col: col + k });
            if run_matches(grid, cells, target) {
                return Some(WinningRun { tiles: cells });
            }
        }
    }
    for col in 0..cols {
        for row in 0..rows.saturating_sub(2) {
            let cells = [0, 1, 2].map(|k| TileRef { row: row + k, col });
            if run_matches(grid, cells, target) {
                return Some(WinningRun { tiles: cells });
            }
        }
    }
    None
}

/// True if two horizontally or vertically adjacent tiles share a letter.
/// Lock states are not consulted.
pub fn has_merge_pair(grid: &Grid) -> bool {
    grid.tiles().any(|(row, col, tile)| {
        let same = |r: usize, c: usize| grid.tile(r, c).is_some_and(|n| n.letter() == tile.letter());
        same(row, col + 1) || same(row + 1, col)
    })
}

/// Lost when the grid is full, no adjacent pair shares a letter and the
/// player has no removes left.
pub fn check_loss(grid: &Grid, remaining_removes: u32) -> bool {
    grid.is_full() && !has_merge_pair(grid) && remaining_removes == 0
}
