//! Board engine: tiles, the grid container, the slide/merge cycle and the
//! win/loss predicates.
//!
//! The engine is synchronous and owns no global state. Every random draw
//! (spawn letter, spawn cell) goes through an `Rng` supplied by the caller,
//! so a seeded `StdRng` makes a whole game reproducible.
//!
//! ```
//! use word_2048::engine::{Direction, Grid, MoveGate};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut grid = Grid::from_rows(&["A..A", "....", "....", "...."], "BAD").unwrap();
//! let out = grid.apply_move(Direction::Left, MoveGate::open(3), &mut rng).unwrap();
//! assert!(out.merged);
//! assert_eq!(grid.tile(0, 0).map(|t| t.letter()), Some('B'));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

mod grid;
mod rules;
pub(crate) mod shift;
mod target;
mod tile;

pub use grid::{Grid, MoveGate, MoveOutcome, Spawn};
pub use rules::{check_loss, check_win, has_merge_pair, TileRef, WinningRun};
pub use shift::LockPolicy;
pub use target::TargetWord;
pub use tile::{next_letter, LockState, Tile};

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// All directions, in the order the solver expands them.
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    #[inline]
    pub fn is_horizontal(self) -> bool { matches!(self, Direction::Left | Direction::Right) }

    /// Stable numeric code, the inverse of `TryFrom<u8>`.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Right),
            2 => Ok(Direction::Up),
            3 => Ok(Direction::Down),
            other => Err(EngineError::InvalidDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            _ => Err(EngineError::InvalidDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },
    #[error("grid has no empty cell to spawn into")]
    GridFull,
    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
    #[error("invalid tile letter {0:?}; expected A-Z")]
    InvalidLetter(char),
    #[error("invalid target word {0:?}; expected three letters A-Z")]
    InvalidTargetWord(String),
    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },
    #[error("tile at ({row}, {col}) is not a wildcard")]
    NotWildcard { row: usize, col: usize },
    #[error("cell ({row}, {col}) is empty")]
    EmptyCell { row: usize, col: usize },
    #[error("moves are suspended until the previous move settles")]
    MovesSuspended,
    #[error("no removes left")]
    NoRemovesLeft,
}
