//! word-2048: a letter-merging 2048 variant and a breadth-first solver
//!
//! This crate provides:
//! - A `Grid` of letter tiles with the live move cycle (`engine` module):
//!   slide, merge equal letters into the next letter, spawn, lock states
//!   and the wildcard rule
//! - Win and loss predicates for a three-letter target word
//! - A breadth-first `solver` that finds the shortest move sequence spelling
//!   the target and records the spawns needed to replay it
//! - A `session` wrapper that tracks score, removes and the move gate
//!
//! Quick start:
//! ```
//! use word_2048::engine::{Direction, Grid, MoveGate};
//! use word_2048::solver::BfsSolver;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Deterministic play with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut grid = Grid::from_rows(&["AAAD", "....", "....", "...."], "BAD").unwrap();
//! let plan = BfsSolver::new().solve(&grid, &mut rng).unwrap();
//! assert_eq!(plan.directions(), vec![Direction::Left]);
//!
//! grid.apply_move(Direction::Left, MoveGate::open(3), &mut rng).unwrap();
//! assert!(grid.winning_run().is_some());
//! ```
//!
//! Note: the solver plays by lock-blind rules and always spawns a plain tile;
//! replay its plans with `solver::replay`, not `Grid::apply_move`.
//!
pub mod engine;
pub mod session;
pub mod solver;
pub mod words;
