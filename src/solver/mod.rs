//! Breadth-first solver: shortest move sequence that spells the target word.
//!
//! The search runs the move cycle under lock-blind rules (every tile moves
//! and merges) and records each random spawn, so the returned [`Plan`] can be
//! replayed deterministically with [`replay`].
//!
//! States are deduplicated by [`StateKey`], the row-major letter string of
//! the grid. Lock states and wildcard flags do not take part in it.
//!
//! Quick start
//! ```
//! use word_2048::engine::{Direction, Grid};
//! use word_2048::solver::{self, BfsSolver};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let start = Grid::from_rows(&["B.AD", "....", "....", "...."], "BAD").unwrap();
//! let mut bfs = BfsSolver::new();
//! let plan = bfs.solve(&start, &mut rng).unwrap();
//! assert_eq!(plan.directions(), vec![Direction::Left]);
//! let end = solver::replay(&start, &plan).unwrap();
//! assert!(end.winning_run().is_some());
//! ```

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{Direction, Grid, Spawn, TargetWord};

mod bfs;
mod key;
mod simulate;

pub use bfs::BfsSolver;
pub use key::{StateKey, EMPTY_MARK};
pub use simulate::{replay, replay_step, simulate_move};

/// Search knobs. The default is unbounded.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Give up after expanding this many states.
    pub max_expansions: Option<u64>,
}

impl SolverConfig {
    pub fn with_budget(max_expansions: u64) -> Self { SolverConfig { max_expansions: Some(max_expansions) } }
}

/// One move of a plan and the tile spawned after it, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    pub direction: Direction,
    pub spawn: Option<Spawn>,
}

/// Ordered moves leading to a win, with the spawn trace needed to replay it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
}

impl Plan {
    #[inline]
    pub fn len(&self) -> usize { self.steps.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.steps.is_empty() }

    pub fn directions(&self) -> Vec<Direction> { self.steps.iter().map(|s| s.direction).collect() }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dirs: Vec<String> = self.steps.iter().map(|s| s.direction.to_string()).collect();
        write!(f, "[{}]", dirs.join(", "))
    }
}

/// Why a search ended without a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoSolutionReason {
    /// A dequeued state was already lost.
    LossReached,
    /// Every reachable state was visited.
    Exhausted,
    /// `SolverConfig::max_expansions` ran out.
    BudgetExceeded,
}

impl fmt::Display for NoSolutionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NoSolutionReason::LossReached => "reached a lost board",
            NoSolutionReason::Exhausted => "search space exhausted",
            NoSolutionReason::BudgetExceeded => "expansion budget exceeded",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no solution found: {reason}")]
pub struct NoSolution {
    pub reason: NoSolutionReason,
    pub stats: SearchStats,
}

/// Counters from the last search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States dequeued and inspected.
    pub expanded: u64,
    /// Distinct states ever enqueued, the start included.
    pub visited: usize,
    pub peak_frontier: usize,
}

/// Solve `grid` for `target` with an unbounded search.
pub fn solve<R: Rng + ?Sized>(grid: &Grid, target: &TargetWord, rng: &mut R) -> Result<Plan, NoSolution> {
    BfsSolver::new().solve_for(grid, target, rng)
}
