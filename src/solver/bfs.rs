use std::collections::{HashSet, VecDeque};

use rand::Rng;

use crate::engine::{check_loss, check_win, Direction, Grid, TargetWord};

use super::simulate::simulate_move;
use super::{NoSolution, NoSolutionReason, Plan, PlanStep, SearchStats, SolverConfig, StateKey};

struct Node {
    grid: Grid,
    steps: Vec<PlanStep>,
}

/// Breadth-first search over grids reachable by the four moves.
///
/// Each dequeued state is first tested for loss (which aborts the whole
/// search) and then for a win. Children are generated in
/// [`Direction::ALL`] order and enqueued only if their [`StateKey`] is new.
pub struct BfsSolver {
    cfg: SolverConfig,
    stats: SearchStats,
}

impl BfsSolver {
    pub fn new() -> Self { Self::with_config(SolverConfig::default()) }

    pub fn with_config(cfg: SolverConfig) -> Self { Self { cfg, stats: SearchStats::default() } }

    /// Solve for the grid's own target word.
    #[inline]
    pub fn solve<R: Rng + ?Sized>(&mut self, grid: &Grid, rng: &mut R) -> Result<Plan, NoSolution> {
        let target = grid.target();
        self.solve_for(grid, &target, rng)
    }

    pub fn solve_for<R: Rng + ?Sized>(
        &mut self,
        grid: &Grid,
        target: &TargetWord,
        rng: &mut R,
    ) -> Result<Plan, NoSolution> {
        tracing::debug!(%target, rows = grid.rows(), cols = grid.cols(), "solver started");
        let mut stats = SearchStats::default();
        let mut visited: HashSet<StateKey> = HashSet::new();
        let mut queue: VecDeque<Node> = VecDeque::new();

        visited.insert(StateKey::of(grid));
        queue.push_back(Node { grid: grid.clone(), steps: Vec::new() });

        let outcome = loop {
            let Some(node) = queue.pop_front() else {
                break Err(NoSolutionReason::Exhausted);
            };
            if let Some(cap) = self.cfg.max_expansions {
                if stats.expanded >= cap {
                    break Err(NoSolutionReason::BudgetExceeded);
                }
            }
            stats.expanded += 1;

            if check_loss(&node.grid, 0) {
                break Err(NoSolutionReason::LossReached);
            }
            if check_win(&node.grid, target).is_some() {
                break Ok(Plan { steps: node.steps });
            }

            for direction in Direction::ALL {
                let mut child = node.grid.clone();
                let spawn = simulate_move(&mut child, direction, target, rng);
                if visited.insert(StateKey::of(&child)) {
                    let mut steps = Vec::with_capacity(node.steps.len() + 1);
                    steps.extend_from_slice(&node.steps);
                    steps.push(PlanStep { direction, spawn });
                    queue.push_back(Node { grid: child, steps });
                }
            }
            stats.peak_frontier = stats.peak_frontier.max(queue.len());
        };

        stats.visited = visited.len();
        self.stats = stats;
        match outcome {
            Ok(plan) => {
                tracing::debug!(moves = plan.len(), expanded = stats.expanded, visited = stats.visited, "solver found plan");
                Ok(plan)
            }
            Err(reason) => {
                tracing::debug!(%reason, expanded = stats.expanded, visited = stats.visited, "solver found no plan");
                Err(NoSolution { reason, stats })
            }
        }
    }

    /// Statistics from the last call to [`Self::solve`] or [`Self::solve_for`].
    #[inline]
    pub fn last_stats(&self) -> SearchStats { self.stats }

    #[inline]
    pub fn config(&self) -> &SolverConfig { &self.cfg }
}

impl Default for BfsSolver { fn default() -> Self { Self::new() } }
