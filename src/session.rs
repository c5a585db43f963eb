//! One game from start to finish: grid, remove counter, score and the
//! moves-permitted gate an animating front end holds closed between moves.
//!
//! ```
//! use word_2048::engine::Direction;
//! use word_2048::session::{Session, SessionConfig, Status};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(3);
//! let mut s = Session::new(SessionConfig::default(), &mut rng).unwrap();
//! assert_eq!(s.grid().tiles().count(), 2);
//! let _ = s.press(Direction::Left, &mut rng).unwrap();
//! assert_eq!(s.status(), &Status::InProgress);
//! ```

use rand::Rng;

use crate::engine::{Direction, EngineError, Grid, MoveGate, MoveOutcome, TargetWord, Tile, WinningRun};
use crate::solver::{self, BfsSolver, NoSolution, Plan, PlanStep, SolverConfig};
use crate::words;

/// Session settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    /// Removes granted at the start of each game.
    pub removes: u32,
    pub points_per_move: u32,
    /// Fixed target; `None` draws one from the word bank.
    pub target: Option<TargetWord>,
}

impl Default for SessionConfig {
    fn default() -> Self { Self { rows: 4, cols: 4, removes: 3, points_per_move: 50, target: None } }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won(WinningRun),
    Lost,
}

impl Status {
    #[inline]
    pub fn is_over(&self) -> bool { !matches!(self, Status::InProgress) }
}

pub struct Session {
    cfg: SessionConfig,
    grid: Grid,
    removes_left: u32,
    score: u32,
    moves_permitted: bool,
    status: Status,
}

impl Session {
    pub fn new<R: Rng + ?Sized>(cfg: SessionConfig, rng: &mut R) -> Result<Self, EngineError> {
        let target = cfg.target.unwrap_or_else(|| words::random_target(rng));
        let mut grid = Grid::with_target(cfg.rows, cfg.cols, target)?;
        grid.place_starting_tiles(rng)?;
        Ok(Self::with_grid(cfg, grid))
    }

    /// Resume from an existing grid with a full remove allowance. A fixed
    /// `cfg.target` replaces the grid's own target.
    pub fn with_grid(cfg: SessionConfig, mut grid: Grid) -> Self {
        if let Some(target) = cfg.target {
            grid.set_target(target);
        }
        let mut s = Session {
            removes_left: cfg.removes,
            cfg,
            grid,
            score: 0,
            moves_permitted: true,
            status: Status::InProgress,
        };
        s.refresh_status();
        s
    }

    /// Discard the current game and start a new one with the same settings.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        *self = Session::new(self.cfg.clone(), rng)?;
        Ok(())
    }

    #[inline]
    pub fn grid(&self) -> &Grid { &self.grid }

    #[inline]
    pub fn grid_mut(&mut self) -> &mut Grid { &mut self.grid }

    #[inline]
    pub fn target(&self) -> TargetWord { self.grid.target() }

    #[inline]
    pub fn score(&self) -> u32 { self.score }

    #[inline]
    pub fn removes_left(&self) -> u32 { self.removes_left }

    #[inline]
    pub fn status(&self) -> &Status { &self.status }

    #[inline]
    pub fn moves_permitted(&self) -> bool { self.moves_permitted }

    /// Close the gate while a move animates; reopen once it has settled.
    pub fn set_moves_permitted(&mut self, permitted: bool) { self.moves_permitted = permitted; }

    fn gate(&self) -> MoveGate {
        MoveGate { moves_permitted: self.moves_permitted, remaining_removes: self.removes_left }
    }

    fn refresh_status(&mut self) {
        self.status = if let Some(run) = self.grid.winning_run() {
            Status::Won(run)
        } else if self.grid.is_lost(self.removes_left) {
            Status::Lost
        } else {
            Status::InProgress
        };
    }

    /// Apply a player move. Points are added for every accepted move made
    /// while the game is still in progress.
    pub fn press<R: Rng + ?Sized>(&mut self, dir: Direction, rng: &mut R) -> Result<MoveOutcome, EngineError> {
        let was_over = self.status.is_over();
        let outcome = self.grid.apply_move(dir, self.gate(), rng)?;
        if !was_over {
            self.score = self.score.saturating_add(self.cfg.points_per_move);
        }
        self.refresh_status();
        Ok(outcome)
    }

    /// Remove the tile at `(row, col)`, spending one remove if a tile was
    /// actually there.
    pub fn remove(&mut self, row: usize, col: usize) -> Result<Option<Tile>, EngineError> {
        if self.removes_left == 0 {
            return Err(EngineError::NoRemovesLeft);
        }
        let removed = self.grid.remove_tile(row, col)?;
        if removed.is_some() {
            self.removes_left -= 1;
        }
        self.refresh_status();
        Ok(removed)
    }

    /// Unlock every tile, then search for a plan from the current grid.
    pub fn solve<R: Rng + ?Sized>(&mut self, cfg: SolverConfig, rng: &mut R) -> Result<Plan, NoSolution> {
        self.grid.unlock_all();
        BfsSolver::with_config(cfg).solve(&self.grid, rng)
    }

    /// Play one solver step on the live grid with its recorded spawn.
    pub fn replay_step(&mut self, step: &PlanStep) -> Result<(), EngineError> {
        let target = self.grid.target();
        solver::replay_step(&mut self.grid, &target, step)?;
        self.refresh_status();
        Ok(())
    }
}
