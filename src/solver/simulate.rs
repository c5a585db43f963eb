//! The move cycle as the search sees it.
//!
//! Unlike [`Grid::apply_move`] these rules ignore lock states entirely and
//! spawn after every cycle, merge or not, as long as a cell is free. A
//! plan can therefore call for moves a locked live grid would not allow.

use rand::Rng;

use crate::engine::{check_win, Direction, EngineError, Grid, LockPolicy, Spawn, TargetWord};

use super::{Plan, PlanStep};

/// Slide, stop if that alone wins, otherwise merge, slide again and spawn
/// a normal tile on a random free cell. Returns the spawn.
pub fn simulate_move<R: Rng + ?Sized>(
    grid: &mut Grid,
    dir: Direction,
    target: &TargetWord,
    rng: &mut R,
) -> Option<Spawn> {
    grid.slide(dir, LockPolicy::Ignore);
    if check_win(grid, target).is_some() {
        return None;
    }
    grid.merge(dir, LockPolicy::Ignore);
    grid.slide(dir, LockPolicy::Ignore);
    // A full grid has nowhere to spawn; the cycle ends without one.
    grid.spawn_plain(rng).ok()
}

/// Apply one recorded plan step: the same cycle as [`simulate_move`] with
/// the recorded spawn in place of a random one.
pub fn replay_step(grid: &mut Grid, target: &TargetWord, step: &PlanStep) -> Result<(), EngineError> {
    let dir = step.direction;
    grid.slide(dir, LockPolicy::Ignore);
    if check_win(grid, target).is_some() {
        return Ok(());
    }
    grid.merge(dir, LockPolicy::Ignore);
    grid.slide(dir, LockPolicy::Ignore);
    if let Some(spawn) = step.spawn {
        grid.place_spawn(spawn)?;
    }
    Ok(())
}

/// Replay a whole plan from `start` against `start`'s target word and return
/// the resulting grid.
pub fn replay(start: &Grid, plan: &Plan) -> Result<Grid, EngineError> {
    let target = start.target();
    let mut grid = start.clone();
    for step in &plan.steps {
        replay_step(&mut grid, &target, step)?;
    }
    Ok(grid)
}
