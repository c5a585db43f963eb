use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rules::{check_loss, check_win, TileRef, WinningRun};
use super::shift::{self, LockPolicy};
use super::{Direction, EngineError, LockState, TargetWord, Tile};

/// Fixed-size grid of optional tiles plus the word that wins on it.
///
/// Cells are stored row-major. Each tile is owned by exactly one cell.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridRepr")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
    target: TargetWord,
}

#[derive(Deserialize)]
struct GridRepr {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
    target: TargetWord,
}

impl TryFrom<GridRepr> for Grid {
    type Error = EngineError;

    fn try_from(r: GridRepr) -> Result<Self, Self::Error> {
        if r.rows == 0 || r.cols == 0 || r.rows.checked_mul(r.cols) != Some(r.cells.len()) {
            return Err(EngineError::InvalidDimensions { rows: r.rows, cols: r.cols });
        }
        Ok(Grid { rows: r.rows, cols: r.cols, cells: r.cells, target: r.target })
    }
}

/// A tile created after a move: where it landed and what it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub letter: char,
    pub wildcard: bool,
}

/// What one directional move did to the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// Some tile changed cell.
    pub moved: bool,
    /// Some pair of tiles merged.
    pub merged: bool,
    pub spawned: Option<Spawn>,
}

impl MoveOutcome {
    #[inline]
    pub fn changed(&self) -> bool { self.moved || self.merged || self.spawned.is_some() }
}

/// Inputs from the orchestrator that decide whether a move may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveGate {
    /// False while a previous move is still animating.
    pub moves_permitted: bool,
    /// Removes the player still has; part of the loss test.
    pub remaining_removes: u32,
}

impl MoveGate {
    pub fn open(remaining_removes: u32) -> Self { MoveGate { moves_permitted: true, remaining_removes } }

    pub fn suspended(remaining_removes: u32) -> Self { MoveGate { moves_permitted: false, remaining_removes } }
}

/// 90% `A`, 10% `B`.
fn draw_letter<R: Rng + ?Sized>(rng: &mut R) -> char { if rng.gen_range(0..10) < 9 { 'A' } else { 'B' } }

impl Grid {
    pub fn new(rows: usize, cols: usize, target: &str) -> Result<Self, EngineError> {
        Self::with_target(rows, cols, TargetWord::new(target)?)
    }

    pub fn with_target(rows: usize, cols: usize, target: TargetWord) -> Result<Self, EngineError> {
        let len = match rows.checked_mul(cols) {
            Some(len) if len > 0 => len,
            _ => return Err(EngineError::InvalidDimensions { rows, cols }),
        };
        Ok(Grid { rows, cols, cells: vec![None; len], target })
    }

    /// Build a grid from text rows: `.` or `_` is an empty cell, `A`-`Z` an
    /// unlocked normal tile.
    ///
    /// ```
    /// use word_2048::engine::Grid;
    /// let g = Grid::from_rows(&["BAD.", "...."], "BAD").unwrap();
    /// assert_eq!((g.rows(), g.cols()), (2, 4));
    /// assert!(g.winning_run().is_some());
    /// ```
    pub fn from_rows(rows: &[&str], target: &str) -> Result<Self, EngineError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut grid = Grid::new(height, width, target)?;
        for (r, line) in rows.iter().enumerate() {
            if line.chars().count() != width {
                return Err(EngineError::InvalidDimensions { rows: height, cols: line.chars().count() });
            }
            for (c, ch) in line.chars().enumerate() {
                if ch != '.' && ch != '_' {
                    grid.cells[r * width + c] = Some(Tile::new(ch)?);
                }
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn rows(&self) -> usize { self.rows }

    #[inline]
    pub fn cols(&self) -> usize { self.cols }

    #[inline]
    pub fn target(&self) -> TargetWord { self.target }

    pub fn set_target(&mut self, target: TargetWord) { self.target = target; }

    #[inline]
    fn index(&self, row: usize, col: usize) -> Result<usize, EngineError> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(EngineError::OutOfBounds { row, col, rows: self.rows, cols: self.cols })
        }
    }

    /// The tile at `(row, col)`; `None` for an empty or out-of-range cell.
    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.index(row, col).ok().and_then(|i| self.cells[i].as_ref())
    }

    pub fn tile_mut(&mut self, row: usize, col: usize) -> Option<&mut Tile> {
        let i = self.index(row, col).ok()?;
        self.cells[i].as_mut()
    }

    /// Occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, &Tile)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|t| (i / cols, i % cols, t)))
    }

    /// Put `tile` at `(row, col)`, returning whatever was there.
    pub fn place(&mut self, row: usize, col: usize, tile: Tile) -> Result<Option<Tile>, EngineError> {
        let i = self.index(row, col)?;
        Ok(self.cells[i].replace(tile))
    }

    /// Delete the tile at `(row, col)` regardless of its lock state.
    pub fn remove_tile(&mut self, row: usize, col: usize) -> Result<Option<Tile>, EngineError> {
        let i = self.index(row, col)?;
        Ok(self.cells[i].take())
    }

    pub fn set_lock(&mut self, row: usize, col: usize, state: LockState) -> Result<(), EngineError> {
        let i = self.index(row, col)?;
        match self.cells[i].as_mut() {
            Some(tile) => {
                tile.set_lock(state);
                Ok(())
            }
            None => Err(EngineError::EmptyCell { row, col }),
        }
    }

    pub fn unlock_all(&mut self) {
        for tile in self.cells.iter_mut().flatten() {
            tile.set_lock(LockState::Unlocked);
        }
    }

    /// Give a wildcard tile a new letter.
    pub fn redefine_wildcard(&mut self, row: usize, col: usize, letter: char) -> Result<(), EngineError> {
        let i = self.index(row, col)?;
        match self.cells[i].as_mut() {
            Some(tile) if tile.is_wildcard() => tile.redefine(letter),
            Some(_) => Err(EngineError::NotWildcard { row, col }),
            None => Err(EngineError::EmptyCell { row, col }),
        }
    }

    #[inline]
    pub fn count_empty(&self) -> usize { self.cells.iter().filter(|c| c.is_none()).count() }

    #[inline]
    pub fn is_full(&self) -> bool { self.cells.iter().all(Option::is_some) }

    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    pub fn has_wildcard(&self) -> bool { self.cells.iter().flatten().any(Tile::is_wildcard) }

    /// Cells whose letter appears in the target word.
    pub fn target_letter_cells(&self) -> Vec<TileRef> {
        self.tiles()
            .filter(|(_, _, t)| self.target.contains(t.letter()))
            .map(|(row, col, _)| TileRef { row, col })
            .collect()
    }

    #[inline]
    pub fn winning_run(&self) -> Option<WinningRun> { check_win(self, &self.target) }

    #[inline]
    pub fn is_lost(&self, remaining_removes: u32) -> bool { check_loss(self, remaining_removes) }

    /// Place the opening pair: a normal `A` and a wildcard `A` on two
    /// distinct random cells.
    pub fn place_starting_tiles<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), EngineError> {
        if self.count_empty() < 2 {
            return Err(EngineError::GridFull);
        }
        let first = self.random_empty_index(rng)?;
        self.cells[first] = Some(Tile::new('A')?);
        let second = self.random_empty_index(rng)?;
        self.cells[second] = Some(Tile::wildcard('A')?);
        Ok(())
    }

    fn random_empty_index<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<usize, EngineError> {
        let empty: Vec<usize> = (0..self.cells.len()).filter(|&i| self.cells[i].is_none()).collect();
        if empty.is_empty() {
            return Err(EngineError::GridFull);
        }
        Ok(empty[rng.gen_range(0..empty.len())])
    }

    /// Spawn one tile on a random empty cell. The tile is a wildcard when
    /// the grid currently holds none.
    pub fn spawn_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Spawn, EngineError> {
        let wildcard = !self.has_wildcard();
        self.spawn_tile(rng, wildcard)
    }

    /// Spawn a normal tile without the wildcard guarantee.
    pub(crate) fn spawn_plain<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Spawn, EngineError> {
        self.spawn_tile(rng, false)
    }

    fn spawn_tile<R: Rng + ?Sized>(&mut self, rng: &mut R, wildcard: bool) -> Result<Spawn, EngineError> {
        let i = self.random_empty_index(rng)?;
        let letter = draw_letter(rng);
        let spawn = Spawn { row: i / self.cols, col: i % self.cols, letter, wildcard };
        self.place_spawn(spawn)?;
        Ok(spawn)
    }

    /// Create the tile described by `spawn`. The cell must be empty.
    pub fn place_spawn(&mut self, spawn: Spawn) -> Result<(), EngineError> {
        let i = self.index(spawn.row, spawn.col)?;
        if self.cells[i].is_some() {
            return Err(EngineError::CellOccupied { row: spawn.row, col: spawn.col });
        }
        let tile = if spawn.wildcard { Tile::wildcard(spawn.letter)? } else { Tile::new(spawn.letter)? };
        self.cells[i] = Some(tile);
        tracing::trace!(row = spawn.row, col = spawn.col, letter = %spawn.letter, wildcard = spawn.wildcard, "spawned tile");
        Ok(())
    }

    #[inline]
    pub(crate) fn slide(&mut self, dir: Direction, policy: LockPolicy) -> bool {
        shift::slide(&mut self.cells, self.rows, self.cols, dir, policy)
    }

    #[inline]
    pub(crate) fn merge(&mut self, dir: Direction, policy: LockPolicy) -> bool {
        shift::merge(&mut self.cells, self.rows, self.cols, dir, policy)
    }

    /// One player move: slide, merge, slide again to close the gaps, then
    /// spawn a tile if tiles moved without merging.
    ///
    /// Rejected with [`EngineError::MovesSuspended`] while the gate is
    /// closed. A grid that is already won or lost is left untouched, as is
    /// one that becomes won by the slide alone.
    ///
    /// ```
    /// use word_2048::engine::{Direction, Grid, MoveGate};
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(1);
    /// let mut g = Grid::from_rows(&[".A..", "....", "....", "...."], "BAD").unwrap();
    /// let out = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
    /// assert!(out.moved && !out.merged);
    /// assert!(out.spawned.is_some());
    /// ```
    pub fn apply_move<R: Rng + ?Sized>(
        &mut self,
        dir: Direction,
        gate: MoveGate,
        rng: &mut R,
    ) -> Result<MoveOutcome, EngineError> {
        if !gate.moves_permitted {
            tracing::debug!(%dir, "move rejected while previous move settles");
            return Err(EngineError::MovesSuspended);
        }
        if self.winning_run().is_some() || self.is_lost(gate.remaining_removes) {
            return Ok(MoveOutcome::default());
        }
        let mut moved = self.slide(dir, LockPolicy::Honor);
        if self.winning_run().is_some() {
            return Ok(MoveOutcome { moved, ..MoveOutcome::default() });
        }
        let merged = self.merge(dir, LockPolicy::Honor);
        if merged {
            moved |= self.slide(dir, LockPolicy::Honor);
        }
        let spawned = if moved && !merged { Some(self.spawn_random(rng)?) } else { None };
        Ok(MoveOutcome { moved, merged, spawned })
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: String = self.cells.iter().map(|c| c.map_or('.', |t| t.letter())).collect();
        write!(f, "Grid({}x{}, {:?}, target={})", self.rows, self.cols, text, self.target)
    }
}

/// Cells render as three characters: `?` marks a wildcard, then the letter,
/// then `*` for locked or `#` for double-locked.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = vec!["---"; self.cols].join("+");
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f, "{rule}")?;
            }
            let row: Vec<String> = (0..self.cols)
                .map(|c| match &self.cells[r * self.cols + c] {
                    None => "   ".to_string(),
                    Some(t) => {
                        let mark = match t.lock_state() {
                            LockState::Unlocked => ' ',
                            LockState::Locked => '*',
                            LockState::DoubleLocked => '#',
                        };
                        format!("{}{}{}", if t.is_wildcard() { '?' } else { ' ' }, t.letter(), mark)
                    }
                })
                .collect();
            writeln!(f, "{}", row.join("|"))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn letters(g: &Grid) -> Vec<String> {
        (0..g.rows())
            .map(|r| (0..g.cols()).map(|c| g.tile(r, c).map_or('.', |t| t.letter())).collect())
            .collect()
    }

    #[test]
    fn it_rejects_bad_dimensions() {
        assert_eq!(Grid::new(0, 4, "BAD"), Err(EngineError::InvalidDimensions { rows: 0, cols: 4 }));
        assert!(matches!(Grid::from_rows(&["AB", "A"], "BAD"), Err(EngineError::InvalidDimensions { .. })));
        assert_eq!(Grid::from_rows(&["Ab"], "BAD"), Err(EngineError::InvalidLetter('b')));
        assert!(matches!(Grid::new(4, 4, "BA"), Err(EngineError::InvalidTargetWord(_))));
    }

    #[test]
    fn it_supports_non_square_grids() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut g = Grid::from_rows(&["A.A..", ".....", "....B"], "CAB").unwrap();
        let out = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        assert!(out.merged);
        assert_eq!(letters(&g), vec!["B....", ".....", "B...."]);
    }

    #[test]
    fn it_move_left_merges_and_compacts() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut g = Grid::from_rows(&["AAA.", ".CC.", "D..D", "...."], "XYZ").unwrap();
        let out = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        assert!(out.moved && out.merged);
        assert_eq!(out.spawned, None);
        assert_eq!(letters(&g), vec!["BA..", "D...", "E...", "...."]);
    }

    #[test]
    fn it_move_down_merges_toward_bottom() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut g = Grid::from_rows(&["A...", "A...", "A...", "...."], "XYZ").unwrap();
        g.apply_move(Direction::Down, MoveGate::open(0), &mut rng).unwrap();
        assert_eq!(letters(&g), vec!["....", "....", "A...", "B..."]);
    }

    #[test]
    fn it_spawns_only_after_non_merging_move() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut g = Grid::from_rows(&["...A", "....", "....", "...."], "XYZ").unwrap();
        let out = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        let s = out.spawned.expect("a slide without merge spawns");
        assert!(s.letter == 'A' || s.letter == 'B');
        assert!(s.wildcard, "first spawn on a grid without wildcard is a wildcard");
        assert_eq!(g.tile(s.row, s.col).map(|t| t.is_wildcard()), Some(true));
        assert_eq!(g.count_empty(), 14);
    }

    #[test]
    fn it_noop_move_changes_nothing_twice() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut g = Grid::from_rows(&["AB..", "C...", "....", "...."], "XYZ").unwrap();
        let before = g.clone();
        let first = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        assert!(!first.changed());
        let second = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        assert!(!second.changed());
        assert_eq!(g, before);
    }

    #[test]
    fn it_noop_is_idempotent_for_random_boards() {
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..50 {
            let mut g = Grid::new(4, 4, "XYZ").unwrap();
            for _ in 0..rng.gen_range(1..12) {
                g.spawn_random(&mut rng).unwrap();
            }
            for dir in Direction::ALL {
                let mut a = g.clone();
                let first = a.apply_move(dir, MoveGate::open(0), &mut rng).unwrap();
                if !first.changed() {
                    let snapshot = a.clone();
                    let second = a.apply_move(dir, MoveGate::open(0), &mut rng).unwrap();
                    assert!(!second.changed());
                    assert_eq!(a, snapshot);
                }
            }
        }
    }

    #[test]
    fn it_gate_rejects_without_mutation() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = Grid::from_rows(&["...A", "....", "....", "...."], "XYZ").unwrap();
        let before = g.clone();
        assert_eq!(g.apply_move(Direction::Left, MoveGate::suspended(3), &mut rng), Err(EngineError::MovesSuspended));
        assert_eq!(g, before);
    }

    #[test]
    fn it_won_grid_does_not_move() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = Grid::from_rows(&[".BAD", "....", "....", "...."], "BAD").unwrap();
        let before = g.clone();
        let out = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        assert!(!out.changed());
        assert_eq!(g, before);
    }

    #[test]
    fn it_win_after_slide_skips_merge_and_spawn() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut g = Grid::from_rows(&["B.AD", "....", "EE..", "...."], "BAD").unwrap();
        let out = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        assert!(out.moved && !out.merged && out.spawned.is_none());
        assert_eq!(letters(&g)[0], "BAD.");
        assert_eq!(letters(&g)[2], "EE..");
    }

    #[test]
    fn it_double_locked_is_an_obstacle_in_every_direction() {
        let mut rng = StdRng::seed_from_u64(8);
        let cases = [
            (Direction::Left, ["....", "..C.", "...A", "...."], (1, 2), (2, 0)),
            (Direction::Right, ["....", ".C..", "A...", "...."], (1, 1), (2, 3)),
        ];
        for (dir, rows, locked, _) in cases {
            let mut g = Grid::from_rows(&rows, "XYZ").unwrap();
            g.set_lock(locked.0, locked.1, LockState::DoubleLocked).unwrap();
            g.apply_move(dir, MoveGate::open(0), &mut rng).unwrap();
            assert_eq!(g.tile(locked.0, locked.1).map(|t| t.letter()), Some('C'));
        }

        // Tiles slide up against the obstacle but never pass it.
        for dir in Direction::ALL {
            let mut g = Grid::from_rows(&["A...", ".A..", "..A.", "...A"], "XYZ").unwrap();
            let (mid_r, mid_c) = (1, 1);
            g.place(mid_r, mid_c, Tile::new('C').unwrap()).unwrap();
            g.set_lock(mid_r, mid_c, LockState::DoubleLocked).unwrap();
            g.apply_move(dir, MoveGate::open(0), &mut rng).unwrap();
            let t = g.tile(mid_r, mid_c).expect("double-locked tile stays");
            assert_eq!(t.letter(), 'C');
            assert_eq!(t.lock_state(), LockState::DoubleLocked);
        }

        let vertical = [
            (Direction::Up, ["....", "....", "....", ".A.."], (1, 1), (2, 1)),
            (Direction::Down, [".A..", "....", "....", "...."], (2, 1), (1, 1)),
        ];
        for (dir, rows, locked, lands) in vertical {
            let mut g = Grid::from_rows(&rows, "XYZ").unwrap();
            g.place(locked.0, locked.1, Tile::new('C').unwrap()).unwrap();
            g.set_lock(locked.0, locked.1, LockState::DoubleLocked).unwrap();
            let out = g.apply_move(dir, MoveGate::open(0), &mut rng).unwrap();
            assert!(out.moved, "{dir}");
            assert_eq!(g.tile(locked.0, locked.1).map(|t| t.letter()), Some('C'), "{dir}");
            assert_eq!(g.tile(lands.0, lands.1).map(|t| t.letter()), Some('A'), "{dir}");
        }

        let mut g = Grid::from_rows(&["..CA", "....", "....", "...."], "XYZ").unwrap();
        g.set_lock(0, 2, LockState::DoubleLocked).unwrap();
        let out = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        assert!(!out.changed());
        assert_eq!(letters(&g)[0], "..CA");

        let mut g = Grid::from_rows(&["A.C.", "....", "....", "...."], "XYZ").unwrap();
        g.set_lock(0, 2, LockState::DoubleLocked).unwrap();
        g.apply_move(Direction::Right, MoveGate::open(0), &mut rng).unwrap();
        assert_eq!(g.tile(0, 1).map(|t| t.letter()), Some('A'));
        assert_eq!(g.tile(0, 2).map(|t| t.letter()), Some('C'));
    }

    #[test]
    fn it_locked_tiles_move_but_do_not_merge() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut g = Grid::from_rows(&["..AA", "....", "....", "...."], "XYZ").unwrap();
        g.set_lock(0, 3, LockState::Locked).unwrap();
        let out = g.apply_move(Direction::Left, MoveGate::open(0), &mut rng).unwrap();
        assert!(out.moved && !out.merged);
        assert_eq!(&letters(&g)[0][..2], "AA");
        assert_eq!(g.tile(0, 1).map(|t| t.lock_state()), Some(LockState::Locked));
    }

    #[test]
    fn it_spawn_keeps_single_wildcard() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut g = Grid::new(4, 4, "BAD").unwrap();
        g.place_starting_tiles(&mut rng).unwrap();
        assert_eq!(g.count_empty(), 14);
        assert_eq!(g.tiles().filter(|(_, _, t)| t.is_wildcard()).count(), 1);
        assert!(g.tiles().all(|(_, _, t)| t.letter() == 'A'));
        for _ in 0..14 {
            let s = g.spawn_random(&mut rng).unwrap();
            assert!(!s.wildcard);
        }
        assert!(g.is_full());
        assert_eq!(g.spawn_random(&mut rng), Err(EngineError::GridFull));
    }

    #[test]
    fn it_spawn_letters_are_mostly_a() {
        let mut rng = StdRng::seed_from_u64(1234);
        let mut a = 0;
        for _ in 0..2000 {
            let mut g = Grid::new(1, 1, "BAD").unwrap();
            if g.spawn_plain(&mut rng).unwrap().letter == 'A' {
                a += 1;
            }
        }
        assert!((1700..1900).contains(&a), "got {a} A tiles");
    }

    #[test]
    fn it_remove_and_redefine() {
        let mut g = Grid::from_rows(&["AB..", "....", "....", "...."], "BAD").unwrap();
        g.set_lock(0, 0, LockState::DoubleLocked).unwrap();
        assert_eq!(g.remove_tile(0, 0).unwrap().map(|t| t.letter()), Some('A'));
        assert_eq!(g.remove_tile(0, 0), Ok(None));
        assert!(matches!(g.remove_tile(9, 0), Err(EngineError::OutOfBounds { .. })));
        assert_eq!(g.redefine_wildcard(0, 1, 'C'), Err(EngineError::NotWildcard { row: 0, col: 1 }));
        g.place_spawn(Spawn { row: 3, col: 3, letter: 'A', wildcard: true }).unwrap();
        g.redefine_wildcard(3, 3, 'd').unwrap();
        assert_eq!(g.tile(3, 3).map(|t| t.letter()), Some('D'));
        assert_eq!(
            g.place_spawn(Spawn { row: 3, col: 3, letter: 'A', wildcard: false }),
            Err(EngineError::CellOccupied { row: 3, col: 3 })
        );
    }

    #[test]
    fn it_target_letter_cells_and_unlock_all() {
        let mut g = Grid::from_rows(&["BXA.", "...D"], "BAD").unwrap();
        let cells: Vec<(usize, usize)> = g.target_letter_cells().iter().map(|t| (t.row, t.col)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 2), (1, 3)]);
        g.set_lock(0, 1, LockState::Locked).unwrap();
        g.set_lock(1, 3, LockState::DoubleLocked).unwrap();
        g.unlock_all();
        assert!(g.tiles().all(|(_, _, t)| t.lock_state() == LockState::Unlocked));
        assert_eq!(g.set_lock(1, 0, LockState::Locked), Err(EngineError::EmptyCell { row: 1, col: 0 }));
    }

    #[test]
    fn it_display_marks_locks_and_wildcards() {
        let mut g = Grid::from_rows(&["AB", ".."], "BAD").unwrap();
        g.set_lock(0, 1, LockState::Locked).unwrap();
        g.place_spawn(Spawn { row: 1, col: 0, letter: 'C', wildcard: true }).unwrap();
        assert_eq!(g.to_string(), " A | B*\n---+---\n?C |   \n");
    }

    #[test]
    fn it_serde_round_trip_validates_shape() {
        let g = Grid::from_rows(&["AB", ".C"], "CAB").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);
        let broken = json.replace("\"rows\":2", "\"rows\":3");
        assert!(serde_json::from_str::<Grid>(&broken).is_err());
    }

    #[test]
    fn it_deserialize_rejects_letters_outside_a_to_z() {
        let g = Grid::from_rows(&["AA", ".."], "BAD").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        assert!(json.contains("\"letter\":\"A\""));
        for bad in ["a", "\u{ff}", "1"] {
            let broken = json.replacen("\"letter\":\"A\"", &format!("\"letter\":\"{bad}\""), 1);
            assert!(serde_json::from_str::<Grid>(&broken).is_err(), "{bad}");
        }
    }

    #[test]
    fn it_oversized_dimensions_are_errors_not_overflow() {
        let json = r#"{"rows":18446744073709551615,"cols":2,"cells":[],"target":"BAD"}"#;
        assert!(serde_json::from_str::<Grid>(json).is_err());
        assert_eq!(
            Grid::new(usize::MAX, 2, "BAD"),
            Err(EngineError::InvalidDimensions { rows: usize::MAX, cols: 2 })
        );
    }
}
