use std::fmt;

use crate::engine::Grid;

/// Marker for an empty cell in a [`StateKey`].
pub const EMPTY_MARK: u8 = b'0';

/// Identity of a grid for search deduplication: every cell's letter in
/// row-major order, [`EMPTY_MARK`] for empty cells. Lock states and
/// wildcard flags are not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[u8]>);

impl StateKey {
    pub fn of(grid: &Grid) -> Self {
        let mut bytes = Vec::with_capacity(grid.rows() * grid.cols());
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                bytes.push(grid.tile(row, col).map_or(EMPTY_MARK, |t| t.letter() as u8));
            }
        }
        StateKey(bytes.into_boxed_slice())
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] { &self.0 }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only ASCII letters and the marker are ever stored.
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
