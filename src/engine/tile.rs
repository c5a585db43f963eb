use serde::{Deserialize, Serialize};

use super::EngineError;

/// Lock state of a tile. Any state may be set directly; there is no
/// implied cycle between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LockState {
    #[default]
    Unlocked,
    /// Moves normally but never merges.
    Locked,
    /// Neither moves nor merges; other tiles slide up against it.
    DoubleLocked,
}

/// One occupied cell: a letter `A`..=`Z`, a lock state and the wildcard flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TileRepr")]
pub struct Tile {
    letter: char,
    lock: LockState,
    wildcard: bool,
}

#[derive(Deserialize)]
struct TileRepr {
    letter: char,
    lock: LockState,
    wildcard: bool,
}

impl TryFrom<TileRepr> for Tile {
    type Error = EngineError;

    fn try_from(r: TileRepr) -> Result<Self, Self::Error> {
        Ok(Tile { letter: validate(r.letter)?, lock: r.lock, wildcard: r.wildcard })
    }
}

/// The letter after `c`, wrapping `Z` to `A`.
#[inline]
pub fn next_letter(c: char) -> char {
    if c == 'Z' { 'A' } else { (c as u8 + 1) as char }
}

#[inline]
fn validate(letter: char) -> Result<char, EngineError> {
    if letter.is_ascii_uppercase() { Ok(letter) } else { Err(EngineError::InvalidLetter(letter)) }
}

impl Tile {
    pub fn new(letter: char) -> Result<Self, EngineError> {
        Ok(Tile { letter: validate(letter)?, lock: LockState::Unlocked, wildcard: false })
    }

    /// A tile whose letter may later be redefined by the player.
    pub fn wildcard(letter: char) -> Result<Self, EngineError> {
        Ok(Tile { letter: validate(letter)?, lock: LockState::Unlocked, wildcard: true })
    }

    #[inline]
    pub fn letter(&self) -> char { self.letter }

    #[inline]
    pub fn lock_state(&self) -> LockState { self.lock }

    #[inline]
    pub fn set_lock(&mut self, state: LockState) { self.lock = state; }

    #[inline]
    pub fn is_wildcard(&self) -> bool { self.wildcard }

    /// Only unlocked tiles combine with an equal neighbour.
    #[inline]
    pub fn is_merge_eligible(&self) -> bool { self.lock == LockState::Unlocked }

    /// Only double-locked tiles stay put during a slide.
    #[inline]
    pub fn is_movable(&self) -> bool { self.lock != LockState::DoubleLocked }

    /// Advance to the next letter if merge-eligible; otherwise a no-op.
    ///
    /// Returns whether the letter changed.
    ///
    /// ```
    /// use word_2048::engine::{LockState, Tile};
    /// let mut t = Tile::new('Z').unwrap();
    /// assert!(t.merge());
    /// assert_eq!(t.letter(), 'A');
    /// t.set_lock(LockState::Locked);
    /// assert!(!t.merge());
    /// assert_eq!(t.letter(), 'A');
    /// ```
    pub fn merge(&mut self) -> bool {
        if !self.is_merge_eligible() {
            return false;
        }
        self.advance();
        true
    }

    /// Advance regardless of lock state.
    #[inline]
    pub(crate) fn advance(&mut self) { self.letter = next_letter(self.letter); }

    /// Replace the letter. Callers check the wildcard flag first.
    pub(crate) fn redefine(&mut self, letter: char) -> Result<(), EngineError> {
        let letter = validate(letter.to_ascii_uppercase())?;
        self.letter = letter;
        Ok(())
    }
}
