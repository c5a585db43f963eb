use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::EngineError;

/// Exactly three uppercase letters the player must line up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetWord([char; 3]);

impl TargetWord {
    pub const LEN: usize = 3;

    pub fn new(word: &str) -> Result<Self, EngineError> {
        let mut letters = ['A'; 3];
        let mut chars = word.chars();
        for slot in letters.iter_mut() {
            match chars.next() {
                Some(c) if c.is_ascii_uppercase() => *slot = c,
                _ => return Err(EngineError::InvalidTargetWord(word.to_string())),
            }
        }
        if chars.next().is_some() {
            return Err(EngineError::InvalidTargetWord(word.to_string()));
        }
        Ok(TargetWord(letters))
    }

    #[inline]
    pub fn letters(&self) -> [char; 3] { self.0 }

    #[inline]
    pub fn contains(&self, letter: char) -> bool { self.0.contains(&letter) }
}

impl FromStr for TargetWord {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { TargetWord::new(s) }
}

impl TryFrom<String> for TargetWord {
    type Error = EngineError;
    fn try_from(s: String) -> Result<Self, Self::Error> { TargetWord::new(&s) }
}

impl From<TargetWord> for String {
    fn from(t: TargetWord) -> Self { t.to_string() }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
