//! Built-in target words.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::TargetWord;

/// Words a new session draws its target from. Every word only uses the
/// letters `A`-`D`, which are a few merges away from the spawned `A`/`B`.
pub const WORD_BANK: &[&str] = &[
    "BAD", "CAB", "CAD", "ABC", "ACD", "ABD", "BDC", "DAB", "BCA", "CBA", "DAC", "ABB", "BAA", "CBD",
];

/// Pick a target uniformly from [`WORD_BANK`].
pub fn random_target<R: Rng + ?Sized>(rng: &mut R) -> TargetWord {
    WORD_BANK
        .choose(rng)
        .and_then(|w| TargetWord::new(w).ok())
        .expect("word bank is non-empty and holds valid targets")
}
