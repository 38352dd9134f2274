//! Seed management for world generation
//!
//! A run consumes a single random sequence. Mountains draw first, in pass
//! order, then the river; reordering any draw changes every later value, so
//! the seed alone is enough to reproduce a world only with the same config.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::SeedMode;

/// The random sequence shared by every generation phase of one run.
pub type RandomSource = ChaCha8Rng;

/// The seed a run actually used, plus how it was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSeed {
    pub mode: SeedMode,
    pub value: u64,
}

impl RunSeed {
    /// Pick the seed for a run. Entropy mode draws once from the OS-seeded
    /// thread RNG; the drawn value is kept so the run can be replayed.
    pub fn resolve(mode: SeedMode) -> Self {
        let value = match mode {
            SeedMode::Fixed(seed) => seed,
            SeedMode::Entropy => rand::random(),
        };
        Self { mode, value }
    }

    /// Fresh sequence positioned at the start.
    pub fn rng(&self) -> RandomSource {
        ChaCha8Rng::seed_from_u64(self.value)
    }

    /// Seed mode that replays this run.
    pub fn replay(&self) -> SeedMode {
        SeedMode::Fixed(self.value)
    }
}

impl std::fmt::Display for RunSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.value, self.mode)
    }
}
