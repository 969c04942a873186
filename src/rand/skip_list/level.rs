use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{Error, Result, MAX_LEVELS};

/// Construction options for a [`SkipList`](super::SkipList).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    max_levels: usize,
    seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_levels: MAX_LEVELS,
            seed: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps tower height. Must lie in `1..=MAX_LEVELS`.
    pub fn max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels;
        self
    }

    /// Makes tower heights reproducible across runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(super) fn validate(&self) -> Result<()> {
        if self.max_levels == 0 || self.max_levels > MAX_LEVELS {
            return Err(Error::InvalidMaxLevels(self.max_levels));
        }
        Ok(())
    }
}

/// Geometric tower height source: height `k` with probability `2^-k`.
#[derive(Debug, Clone)]
pub(super) struct LevelGenerator {
    rng: StdRng,
    max_levels: usize,
}

impl LevelGenerator {
    pub(super) fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            max_levels: config.max_levels,
        }
    }

    /// One plus the trailing zero bits of a uniform word. Each bit is a fair
    /// coin flip, so a 32-bit word tops out at exactly `MAX_LEVELS`.
    pub(super) fn choose(&mut self) -> usize {
        let word: u32 = self.rng.gen();
        (1 + word.trailing_zeros() as usize).min(self.max_levels)
    }

    pub(super) fn max_levels(&self) -> usize {
        self.max_levels
    }
}

/// Height a node at 1-based rank `rank` gets in a perfectly balanced list.
pub(super) fn perfect_height(rank: usize, max_levels: usize) -> usize {
    (1 + rank.trailing_zeros() as usize).min(max_levels)
}
