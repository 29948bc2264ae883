use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

#[derive(Debug, Clone)]
enum RngSource {
    Seeded(StdRng),
    Scripted { outcomes: Vec<u32>, index: usize },
}

/// Every random decision in a battle goes through this type, so a battle
/// can be replayed from a seed or driven by a fixed script in tests.
///
/// Scripted values are returned as-is (clamped into the requested range).
/// For [`BattleRng::unit`] a scripted value `v` means `v / 100`.
/// Draws over a single possible value do not consume anything.
#[derive(Debug, Clone)]
pub struct BattleRng {
    source: RngSource,
}

impl BattleRng {
    pub fn new_for_test(outcomes: Vec<u32>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn new_seeded(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_rng(&mut rand::rng())),
        }
    }

    /// Number of scripted values not yet consumed. Always 0 when seeded.
    pub fn remaining(&self) -> usize {
        match &self.source {
            RngSource::Seeded(_) => 0,
            RngSource::Scripted { outcomes, index } => outcomes.len() - index,
        }
    }

    fn next_scripted(outcomes: &[u32], index: &mut usize, reason: &str) -> u32 {
        if *index >= outcomes.len() {
            panic!(
                "BattleRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                reason
            );
        }
        let outcome = outcomes[*index];
        *index += 1;
        outcome
    }

    /// Uniform integer in `low..=high`.
    pub fn range(&mut self, low: u32, high: u32, reason: &str) -> u32 {
        if low >= high {
            return low;
        }
        let value = match &mut self.source {
            RngSource::Seeded(rng) => rng.random_range(low..=high),
            RngSource::Scripted { outcomes, index } => {
                Self::next_scripted(outcomes, index, reason).clamp(low, high)
            }
        };
        trace!(value, reason, "rng consumed");
        value
    }

    /// Uniform percent roll in `0..=99`.
    pub fn percent(&mut self, reason: &str) -> u32 {
        self.range(0, 99, reason)
    }

    /// Uniform index into a collection of `len` elements.
    pub fn index(&mut self, len: usize, reason: &str) -> usize {
        assert!(len > 0, "cannot pick from an empty collection: {}", reason);
        self.range(0, (len - 1) as u32, reason) as usize
    }

    /// Uniform real in `[0, 1)`.
    pub fn unit(&mut self, reason: &str) -> f64 {
        let value = match &mut self.source {
            RngSource::Seeded(rng) => rng.random::<f64>(),
            RngSource::Scripted { outcomes, index } => {
                Self::next_scripted(outcomes, index, reason) as f64 / 100.0
            }
        };
        trace!(value, reason, "rng consumed");
        value
    }
}
