//! The hidden reward model: one Bernoulli coin per drilling site.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Bernoulli, Distribution};

use crate::error::{BanditError, Result};
use crate::scenario::Scenario;

/// Seedable Bernoulli reward source over K arms.
///
/// Construction validates every probability up front; after that, `sample`
/// can only fail on an out-of-range index. Each call consumes one draw from
/// the internal RNG, so a fixed seed replays the same outcome stream.
///
/// Notes:
/// - Default construction uses a fixed seed (deterministic by default).
#[derive(Debug, Clone)]
pub struct RewardSource {
    probs: Vec<f64>,
    coins: Vec<Bernoulli>,
    rng: StdRng,
}

impl RewardSource {
    /// Create a reward source with a deterministic fixed seed (0).
    pub fn new(probs: Vec<f64>) -> Result<Self> {
        Self::with_seed(probs, 0)
    }

    /// Create a reward source with a fixed seed (reproducible).
    pub fn with_seed(probs: Vec<f64>, seed: u64) -> Result<Self> {
        let scenario = Scenario::from_probs(probs)?;
        Self::from_scenario(&scenario, seed)
    }

    /// Build from an already-validated scenario.
    pub fn from_scenario(scenario: &Scenario, seed: u64) -> Result<Self> {
        let mut coins = Vec::with_capacity(scenario.arm_count());
        for &p in scenario.probs() {
            let coin = Bernoulli::new(p).map_err(|_| BanditError::InvalidProbability(p))?;
            coins.push(coin);
        }
        Ok(Self {
            probs: scenario.probs().to_vec(),
            coins,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Number of arms.
    pub fn arm_count(&self) -> usize {
        self.coins.len()
    }

    /// The true probabilities (known to the source, hidden from strategies).
    pub fn true_probs(&self) -> &[f64] {
        &self.probs
    }

    /// Draw one binary outcome (`0.0` or `1.0`) for `arm`.
    pub fn sample(&mut self, arm: usize) -> Result<f64> {
        let Some(coin) = self.coins.get(arm) else {
            return Err(BanditError::InvalidArmIndex {
                index: arm,
                arms: self.coins.len(),
            });
        };
        Ok(if coin.sample(&mut self.rng) { 1.0 } else { 0.0 })
    }
}
