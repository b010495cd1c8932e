//! Drilling scenarios: the hidden per-site success probabilities.
//!
//! A [`Scenario`] is immutable for the lifetime of one evaluation; successive
//! elimination works on copies (see [`Scenario::zeroed`]) so the original
//! truth record stays intact for reporting.

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{BanditError, Result};

/// An ordered set of K sites with fixed true success probabilities.
///
/// The probabilities are hidden from strategies; only the
/// [`RewardSource`](crate::RewardSource) built from a scenario observes them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    probs: Vec<f64>,
}

impl Scenario {
    /// Validate and wrap a probability vector.
    ///
    /// Fails on an empty vector or on any probability outside `[0, 1]`
    /// (non-finite values included).
    pub fn from_probs(probs: Vec<f64>) -> Result<Self> {
        if probs.is_empty() {
            return Err(BanditError::InvalidArmCount);
        }
        for &p in &probs {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(BanditError::InvalidProbability(p));
            }
        }
        Ok(Self { probs })
    }

    /// Generate a scenario with `k` sites, each probability uniform in `[0, 1)`.
    pub fn random(k: usize, rng: &mut StdRng) -> Result<Self> {
        if k == 0 {
            return Err(BanditError::InvalidArmCount);
        }
        Ok(Self {
            probs: (0..k).map(|_| rng.random::<f64>()).collect(),
        })
    }

    /// Number of sites.
    pub fn arm_count(&self) -> usize {
        self.probs.len()
    }

    /// The true probabilities, in site order.
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Copy of this scenario with one site's probability forced to zero.
    ///
    /// Used by successive elimination: a site already committed to is taken
    /// out of contention without touching the original record.
    pub fn zeroed(&self, arm: usize) -> Result<Self> {
        if arm >= self.probs.len() {
            return Err(BanditError::InvalidArmIndex {
                index: arm,
                arms: self.probs.len(),
            });
        }
        let mut probs = self.probs.clone();
        probs[arm] = 0.0;
        Ok(Self { probs })
    }
}
