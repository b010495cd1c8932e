//! Sequential trial execution.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::belief::BeliefState;
use crate::error::{BanditError, Result};
use crate::reward::RewardSource;
use crate::strategy::Strategy;

/// Snapshot produced at the end of one run. Read-only once created.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyResult {
    /// Arm with the highest estimated payout after the final trial.
    pub best_arm: usize,
    /// Estimated payout per arm, in arm order.
    pub estimated_payouts: Vec<f64>,
    /// Pulls per arm, in arm order.
    pub pulls: Vec<u64>,
}

/// Drives the select → sample → record loop for one (source, strategy) pair.
///
/// The runner owns the policy RNG; the reward source carries its own stream.
/// A run is reproducible given both seeds.
#[derive(Debug, Clone)]
pub struct BanditRunner {
    rng: StdRng,
}

impl BanditRunner {
    /// Create a runner with a deterministic fixed seed (0).
    pub fn new() -> Self {
        Self::with_seed(0)
    }

    /// Create a runner with a fixed seed (reproducible).
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Execute `num_trials` strictly sequential trials and report the result.
    ///
    /// Each selection sees the belief state produced by all prior
    /// observations, so trials cannot be reordered or batched.
    pub fn run(
        &mut self,
        source: &mut RewardSource,
        strategy: &Strategy,
        num_trials: usize,
    ) -> Result<StrategyResult> {
        if num_trials == 0 {
            return Err(BanditError::InvalidTrialCount);
        }
        let mut belief = BeliefState::new(source.arm_count())?;
        for step in 0..num_trials {
            let arm = strategy.select(&belief, step, &mut self.rng);
            let reward = source.sample(arm)?;
            belief.record(arm, reward)?;
        }
        Ok(StrategyResult {
            best_arm: belief.best_arm(),
            estimated_payouts: belief.payouts(),
            pulls: belief.pulls().to_vec(),
        })
    }
}

impl Default for BanditRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{StrategyKind, StrategyParams};

    fn default_strategy(kind: StrategyKind) -> Strategy {
        Strategy::new(kind, StrategyParams::default()).unwrap()
    }

    #[test]
    fn pull_counts_sum_to_the_trial_budget() {
        for kind in StrategyKind::ALL {
            let mut source = RewardSource::with_seed(vec![0.8, 0.2, 0.5], 3).unwrap();
            let mut runner = BanditRunner::with_seed(4);
            let result = runner
                .run(&mut source, &default_strategy(kind), 250)
                .unwrap();
            let total: u64 = result.pulls.iter().sum();
            assert_eq!(total, 250, "{}", kind.as_str());
        }
    }

    #[test]
    fn zero_trials_are_rejected_before_any_sampling() {
        let mut source = RewardSource::new(vec![0.5]).unwrap();
        let mut runner = BanditRunner::new();
        assert_eq!(
            runner
                .run(&mut source, &default_strategy(StrategyKind::Ucb), 0)
                .unwrap_err(),
            BanditError::InvalidTrialCount
        );
    }

    #[test]
    fn certain_arms_all_reach_payout_one_in_k_trials() {
        // One trial per arm: the rotation touches every arm, and every pull
        // pays out, so every estimate lands at exactly 1.0.
        for kind in StrategyKind::ALL {
            let mut source = RewardSource::with_seed(vec![1.0; 4], 8).unwrap();
            let mut runner = BanditRunner::with_seed(9);
            let result = runner.run(&mut source, &default_strategy(kind), 4).unwrap();
            assert_eq!(result.estimated_payouts, vec![1.0; 4], "{}", kind.as_str());
            assert_eq!(result.best_arm, 0);
        }
    }

    #[test]
    fn same_seeds_reproduce_identical_results() {
        for kind in StrategyKind::ALL {
            let probs = vec![0.6, 0.3, 0.9];
            let mut a_source = RewardSource::with_seed(probs.clone(), 21).unwrap();
            let mut b_source = RewardSource::with_seed(probs, 21).unwrap();
            let mut a_runner = BanditRunner::with_seed(34);
            let mut b_runner = BanditRunner::with_seed(34);
            let strategy = default_strategy(kind);
            let a = a_runner.run(&mut a_source, &strategy, 500).unwrap();
            let b = b_runner.run(&mut b_source, &strategy, 500).unwrap();
            assert_eq!(a, b, "{}", kind.as_str());
        }
    }

    #[test]
    fn best_arm_is_the_argmax_of_the_reported_payouts() {
        let mut source = RewardSource::with_seed(vec![0.2, 0.9, 0.5], 55).unwrap();
        let mut runner = BanditRunner::with_seed(56);
        let result = runner
            .run(&mut source, &default_strategy(StrategyKind::Ucb), 1_000)
            .unwrap();
        let argmax = result
            .estimated_payouts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(result.estimated_payouts[result.best_arm], result.estimated_payouts[argmax]);
    }
}
