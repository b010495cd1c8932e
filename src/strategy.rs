//! The four selection strategies.
//!
//! Each variant carries only its own hyperparameters; everything observed
//! lives in [`BeliefState`], so a strategy value can be reused across runs
//! without carrying anything over.
//!
//! Every strategy explores each arm once, in stable index order, before its
//! own rule engages. This keeps an arm with zero observations from being
//! starved (or committed to) on the strength of an initialization value.
//!
//! Randomness is threaded in as an explicit seeded RNG rather than read from
//! ambient global state, so full runs replay exactly under a fixed seed.

use rand::rngs::StdRng;
use rand::Rng;
use rand_distr::{Beta, Distribution};
use std::fmt;
use std::str::FromStr;

use crate::alloc::{sample_weighted, softmax_weights};
use crate::belief::BeliefState;
use crate::error::{BanditError, Result};
use crate::TIEBREAK_EPS;

/// The closed set of strategy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    /// Fixed-rate uniform exploration, greedy otherwise.
    EpsilonGreedy,
    /// Boltzmann sampling over estimated payouts.
    Softmax,
    /// Upper confidence bound (UCB1-style).
    Ucb,
    /// Thompson sampling from Beta posteriors.
    Bayesian,
}

impl StrategyKind {
    /// All kinds, in canonical order.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::EpsilonGreedy,
        StrategyKind::Softmax,
        StrategyKind::Ucb,
        StrategyKind::Bayesian,
    ];

    /// Canonical name.
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::EpsilonGreedy => "epsilon_greedy",
            StrategyKind::Softmax => "softmax",
            StrategyKind::Ucb => "ucb",
            StrategyKind::Bayesian => "bayesian",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategyKind {
    type Err = BanditError;

    /// Parse a strategy name. `eps_greedy` is accepted as an alias for
    /// `epsilon_greedy`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "epsilon_greedy" | "eps_greedy" => Ok(StrategyKind::EpsilonGreedy),
            "softmax" => Ok(StrategyKind::Softmax),
            "ucb" => Ok(StrategyKind::Ucb),
            "bayesian" => Ok(StrategyKind::Bayesian),
            other => Err(BanditError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Hyperparameters recognized by [`Strategy::new`].
///
/// Only the field relevant to the requested kind is read; the others are
/// ignored.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyParams {
    /// Exploration rate for epsilon-greedy, in `[0, 1]`.
    pub epsilon: f64,
    /// Softmax temperature, > 0. Lower values sharpen toward greedy choice.
    pub tau: f64,
    /// UCB exploration coefficient, > 0.
    pub c: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            tau: 0.1,
            c: std::f64::consts::SQRT_2,
        }
    }
}

/// A selection rule over the current belief state.
///
/// Built via [`Strategy::new`], which validates the relevant hyperparameter
/// before any trial runs.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// With probability `epsilon` pick a uniformly random arm, otherwise the
    /// current best arm.
    EpsilonGreedy {
        /// Exploration rate in `[0, 1]`.
        epsilon: f64,
    },
    /// Sample one arm from `P(arm) ∝ exp(estimated_payout(arm) / tau)`.
    Softmax {
        /// Temperature, > 0.
        tau: f64,
    },
    /// Pick the arm maximizing `payout + c * sqrt(ln(step + 1) / pulls)`.
    Ucb {
        /// Exploration coefficient, > 0.
        c: f64,
    },
    /// Draw one sample from each arm's `Beta(1 + successes, 1 + failures)`
    /// posterior and pick the highest draw.
    Bayesian,
}

impl Strategy {
    /// Build a strategy from a kind and a parameter set.
    pub fn new(kind: StrategyKind, params: StrategyParams) -> Result<Self> {
        match kind {
            StrategyKind::EpsilonGreedy => {
                let epsilon = params.epsilon;
                if !epsilon.is_finite() || !(0.0..=1.0).contains(&epsilon) {
                    return Err(BanditError::InvalidParameter("epsilon must be in [0, 1]"));
                }
                Ok(Strategy::EpsilonGreedy { epsilon })
            }
            StrategyKind::Softmax => {
                let tau = params.tau;
                if !tau.is_finite() || tau <= 0.0 {
                    return Err(BanditError::InvalidParameter("tau must be > 0"));
                }
                Ok(Strategy::Softmax { tau })
            }
            StrategyKind::Ucb => {
                let c = params.c;
                if !c.is_finite() || c <= 0.0 {
                    return Err(BanditError::InvalidParameter("c must be > 0"));
                }
                Ok(Strategy::Ucb { c })
            }
            StrategyKind::Bayesian => Ok(Strategy::Bayesian),
        }
    }

    /// Parse a strategy by name with default hyperparameters.
    pub fn parse(name: &str) -> Result<Self> {
        Self::new(name.parse()?, StrategyParams::default())
    }

    /// The kind of this strategy.
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::EpsilonGreedy { .. } => StrategyKind::EpsilonGreedy,
            Strategy::Softmax { .. } => StrategyKind::Softmax,
            Strategy::Ucb { .. } => StrategyKind::Ucb,
            Strategy::Bayesian => StrategyKind::Bayesian,
        }
    }

    /// Select the next arm to pull.
    ///
    /// `step` is the zero-based trial index. Called once per trial, before
    /// the reward is observed.
    pub fn select(&self, belief: &BeliefState, step: usize, rng: &mut StdRng) -> usize {
        let k = belief.arm_count();
        if k == 1 {
            return 0;
        }
        // Cold start: every arm gets exactly one pull, lowest index first.
        if let Some(arm) = belief.first_unpulled() {
            return arm;
        }

        match *self {
            Strategy::EpsilonGreedy { epsilon } => {
                if rng.random::<f64>() < epsilon {
                    rng.random_range(0..k)
                } else {
                    belief.best_arm()
                }
            }
            Strategy::Softmax { tau } => {
                let weights = softmax_weights(&belief.payouts(), tau);
                sample_weighted(&weights, rng).unwrap_or(0)
            }
            Strategy::Ucb { c } => {
                let ln_t = ((step + 1) as f64).ln();
                let mut best = 0usize;
                let mut best_bound = f64::NEG_INFINITY;
                for arm in 0..k {
                    let n = belief.pulls()[arm];
                    // Unpulled arms dominate. Unreachable after the rotation
                    // above, but keeps the bound total.
                    let bound = if n == 0 {
                        f64::INFINITY
                    } else {
                        belief.estimated_payout(arm) + c * (ln_t / n as f64).sqrt()
                    };
                    if bound > best_bound + TIEBREAK_EPS {
                        best = arm;
                        best_bound = bound;
                    }
                }
                best
            }
            Strategy::Bayesian => {
                let mut best = 0usize;
                let mut best_sample = f64::NEG_INFINITY;
                for arm in 0..k {
                    let wins = belief.successes()[arm];
                    let losses = belief.pulls()[arm] as f64 - wins;
                    let x = sample_beta(1.0 + wins, 1.0 + losses, rng);
                    if x > best_sample + TIEBREAK_EPS {
                        best = arm;
                        best_sample = x;
                    }
                }
                best
            }
        }
    }
}

fn sample_beta(alpha: f64, beta: f64, rng: &mut StdRng) -> f64 {
    if !alpha.is_finite() || !beta.is_finite() || alpha <= 0.0 || beta <= 0.0 {
        return 0.5;
    }
    match Beta::new(alpha, beta) {
        Ok(dist) => dist.sample(rng),
        Err(_) => 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn all_strategies() -> Vec<Strategy> {
        StrategyKind::ALL
            .iter()
            .map(|&k| Strategy::new(k, StrategyParams::default()).unwrap())
            .collect()
    }

    #[test]
    fn every_strategy_rotates_through_unpulled_arms_first() {
        for strategy in all_strategies() {
            let mut belief = BeliefState::new(3).unwrap();
            let mut rng = StdRng::seed_from_u64(5);
            for expected in 0..3 {
                let arm = strategy.select(&belief, expected, &mut rng);
                assert_eq!(arm, expected, "{} rotation", strategy.kind());
                belief.record(arm, 1.0).unwrap();
            }
        }
    }

    #[test]
    fn epsilon_zero_is_pure_exploitation_after_rotation() {
        let strategy = Strategy::new(
            StrategyKind::EpsilonGreedy,
            StrategyParams {
                epsilon: 0.0,
                ..StrategyParams::default()
            },
        )
        .unwrap();
        let mut belief = BeliefState::new(3).unwrap();
        belief.record(0, 0.0).unwrap();
        belief.record(1, 1.0).unwrap();
        belief.record(2, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(17);
        for step in 3..200 {
            assert_eq!(strategy.select(&belief, step, &mut rng), 1);
        }
    }

    #[test]
    fn ucb_prefers_the_undersampled_arm_at_equal_payout() {
        let strategy = Strategy::new(StrategyKind::Ucb, StrategyParams::default()).unwrap();
        let mut belief = BeliefState::new(2).unwrap();
        // Same observed mean (0.5), very different evidence.
        for _ in 0..50 {
            belief.record(0, 1.0).unwrap();
            belief.record(0, 0.0).unwrap();
        }
        belief.record(1, 1.0).unwrap();
        belief.record(1, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(strategy.select(&belief, 102, &mut rng), 1);
    }

    #[test]
    fn ucb_ties_resolve_to_the_lowest_index() {
        let strategy = Strategy::new(StrategyKind::Ucb, StrategyParams::default()).unwrap();
        let mut belief = BeliefState::new(3).unwrap();
        for arm in 0..3 {
            belief.record(arm, 1.0).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(strategy.select(&belief, 3, &mut rng), 0);
    }

    #[test]
    fn softmax_with_tiny_temperature_is_effectively_greedy() {
        let strategy = Strategy::new(
            StrategyKind::Softmax,
            StrategyParams {
                tau: 1e-3,
                ..StrategyParams::default()
            },
        )
        .unwrap();
        let mut belief = BeliefState::new(3).unwrap();
        belief.record(0, 0.0).unwrap();
        belief.record(1, 1.0).unwrap();
        belief.record(2, 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        for step in 3..100 {
            assert_eq!(strategy.select(&belief, step, &mut rng), 1);
        }
    }

    #[test]
    fn bayesian_concentrates_on_the_dominant_arm() {
        let strategy = Strategy::new(StrategyKind::Bayesian, StrategyParams::default()).unwrap();
        let mut belief = BeliefState::new(2).unwrap();
        for i in 0..50 {
            belief.record(0, if i < 45 { 1.0 } else { 0.0 }).unwrap();
            belief.record(1, if i < 5 { 1.0 } else { 0.0 }).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(31);
        let picks_of_zero = (0..100)
            .filter(|&step| strategy.select(&belief, 100 + step, &mut rng) == 0)
            .count();
        assert!(picks_of_zero >= 90, "picks_of_zero={}", picks_of_zero);
    }

    #[test]
    fn single_arm_is_always_selected() {
        for strategy in all_strategies() {
            let belief = BeliefState::new(1).unwrap();
            let mut rng = StdRng::seed_from_u64(1);
            for step in 0..10 {
                assert_eq!(strategy.select(&belief, step, &mut rng), 0);
            }
        }
    }

    #[test]
    fn invalid_hyperparameters_are_rejected() {
        let base = StrategyParams::default();
        assert_eq!(
            Strategy::new(StrategyKind::Softmax, StrategyParams { tau: 0.0, ..base }).unwrap_err(),
            BanditError::InvalidParameter("tau must be > 0")
        );
        assert!(Strategy::new(
            StrategyKind::Softmax,
            StrategyParams {
                tau: f64::NAN,
                ..base
            }
        )
        .is_err());
        assert_eq!(
            Strategy::new(StrategyKind::Ucb, StrategyParams { c: -1.0, ..base }).unwrap_err(),
            BanditError::InvalidParameter("c must be > 0")
        );
        assert_eq!(
            Strategy::new(
                StrategyKind::EpsilonGreedy,
                StrategyParams {
                    epsilon: 1.5,
                    ..base
                }
            )
            .unwrap_err(),
            BanditError::InvalidParameter("epsilon must be in [0, 1]")
        );
    }

    #[test]
    fn names_parse_both_canonical_and_alias_forms() {
        assert_eq!(
            "epsilon_greedy".parse::<StrategyKind>().unwrap(),
            StrategyKind::EpsilonGreedy
        );
        assert_eq!(
            "eps_greedy".parse::<StrategyKind>().unwrap(),
            StrategyKind::EpsilonGreedy
        );
        assert_eq!("ucb".parse::<StrategyKind>().unwrap(), StrategyKind::Ucb);
        assert_eq!(
            "quantum".parse::<StrategyKind>().unwrap_err(),
            BanditError::UnknownStrategy("quantum".to_string())
        );
    }

    #[test]
    fn kind_round_trips_through_display() {
        for kind in StrategyKind::ALL {
            assert_eq!(kind.as_str().parse::<StrategyKind>().unwrap(), kind);
        }
    }
}
