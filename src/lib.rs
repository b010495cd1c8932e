//! `wildcat`: seedable multi-armed-bandit engine for ranking drilling prospects.
//!
//! Designed for "which site do we commit to" problems: a grid of K candidate
//! sites, each with an unknown fixed success probability, and a finite budget
//! of exploratory trials. The engine runs the classic explore/exploit
//! strategies over simulated outcomes and reports which sites look most
//! promising.
//!
//! **Pieces:**
//! - [`RewardSource`]: the hidden truth — one Bernoulli coin per site.
//! - [`BeliefState`]: what a strategy is allowed to see — pull counts and
//!   observed payout means.
//! - [`Strategy`]: four selection rules (epsilon-greedy, softmax, UCB,
//!   Bayesian/Thompson sampling), a closed enum with per-variant
//!   hyperparameters.
//! - [`BanditRunner`]: the strictly sequential select → sample → record loop.
//! - [`EvaluationHarness`]: strategy comparison over random scenarios, and
//!   top-k site ranking by successive elimination.
//!
//! **Goals:**
//! - **Deterministic by default**: every stochastic component is seedable and
//!   constructs with a fixed seed; same seeds → same runs.
//! - **Fail fast**: all validation happens at construction time. Once a run
//!   starts, the per-trial path is pure arithmetic and sampling.
//! - **No hidden state**: strategies read only the [`BeliefState`]; the
//!   harness folds explicit per-run results, never global accumulators.
//!
//! **Non-goals:**
//! - No persistence of belief state across process runs.
//! - No strategies beyond the four named.
//! - No intra-run parallelism: each selection depends on all prior
//!   observations, so trials within a run are strictly ordered. Distinct
//!   (scenario, strategy) runs are independent and may be parallelized by
//!   the caller.
//!
//! # Example
//!
//! ```rust
//! use wildcat::{BanditRunner, RewardSource, Strategy, StrategyKind, StrategyParams};
//!
//! let mut source = RewardSource::with_seed(vec![0.9, 0.1, 0.5], 42)?;
//! let strategy = Strategy::new(StrategyKind::Ucb, StrategyParams::default())?;
//! let mut runner = BanditRunner::with_seed(7);
//!
//! let result = runner.run(&mut source, &strategy, 5_000)?;
//! assert_eq!(result.best_arm, 0);
//! # Ok::<(), wildcat::BanditError>(())
//! ```

#![forbid(unsafe_code)]

/// Epsilon used for floating-point tie-breaking in selection scoring.
///
/// Avoids exact equality comparisons on f64 scores; near-ties resolve to the
/// lowest arm index across all selection paths.
pub(crate) const TIEBREAK_EPS: f64 = 1e-12;

mod error;
pub use error::*;

mod seed;
pub use seed::derive_seed;

mod alloc;
pub use alloc::*;

mod scenario;
pub use scenario::*;

mod reward;
pub use reward::*;

mod belief;
pub use belief::*;

mod strategy;
pub use strategy::*;

mod runner;
pub use runner::*;

mod harness;
pub use harness::*;
