//! Crate-wide error type.
//!
//! Every variant is raised synchronously at construction/validation time:
//! once a [`RewardSource`](crate::RewardSource), [`Strategy`](crate::Strategy),
//! or run configuration has been accepted, the per-trial path is pure
//! arithmetic and sampling and cannot fail. Nothing is retried internally;
//! the caller decides whether to re-prompt, abort, or log and continue.

/// Errors raised by engine construction and validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BanditError {
    /// A success probability outside `[0, 1]` was supplied.
    #[error("probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// An empty arm set was supplied (the engine needs at least one arm).
    #[error("arm count must be at least 1")]
    InvalidArmCount,

    /// An arm index outside `[0, K)` was used.
    #[error("arm index {index} is out of range for {arms} arms")]
    InvalidArmIndex {
        /// The offending index.
        index: usize,
        /// Number of arms actually available.
        arms: usize,
    },

    /// A run was requested with zero trials.
    #[error("trial count must be at least 1")]
    InvalidTrialCount,

    /// A strategy hyperparameter is outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// An unrecognized strategy name was requested.
    #[error("unknown strategy kind: {0:?}")]
    UnknownStrategy(String),
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, BanditError>;
