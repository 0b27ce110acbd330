// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Configuration errors raised before any number is generated or tested.

use thiserror::Error;

/// Structurally invalid input. Statistically "bad" data is never an error,
/// it is reported through a rejecting verdict instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("count must be at least {minimum}, got {actual}")]
    NonPositiveCount { minimum: usize, actual: usize },

    #[error("seed {0} must have an even number of digits")]
    OddDigitSeed(u64),

    #[error("seed {0} has more than {} digits", crate::rngs::MAX_SEED_DIGITS)]
    SeedTooLong(u64),

    #[error("seed '{0}' is not a non-negative integer")]
    InvalidSeed(String),

    #[error("this method needs a second seed")]
    MissingSecondSeed,

    #[error("seeds {0} and {1} must have the same number of digits")]
    SeedLengthMismatch(u64, u64),

    #[error("modulus must be positive, got {0}")]
    NonPositiveModulus(i64),

    #[error("unsupported significance level {0} (expected 0.10, 0.05 or 0.01)")]
    UnsupportedSignificance(f64),

    #[error("unsupported confidence level {0}% (expected 90, 95 or 99)")]
    UnsupportedConfidence(u32),

    #[error("significance level must lie in (0, 1), got {0}")]
    InvalidAlpha(f64),

    #[error("need at least {required} values, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("at most {max} values are supported, got {actual}")]
    TooManyValues { max: usize, actual: usize },

    #[error("at least 2 intervals are required, got {0}")]
    TooFewIntervals(usize),

    #[error("interval [{a}, {b}) is not a non-empty subrange of [0, 1]")]
    InvalidInterval { a: f64, b: f64 },
}
