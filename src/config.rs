// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Parameters shared by the hypothesis tests.

use crate::{error::ConfigError, stats};

pub const DEFAULT_ALPHA: f64 = 0.05;
pub const DEFAULT_INTERVALS: usize = 5;
pub const DEFAULT_GAP_INTERVAL: (f64, f64) = (0.3, 0.7);
/// Length of synthesized sequences when the caller does not pick one.
pub const DEFAULT_SAMPLE_SIZE: usize = 20;
/// Largest n with a tabulated Kolmogorov-Smirnov critical value.
pub const KS_MAX_SAMPLE_SIZE: usize = 20;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TestConfig {
    pub alpha: f64,
    /// Number of equal width bins of the chi squared test.
    pub intervals: usize,
    /// Target interval [a, b) of the gap test.
    pub gap_interval: (f64, f64),
    /// Seed for synthesized sequences, None draws one from the OS.
    pub synth_seed: Option<u64>,
}

impl Default for TestConfig {
    fn default() -> Self {
        TestConfig {
            alpha: DEFAULT_ALPHA,
            intervals: DEFAULT_INTERVALS,
            gap_interval: DEFAULT_GAP_INTERVAL,
            synth_seed: None,
        }
    }
}

impl TestConfig {
    pub fn with_alpha(alpha: f64) -> Self {
        TestConfig {
            alpha,
            ..Default::default()
        }
    }

    /// Check everything except the KS significance restriction,
    /// which only matters when that test is actually run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        stats::check_alpha(self.alpha)?;
        check_intervals(self.intervals)?;
        check_gap_interval(self.gap_interval.0, self.gap_interval.1)
    }
}

pub fn check_intervals(intervals: usize) -> Result<(), ConfigError> {
    if intervals < 2 {
        return Err(ConfigError::TooFewIntervals(intervals));
    }
    Ok(())
}

pub fn check_gap_interval(a: f64, b: f64) -> Result<(), ConfigError> {
    if 0.0 <= a && a < b && b <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidInterval { a, b })
    }
}

/// Reject counts below `minimum`.
pub fn validate_count(count: usize, minimum: usize) -> Result<usize, ConfigError> {
    if count < minimum {
        return Err(ConfigError::NonPositiveCount {
            minimum,
            actual: count,
        });
    }
    Ok(count)
}
