// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Collection of methods for statistical analysis.
//! Critical values, run counting and frequency tables shared by the hypothesis tests.

use std::fmt;

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};

use crate::error::ConfigError;

/// Significance levels with tabulated Kolmogorov-Smirnov constants.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Significance {
    TenPercent,
    FivePercent,
    OnePercent,
}

impl Significance {
    pub const ALL: [Significance; 3] = [
        Significance::TenPercent,
        Significance::FivePercent,
        Significance::OnePercent,
    ];

    pub fn alpha(self) -> f64 {
        match self {
            Significance::TenPercent => 0.10,
            Significance::FivePercent => 0.05,
            Significance::OnePercent => 0.01,
        }
    }

    /// Only the three tabulated levels are accepted.
    pub fn from_alpha(alpha: f64) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|level| (level.alpha() - alpha).abs() < 1e-12)
            .ok_or(ConfigError::UnsupportedSignificance(alpha))
    }

    /// Map a confidence percentage (90, 95 or 99) to its significance level.
    pub fn from_confidence(percent: u32) -> Result<Self, ConfigError> {
        match percent {
            90 => Ok(Significance::TenPercent),
            95 => Ok(Significance::FivePercent),
            99 => Ok(Significance::OnePercent),
            _ => Err(ConfigError::UnsupportedConfidence(percent)),
        }
    }

    /// Asymptotic Kolmogorov-Smirnov coefficient, divided by sqrt(n) to get D critical.
    pub fn ks_coefficient(self) -> f64 {
        match self {
            Significance::TenPercent => 1.22,
            Significance::FivePercent => 1.36,
            Significance::OnePercent => 1.63,
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.alpha())
    }
}

/// Reject alphas a quantile function cannot handle.
pub fn check_alpha(alpha: f64) -> Result<(), ConfigError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidAlpha(alpha))
    }
}

/// Two tailed standard normal critical value, the 1 - alpha/2 quantile.
pub fn normal_critical(alpha: f64) -> f64 {
    Normal::standard().inverse_cdf(1.0 - alpha / 2.0)
}

/// Upper tail chi squared critical value, the 1 - alpha quantile.
/// Returns None with zero degrees of freedom, there is no distribution to look up.
pub fn chi_squared_critical(alpha: f64, df: usize) -> Option<f64> {
    let chi_squared_dist = ChiSquared::new(df as f64).ok()?;
    Some(chi_squared_dist.inverse_cdf(1.0 - alpha))
}

/// Kolmogorov-Smirnov critical distance for `n` values.
pub fn ks_critical(level: Significance, n: usize) -> f64 {
    level.ks_coefficient() / (n as f64).sqrt()
}

/// Run number (starting at 1) of every element.
/// A new run starts whenever an element differs from its predecessor.
pub fn run_labels<T: PartialEq>(symbols: &[T]) -> Vec<usize> {
    let mut labels = Vec::with_capacity(symbols.len());
    let mut current = 1;
    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 && *symbol != symbols[i - 1] {
            current += 1;
        }
        labels.push(current);
    }
    labels
}

/// Number of maximal blocks of equal consecutive symbols.
/// Counts from one, so an empty sequence still has a single run.
pub fn count_runs<T: PartialEq>(symbols: &[T]) -> usize {
    1 + symbols.windows(2).filter(|w| w[0] != w[1]).count()
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Edges of `intervals` equal width bins over 0..1.
/// The last edge is exactly 1.0.
pub fn unit_bin_edges(intervals: usize) -> Vec<f64> {
    let step = 1.0 / intervals as f64;
    let mut edges: Vec<f64> = (0..=intervals).map(|i| i as f64 * step).collect();
    edges[intervals] = 1.0;
    edges
}

/// Count values per bin. Bins are half open except the last which includes its upper edge.
/// Values outside the edges are not counted.
pub fn histogram(values: &[f64], edges: &[f64]) -> Vec<usize> {
    let bins = edges.len() - 1;
    let mut counts = vec![0usize; bins];
    let (first, last) = (edges[0], edges[bins]);
    for &value in values {
        if !(first..=last).contains(&value) {
            continue;
        }
        // number of edges <= value, minus one, is the bin index
        let bin = edges.partition_point(|&edge| edge <= value) - 1;
        counts[bin.min(bins - 1)] += 1;
    }
    counts
}

/// Sum of (observed - expected)^2 / expected.
/// Categories with zero expectation contribute nothing.
pub fn chi_squared_statistic(observed: &[usize], expected: &[f64]) -> f64 {
    observed
        .iter()
        .zip(expected)
        .map(|(&o, &e)| chi_squared_term(o, e))
        .sum()
}

pub fn chi_squared_term(observed: usize, expected: f64) -> f64 {
    if expected > 0.0 {
        (observed as f64 - expected).powi(2) / expected
    } else {
        0.0
    }
}
