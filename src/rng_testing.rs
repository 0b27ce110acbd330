// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Statistical testing of a generators output.
//!
//! Five hypothesis tests over sequences of numbers in 0..1:
//! chi squared and Kolmogorov-Smirnov for uniformity,
//! up-down runs and up-down-mean runs for randomness,
//! and the gap test for independence.
//!
//! Every test accepts either an existing sequence or synthesizes one,
//! and returns a typed result holding its statistics, a [`Verdict`]
//! and the per step tables needed to render it.
//! A verdict accepts only when the statistic is strictly below the critical value.

use std::fmt;

use crate::{
    config::{self, TestConfig},
    error::ConfigError,
    rngs,
    stats::{self, Significance},
    strings,
};

/// Numbers fed into a test.
#[derive(Debug, Copy, Clone)]
pub enum TestInput<'a> {
    /// An existing sequence, its length defines n.
    Sequence(&'a [f64]),
    /// Draw `n` uniform numbers, reproducibly when `seed` is set.
    Synthetic { n: usize, seed: Option<u64> },
}

impl TestInput<'_> {
    pub fn len(&self) -> usize {
        match self {
            TestInput::Sequence(numbers) => numbers.len(),
            TestInput::Synthetic { n, .. } => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check n against `minimum..=maximum` before producing the numbers.
    fn sample(&self, minimum: usize, maximum: Option<usize>) -> Result<Vec<f64>, ConfigError> {
        let n = self.len();
        if n < minimum {
            return Err(ConfigError::InsufficientData {
                required: minimum,
                actual: n,
            });
        }
        if let Some(max) = maximum.filter(|&max| n > max) {
            return Err(ConfigError::TooManyValues { max, actual: n });
        }
        Ok(self.numbers())
    }

    /// Copy the sequence, or draw the synthetic one.
    pub fn numbers(&self) -> Vec<f64> {
        match self {
            TestInput::Sequence(numbers) => numbers.to_vec(),
            TestInput::Synthetic { n, seed } => rngs::uniform(*n, *seed),
        }
    }
}

/// Fields every test result shares.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub n: usize,
    pub alpha: f64,
    pub accepted: bool,
    pub conclusion: &'static str,
}

impl Verdict {
    fn new(n: usize, alpha: f64, accepted: bool, pass: &'static str, fail: &'static str) -> Self {
        Verdict {
            n,
            alpha,
            accepted,
            conclusion: if accepted { pass } else { fail },
        }
    }
}

// ----------------------------------------------------------------------------
// Up-down runs
// ----------------------------------------------------------------------------

/// Direction of a value relative to its predecessor.
/// Equal values count as down.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    fn between(previous: f64, value: f64) -> Self {
        if value > previous {
            Direction::Up
        } else {
            Direction::Down
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Direction::Up => '+',
            Direction::Down => '-',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpDownRow {
    /// 1-based position of `value`, starts at 2.
    pub index: usize,
    pub value: f64,
    pub previous: f64,
    pub direction: Direction,
    pub run: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpDownResult {
    pub verdict: Verdict,
    pub numbers: Vec<f64>,
    pub rows: Vec<UpDownRow>,
    /// Observed runs, Co.
    pub runs: usize,
    pub expected_runs: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub z0: f64,
    pub z_critical: f64,
}

impl UpDownResult {
    pub fn symbols(&self) -> Vec<Direction> {
        self.rows.iter().map(|row| row.direction).collect()
    }
}

/// Runs up and down test.
/// Co is compared against mean (2n - 1) / 3 and variance (16n - 29) / 90.
pub fn up_down_runs(input: &TestInput, alpha: f64) -> Result<UpDownResult, ConfigError> {
    stats::check_alpha(alpha)?;
    let numbers = input.sample(2, None)?;
    let n = numbers.len();

    let directions: Vec<Direction> = numbers
        .windows(2)
        .map(|w| Direction::between(w[0], w[1]))
        .collect();
    let runs = stats::count_runs(&directions);
    let rows = stats::run_labels(&directions)
        .into_iter()
        .zip(directions)
        .enumerate()
        .map(|(i, (run, direction))| UpDownRow {
            index: i + 2,
            value: numbers[i + 1],
            previous: numbers[i],
            direction,
            run,
        })
        .collect();

    let nf = n as f64;
    let expected_runs = (2.0 * nf - 1.0) / 3.0;
    let variance = (16.0 * nf - 29.0) / 90.0;
    let std_dev = variance.sqrt();
    let z0 = (runs as f64 - expected_runs).abs() / std_dev;
    let z_critical = stats::normal_critical(alpha);
    let accepted = z0 < z_critical;
    log::debug!(
        "up-down runs: n={} Co={} mu={:.4} Z0={:.4} Zc={:.4}",
        n,
        runs,
        expected_runs,
        z0,
        z_critical
    );

    Ok(UpDownResult {
        verdict: Verdict::new(n, alpha, accepted, strings::RANDOM, strings::NOT_RANDOM),
        numbers,
        rows,
        runs,
        expected_runs,
        variance,
        std_dev,
        z0,
        z_critical,
    })
}

// ----------------------------------------------------------------------------
// Up-down-mean runs
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct MeanRunRow {
    pub index: usize,
    pub value: f64,
    /// Value is at or above the sample mean.
    pub above: bool,
    pub run: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpDownMeanResult {
    pub verdict: Verdict,
    pub numbers: Vec<f64>,
    pub mean: f64,
    pub rows: Vec<MeanRunRow>,
    /// n0, values below the mean.
    pub below: usize,
    /// n1, values at or above the mean.
    pub above: usize,
    pub runs: usize,
    pub expected_runs: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub z0: f64,
    pub z_critical: f64,
}

/// Runs above and below the mean test.
/// With every value on one side the variance is zero and Z0 is infinite, which rejects.
pub fn up_down_mean_runs(input: &TestInput, alpha: f64) -> Result<UpDownMeanResult, ConfigError> {
    stats::check_alpha(alpha)?;
    let numbers = input.sample(2, None)?;
    let n = numbers.len();

    let mean = stats::mean(&numbers);
    let flags: Vec<bool> = numbers.iter().map(|&x| x >= mean).collect();
    let above = flags.iter().filter(|&&f| f).count();
    let below = n - above;
    let runs = stats::count_runs(&flags);
    let rows = stats::run_labels(&flags)
        .into_iter()
        .zip(flags)
        .enumerate()
        .map(|(i, (run, above))| MeanRunRow {
            index: i + 1,
            value: numbers[i],
            above,
            run,
        })
        .collect();

    let (nf, n0, n1) = (n as f64, below as f64, above as f64);
    let expected_runs = 2.0 * n0 * n1 / nf + 0.5;
    let variance = 2.0 * n0 * n1 * (2.0 * n0 * n1 - nf) / (nf.powi(2) * (nf - 1.0));
    let std_dev = variance.sqrt();
    let z0 = (runs as f64 - expected_runs).abs() / std_dev;
    let z_critical = stats::normal_critical(alpha);
    let accepted = z0 < z_critical;
    log::debug!(
        "up-down-mean runs: n={} n0={} n1={} Co={} Z0={:.4} Zc={:.4}",
        n,
        below,
        above,
        runs,
        z0,
        z_critical
    );

    Ok(UpDownMeanResult {
        verdict: Verdict::new(n, alpha, accepted, strings::RANDOM, strings::NOT_RANDOM),
        numbers,
        mean,
        rows,
        below,
        above,
        runs,
        expected_runs,
        variance,
        std_dev,
        z0,
        z_critical,
    })
}

// ----------------------------------------------------------------------------
// Kolmogorov-Smirnov
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct KsRow {
    pub index: usize,
    /// Value at this position of the input, before sorting.
    pub value: f64,
    pub sorted: f64,
    /// i / n
    pub upper: f64,
    /// (i - 1) / n
    pub lower: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KsResult {
    pub verdict: Verdict,
    pub numbers: Vec<f64>,
    pub sorted: Vec<f64>,
    pub rows: Vec<KsRow>,
    pub d_plus: f64,
    pub d_minus: f64,
    pub d: f64,
    pub d_critical: f64,
}

/// Kolmogorov-Smirnov uniformity test for at most 20 numbers.
/// Only the significance levels 0.10, 0.05 and 0.01 have critical values.
pub fn kolmogorov_smirnov(input: &TestInput, alpha: f64) -> Result<KsResult, ConfigError> {
    let level = Significance::from_alpha(alpha)?;
    let numbers = input.sample(1, Some(config::KS_MAX_SAMPLE_SIZE))?;
    let n = numbers.len();
    let nf = n as f64;

    let mut sorted = numbers.clone();
    sorted.sort_by(f64::total_cmp);

    let rows: Vec<KsRow> = (1..=n)
        .map(|i| KsRow {
            index: i,
            value: numbers[i - 1],
            sorted: sorted[i - 1],
            upper: i as f64 / nf,
            lower: (i - 1) as f64 / nf,
        })
        .collect();
    let d_plus = rows
        .iter()
        .map(|row| row.upper - row.sorted)
        .fold(f64::NEG_INFINITY, f64::max);
    let d_minus = rows
        .iter()
        .map(|row| row.sorted - row.lower)
        .fold(f64::NEG_INFINITY, f64::max);
    let d = d_plus.max(d_minus);
    let d_critical = stats::ks_critical(level, n);
    let accepted = d < d_critical;
    log::debug!("kolmogorov-smirnov: n={} D={:.6} Dc={:.6}", n, d, d_critical);

    Ok(KsResult {
        verdict: Verdict::new(n, alpha, accepted, strings::UNIFORM, strings::NOT_UNIFORM),
        numbers,
        sorted,
        rows,
        d_plus,
        d_minus,
        d,
        d_critical,
    })
}

// ----------------------------------------------------------------------------
// Chi squared
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct IntervalRow {
    pub lower: f64,
    pub upper: f64,
    pub observed: usize,
    pub expected: f64,
    pub contribution: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChiSquaredResult {
    pub verdict: Verdict,
    pub numbers: Vec<f64>,
    pub intervals: usize,
    pub rows: Vec<IntervalRow>,
    pub statistic: f64,
    pub critical: f64,
    pub degrees_of_freedom: usize,
}

/// Chi squared uniformity test over `intervals` equal width bins of 0..1.
/// Values outside 0..=1 fall in no bin but still count towards n.
pub fn chi_squared(
    input: &TestInput,
    alpha: f64,
    intervals: usize,
) -> Result<ChiSquaredResult, ConfigError> {
    stats::check_alpha(alpha)?;
    config::check_intervals(intervals)?;
    let numbers = input.sample(1, None)?;
    let n = numbers.len();

    let expected = n as f64 / intervals as f64;
    let edges = stats::unit_bin_edges(intervals);
    let observed = stats::histogram(&numbers, &edges);
    let rows: Vec<IntervalRow> = observed
        .iter()
        .zip(edges.windows(2))
        .map(|(&o, edge)| IntervalRow {
            lower: edge[0],
            upper: edge[1],
            observed: o,
            expected,
            contribution: stats::chi_squared_term(o, expected),
        })
        .collect();
    let statistic: f64 = rows.iter().map(|row| row.contribution).sum();
    let degrees_of_freedom = intervals - 1;
    let critical = stats::chi_squared_critical(alpha, degrees_of_freedom)
        .ok_or(ConfigError::TooFewIntervals(intervals))?;
    let accepted = statistic < critical;
    log::debug!(
        "chi squared: n={} k={} X2={:.6} X2c={:.6}",
        n,
        intervals,
        statistic,
        critical
    );

    Ok(ChiSquaredResult {
        verdict: Verdict::new(n, alpha, accepted, strings::UNIFORM, strings::NOT_UNIFORM),
        numbers,
        intervals,
        rows,
        statistic,
        critical,
        degrees_of_freedom,
    })
}

// ----------------------------------------------------------------------------
// Gap test
// ----------------------------------------------------------------------------

/// Gap length class, either an exact length or an open ended tail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GapCategory {
    Length(usize),
    AtLeast(usize),
}

impl GapCategory {
    fn contains(self, gap: usize) -> bool {
        match self {
            GapCategory::Length(k) => gap == k,
            GapCategory::AtLeast(k) => gap >= k,
        }
    }
}

impl fmt::Display for GapCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GapCategory::Length(k) => write!(f, "{}", k),
            GapCategory::AtLeast(k) => write!(f, "≥{}", k),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapRow {
    pub category: GapCategory,
    pub observed: usize,
    pub expected: f64,
    pub contribution: f64,
}

/// Chi squared part of a gap test, absent when no gap was completed.
#[derive(Debug, Clone, PartialEq)]
pub struct GapStatistic {
    pub rows: Vec<GapRow>,
    pub statistic: f64,
    /// None with zero degrees of freedom.
    pub critical: Option<f64>,
    pub degrees_of_freedom: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GapResult {
    pub verdict: Verdict,
    pub numbers: Vec<f64>,
    pub a: f64,
    pub b: f64,
    /// b - a, probability of landing in the interval.
    pub p: f64,
    pub gaps: Vec<usize>,
    pub statistic: Option<GapStatistic>,
}

impl GapResult {
    pub fn total_gaps(&self) -> usize {
        self.gaps.len()
    }
}

/// Lengths of the runs of values outside [a, b), each closed by a value inside.
/// A trailing run that never hits the interval is dropped.
pub fn collect_gaps(numbers: &[f64], a: f64, b: f64) -> Vec<usize> {
    let mut gaps = vec![];
    let mut current: usize = 0;
    for &x in numbers {
        if a <= x && x < b {
            gaps.push(current);
            current = 0;
        } else {
            current += 1;
        }
    }
    gaps
}

/// Exact lengths 0 up to min(3, max_gap), plus a "≥4" tail only when some gap reaches 4.
/// A longest gap of exactly 3 therefore yields four exact categories and no tail.
pub fn gap_categories(max_gap: usize) -> Vec<GapCategory> {
    let mut categories: Vec<GapCategory> =
        (0..(max_gap + 1).min(4)).map(GapCategory::Length).collect();
    if max_gap >= 4 {
        categories.push(GapCategory::AtLeast(4));
    }
    categories
}

/// Gap test for independence over the interval [a, b).
pub fn gap_test(input: &TestInput, alpha: f64, a: f64, b: f64) -> Result<GapResult, ConfigError> {
    stats::check_alpha(alpha)?;
    config::check_gap_interval(a, b)?;
    let numbers = input.sample(1, None)?;
    let n = numbers.len();
    let p = b - a;
    let gaps = collect_gaps(&numbers, a, b);

    let Some(max_gap) = gaps.iter().copied().max() else {
        log::warn!("gap test: no value of {} fell in [{}, {})", n, a, b);
        return Ok(GapResult {
            verdict: Verdict {
                n,
                alpha,
                accepted: false,
                conclusion: strings::INSUFFICIENT_GAPS,
            },
            numbers,
            a,
            b,
            p,
            gaps,
            statistic: None,
        });
    };

    let total = gaps.len() as f64;
    let rows: Vec<GapRow> = gap_categories(max_gap)
        .into_iter()
        .map(|category| {
            let observed = gaps.iter().filter(|&&g| category.contains(g)).count();
            let expected = match category {
                GapCategory::Length(k) => total * p * (1.0 - p).powi(k as i32),
                GapCategory::AtLeast(k) => total * (1.0 - p).powi(k as i32),
            };
            GapRow {
                category,
                observed,
                expected,
                contribution: stats::chi_squared_term(observed, expected),
            }
        })
        .collect();
    let statistic: f64 = rows.iter().map(|row| row.contribution).sum();
    let degrees_of_freedom = rows.len() - 1;
    let critical = stats::chi_squared_critical(alpha, degrees_of_freedom);
    let accepted = critical.is_some_and(|c| statistic < c);
    log::debug!(
        "gap test: n={} gaps={} X2={:.6} df={} X2c={:?}",
        n,
        gaps.len(),
        statistic,
        degrees_of_freedom,
        critical
    );

    Ok(GapResult {
        verdict: Verdict::new(
            n,
            alpha,
            accepted,
            strings::INDEPENDENT,
            strings::NOT_INDEPENDENT,
        ),
        numbers,
        a,
        b,
        p,
        gaps,
        statistic: Some(GapStatistic {
            rows,
            statistic,
            critical,
            degrees_of_freedom,
        }),
    })
}

// ----------------------------------------------------------------------------
// Dispatch
// ----------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TestKind {
    ChiSquared,
    KolmogorovSmirnov,
    UpDown,
    UpDownMean,
    Gap,
}

impl TestKind {
    pub const ALL: [TestKind; 5] = [
        TestKind::ChiSquared,
        TestKind::KolmogorovSmirnov,
        TestKind::UpDown,
        TestKind::UpDownMean,
        TestKind::Gap,
    ];

    pub fn name(self) -> &'static str {
        strings::TEST_NAMES[self as usize]
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TestReport {
    ChiSquared(ChiSquaredResult),
    KolmogorovSmirnov(KsResult),
    UpDown(UpDownResult),
    UpDownMean(UpDownMeanResult),
    Gap(GapResult),
}

impl TestReport {
    pub fn kind(&self) -> TestKind {
        match self {
            TestReport::ChiSquared(_) => TestKind::ChiSquared,
            TestReport::KolmogorovSmirnov(_) => TestKind::KolmogorovSmirnov,
            TestReport::UpDown(_) => TestKind::UpDown,
            TestReport::UpDownMean(_) => TestKind::UpDownMean,
            TestReport::Gap(_) => TestKind::Gap,
        }
    }

    pub fn verdict(&self) -> &Verdict {
        match self {
            TestReport::ChiSquared(r) => &r.verdict,
            TestReport::KolmogorovSmirnov(r) => &r.verdict,
            TestReport::UpDown(r) => &r.verdict,
            TestReport::UpDownMean(r) => &r.verdict,
            TestReport::Gap(r) => &r.verdict,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

/// Run a single test with the parameters from `config`.
pub fn run_test(
    kind: TestKind,
    input: &TestInput,
    config: &TestConfig,
) -> Result<TestReport, ConfigError> {
    let alpha = config.alpha;
    Ok(match kind {
        TestKind::ChiSquared => {
            TestReport::ChiSquared(chi_squared(input, alpha, config.intervals)?)
        }
        TestKind::KolmogorovSmirnov => {
            TestReport::KolmogorovSmirnov(kolmogorov_smirnov(input, alpha)?)
        }
        TestKind::UpDown => TestReport::UpDown(up_down_runs(input, alpha)?),
        TestKind::UpDownMean => TestReport::UpDownMean(up_down_mean_runs(input, alpha)?),
        TestKind::Gap => {
            let (a, b) = config.gap_interval;
            TestReport::Gap(gap_test(input, alpha, a, b)?)
        }
    })
}

/// Perform every test listed in `TestKind::ALL` on the same sequence.
/// Tests that cannot run on it (e.g. Kolmogorov-Smirnov beyond 20 values) keep their error.
pub fn test_suite(
    numbers: &[f64],
    config: &TestConfig,
) -> Vec<(TestKind, Result<TestReport, ConfigError>)> {
    let input = TestInput::Sequence(numbers);
    TestKind::ALL
        .into_iter()
        .map(|kind| (kind, run_test(kind, &input, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// `count` numbers at the centres of `count` equal slices of 0..1.
    fn evenly_spread(count: usize) -> Vec<f64> {
        (0..count).map(|i| (i as f64 + 0.5) / count as f64).collect()
    }

    #[test]
    fn up_down_strictly_increasing_is_a_single_run() {
        let numbers: Vec<f64> = (0..30).map(|i| i as f64 / 30.0).collect();
        let result = up_down_runs(&TestInput::Sequence(&numbers), 0.05).unwrap();
        assert_eq!(result.runs, 1);
        assert!(close(result.expected_runs, 59.0 / 3.0));
        assert!(close(result.variance, (16.0 * 30.0 - 29.0) / 90.0));
        assert!(!result.verdict.accepted);
        assert_eq!(result.verdict.conclusion, strings::NOT_RANDOM);
        assert!(result.symbols().iter().all(|&d| d == Direction::Up));
    }

    #[test]
    fn up_down_equal_values_count_as_down() {
        let numbers = [0.5, 0.5, 0.7, 0.2];
        let result = up_down_runs(&TestInput::Sequence(&numbers), 0.05).unwrap();
        let symbols: String = result.symbols().iter().map(|d| d.symbol()).collect();
        assert_eq!(symbols, "-+-");
        assert_eq!(result.runs, 3);
        let runs: Vec<usize> = result.rows.iter().map(|r| r.run).collect();
        assert_eq!(runs, vec![1, 2, 3]);
        assert_eq!(result.rows[0].index, 2);
        assert_eq!(result.rows[2].previous, 0.7);
    }

    #[test]
    fn up_down_needs_two_values() {
        let err = up_down_runs(&TestInput::Sequence(&[0.3]), 0.05).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InsufficientData {
                required: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn up_down_mean_alternating() {
        let numbers = [0.1, 0.9, 0.1, 0.9, 0.1, 0.9];
        let input = TestInput::Sequence(&numbers);
        let result = up_down_mean_runs(&input, 0.05).unwrap();
        assert_eq!((result.below, result.above), (3, 3));
        assert_eq!(result.runs, 6);
        assert!(close(result.expected_runs, 3.5));
        assert!(close(result.variance, 1.2));
        assert!(close(result.z0, 2.5 / 1.2f64.sqrt()));
        assert!(!result.verdict.accepted);
        // Z0 ~ 2.28 lies below the 1% critical value of ~2.58
        assert!(up_down_mean_runs(&input, 0.01).unwrap().verdict.accepted);
    }

    #[test]
    fn up_down_mean_constant_sequence_rejects() {
        let numbers = [0.5; 6];
        let result = up_down_mean_runs(&TestInput::Sequence(&numbers), 0.05).unwrap();
        assert_eq!(result.below, 0);
        assert_eq!(result.variance, 0.0);
        assert!(result.z0.is_infinite());
        assert!(!result.verdict.accepted);
    }

    #[test]
    fn ks_reference_sequence() {
        let numbers = [0.1, 0.3, 0.5, 0.7, 0.9];
        let result = kolmogorov_smirnov(&TestInput::Sequence(&numbers), 0.05).unwrap();
        assert!((result.d_plus - 0.1).abs() < 1e-12);
        assert!((result.d_minus - 0.1).abs() < 1e-12);
        assert!((result.d - 0.1).abs() < 1e-12);
        assert!((result.d_critical - 0.608210).abs() < 1e-6);
        assert!(result.verdict.accepted);
        assert_eq!(result.verdict.conclusion, strings::UNIFORM);
    }

    #[test]
    fn ks_sorts_but_keeps_original_order_in_rows() {
        let numbers = [0.9, 0.1, 0.5];
        let result = kolmogorov_smirnov(&TestInput::Sequence(&numbers), 0.10).unwrap();
        assert_eq!(result.sorted, vec![0.1, 0.5, 0.9]);
        assert_eq!(result.rows[0].value, 0.9);
        assert_eq!(result.rows[0].sorted, 0.1);
        assert_eq!(result.rows[2].upper, 1.0);
        assert_eq!(result.rows[0].lower, 0.0);
    }

    #[test]
    fn ks_clustered_values_reject() {
        let numbers = [0.01, 0.02, 0.03, 0.04, 0.05, 0.06];
        let result = kolmogorov_smirnov(&TestInput::Sequence(&numbers), 0.01).unwrap();
        assert!(result.d > result.d_critical);
        assert!(!result.verdict.accepted);
    }

    #[test]
    fn ks_configuration_errors() {
        let numbers = [0.5; 5];
        assert_eq!(
            kolmogorov_smirnov(&TestInput::Sequence(&numbers), 0.02).unwrap_err(),
            ConfigError::UnsupportedSignificance(0.02)
        );
        let many = [0.5; 21];
        assert_eq!(
            kolmogorov_smirnov(&TestInput::Sequence(&many), 0.05).unwrap_err(),
            ConfigError::TooManyValues {
                max: 20,
                actual: 21
            }
        );
        assert!(kolmogorov_smirnov(&TestInput::Sequence(&[]), 0.05).is_err());
    }

    #[test]
    fn chi_squared_perfectly_uniform_is_zero() {
        let numbers = evenly_spread(100);
        for alpha in [0.10, 0.05, 0.01] {
            let result = chi_squared(&TestInput::Sequence(&numbers), alpha, 5).unwrap();
            assert_eq!(result.statistic, 0.0);
            assert!(result.rows.iter().all(|row| row.observed == 20));
            assert_eq!(result.degrees_of_freedom, 4);
            assert!(result.verdict.accepted);
        }
    }

    #[test]
    fn chi_squared_concentrated_values_reject() {
        let numbers = [0.05; 50];
        let result = chi_squared(&TestInput::Sequence(&numbers), 0.05, 5).unwrap();
        let observed: Vec<usize> = result.rows.iter().map(|row| row.observed).collect();
        assert_eq!(observed, vec![50, 0, 0, 0, 0]);
        assert!(close(result.statistic, 200.0));
        assert!((result.critical - 9.487729).abs() < 1e-3);
        assert!(!result.verdict.accepted);
    }

    #[test]
    fn chi_squared_rejects_single_interval() {
        let numbers = [0.5; 5];
        assert_eq!(
            chi_squared(&TestInput::Sequence(&numbers), 0.05, 1).unwrap_err(),
            ConfigError::TooFewIntervals(1)
        );
    }

    #[test]
    fn gaps_drop_trailing_run() {
        let numbers = [0.5, 0.1, 0.5, 0.1, 0.2, 0.5, 0.9, 0.9, 0.9, 0.5, 0.1];
        assert_eq!(collect_gaps(&numbers, 0.3, 0.7), vec![0, 1, 2, 3]);
    }

    #[test]
    fn gap_category_windows() {
        use GapCategory::*;
        assert_eq!(gap_categories(0), vec![Length(0)]);
        assert_eq!(gap_categories(2), vec![Length(0), Length(1), Length(2)]);
        assert_eq!(
            gap_categories(3),
            vec![Length(0), Length(1), Length(2), Length(3)]
        );
        assert_eq!(
            gap_categories(7),
            vec![Length(0), Length(1), Length(2), Length(3), AtLeast(4)]
        );
        assert_eq!(AtLeast(4).to_string(), "≥4");
    }

    #[test]
    fn gap_test_longest_gap_three_has_no_tail() {
        let numbers = [0.5, 0.1, 0.5, 0.1, 0.2, 0.5, 0.9, 0.9, 0.9, 0.5, 0.1];
        let result = gap_test(&TestInput::Sequence(&numbers), 0.05, 0.3, 0.7).unwrap();
        let stat = result.statistic.unwrap();
        assert_eq!(stat.degrees_of_freedom, 3);
        assert_eq!(stat.rows.len(), 4);
        let p = 0.7 - 0.3;
        assert!(close(stat.rows[0].expected, 4.0 * p));
        assert!(close(stat.rows[3].expected, 4.0 * p * (1.0 - p).powi(3)));
        assert!(stat.rows.iter().all(|row| row.observed == 1));
    }

    #[test]
    fn gap_test_long_gaps_share_the_tail() {
        let mut numbers = vec![0.5];
        numbers.extend([0.9; 6]);
        numbers.push(0.5);
        numbers.extend([0.1; 4]);
        numbers.push(0.4);
        let result = gap_test(&TestInput::Sequence(&numbers), 0.05, 0.3, 0.7).unwrap();
        assert_eq!(result.gaps, vec![0, 6, 4]);
        let stat = result.statistic.unwrap();
        assert_eq!(stat.degrees_of_freedom, 4);
        let tail = stat.rows.last().unwrap();
        assert_eq!(tail.category, GapCategory::AtLeast(4));
        assert_eq!(tail.observed, 2);
        assert!(close(tail.expected, 3.0 * (1.0 - 0.4f64).powi(4)));
        assert!(stat.critical.is_some());
    }

    #[test]
    fn gap_test_without_gaps_reports_insufficient() {
        let numbers = [0.1, 0.9, 0.05, 0.95, 0.2];
        let result = gap_test(&TestInput::Sequence(&numbers), 0.05, 0.3, 0.7).unwrap();
        assert_eq!(result.total_gaps(), 0);
        assert!(result.statistic.is_none());
        assert!(!result.verdict.accepted);
        assert_eq!(result.verdict.conclusion, strings::INSUFFICIENT_GAPS);
    }

    #[test]
    fn gap_test_single_category_has_no_critical_value() {
        let numbers = [0.5, 0.5, 0.5];
        let result = gap_test(&TestInput::Sequence(&numbers), 0.05, 0.3, 0.7).unwrap();
        let stat = result.statistic.unwrap();
        assert_eq!(stat.degrees_of_freedom, 0);
        assert!(stat.critical.is_none());
        assert!(!result.verdict.accepted);
    }

    #[test]
    fn synthetic_input_is_reproducible() {
        let input = TestInput::Synthetic {
            n: 40,
            seed: Some(7),
        };
        let a = run_test(TestKind::UpDown, &input, &TestConfig::default()).unwrap();
        let b = run_test(TestKind::UpDown, &input, &TestConfig::default()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.verdict().n, 40);
    }

    #[test]
    fn suite_keeps_ks_error_for_long_sequences() {
        let numbers = evenly_spread(100);
        let results = test_suite(&numbers, &TestConfig::default());
        assert_eq!(results.len(), 5);
        for (kind, result) in results {
            match kind {
                TestKind::KolmogorovSmirnov => assert!(result.is_err()),
                _ => assert_eq!(result.unwrap().kind(), kind),
            }
        }
    }
}
