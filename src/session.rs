// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! The most recently generated sequence, kept so it can be fed into tests.

use std::fmt;

use crate::{
    rng_testing::TestInput,
    rngs::{self, LinearParams, Method, Seed, SeedPair},
};

/// Seed material a run was generated from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SeedSpec {
    Single(Seed),
    Pair(SeedPair),
    Linear(LinearParams),
}

impl fmt::Display for SeedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedSpec::Single(seed) => write!(f, "{}", seed),
            SeedSpec::Pair(seeds) => write!(f, "{}", seeds),
            SeedSpec::Linear(params) => write!(f, "{}", params.seed()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRun {
    pub method: Method,
    pub seeds: SeedSpec,
    pub numbers: Vec<f64>,
}

impl GeneratedRun {
    pub fn linear(params: LinearParams, count: usize) -> Self {
        GeneratedRun {
            method: Method::Linear,
            seeds: SeedSpec::Linear(params),
            numbers: rngs::linear_algorithm(params, count),
        }
    }

    pub fn mean_squares(seed: Seed, count: usize) -> Self {
        GeneratedRun {
            method: Method::MeanSquares,
            seeds: SeedSpec::Single(seed),
            numbers: rngs::mean_squares(seed, count),
        }
    }

    pub fn constant_multiplier(seeds: SeedPair, count: usize) -> Self {
        GeneratedRun {
            method: Method::ConstantMultiplier,
            seeds: SeedSpec::Pair(seeds),
            numbers: rngs::constant_multiplier(seeds, count),
        }
    }

    pub fn middle_product(seeds: SeedPair, count: usize) -> Self {
        GeneratedRun {
            method: Method::MiddleProduct,
            seeds: SeedSpec::Pair(seeds),
            numbers: rngs::middle_product(seeds, count),
        }
    }
}

/// Owned by the command layer, replaced wholesale on every new generation.
#[derive(Debug, Default)]
pub struct Session {
    last: Option<GeneratedRun>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    /// Store `run` as the last generated sequence, dropping the previous one.
    pub fn record(&mut self, run: GeneratedRun) -> &GeneratedRun {
        log::debug!(
            "session: stored {} values from {}",
            run.numbers.len(),
            run.method
        );
        self.last.insert(run)
    }

    /// The cached sequence when there is one, otherwise a request for `n` synthetic draws.
    pub fn test_input(&self, n: usize, seed: Option<u64>) -> TestInput<'_> {
        match &self.last {
            Some(run) => TestInput::Sequence(&run.numbers),
            None => TestInput::Synthetic { n, seed },
        }
    }
}
