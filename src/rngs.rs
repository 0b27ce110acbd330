// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Implementation of the classical seed driven generators.
//! All implement the Generator interface and produce numbers in 0..1.
//! The free functions at the bottom are the pure sequence producing entry points.

use std::{fmt, str::FromStr};

use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{conditioning, error::ConfigError, utils};

/// Squares and products of seeds this long still fit a u128.
pub const MAX_SEED_DIGITS: u32 = 18;

/// General trait for the generators.
pub trait Generator {
    /// Advance the state one step and return the normalized output.
    fn next_f64(&mut self) -> f64;
    /// Generate `count` consecutive outputs.
    fn take_sequence(&mut self, count: usize) -> Vec<f64> {
        (0..count).map(|_| self.next_f64()).collect()
    }
}

/// Seed for the digit extraction methods.
/// Has an even, non-zero number of decimal digits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Seed {
    value: u64,
    digits: u32,
}

impl Seed {
    pub fn new(value: u64) -> Result<Self, ConfigError> {
        let digits = utils::decimal_digits(value as u128);
        if digits > MAX_SEED_DIGITS {
            return Err(ConfigError::SeedTooLong(value));
        }
        if digits % 2 != 0 {
            return Err(ConfigError::OddDigitSeed(value));
        }
        Ok(Seed { value, digits })
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }
}

impl FromStr for Seed {
    type Err = ConfigError;

    /// Leading zeros are dropped, the digit count is that of the parsed integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidSeed(s.to_owned()));
        }
        let value: u64 = s
            .parse()
            .map_err(|_| ConfigError::InvalidSeed(s.to_owned()))?;
        Seed::new(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Two seeds sharing the same digit count.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SeedPair {
    first: Seed,
    second: Seed,
}

impl SeedPair {
    pub fn new(first: Seed, second: Seed) -> Result<Self, ConfigError> {
        if first.digits != second.digits {
            return Err(ConfigError::SeedLengthMismatch(first.value, second.value));
        }
        Ok(SeedPair { first, second })
    }

    pub fn first(&self) -> Seed {
        self.first
    }

    pub fn second(&self) -> Seed {
        self.second
    }

    pub fn digits(&self) -> u32 {
        self.first.digits
    }
}

impl fmt::Display for SeedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.first, self.second)
    }
}

/// The generation methods offered to callers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Method {
    Linear,
    MeanSquares,
    ConstantMultiplier,
    MiddleProduct,
}

impl Method {
    pub fn name(self) -> &'static str {
        match self {
            Method::Linear => "Linear Congruential",
            Method::MeanSquares => "Mean Squares",
            Method::ConstantMultiplier => "Constant Multiplier",
            Method::MiddleProduct => "Middle Product",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Uniform reference source backed by the rand crates StdRng.
/// Used to synthesize sequences when a test gets no input.
pub struct UniformSource {
    rng: StdRng,
}

impl UniformSource {
    /// Seeded sources are reproducible, unseeded ones draw their seed from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        UniformSource { rng }
    }
}

impl Generator for UniformSource {
    fn next_f64(&mut self) -> f64 {
        conditioning::u64_to_double(self.rng.next_u64())
    }
}

// Linear congruential generators
pub mod lcg {
    use super::Generator;
    use crate::{conditioning, error::ConfigError};

    /// Seed X0, multiplier a, increment c and modulus m of the recurrence
    /// X(i+1) = (a * X(i) + c) mod m.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub struct LinearParams {
        seed: i64,
        multiplier: i64,
        increment: i64,
        modulus: i64,
    }

    impl LinearParams {
        pub fn new(
            seed: i64,
            multiplier: i64,
            increment: i64,
            modulus: i64,
        ) -> Result<Self, ConfigError> {
            if modulus <= 0 {
                return Err(ConfigError::NonPositiveModulus(modulus));
            }
            Ok(LinearParams {
                seed,
                multiplier,
                increment,
                modulus,
            })
        }

        pub fn seed(&self) -> i64 {
            self.seed
        }

        pub fn multiplier(&self) -> i64 {
            self.multiplier
        }

        pub fn increment(&self) -> i64 {
            self.increment
        }

        pub fn modulus(&self) -> i64 {
            self.modulus
        }
    }

    /// Outputs X(i+1) / m, the seed itself is never emitted.
    #[derive(Debug, Copy, Clone)]
    pub struct LinearCongruential {
        params: LinearParams,
        state: i64,
    }

    impl LinearCongruential {
        pub fn new(params: LinearParams) -> Self {
            LinearCongruential {
                params,
                state: params.seed,
            }
        }

        pub fn state(&self) -> i64 {
            self.state
        }
    }

    impl Generator for LinearCongruential {
        fn next_f64(&mut self) -> f64 {
            let p = &self.params;
            // i128 keeps a * X + c exact, rem_euclid keeps the residue non-negative.
            let next = (p.multiplier as i128 * self.state as i128 + p.increment as i128)
                .rem_euclid(p.modulus as i128);
            self.state = next as i64;
            conditioning::residue_to_double(self.state, p.modulus)
        }
    }
}

/// Generators that square or multiply L digit states and keep the middle L digits.
pub mod middle {
    use super::{Generator, Seed, SeedPair};
    use crate::{conditioning, utils};

    /// Middle `digits` digits of a product zero padded to 2 * `digits`.
    /// The window starts at len / 2 - digits / 2 and is `digits` wide.
    fn middle_of_product(product: u128, digits: u32) -> u64 {
        let len = utils::padded_len(product, 2 * digits);
        let start = len / 2 - digits / 2;
        utils::digit_window(product, len, start, start + digits)
    }

    /// Von Neumann's middle-square method.
    /// A state of zero is absorbing and is reproduced as such.
    #[derive(Debug, Copy, Clone)]
    pub struct MeanSquares {
        state: u64,
        digits: u32,
    }

    impl MeanSquares {
        pub fn new(seed: Seed) -> Self {
            MeanSquares {
                state: seed.value(),
                digits: seed.digits(),
            }
        }

        pub fn state(&self) -> u64 {
            self.state
        }
    }

    impl Generator for MeanSquares {
        fn next_f64(&mut self) -> f64 {
            let square = self.state as u128 * self.state as u128;
            let len = utils::padded_len(square, 2 * self.digits);
            let mid = len / 2;
            let next = utils::digit_window(
                square,
                len,
                mid - self.digits / 2,
                mid + self.digits / 2,
            );
            if next == 0 && self.state != 0 {
                log::warn!("mean squares state {} collapsed to zero", self.state);
            }
            self.state = next;
            conditioning::digits_to_double(self.state, self.digits)
        }
    }

    /// The first seed is a fixed multiplier, only the second one is replaced each step.
    #[derive(Debug, Copy, Clone)]
    pub struct ConstantMultiplier {
        multiplier: u64,
        state: u64,
        digits: u32,
    }

    impl ConstantMultiplier {
        pub fn new(seeds: SeedPair) -> Self {
            ConstantMultiplier {
                multiplier: seeds.first().value(),
                state: seeds.second().value(),
                digits: seeds.digits(),
            }
        }

        pub fn multiplier(&self) -> u64 {
            self.multiplier
        }

        pub fn state(&self) -> u64 {
            self.state
        }
    }

    impl Generator for ConstantMultiplier {
        fn next_f64(&mut self) -> f64 {
            let product = self.multiplier as u128 * self.state as u128;
            self.state = middle_of_product(product, self.digits);
            conditioning::digits_to_double(self.state, self.digits)
        }
    }

    /// Two term recurrence, both seeds shift one position every step.
    #[derive(Debug, Copy, Clone)]
    pub struct MiddleProduct {
        previous: u64,
        current: u64,
        digits: u32,
    }

    impl MiddleProduct {
        pub fn new(seeds: SeedPair) -> Self {
            MiddleProduct {
                previous: seeds.first().value(),
                current: seeds.second().value(),
                digits: seeds.digits(),
            }
        }

        pub fn state(&self) -> (u64, u64) {
            (self.previous, self.current)
        }
    }

    impl Generator for MiddleProduct {
        fn next_f64(&mut self) -> f64 {
            let product = self.previous as u128 * self.current as u128;
            let next = middle_of_product(product, self.digits);
            self.previous = self.current;
            self.current = next;
            conditioning::digits_to_double(next, self.digits)
        }
    }
}

pub use lcg::LinearParams;

/// Sequence of `count` numbers from the linear congruential recurrence.
pub fn linear_algorithm(params: LinearParams, count: usize) -> Vec<f64> {
    log::debug!(
        "linear congruential: X0={} a={} c={} m={} count={}",
        params.seed(),
        params.multiplier(),
        params.increment(),
        params.modulus(),
        count
    );
    lcg::LinearCongruential::new(params).take_sequence(count)
}

/// Sequence of `count` numbers from the middle-square method.
pub fn mean_squares(seed: Seed, count: usize) -> Vec<f64> {
    log::debug!("mean squares: seed={} count={}", seed, count);
    middle::MeanSquares::new(seed).take_sequence(count)
}

/// Sequence of `count` numbers from the constant multiplier method.
pub fn constant_multiplier(seeds: SeedPair, count: usize) -> Vec<f64> {
    log::debug!("constant multiplier: seeds={} count={}", seeds, count);
    middle::ConstantMultiplier::new(seeds).take_sequence(count)
}

/// Sequence of `count` numbers from the middle product method.
pub fn middle_product(seeds: SeedPair, count: usize) -> Vec<f64> {
    log::debug!("middle product: seeds={} count={}", seeds, count);
    middle::MiddleProduct::new(seeds).take_sequence(count)
}

/// `count` uniform draws in 0..1, reproducible when `seed` is given.
pub fn uniform(count: usize, seed: Option<u64>) -> Vec<f64> {
    UniformSource::new(seed).take_sequence(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(a: u64, b: u64) -> SeedPair {
        SeedPair::new(Seed::new(a).unwrap(), Seed::new(b).unwrap()).unwrap()
    }

    #[test]
    fn seed_requires_even_digit_count() {
        assert_eq!(Seed::new(1234).unwrap().digits(), 4);
        assert_eq!(Seed::new(123), Err(ConfigError::OddDigitSeed(123)));
        assert_eq!(Seed::new(0), Err(ConfigError::OddDigitSeed(0)));
        assert_eq!(
            Seed::new(12_345_678_901_234_567_890),
            Err(ConfigError::SeedTooLong(12_345_678_901_234_567_890))
        );
    }

    #[test]
    fn seed_parsing() {
        assert_eq!("5735".parse::<Seed>().unwrap().value(), 5735);
        assert_eq!("0012".parse::<Seed>().unwrap().digits(), 2);
        assert!(matches!("12a4".parse::<Seed>(), Err(ConfigError::InvalidSeed(_))));
        assert!(matches!("".parse::<Seed>(), Err(ConfigError::InvalidSeed(_))));
        assert!(matches!("-12".parse::<Seed>(), Err(ConfigError::InvalidSeed(_))));
    }

    #[test]
    fn seed_pair_requires_equal_lengths() {
        let err = SeedPair::new(Seed::new(12).unwrap(), Seed::new(1234).unwrap());
        assert_eq!(err, Err(ConfigError::SeedLengthMismatch(12, 1234)));
    }

    #[test]
    fn linear_params_reject_non_positive_modulus() {
        assert_eq!(
            LinearParams::new(7, 7, 7, 0),
            Err(ConfigError::NonPositiveModulus(0))
        );
        assert!(LinearParams::new(7, 7, 7, -3).is_err());
    }

    #[test]
    fn linear_congruential_reference_sequence() {
        let params = LinearParams::new(7, 7, 7, 9).unwrap();
        let seq = linear_algorithm(params, 6);
        let expected = [2.0, 3.0, 1.0, 5.0, 6.0, 4.0].map(|x| x / 9.0);
        assert_eq!(seq, expected);
    }

    #[test]
    fn linear_congruential_negative_inputs_stay_in_range() {
        let params = LinearParams::new(-5, 3, -1, 7).unwrap();
        let seq = linear_algorithm(params, 10);
        assert!(seq.iter().all(|&x| (0.0..1.0).contains(&x)));
        // (3 * -5 - 1) mod 7 = 5
        assert_eq!(seq[0], 5.0 / 7.0);
    }

    #[test]
    fn linear_congruential_wide_modulus_stays_below_one() {
        let m = (1i64 << 60) + 1;
        let params = LinearParams::new(0, 1, 1 << 60, m).unwrap();
        let seq = linear_algorithm(params, 3);
        assert!(seq.iter().all(|&x| (0.0..1.0).contains(&x)));
        let params = LinearParams::new(i64::MAX - 2, 1, 1, i64::MAX).unwrap();
        assert!(linear_algorithm(params, 1)[0] < 1.0);
    }

    #[test]
    fn eighteen_digit_seeds_stay_below_one() {
        let seed = Seed::new(999_999_999_999_999_999).unwrap();
        let seeds = pair(999_999_999_999_999_999, 999_999_999_999_999_998);
        for seq in [
            mean_squares(seed, 20),
            constant_multiplier(seeds, 20),
            middle_product(seeds, 20),
        ] {
            assert!(seq.iter().all(|&x| (0.0..1.0).contains(&x)));
        }
    }

    #[test]
    fn mean_squares_reference_sequence() {
        let seq = mean_squares(Seed::new(1234).unwrap(), 4);
        assert_eq!(seq, vec![0.5227, 0.3215, 0.3362, 0.303]);
        let seq = mean_squares(Seed::new(5735).unwrap(), 6);
        assert_eq!(seq, vec![0.8902, 0.2456, 0.0319, 0.1017, 0.0342, 0.1169]);
    }

    #[test]
    fn mean_squares_zero_is_absorbing() {
        let mut generator = middle::MeanSquares::new(Seed::new(1000).unwrap());
        assert_eq!(generator.take_sequence(3), vec![0.0, 0.0, 0.0]);
        assert_eq!(generator.state(), 0);
    }

    #[test]
    fn constant_multiplier_keeps_first_seed() {
        let mut generator = middle::ConstantMultiplier::new(pair(12, 34));
        assert_eq!(generator.take_sequence(4), vec![0.4, 0.48, 0.57, 0.68]);
        assert_eq!(generator.multiplier(), 12);
        assert_eq!(generator.state(), 68);
        assert_eq!(
            constant_multiplier(pair(9803, 5735), 3),
            vec![0.2202, 0.5862, 0.4651]
        );
    }

    #[test]
    fn middle_product_rotates_both_seeds() {
        let mut generator = middle::MiddleProduct::new(pair(12, 34));
        assert_eq!(generator.take_sequence(4), vec![0.4, 0.36, 0.44, 0.58]);
        assert_eq!(generator.state(), (44, 58));
        assert_eq!(
            middle_product(pair(5015, 5734), 3),
            vec![0.756, 0.349, 0.3844]
        );
    }

    #[test]
    fn seeded_uniform_source_is_reproducible() {
        let a = uniform(50, Some(42));
        let b = uniform(50, Some(42));
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| (0.0..1.0).contains(&x)));
    }
}
