// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Methods to turn generator states into numbers in the 0..1 range.

use crate::utils;

/// Maps a u64 to the 0..1 range in f64.
/// The destribution is uniform but only uses
/// the lower 52 bits of the u64.
/// Not all possible f64 in the output range are produced by this function.
pub fn u64_to_double(int: u64) -> f64 {
    let return_float = (int & 0x000fffffffffffff) | 0x3ff0000000000000;
    f64::from_bits(return_float) - 1.0
}

/// Largest f64 below 1.0.
const BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Quotients of integers wider than 53 bits can round up to 1.0.
fn below_one(quotient: f64) -> f64 {
    quotient.min(BELOW_ONE)
}

/// Normalize a state of at most `digits` decimal digits by dividing by 10^digits.
pub fn digits_to_double(state: u64, digits: u32) -> f64 {
    below_one(state as f64 / utils::pow10(digits) as f64)
}

/// Normalize a congruential state `0 <= state < modulus` by dividing by the modulus.
pub fn residue_to_double(state: i64, modulus: i64) -> f64 {
    below_one(state as f64 / modulus as f64)
}
