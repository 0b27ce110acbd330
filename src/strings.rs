// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! User interaction strings are stored here.

pub const FAIL_STR: &str = "REJECTED";
pub const PASS_STR: &str = "ACCEPTED";

pub const UNIFORM: &str = "The numbers are uniform";
pub const NOT_UNIFORM: &str = "The numbers are not uniform";
pub const RANDOM: &str = "The numbers are random";
pub const NOT_RANDOM: &str = "The numbers are not random";
pub const INDEPENDENT: &str = "The numbers are independent";
pub const NOT_INDEPENDENT: &str = "The numbers are not independent";
pub const INSUFFICIENT_GAPS: &str = "Not enough gaps were found to run the test";

pub const TEST_NAMES: [&str; 5] = [
    "Chi-Squared",
    "Kolmogorov-Smirnov",
    "Up-Down Runs",
    "Up-Down Mean Runs",
    "Gap",
];

pub fn verdict_str(accepted: bool) -> &'static str {
    if accepted {
        PASS_STR
    } else {
        FAIL_STR
    }
}
