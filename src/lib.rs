// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Classical seed driven PRNGs and textbook hypothesis tests for uniformity and independence.

pub mod conditioning;
pub mod config;
pub mod error;
pub mod report;
pub mod rng_testing;
pub mod rngs;
pub mod session;
pub mod stats;
pub mod strings;
pub mod utils;

pub use error::ConfigError;
