// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Command line front end: generate sequences and run the hypothesis tests on them.

use clap::{Args, Parser, Subcommand, ValueEnum};

use randlab::{
    config::{self, TestConfig},
    report,
    rng_testing::{self, TestInput, TestKind},
    rngs::{LinearParams, Seed, SeedPair},
    session::{GeneratedRun, Session},
    stats::Significance,
    ConfigError,
};

#[derive(Parser)]
#[command(name = "randlab")]
#[command(about = "Classical pseudo random generators and statistical tests for their output")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a sequence, optionally feeding it into tests
    Generate {
        #[arg(value_enum)]
        method: MethodArg,

        /// Seed (X0 for the linear method). Digit methods need an even digit count
        #[arg(long)]
        seed: String,

        /// Second seed for constant-multiplier and middle-product
        #[arg(long)]
        seed2: Option<String>,

        /// Multiplier of the linear method
        #[arg(short = 'a', long, required_if_eq("method", "linear"))]
        multiplier: Option<i64>,

        /// Increment of the linear method
        #[arg(short = 'c', long, required_if_eq("method", "linear"))]
        increment: Option<i64>,

        /// Modulus of the linear method
        #[arg(short = 'm', long, required_if_eq("method", "linear"))]
        modulus: Option<i64>,

        /// Amount of numbers to generate
        #[arg(long, default_value_t = config::DEFAULT_SAMPLE_SIZE)]
        count: usize,

        /// Test to run on the generated numbers, may be repeated
        #[arg(long = "test", value_enum)]
        tests: Vec<TestArg>,

        #[command(flatten)]
        params: TestParams,
    },

    /// Run tests on synthesized uniform numbers
    Test {
        #[arg(value_enum)]
        kind: TestArg,

        /// Amount of numbers to synthesize
        #[arg(long, default_value_t = config::DEFAULT_SAMPLE_SIZE)]
        n: usize,

        /// Seed for the synthesized numbers, random when omitted
        #[arg(long)]
        rng_seed: Option<u64>,

        #[command(flatten)]
        params: TestParams,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    Linear,
    MeanSquares,
    ConstantMultiplier,
    MiddleProduct,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TestArg {
    ChiSquared,
    Ks,
    UpDown,
    UpDownMean,
    Gap,
    All,
}

impl TestArg {
    fn kinds(self) -> Vec<TestKind> {
        match self {
            TestArg::ChiSquared => vec![TestKind::ChiSquared],
            TestArg::Ks => vec![TestKind::KolmogorovSmirnov],
            TestArg::UpDown => vec![TestKind::UpDown],
            TestArg::UpDownMean => vec![TestKind::UpDownMean],
            TestArg::Gap => vec![TestKind::Gap],
            TestArg::All => TestKind::ALL.to_vec(),
        }
    }
}

#[derive(Args)]
struct TestParams {
    /// Significance level
    #[arg(long, conflicts_with = "confidence")]
    alpha: Option<f64>,

    /// Confidence level in percent: 90, 95 or 99
    #[arg(long)]
    confidence: Option<u32>,

    /// Number of intervals of the chi-squared test
    #[arg(long, default_value_t = config::DEFAULT_INTERVALS)]
    intervals: usize,

    /// Lower bound of the gap test interval
    #[arg(long, default_value_t = config::DEFAULT_GAP_INTERVAL.0)]
    gap_a: f64,

    /// Upper bound (exclusive) of the gap test interval
    #[arg(long, default_value_t = config::DEFAULT_GAP_INTERVAL.1)]
    gap_b: f64,
}

impl TestParams {
    fn to_config(&self, synth_seed: Option<u64>) -> Result<TestConfig, ConfigError> {
        let alpha = match self.confidence {
            Some(percent) => Significance::from_confidence(percent)?.alpha(),
            None => self.alpha.unwrap_or(config::DEFAULT_ALPHA),
        };
        let config = TestConfig {
            alpha,
            intervals: self.intervals,
            gap_interval: (self.gap_a, self.gap_b),
            synth_seed,
        };
        config.validate()?;
        Ok(config)
    }
}

fn seed_pair(seed: &str, seed2: Option<&str>) -> Result<SeedPair, ConfigError> {
    let second = seed2.ok_or(ConfigError::MissingSecondSeed)?;
    SeedPair::new(seed.parse()?, second.parse()?)
}

fn linear_seed(seed: &str) -> Result<i64, ConfigError> {
    seed.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidSeed(seed.to_owned()))
}

/// Print each report, an error only skips its own test.
fn run_tests(kinds: &[TestKind], input: &TestInput, config: &TestConfig) {
    let mut results = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        let result = rng_testing::run_test(kind, input, config);
        match &result {
            Ok(test_report) => println!("\n{}", report::format_test_report(test_report)),
            Err(e) => log::error!("{} test not run: {}", kind, e),
        }
        results.push((kind, result));
    }
    if results.len() > 1 {
        println!("\n{}", report::format_suite_summary(&results));
    }
}

fn run(cli: Cli) -> Result<(), ConfigError> {
    match cli.command {
        Commands::Generate {
            method,
            seed,
            seed2,
            multiplier,
            increment,
            modulus,
            count,
            tests,
            params,
        } => {
            let count = config::validate_count(count, 1)?;
            let config = params.to_config(None)?;
            let run = match method {
                MethodArg::Linear => {
                    let params = LinearParams::new(
                        linear_seed(&seed)?,
                        multiplier.unwrap_or(0),
                        increment.unwrap_or(0),
                        modulus.unwrap_or(0),
                    )?;
                    GeneratedRun::linear(params, count)
                }
                MethodArg::MeanSquares => GeneratedRun::mean_squares(seed.parse::<Seed>()?, count),
                MethodArg::ConstantMultiplier => {
                    GeneratedRun::constant_multiplier(seed_pair(&seed, seed2.as_deref())?, count)
                }
                MethodArg::MiddleProduct => {
                    GeneratedRun::middle_product(seed_pair(&seed, seed2.as_deref())?, count)
                }
            };
            let mut session = Session::new();
            let run = session.record(run);
            println!("{}", report::header(run.method.name(), chrono::Local::now()));
            println!("{}", report::format_generated_run(run));

            let mut kinds: Vec<TestKind> = vec![];
            for kind in tests.iter().flat_map(|t| t.kinds()) {
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
            if !kinds.is_empty() {
                run_tests(&kinds, &session.test_input(count, None), &config);
            }
        }
        Commands::Test {
            kind,
            n,
            rng_seed,
            params,
        } => {
            let config = params.to_config(rng_seed)?;
            let title = match kind {
                TestArg::All => "Test suite".to_owned(),
                _ => format!("{} test", kind.kinds()[0]),
            };
            println!("{}", report::header(&title, chrono::Local::now()));
            // One synthetic draw shared by every requested test.
            let numbers = TestInput::Synthetic {
                n,
                seed: config.synth_seed,
            }
            .numbers();
            run_tests(&kind.kinds(), &TestInput::Sequence(&numbers), &config);
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
