// Copyright 2025 N. Dornseif
//
// Dual-licensed under Apache 2.0 and MIT terms.

//! Plain text rendering of generated sequences and test results.

use chrono::{DateTime, Local};

use crate::{
    error::ConfigError,
    rng_testing::{
        ChiSquaredResult, Direction, GapResult, KsResult, TestKind, TestReport, UpDownMeanResult,
        UpDownResult,
    },
    session::{GeneratedRun, SeedSpec},
    stats, strings,
    utils::format_value,
};

const RULE_WIDTH: usize = 80;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Title block stamped with the time of rendering.
pub fn header(title: &str, now: DateTime<Local>) -> String {
    format!(
        "{}\n{}  ({})\n{}",
        rule(),
        title.to_uppercase(),
        now.format("%Y-%m-%d %H:%M:%S"),
        rule()
    )
}

/// Key/value rows with the keys padded to a common width.
fn key_values(rows: &[(&str, String)]) -> Vec<String> {
    let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    rows.iter()
        .map(|(k, v)| format!("  {:<width$} : {}", k, v, width = width))
        .collect()
}

/// Parameters, indexed values and summary statistics of a generator run.
pub fn format_generated_run(run: &GeneratedRun) -> String {
    let count = run.numbers.len();
    let mut params = vec![
        ("Method", run.method.to_string()),
        ("Seed(s)", run.seeds.to_string()),
    ];
    if let SeedSpec::Linear(p) = run.seeds {
        params.push(("a", p.multiplier().to_string()));
        params.push(("c", p.increment().to_string()));
        params.push(("m", p.modulus().to_string()));
    }
    params.push(("Count", count.to_string()));

    let mut lines = key_values(&params);
    lines.push(String::new());
    lines.push(format!("{:>6}   {}", "i", "ri"));
    lines.extend(
        run.numbers
            .iter()
            .enumerate()
            .map(|(i, &x)| format!("{:>6}   {}", i + 1, format_value(x, 6))),
    );
    if count > 0 {
        let min = run.numbers.iter().copied().fold(f64::INFINITY, f64::min);
        let max = run.numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        lines.push(String::new());
        lines.extend(key_values(&[
            ("Mean", format_value(stats::mean(&run.numbers), 6)),
            ("Min", format_value(min, 6)),
            ("Max", format_value(max, 6)),
            ("Count", count.to_string()),
        ]));
    }
    lines.join("\n")
}

fn chi_squared_lines(r: &ChiSquaredResult) -> Vec<String> {
    let mut lines = key_values(&[
        ("Chi-squared (X2)", format_value(r.statistic, 6)),
        ("Critical X2", format_value(r.critical, 6)),
        ("Degrees of freedom", r.degrees_of_freedom.to_string()),
    ]);
    lines.push(String::new());
    lines.push(format!(
        "{:<16} {:>8} {:>10} {:>12}",
        "Interval", "FO", "FE", "(FO-FE)^2/FE"
    ));
    lines.extend(r.rows.iter().map(|row| {
        format!(
            "{:<16} {:>8} {:>10} {:>12}",
            format!("[{:.2}, {:.2})", row.lower, row.upper),
            row.observed,
            format_value(row.expected, 4),
            format_value(row.contribution, 4)
        )
    }));
    lines
}

fn ks_lines(r: &KsResult) -> Vec<String> {
    let mut lines = key_values(&[
        ("D+", format_value(r.d_plus, 6)),
        ("D-", format_value(r.d_minus, 6)),
        ("D", format_value(r.d, 6)),
        ("Critical D", format_value(r.d_critical, 6)),
    ]);
    lines.push(String::new());
    lines.push(format!(
        "{:>4} {:>10} {:>10} {:>10} {:>10}",
        "i", "ri", "sorted", "i/n", "(i-1)/n"
    ));
    lines.extend(r.rows.iter().map(|row| {
        format!(
            "{:>4} {:>10} {:>10} {:>10} {:>10}",
            row.index,
            format_value(row.value, 6),
            format_value(row.sorted, 6),
            format_value(row.upper, 6),
            format_value(row.lower, 6)
        )
    }));
    lines
}

fn up_down_lines(r: &UpDownResult) -> Vec<String> {
    let mut lines = key_values(&[
        ("Observed runs (Co)", r.runs.to_string()),
        ("Expected runs", format_value(r.expected_runs, 4)),
        ("Standard deviation", format_value(r.std_dev, 4)),
        ("Z0", format_value(r.z0, 4)),
        ("Critical Z", format_value(r.z_critical, 4)),
    ]);
    lines.push(String::new());
    lines.push(format!("{:>4}   {:<20} {:>6} {:>6}", "i", "Comparison", "Symbol", "Run"));
    lines.extend(r.rows.iter().map(|row| {
        let op = match row.direction {
            Direction::Up => ">",
            Direction::Down => "<=",
        };
        format!(
            "{:>4}   {:<20} {:>6} {:>6}",
            row.index,
            format!(
                "{} {} {}",
                format_value(row.value, 4),
                op,
                format_value(row.previous, 4)
            ),
            row.direction,
            row.run
        )
    }));
    lines
}

fn up_down_mean_lines(r: &UpDownMeanResult) -> Vec<String> {
    let mut lines = key_values(&[
        ("Observed runs (Co)", r.runs.to_string()),
        ("Below mean (n0)", r.below.to_string()),
        ("Above mean (n1)", r.above.to_string()),
        ("Mean", format_value(r.mean, 6)),
        ("Expected runs", format_value(r.expected_runs, 4)),
        ("Standard deviation", format_value(r.std_dev, 4)),
        ("Z0", format_value(r.z0, 4)),
        ("Critical Z", format_value(r.z_critical, 4)),
    ]);
    lines.push(String::new());
    lines.push(format!("{:>4} {:>10} {:>3} {:<8} {:>6}", "i", "ri", "S", "Position", "Run"));
    lines.extend(r.rows.iter().map(|row| {
        format!(
            "{:>4} {:>10} {:>3} {:<8} {:>6}",
            row.index,
            format_value(row.value, 6),
            u8::from(row.above),
            if row.above { "Above" } else { "Below" },
            row.run
        )
    }));
    lines
}

fn gap_lines(r: &GapResult) -> Vec<String> {
    let mut params = vec![
        ("Interval", format!("[{}, {})", r.a, r.b)),
        ("p", format_value(r.p, 4)),
        ("Total gaps", r.total_gaps().to_string()),
    ];
    let Some(stat) = &r.statistic else {
        return key_values(&params);
    };
    params.extend([
        ("Chi-squared (X2)", format_value(stat.statistic, 6)),
        (
            "Critical X2",
            stat.critical
                .map_or_else(|| "n/a".to_owned(), |c| format_value(c, 6)),
        ),
        ("Degrees of freedom", stat.degrees_of_freedom.to_string()),
    ]);
    let mut lines = key_values(&params);
    lines.push(String::new());
    lines.push(format!(
        "{:<12} {:>8} {:>10} {:>12}",
        "Gap length", "FO", "FE", "(FO-FE)^2/FE"
    ));
    lines.extend(stat.rows.iter().map(|row| {
        format!(
            "{:<12} {:>8} {:>10} {:>12}",
            row.category.to_string(),
            row.observed,
            format_value(row.expected, 4),
            format_value(row.contribution, 4)
        )
    }));
    lines
}

/// General information, statistics, breakdown table and conclusion of a test.
pub fn format_test_report(report: &TestReport) -> String {
    let verdict = report.verdict();
    let mut lines = vec![format!("{} test", report.name())];
    lines.extend(key_values(&[
        ("Numbers (n)", verdict.n.to_string()),
        ("Significance (alpha)", verdict.alpha.to_string()),
    ]));
    lines.push(String::new());
    lines.extend(match report {
        TestReport::ChiSquared(r) => chi_squared_lines(r),
        TestReport::KolmogorovSmirnov(r) => ks_lines(r),
        TestReport::UpDown(r) => up_down_lines(r),
        TestReport::UpDownMean(r) => up_down_mean_lines(r),
        TestReport::Gap(r) => gap_lines(r),
    });
    lines.push(rule());
    lines.push(format!(
        "Conclusion: {} - {}",
        verdict.conclusion,
        strings::verdict_str(verdict.accepted)
    ));
    lines.join("\n")
}

/// One line per test plus the overall count of accepted tests.
pub fn format_suite_summary(results: &[(TestKind, Result<TestReport, ConfigError>)]) -> String {
    let mut accepted = 0usize;
    let mut lines: Vec<String> = results
        .iter()
        .map(|(kind, result)| match result {
            Ok(report) => {
                let verdict = report.verdict();
                if verdict.accepted {
                    accepted += 1;
                }
                format!(
                    "{:<20}: {:<9} {}",
                    kind.name(),
                    strings::verdict_str(verdict.accepted),
                    verdict.conclusion
                )
            }
            Err(e) => format!("{:<20}: skipped   ({})", kind.name(), e),
        })
        .collect();
    lines.push(format!(
        "Overall result: {} / {} accepted",
        accepted,
        results.len()
    ));
    lines.join("\n")
}
