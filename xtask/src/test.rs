use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// One `cargo test` invocation.
struct Suite {
    label: &'static str,
    args: &'static [&'static str],
    /// Whether a failure aborts the run.
    fatal: bool,
}

const UNIT: Suite = Suite {
    label: "Unit tests",
    args: &["test", "--workspace", "--lib", "--bins"],
    fatal: true,
};

const INTEGRATION: Suite = Suite {
    label: "Integration tests",
    args: &["test", "--workspace", "--test", "*"],
    fatal: true,
};

const DOC: Suite = Suite {
    label: "Doc tests",
    args: &["test", "--workspace", "--doc"],
    fatal: false,
};

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();

    let mut suites = Vec::new();
    if !integration_only {
        suites.push(UNIT);
    }
    if !unit_only {
        suites.push(INTEGRATION);
    }
    suites.push(DOC);

    for suite in suites {
        run_suite(&suite)?;
    }

    println!(
        "{}",
        format!(
            "✓ All tests completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

fn run_suite(suite: &Suite) -> Result<()> {
    println!("{}", format!("  Running {}...", suite.label.to_lowercase()).cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(suite.args)
        .output()
        .with_context(|| format!("Failed to run {}", suite.label.to_lowercase()))?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    if output.status.success() {
        println!(
            "{}",
            format!(
                "  ✓ {} passed {} in {:.2}s",
                suite.label,
                extract_test_summary(&stdout),
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    } else if suite.fatal {
        eprintln!("{}", format!("  ✗ {} failed", suite.label).red().bold());
        eprintln!();
        for line in stdout.lines() {
            eprintln!("  {line}");
        }
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{} failed", suite.label);
    } else {
        eprintln!("{}", format!("  ⚠ {} failed", suite.label).yellow().bold());
    }
    println!();
    Ok(())
}

/// Sum the `test result:` lines of a multi-crate `cargo test` run.
fn extract_test_summary(output: &str) -> String {
    let mut passed = 0u32;
    let mut failed = 0u32;
    let mut suites = 0u32;
    for line in output.lines() {
        let Some(summary) = line.split("test result:").nth(1) else {
            continue;
        };
        suites = suites.saturating_add(1);
        for part in summary.split(';') {
            let mut words = part.split_whitespace().rev();
            let (Some(kind), Some(count)) = (words.next(), words.next()) else {
                continue;
            };
            let Ok(count) = count.parse::<u32>() else {
                continue;
            };
            match kind {
                "passed" => passed = passed.saturating_add(count),
                "failed" => failed = failed.saturating_add(count),
                _ => {}
            }
        }
    }
    if suites == 0 {
        return "(summary not available)".to_string();
    }
    format!("({passed} passed, {failed} failed across {suites} suites)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_adds_up_suites() {
        let out = "\
running 3 tests
test result: ok. 3 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out; finished in 0.00s
running 17 tests
test result: ok. 17 passed; 0 failed; 1 ignored; 0 measured; 0 filtered out; finished in 0.20s
";
        assert_eq!(
            extract_test_summary(out),
            "(20 passed, 0 failed across 2 suites)"
        );
    }

    #[test]
    fn summary_without_results() {
        assert_eq!(extract_test_summary("error: no tests"), "(summary not available)");
    }
}
