use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// Embedded target the driver crates must build for without `std`.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

/// Driver crates, as `-p` arguments.
const DRIVER_PACKAGES: [&str; 4] = ["-p", "g711", "-p", "si3000"];

/// Outcome of a step whose failure is reported but not fatal.
enum Severity {
    Fatal,
    Advisory,
}

struct Step {
    label: &'static str,
    args: Vec<&'static str>,
    severity: Severity,
}

fn steps() -> Vec<Step> {
    let driver = |extra: &[&'static str]| {
        let mut args = vec!["check"];
        args.extend_from_slice(&DRIVER_PACKAGES);
        args.extend_from_slice(extra);
        args
    };

    vec![
        Step {
            label: "driver crates (host)",
            args: driver(&[]),
            severity: Severity::Fatal,
        },
        Step {
            label: "driver crates (no_std, thumbv7em)",
            args: driver(&["--target", EMBEDDED_TARGET]),
            severity: Severity::Fatal,
        },
        Step {
            label: "driver crates with defmt (thumbv7em)",
            args: driver(&["--target", EMBEDDED_TARGET, "--features", "si3000/defmt"]),
            severity: Severity::Fatal,
        },
        Step {
            label: "clippy lints",
            args: vec!["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            severity: Severity::Advisory,
        },
        Step {
            label: "code formatting",
            args: vec!["fmt", "--all", "--check"],
            severity: Severity::Advisory,
        },
    ]
}

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking driver builds...".cyan().bold());
    println!();

    let total_start = Instant::now();

    for step in steps() {
        println!("{}", format!("  Checking {}...", step.label).cyan());
        let start = Instant::now();

        let output = Command::new("cargo")
            .args(&step.args)
            .output()
            .with_context(|| format!("Failed to run cargo for {}", step.label))?;

        if output.status.success() {
            println!(
                "{}",
                format!(
                    "  ✓ {} passed in {:.2}s",
                    step.label,
                    start.elapsed().as_secs_f64()
                )
                .green()
            );
        } else {
            match step.severity {
                Severity::Fatal => {
                    eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
                    eprintln!();
                    eprintln!("{}", String::from_utf8_lossy(&output.stderr));
                    anyhow::bail!("{} failed", step.label);
                }
                Severity::Advisory => {
                    eprintln!(
                        "{}",
                        format!("  ⚠ {} reported issues", step.label).yellow().bold()
                    );
                    eprintln!();
                    eprintln!("{}", String::from_utf8_lossy(&output.stderr));
                }
            }
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn embedded_steps_target_thumbv7em() {
        let embedded: Vec<_> = steps()
            .into_iter()
            .filter(|s| s.args.contains(&EMBEDDED_TARGET))
            .collect();
        assert_eq!(embedded.len(), 2);
        assert!(embedded
            .iter()
            .all(|s| s.args.starts_with(&["check", "-p", "g711", "-p", "si3000"])));
    }

    #[test]
    fn only_lint_steps_are_advisory() {
        let advisory: Vec<_> = steps()
            .into_iter()
            .filter(|s| matches!(s.severity, Severity::Advisory))
            .map(|s| s.args[0])
            .collect();
        assert_eq!(advisory, ["clippy", "fmt"]);
    }
}
