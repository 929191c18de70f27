//! Validate command - run all checks against a data file.

use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use datalint::{Datalint, Status, ValidationReport, ValidationSummary};

use crate::cli::OutputFormat;

pub fn run(
    datalint: &Datalint,
    file: PathBuf,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let report = datalint.validate(&file)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }

    Ok(!report.is_failure())
}

fn status_label(status: Status) -> ColoredString {
    match status {
        Status::Pass => status.label().green().bold(),
        Status::Warn => status.label().yellow().bold(),
        Status::Fail => status.label().red().bold(),
    }
}

fn print_report(report: &ValidationReport) {
    println!(
        "{} {} ({} rows, {} columns)",
        "Validating".cyan().bold(),
        report.source.file.white(),
        report.source.row_count,
        report.source.column_count
    );
    println!();

    for result in &report.results {
        println!(
            "  [{}] {:18} {}",
            status_label(result.status),
            result.check_name,
            result.message
        );
        for (key, value) in &result.details {
            println!("         {} {}", format!("{}:", key).dimmed(), value);
        }
        for rec in &result.recommendations {
            println!("         {} {}", "→".blue(), rec);
        }
    }
    println!();

    let summary = &report.summary;
    println!(
        "{} passed, {} warned, {} failed",
        summary.passed.to_string().green(),
        summary.warned.to_string().yellow(),
        summary.failed.to_string().red()
    );

    println!("{}", verdict(summary));
}

fn verdict(summary: &ValidationSummary) -> ColoredString {
    match summary.overall() {
        Status::Pass => "Dataset passed validation.".green().bold(),
        Status::Warn => "Dataset passed validation with warnings.".yellow().bold(),
        Status::Fail => "Dataset is not ready for training.".red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(passed: usize, warned: usize, failed: usize) -> ValidationSummary {
        ValidationSummary {
            passed,
            warned,
            failed,
        }
    }

    #[test]
    fn test_verdict_follows_worst_status() {
        colored::control::set_override(false);
        assert_eq!(verdict(&summary(5, 0, 0)).to_string(), "Dataset passed validation.");
        assert_eq!(
            verdict(&summary(3, 2, 0)).to_string(),
            "Dataset passed validation with warnings."
        );
        assert_eq!(
            verdict(&summary(3, 1, 1)).to_string(),
            "Dataset is not ready for training."
        );
    }
}
