//! Profile command - learn a baseline or check a file for drift.

use std::path::PathBuf;

use colored::{ColoredString, Colorize};
use datalint::profile::{profile_path, DriftEvidence};
use datalint::{Datalint, DriftAnalysis, DriftStatus, Profile};

use crate::cli::OutputFormat;

/// Learn a profile and save it next to the data (or to `output`).
pub fn learn(
    datalint: &Datalint,
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let profile = datalint.learn(&file)?;
    let output_path = output.unwrap_or_else(|| profile_path(&file));
    profile.save(&output_path)?;

    match format {
        OutputFormat::Json => println!("{}", profile.to_json()?),
        OutputFormat::Text => print_profile(&profile, &output_path),
    }

    Ok(true)
}

/// Compare a data file against a saved profile.
pub fn check(
    datalint: &Datalint,
    file: PathBuf,
    profile_file: PathBuf,
    format: OutputFormat,
) -> Result<bool, Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let profile = Profile::load(&profile_file)?;
    let analysis = datalint.check_drift(&file, &profile)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Text => print_analysis(&analysis),
    }

    Ok(!analysis.has_drift())
}

fn print_profile(profile: &Profile, path: &std::path::Path) {
    println!(
        "{} {} ({} rows)",
        "Learned profile".cyan().bold(),
        profile.name.white(),
        profile.row_count
    );
    println!();

    for summary in profile.columns.values() {
        let detail = match &summary.numeric {
            Some(stats) => format!("mean {:.4}, std {:.4}", stats.mean, stats.std),
            None => format!("{} distinct", summary.cardinality),
        };
        println!(
            "  {:20} {:12} null {:>6.2}%  {}",
            summary.name,
            summary.declared_type.label(),
            summary.null_ratio * 100.0,
            detail
        );
    }
    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        path.display().to_string().white()
    );
}

fn status_label(status: DriftStatus) -> ColoredString {
    let label = status.label();
    match status {
        DriftStatus::Stable => label.green(),
        DriftStatus::Added => label.blue(),
        DriftStatus::Drifted | DriftStatus::Removed | DriftStatus::TypeChanged => label.red().bold(),
    }
}

fn describe(evidence: &DriftEvidence) -> String {
    match evidence {
        DriftEvidence::ZScore {
            z,
            baseline_mean,
            current_mean,
            ..
        } => format!(
            "mean {:.4} → {:.4} (z = {:.2})",
            baseline_mean, current_mean, z
        ),
        DriftEvidence::UnseenValues { fraction, unseen } => {
            if unseen.is_empty() {
                "no unseen top values".to_string()
            } else {
                format!(
                    "{:.0}% unseen top values: {}",
                    fraction * 100.0,
                    unseen.join(", ")
                )
            }
        }
        DriftEvidence::TypeChange { expected, found } => format!("{} → {}", expected, found),
        DriftEvidence::Presence { declared_type } => declared_type.to_string(),
        DriftEvidence::NotCompared { reason } => reason.clone(),
    }
}

fn print_analysis(analysis: &DriftAnalysis) {
    println!(
        "{} {} against profile {} (learned {})",
        "Checking".cyan().bold(),
        analysis.source.file.white(),
        analysis.profile_name.white(),
        analysis.profile_created_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!();

    for report in &analysis.reports {
        println!(
            "  {:20} {:14} {}",
            report.column_name,
            status_label(report.status),
            describe(&report.evidence)
        );
    }
    println!();

    let s = &analysis.summary;
    println!(
        "{} stable, {} drifted, {} type changed, {} removed, {} added",
        s.stable.to_string().green(),
        s.drifted.to_string().red(),
        s.type_changed.to_string().red(),
        s.removed.to_string().red(),
        s.added.to_string().blue()
    );

    if analysis.has_drift() {
        println!("{}", "Drift detected.".red().bold());
    } else {
        println!("{}", "No drift detected.".green().bold());
    }
}
