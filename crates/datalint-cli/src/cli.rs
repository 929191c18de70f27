//! CLI argument definitions using clap.

use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

/// Datalint: data validation and drift detection for ML datasets
#[derive(Parser)]
#[command(name = "datalint")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// JSON file overriding default thresholds
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all validation checks against a data file
    Validate {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Learn a profile from clean data, or check data against a profile
    #[command(group(ArgGroup::new("mode").required(true).args(["learn", "profile"])))]
    Profile {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Learn a profile from this file
        #[arg(long)]
        learn: bool,

        /// Output path for the learned profile (default: <file>.profile.json)
        #[arg(short, long, requires = "learn")]
        output: Option<PathBuf>,

        /// Profile to compare this file against
        #[arg(long, value_name = "PROFILE")]
        profile: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from(["datalint", "validate", "data.csv", "--format", "json"]).unwrap();
        match cli.command {
            Commands::Validate { file, format } => {
                assert_eq!(file, PathBuf::from("data.csv"));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_profile_requires_mode() {
        assert!(Cli::try_parse_from(["datalint", "profile", "data.csv"]).is_err());
    }

    #[test]
    fn test_learn_and_profile_conflict() {
        let result = Cli::try_parse_from([
            "datalint",
            "profile",
            "data.csv",
            "--learn",
            "--profile",
            "p.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_requires_learn() {
        let result = Cli::try_parse_from([
            "datalint",
            "profile",
            "data.csv",
            "--profile",
            "p.json",
            "--output",
            "x.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "datalint",
            "validate",
            "data.csv",
            "--verbose",
            "--config",
            "thresholds.json",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("thresholds.json")));
        assert_eq!(cli.log_level, "warn");
    }
}
