//! Example: Validate a data file and print its column summaries.
//!
//! Usage:
//!   cargo run --example summarize -- <file_path>

use std::env;
use std::path::Path;

use datalint::input::Parser;
use datalint::profile::Profiler;
use datalint::Datalint;

fn main() -> datalint::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example summarize -- <file_path>");
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    if !path.exists() {
        eprintln!("Error: File not found: {}", path.display());
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Datalint summary: {}", path.display());
    println!("{}", separator);
    println!();

    let (dataset, source) = Parser::new().parse_file(path)?;
    println!("## Source");
    println!("  File: {}", source.file);
    println!("  Format: {}", source.format);
    println!("  Rows: {}", source.row_count);
    println!("  Columns: {}", source.column_count);
    println!();

    println!("## Columns");
    for summary in Profiler::new().summarize(&dataset)?.values() {
        let stats = match &summary.numeric {
            Some(s) => format!(
                "min={:.2} q1={:.2} q3={:.2} max={:.2} mean={:.2} std={:.2}",
                s.min, s.q1, s.q3, s.max, s.mean, s.std
            ),
            None => summary
                .top_value_keys()
                .take(5)
                .collect::<Vec<_>>()
                .join(", "),
        };
        println!(
            "  {:20} {:12} null={:<6.3} distinct={:<6} {}",
            summary.name,
            summary.declared_type.label(),
            summary.null_ratio,
            summary.cardinality,
            stats
        );
    }
    println!();

    let report = Datalint::new().validate(path)?;
    println!("## Checks");
    for result in &report.results {
        println!(
            "  [{}] {:18} {}",
            result.status.label(),
            result.check_name,
            result.message
        );
    }

    Ok(())
}
