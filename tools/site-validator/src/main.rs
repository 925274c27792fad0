// SPDX-License-Identifier: PMPL-1.0-or-later
//! site-validator CLI

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use site_validator::{
    generate_text_report, load_config, FileKind, Progress, ReportSummary, SiteValidator,
    ValidationReport,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// site-validator: quality checks for the rendered site
///
/// Validates every HTML page and stylesheet under the docs directory and
/// exits non-zero when any error is found.
#[derive(Parser)]
#[command(name = "site-validator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Rendered site directory (overrides the config file)
    #[arg(long)]
    docs_dir: Option<PathBuf>,

    /// Save a JSON report to this path
    #[arg(long)]
    save_report: Option<PathBuf>,

    /// Fail on warnings as well as errors
    #[arg(long)]
    strict: bool,

    /// Path to configuration file (YAML, or TOML by extension)
    #[arg(short, long, default_value = "site-validator.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    // CLI overrides
    if let Some(dir) = cli.docs_dir {
        config.docs_dir = dir;
    }
    if cli.strict {
        config.strict = true;
    }
    let strict = config.strict;

    let validator = SiteValidator::new(config);

    println!("\n🔍 Running Quality Validation...");
    println!("{}", "=".repeat(60));

    let results = validator.validate_all(print_progress);

    let now = Local::now();
    println!("{}", generate_text_report(&results, now));

    if let Some(path) = &cli.save_report {
        ValidationReport::new(&results, now)
            .save(path)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        println!("\n💾 Detailed report saved to: {}", path.display());
    }

    if ReportSummary::from_results(&results).is_failure(strict) {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_progress(event: Progress<'_>) {
    match event {
        Progress::Started {
            kind: FileKind::Html,
            count,
        } => println!("\n📄 Validating {} HTML files...", count),
        Progress::Started {
            kind: FileKind::Css,
            count,
        } => println!("\n🎨 Validating {} CSS files...", count),
        Progress::Checked(result) => {
            let name = result
                .path()
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default();
            if result.passed() {
                println!("   Checking {}... ✓", name);
            } else {
                println!("   Checking {}... ✗ ({} errors)", name, result.errors().len());
            }
        }
    }
}
