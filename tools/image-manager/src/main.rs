// SPDX-License-Identifier: PMPL-1.0-or-later
//! image-manager CLI

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use image_manager::{
    generate_report, load_config, AnalysisProgress, ImageAnalyzer, ImageCatalog, ImageError,
    OpenAiVisionClient,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// Characters of alt text echoed per image while running
const PROGRESS_ALT_CHARS: usize = 80;

/// image-manager: AI image analyzer for website images
///
/// Describes every image under the site's image directory with a vision
/// model and writes alt text, descriptions and metadata to a YAML catalog.
#[derive(Parser)]
#[command(name = "image-manager")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// OpenAI API key (or set OPENAI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Analyze and report without writing the catalog
    #[arg(long)]
    dry_run: bool,

    /// Path to configuration file (YAML, or TOML by extension)
    #[arg(short, long, default_value = "image-manager.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("\n❌ Error: {:#}", e);
            if let Some(ImageError::MissingApiKey(var)) = e.downcast_ref::<ImageError>() {
                print_setup_instructions(var);
            }
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

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;

    let api_key = resolve_api_key(cli.api_key, &config.api_key_env)?;
    let client = OpenAiVisionClient::new(&config.vision, api_key)
        .context("Failed to create HTTP client")?;
    let output_file = config.output_file.clone();
    let analyzer = ImageAnalyzer::new(config, client);

    println!("\n🖼️  AI Image Analysis Starting...");
    println!("{}", "=".repeat(60));

    let records = analyzer.analyze_all(print_progress).await;

    let now = Local::now();
    if !cli.dry_run {
        println!("\n💾 Saving results to {}...", output_file.display());
        ImageCatalog::new(records.clone(), now)
            .save(&output_file)
            .with_context(|| format!("Failed to write {}", output_file.display()))?;
        println!("   ✓ Saved {} image analyses", records.len());
    }

    println!("{}", generate_report(&records, now));

    if !cli.dry_run {
        println!("\n✨ Results saved to: {}", output_file.display());
        println!("\n🎯 Next Steps:");
        println!("   1. Review {}", output_file.display());
        println!("   2. Edit alt text if needed");
        println!("   3. Update templates to use image data");
        println!("   4. Rebuild the site");
    }

    Ok(())
}

/// `--api-key` wins; otherwise the configured environment variable
fn resolve_api_key(flag: Option<String>, env_var: &str) -> Result<String, ImageError> {
    flag.or_else(|| std::env::var(env_var).ok())
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ImageError::MissingApiKey(env_var.to_string()))
}

fn print_progress(event: AnalysisProgress<'_>) {
    match event {
        AnalysisProgress::Found { total } => println!("\nFound {} images to analyze\n", total),
        AnalysisProgress::Analyzing { index, total, file } => {
            println!("[{}/{}] {}", index, total, file);
        }
        AnalysisProgress::Analyzed(record) => {
            if let Some(error) = &record.error {
                println!("      ⚠️  Error: {}", error);
            }
            let alt: String = record.alt_text.chars().take(PROGRESS_ALT_CHARS).collect();
            println!("      ✓ Alt text: {}...", alt);
        }
    }
}

fn print_setup_instructions(env_var: &str) {
    println!("\nTo use the AI Image Manager:");
    println!("   1. Get an OpenAI API key from https://platform.openai.com/api-keys");
    println!("   2. Export it: export {}=your-key-here", env_var);
    println!("   3. Run: image-manager (or pass --api-key)");
}
