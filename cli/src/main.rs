//! unfig CLI - figure and table extraction tool

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unfig::{DetectStrategy, ExtractOptions, FIGURES_SUBDIR, METADATA_FILENAME};

#[derive(Parser)]
#[command(name = "unfig")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract figures and tables from documents", long_about = None)]
struct Cli {
    /// Input document (PDF)
    #[arg(value_name = "DOCUMENT")]
    document: PathBuf,

    /// Output directory for crops and metadata
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Rendering scale factor
    #[arg(long, default_value = "2.0")]
    scale: f32,

    /// Detection strategy
    #[arg(long, value_enum, default_value = "variance")]
    strategy: Strategy,

    /// Keep intermediate rendered pages (debug aid)
    #[arg(long)]
    keep_pages: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Delegate to an external vision analyzer (placeholder without one)
    Vision,
    /// Pixel-variance window scan
    Variance,
    /// One placeholder region per caption line
    TextGuided,
    /// Pre-index captions, then canonical per-kind geometry
    Targeted,
}

impl From<Strategy> for DetectStrategy {
    fn from(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Vision => DetectStrategy::Vision,
            Strategy::Variance => DetectStrategy::Variance,
            Strategy::TextGuided => DetectStrategy::TextGuided,
            Strategy::Targeted => DetectStrategy::Targeted,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if !cli.document.exists() {
        eprintln!(
            "{}: document not found: {}",
            "Error".red().bold(),
            cli.document.display()
        );
        process::exit(1);
    }

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "unfig - figure extraction".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Document".bold(), cli.document.display());
    println!("{}: {}", "Output".bold(), cli.output_dir.display());
    println!("{}: {}x", "Scale".bold(), cli.scale);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message("Extracting figures...");
    pb.enable_steady_tick(std::time::Duration::from_millis(120));

    let options = ExtractOptions::new()
        .with_scale(cli.scale)
        .with_strategy(cli.strategy.into())
        .keep_pages(cli.keep_pages);

    let elements = unfig::extract_file_with_options(&cli.document, &cli.output_dir, options)?;

    pb.finish_and_clear();

    println!("\n{} {} elements extracted", "Done!".green().bold(), elements.len());
    for element in &elements {
        println!(
            "  {} {} (page {})",
            "├─".dimmed(),
            element.filename,
            element.page
        );
    }
    println!("\n{}", "Output files:".green().bold());
    println!("  {} {}", "├─".dimmed(), METADATA_FILENAME);
    println!("  {} {}/", "└─".dimmed(), FIGURES_SUBDIR);

    Ok(())
}
