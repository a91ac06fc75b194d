use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use reelstat_core::{
    load_dataset, outputs::write_outputs, profile::profile_dataset, run_analysis, AnalysisConfig,
    LoadedDataset, OutputFormat,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Movie dataset cleaning and summary tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean the dataset and report genre, rating and budget summaries
    Analyze(AnalyzeArgs),
    /// Report nulls, duplicates and year coverage before cleaning
    Profile(SourceArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Movie export to read [default: tmdb-movies.csv]
    #[arg(short, long)]
    input: Option<PathBuf>,
    /// TOML file with analysis settings
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct AnalyzeArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Write aggregate tables and summary.json into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
    /// File format for aggregate tables
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Keep rows whose adjusted budget and revenue are both zero
    #[arg(long)]
    keep_zero_budget_and_revenue: bool,
    /// Keep exact duplicate rows
    #[arg(long)]
    keep_duplicates: bool,
    /// Histogram bins for the rating, revenue and budget distributions
    #[arg(long)]
    bins: Option<usize>,
    /// Genres listed per decade in the popularity ranking
    #[arg(long, default_value_t = 5)]
    top: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Parquet,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Parquet => OutputFormat::Parquet,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => handle_analyze(args),
        Command::Profile(args) => handle_profile(args),
    }
}

fn handle_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = resolve_config(&args.source)?;
    if let Some(dir) = args.output_dir {
        config.output_dir = Some(dir);
    }
    if let Some(format) = args.format {
        config.format = format.into();
    }
    if let Some(bins) = args.bins {
        config.histogram_bins = bins;
    }
    if args.keep_zero_budget_and_revenue {
        config.cleaning.drop_zero_budget_and_revenue = false;
    }
    if args.keep_duplicates {
        config.cleaning.drop_duplicates = false;
    }

    let dataset = load_input(&config)?;
    let output = run_analysis(&dataset.raw.df, &config).context("analysis failed")?;

    render::print_analysis(&output, args.top)?;

    if let Some(dir) = &config.output_dir {
        let written = write_outputs(&output, Some(&dataset.source), dir, config.format)
            .with_context(|| format!("failed to write outputs to '{}'", dir.display()))?;
        info!(files = written.len(), dir = %dir.display(), "Analysis outputs written");
        println!("Wrote {} files to {}", written.len(), dir.display());
    }

    Ok(())
}

fn handle_profile(args: SourceArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let dataset = load_input(&config)?;
    let profile = profile_dataset(&dataset.raw).context("failed to profile dataset")?;

    render::print_profile(&profile);

    Ok(())
}

fn resolve_config(source: &SourceArgs) -> Result<AnalysisConfig> {
    let mut config = match &source.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("failed to load configuration '{}'", path.display()))?,
        None => AnalysisConfig::default(),
    };
    if let Some(input) = &source.input {
        config.input = input.clone();
    }
    Ok(config)
}

fn load_input(config: &AnalysisConfig) -> Result<LoadedDataset> {
    load_dataset(&config.input)
        .with_context(|| format!("failed to load movie dataset '{}'", config.input.display()))
}
