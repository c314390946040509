//! tafel CLI: reconstruct tables from OCR'd scans and merge the results.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tafel::{ExtractionOutcome, Grid, TableConfig, TableType, extract_table, merge_grids, parse_tsv_tokens};

#[derive(Parser)]
#[command(name = "tafel", version, about = "Table-structure reconstruction for scanned documents")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reconstruct one table from a page image and its OCR token TSV
    Extract {
        /// Page or table-crop image (grayscale is derived if needed)
        #[arg(long)]
        image: PathBuf,

        /// Tesseract TSV with word-level tokens for the same image
        #[arg(long)]
        tokens: PathBuf,

        /// Assignment strategy ("bordered" or "borderless")
        #[arg(long, default_value = "borderless")]
        table_type: TableType,

        /// Optional TOML config file with pipeline thresholds
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
    /// Merge grids (JSON, as produced by `extract --format json`) into one table
    Merge {
        /// Grid files in merge order; order affects the canonical schema
        #[arg(required = true)]
        grids: Vec<PathBuf>,

        /// Optional TOML config file with pipeline thresholds
        #[arg(long)]
        config: Option<PathBuf>,

        /// Similarity (0-100) above which header labels are unified;
        /// overrides merge_similarity_threshold from the config file
        #[arg(long)]
        threshold: Option<f64>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Extract {
            image,
            tokens,
            table_type,
            config,
            format,
        } => extract_command(&image, &tokens, table_type, config.as_deref(), format),
        Command::Merge {
            grids,
            config,
            threshold,
            format,
        } => merge_command(&grids, config.as_deref(), threshold, format),
    }
}

fn extract_command(
    image_path: &std::path::Path,
    tokens_path: &std::path::Path,
    table_type: TableType,
    config_path: Option<&std::path::Path>,
    format: OutputFormat,
) -> Result<()> {
    let config = match config_path {
        Some(path) => TableConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => TableConfig::default(),
    };

    let image = image::open(image_path)
        .with_context(|| format!("failed to open image {}", image_path.display()))?
        .to_luma8();
    let tsv = std::fs::read_to_string(tokens_path)
        .with_context(|| format!("failed to read tokens from {}", tokens_path.display()))?;
    let tokens = parse_tsv_tokens(&tsv)?;
    tracing::debug!(
        tokens = tokens.len(),
        width = image.width(),
        height = image.height(),
        "loaded extraction inputs"
    );

    let outcome = extract_table(&image, &tokens, table_type, &config);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Markdown => match outcome {
            ExtractionOutcome::Bordered { grid } | ExtractionOutcome::Borderless { grid } => {
                print!("{}", grid.to_markdown());
            }
            ExtractionOutcome::InsufficientLines { horizontal, vertical } => {
                bail!(
                    "bordered extraction needs at least 2 ruling lines per axis, \
                     found {horizontal} horizontal and {vertical} vertical; \
                     try --table-type borderless"
                );
            }
        },
    }
    Ok(())
}

fn merge_command(
    grid_paths: &[PathBuf],
    config_path: Option<&std::path::Path>,
    threshold: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => TableConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => TableConfig::default(),
    };
    if let Some(threshold) = threshold {
        config.merge_similarity_threshold = threshold;
    }

    let mut grids = Vec::with_capacity(grid_paths.len());
    for path in grid_paths {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read grid from {}", path.display()))?;
        let grid = parse_grid(&data).with_context(|| format!("invalid grid file {}", path.display()))?;
        grids.push(grid);
    }

    let merged = merge_grids(&grids, &config);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&merged)?),
        OutputFormat::Markdown => print!("{}", merged.to_markdown()),
    }
    Ok(())
}

/// Accept either a bare grid or a full extraction outcome.
fn parse_grid(data: &str) -> Result<Grid> {
    if let Ok(outcome) = serde_json::from_str::<ExtractionOutcome>(data) {
        return outcome
            .into_grid()
            .context("extraction outcome holds no grid (insufficient ruling lines)");
    }
    Ok(serde_json::from_str::<Grid>(data)?)
}
