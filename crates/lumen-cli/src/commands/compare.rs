use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lumen_core::pipeline::config::{Algorithm, EnhanceConfig};
use lumen_core::pipeline::run_enhance;

use crate::progress::BarReporter;
use crate::summary::{print_config_summary, print_run_report};

#[derive(Args)]
pub struct CompareArgs {
    /// Input image file
    pub file: PathBuf,

    /// Comma-separated algorithm names (default: all), e.g. "sece,sece-dct,sigmoid"
    #[arg(long)]
    pub algorithms: Option<String>,

    /// Treat the image as grayscale instead of enhancing the HSV value plane
    #[arg(long)]
    pub gray: bool,

    /// Height of each comparison grid cell in pixels (0 disables the grid)
    #[arg(long, default_value = "400")]
    pub grid_height: u32,

    /// Write a histogram CSV for every variant
    #[arg(long)]
    pub histograms: bool,

    /// Output directory
    #[arg(short, long, default_value = "enhanced")]
    pub out_dir: PathBuf,
}

fn parse_algorithms(list: &str) -> Result<Vec<Algorithm>> {
    list.split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Algorithm>().map_err(anyhow::Error::from))
        .collect()
}

pub fn run(args: &CompareArgs) -> Result<()> {
    let algorithms = match args.algorithms {
        Some(ref list) => parse_algorithms(list).context("Invalid algorithm list")?,
        None => Algorithm::all(),
    };
    if algorithms.is_empty() {
        anyhow::bail!("No algorithms selected");
    }

    let config = EnhanceConfig {
        input: args.file.clone(),
        output_dir: args.out_dir.clone(),
        gray: args.gray,
        grid_height: args.grid_height,
        histograms: args.histograms,
        algorithms,
    };

    print_config_summary(&config);
    let reporter = BarReporter::new()?;
    let summary = run_enhance(&config, &reporter)
        .with_context(|| format!("Failed to process {}", config.input.display()))?;
    print_run_report(&summary);

    Ok(())
}
