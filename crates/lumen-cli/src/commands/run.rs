use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lumen_core::pipeline::config::EnhanceConfig;
use lumen_core::pipeline::run_enhance;

use crate::progress::BarReporter;
use crate::summary::{print_config_summary, print_run_report};

#[derive(Args)]
pub struct RunArgs {
    /// Config file (TOML)
    pub config: PathBuf,

    /// Override the input image from the config
    #[arg(long)]
    pub input: Option<PathBuf>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read config {}", args.config.display()))?;
    let mut config: EnhanceConfig = toml::from_str(&contents).context("Invalid config")?;
    if let Some(ref input) = args.input {
        config.input = input.clone();
    }

    print_config_summary(&config);
    let reporter = BarReporter::new()?;
    let summary = run_enhance(&config, &reporter)
        .with_context(|| format!("Failed to process {}", config.input.display()))?;
    print_run_report(&summary);

    Ok(())
}
