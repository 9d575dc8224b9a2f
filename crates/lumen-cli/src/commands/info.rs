use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lumen_core::consts::{DEFAULT_PEAK_CUTOFF, DEFAULT_STRETCH_BOUNDS_PERCENT};
use lumen_core::enhance::agcwd::{classify_exposure, AutoEnhanceParams};
use lumen_core::enhance::stretch::{bound_by_peak_threshold, bound_by_weighted_percentile};
use lumen_core::histogram::histogram;
use lumen_core::io::image_io::load_source;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,

    /// Treat the image as grayscale instead of using the HSV value plane
    #[arg(long)]
    pub gray: bool,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let source = load_source(&args.file, args.gray)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let channel = source.intensity();
    let hist = histogram(channel);
    let (lo, hi) = channel.min_max();
    let (peak, peak_count) = hist.peak();
    let exposure = classify_exposure(channel, &AutoEnhanceParams::default());
    let (peak_low, peak_high) = bound_by_peak_threshold(&hist, DEFAULT_PEAK_CUTOFF);

    println!("File:          {}", args.file.display());
    println!("Dimensions:    {}x{}", channel.width(), channel.height());
    println!(
        "Channel:       {}",
        if source.is_color() { "HSV value" } else { "grayscale" }
    );
    println!("Mean:          {:.2}", channel.mean());
    println!("Exposure:      {}", exposure);
    println!("Range:         [{}, {}]", lo, hi);
    println!("Levels used:   {}", hist.distinct_levels());
    println!("Peak:          level {} ({} px)", peak, peak_count);
    println!(
        "Percentiles:   [{}, {}]",
        bound_by_weighted_percentile(&hist, DEFAULT_STRETCH_BOUNDS_PERCENT),
        bound_by_weighted_percentile(&hist, 100.0 - DEFAULT_STRETCH_BOUNDS_PERCENT)
    );
    println!("Peak bounds:   [{}, {}]", peak_low, peak_high);

    Ok(())
}
