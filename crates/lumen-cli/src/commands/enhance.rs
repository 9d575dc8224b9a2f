use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use lumen_core::enhance::agcwd::{AutoEnhanceParams, HistogramAgcwdParams};
use lumen_core::enhance::sece::SeceDctParams;
use lumen_core::enhance::sigmoid::SigmoidParams;
use lumen_core::enhance::stretch::{PeakStretchParams, PercentileStretchParams};
use lumen_core::histogram::histogram;
use lumen_core::io::image_io::{load_source, save_source, write_histogram_csv};
use lumen_core::pipeline::apply_algorithm;
use lumen_core::pipeline::config::Algorithm;

#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    AgcwdAuto,
    AgcwdBright,
    AgcwdDimmed,
    AgcwdHistogram,
    Equalize,
    StretchPercentile,
    StretchPeak,
    Sigmoid,
    Sece,
    SeceDct,
}

#[derive(Args)]
pub struct EnhanceArgs {
    /// Input image file
    pub file: PathBuf,

    /// Enhancement algorithm
    #[arg(short, long, value_enum, default_value = "agcwd-auto")]
    pub algorithm: AlgorithmArg,

    /// Treat the image as grayscale instead of enhancing the HSV value plane
    #[arg(long)]
    pub gray: bool,

    /// AGCWD auto: relative distance from the target mean that triggers correction
    #[arg(long, default_value = "0.3")]
    pub threshold: f64,

    /// AGCWD auto: mean intensity considered well exposed
    #[arg(long, default_value = "112")]
    pub target_mean: f64,

    /// AGCWD histogram: weighting exponent
    #[arg(long, default_value = "0.5")]
    pub alpha: f64,

    /// Percentile stretch: percent of pixel mass clipped at each end
    #[arg(long, default_value = "5")]
    pub bounds_percent: f64,

    /// Peak stretch: fraction of the peak count that bounds the stretch
    #[arg(long, default_value = "0.05")]
    pub cutoff_fraction: f64,

    /// Sigmoid: gain
    #[arg(long, default_value = "10")]
    pub gain: f64,

    /// Sigmoid: cutoff (normalized inflection point)
    #[arg(long, default_value = "0.5")]
    pub cutoff: f64,

    /// SECE+DCT: exponent applied to the distribution entropy
    #[arg(long, default_value = "0.5")]
    pub gamma: f64,

    /// Also write the histogram of the result as CSV
    #[arg(long)]
    pub histogram: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "enhanced.png")]
    pub output: PathBuf,
}

pub fn build_algorithm(args: &EnhanceArgs) -> Algorithm {
    match args.algorithm {
        AlgorithmArg::AgcwdAuto => Algorithm::AgcwdAuto(AutoEnhanceParams {
            threshold: args.threshold,
            target_mean: args.target_mean,
        }),
        AlgorithmArg::AgcwdBright => Algorithm::AgcwdBright,
        AlgorithmArg::AgcwdDimmed => Algorithm::AgcwdDimmed,
        AlgorithmArg::AgcwdHistogram => {
            Algorithm::AgcwdHistogram(HistogramAgcwdParams { alpha: args.alpha })
        }
        AlgorithmArg::Equalize => Algorithm::Equalize,
        AlgorithmArg::StretchPercentile => Algorithm::StretchPercentile(PercentileStretchParams {
            bounds_percent: args.bounds_percent,
            ..Default::default()
        }),
        AlgorithmArg::StretchPeak => Algorithm::StretchPeak(PeakStretchParams {
            cutoff_fraction: args.cutoff_fraction,
            ..Default::default()
        }),
        AlgorithmArg::Sigmoid => Algorithm::Sigmoid(SigmoidParams {
            gain: args.gain,
            cutoff: args.cutoff,
        }),
        AlgorithmArg::Sece => Algorithm::Sece,
        AlgorithmArg::SeceDct => Algorithm::SeceDct(SeceDctParams { gamma: args.gamma }),
    }
}

pub fn run(args: &EnhanceArgs) -> Result<()> {
    let source = load_source(&args.file, args.gray)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let channel = source.intensity();
    println!("Loaded {}x{} image", channel.width(), channel.height());

    let algorithm = build_algorithm(args);
    println!("Applying {}", algorithm);
    let hist = histogram(channel);
    let enhanced = apply_algorithm(channel, &hist, &algorithm)
        .with_context(|| format!("{} failed", algorithm))?;
    println!(
        "Mean intensity {:.1} -> {:.1}",
        channel.mean(),
        enhanced.mean()
    );

    if let Some(ref csv) = args.histogram {
        write_histogram_csv(&histogram(&enhanced), csv)
            .with_context(|| format!("Failed to write {}", csv.display()))?;
        println!("Histogram saved to {}", csv.display());
    }

    save_source(&source.with_intensity(enhanced)?, &args.output)?;
    println!("Saved to {}", args.output.display());

    Ok(())
}
