//! Adaptive gamma correction with weighting distribution (AGCWD).
//!
//! The histogram is reshaped by a power-law weighting, its CDF becomes a
//! per-intensity gamma exponent, and each intensity `l` is mapped to
//! `255 * (l / 255) ^ (1 - cdf_w[l])`.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::{identity_lut, quantize, truncate, Channel, LookupTable};
use crate::consts::{
    BRIGHT_ALPHA, DEFAULT_EXPOSURE_THRESHOLD, DEFAULT_HISTOGRAM_ALPHA, DEFAULT_TARGET_MEAN,
    DIMMED_ALPHA, HISTOGRAM_BINS, MAX_INTENSITY, TRUNCATED_CDF_FLOOR,
};
use crate::histogram::{self, cumulative, extrema, histogram, normalize, Distribution, Histogram};

/// Parameters for the brightness-adaptive dispatcher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AutoEnhanceParams {
    /// Relative distance from `target_mean` tolerated before correcting.
    pub threshold: f64,
    /// Mean intensity considered well exposed.
    pub target_mean: f64,
}

impl Default for AutoEnhanceParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_EXPOSURE_THRESHOLD,
            target_mean: DEFAULT_TARGET_MEAN,
        }
    }
}

/// Parameters for the single-pass, histogram-driven variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistogramAgcwdParams {
    /// Weighting exponent; smaller values flatten the distribution more.
    pub alpha: f64,
}

impl Default for HistogramAgcwdParams {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_HISTOGRAM_ALPHA,
        }
    }
}

/// Exposure class chosen by [`classify_exposure`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exposure {
    Dimmed,
    WellExposed,
    Bright,
}

impl std::fmt::Display for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dimmed => write!(f, "Dimmed"),
            Self::WellExposed => write!(f, "Well exposed"),
            Self::Bright => write!(f, "Bright"),
        }
    }
}

/// AGCWD with an explicit weighting exponent.
///
/// Only intensities present in the image are evaluated; absent levels keep
/// the identity entry of the lookup table. With `truncate_cdf` the exponent
/// never drops below 0.5, which keeps dark tones from being over-lifted.
pub fn enhance_weighted(channel: &Channel, alpha: f64, truncate_cdf: bool) -> Channel {
    let hist = histogram(channel);
    if hist.distinct_levels() < 2 {
        debug!("Single intensity level, AGCWD skipped");
        return channel.clone();
    }

    let weighted = weighting_distribution(&normalize(&hist), alpha);
    let cdf = cumulative(&weighted);

    let mut lut = identity_lut();
    for level in 1..HISTOGRAM_BINS {
        if hist.counts()[level] == 0 {
            continue;
        }
        let mut exponent = 1.0 - cdf[level];
        if truncate_cdf {
            exponent = exponent.max(TRUNCATED_CDF_FLOOR);
        }
        let x = level as f64 / MAX_INTENSITY;
        lut[level] = quantize(MAX_INTENSITY * x.powf(exponent));
    }
    // Level 0 stays black: 0^gamma = 0 for every positive gamma.
    lut[0] = 0;

    channel.apply_lut(&lut)
}

/// Correction for over-bright images: AGCWD on the negative, negated back.
pub fn enhance_bright(channel: &Channel) -> Channel {
    enhance_weighted(&channel.inverted(), BRIGHT_ALPHA, false).inverted()
}

/// Correction for under-lit images.
pub fn enhance_dimmed(channel: &Channel) -> Channel {
    enhance_weighted(channel, DIMMED_ALPHA, true)
}

/// Classify a channel by its mean relative to `params.target_mean`.
///
/// The thresholds are hard: images whose mean sits right at a boundary can
/// flip class under a one-level perturbation.
pub fn classify_exposure(channel: &Channel, params: &AutoEnhanceParams) -> Exposure {
    let mean = channel.mean();
    let t = (mean - params.target_mean) / params.target_mean;
    if t < -params.threshold {
        Exposure::Dimmed
    } else if t > params.threshold {
        Exposure::Bright
    } else {
        Exposure::WellExposed
    }
}

/// Brightness-adaptive AGCWD. Well-exposed channels are returned unchanged.
pub fn auto_enhance(channel: &Channel, params: &AutoEnhanceParams) -> Channel {
    let exposure = classify_exposure(channel, params);
    debug!(%exposure, mean = channel.mean(), "AGCWD exposure class");
    match exposure {
        Exposure::Dimmed => enhance_dimmed(channel),
        Exposure::Bright => enhance_bright(channel),
        Exposure::WellExposed => channel.clone(),
    }
}

/// Single-pass AGCWD driven by a caller-supplied histogram.
///
/// Every level gets a gamma from the histogram, so pixels whose level the
/// histogram does not cover are still mapped (by their own gamma, without
/// interpolation). Output is `256 * (v / 256) ^ gamma[v]`, clamped and
/// truncated.
pub fn agcwd_from_histogram(
    channel: &Channel,
    hist: &Histogram,
    params: &HistogramAgcwdParams,
) -> Channel {
    let (lo, hi) = channel.min_max();
    if lo == hi || hist.distinct_levels() < 2 {
        debug!("Constant channel or single-level histogram, AGCWD skipped");
        return channel.clone();
    }

    let pixels = channel.len() as f64;
    let pdf: Distribution = std::array::from_fn(|i| hist.counts()[i] as f64 / pixels);
    let (pdf_min, pdf_max) = extrema(&pdf);
    let range = pdf_max - pdf_min;
    if range <= 0.0 {
        debug!("Flat histogram, AGCWD skipped");
        return channel.clone();
    }

    let weighted: Distribution =
        std::array::from_fn(|i| pdf_max * ((pdf[i] - pdf_min) / range).powf(params.alpha));
    let weight_sum = histogram::sum(&weighted);
    if weight_sum <= 0.0 {
        return channel.clone();
    }
    let cdf = cumulative(&weighted);

    let scale = HISTOGRAM_BINS as f64;
    let lut: LookupTable = std::array::from_fn(|level| {
        let gamma = 1.0 - cdf[level] / weight_sum;
        truncate(scale * (level as f64 / scale).powf(gamma))
    });
    channel.apply_lut(&lut)
}

/// Power-law reshaping of a probability distribution, renormalized to sum 1.
///
/// The negative branch mirrors the positive one; it only matters if
/// rounding ever puts an entry below the computed minimum.
fn weighting_distribution(probs: &Distribution, alpha: f64) -> Distribution {
    let (p_min, p_max) = extrema(probs);
    let range = p_max - p_min;
    if range <= 0.0 {
        debug!("Flat distribution, weighting skipped");
        return *probs;
    }

    let weighted: Distribution = std::array::from_fn(|i| {
        let d = (probs[i] - p_min) / range;
        if d > 0.0 {
            p_max * d.powf(alpha)
        } else if d < 0.0 {
            -p_max * (-d).powf(alpha)
        } else {
            0.0
        }
    });

    let total = histogram::sum(&weighted);
    if total <= 0.0 {
        return *probs;
    }
    weighted.map(|w| w / total)
}
