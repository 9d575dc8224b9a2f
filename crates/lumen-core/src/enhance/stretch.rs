//! Linear contrast stretching `[low, high] -> [out_min, out_max]` with two
//! ways of picking the input bounds from a histogram.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::{truncate, Channel, LookupTable};
use crate::consts::{DEFAULT_PEAK_CUTOFF, DEFAULT_STRETCH_BOUNDS_PERCENT};
use crate::histogram::Histogram;

/// Output range of a linear stretch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputRange {
    pub min: u8,
    pub max: u8,
}

impl Default for OutputRange {
    fn default() -> Self {
        Self { min: 0, max: 255 }
    }
}

/// Bounds at `percent` and `100 - percent` of the cumulative pixel mass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentileStretchParams {
    pub bounds_percent: f64,
    #[serde(default)]
    pub output: OutputRange,
}

impl Default for PercentileStretchParams {
    fn default() -> Self {
        Self {
            bounds_percent: DEFAULT_STRETCH_BOUNDS_PERCENT,
            output: OutputRange::default(),
        }
    }
}

/// Bounds where the histogram falls to `cutoff_fraction` of its peak.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakStretchParams {
    pub cutoff_fraction: f64,
    #[serde(default)]
    pub output: OutputRange,
}

impl Default for PeakStretchParams {
    fn default() -> Self {
        Self {
            cutoff_fraction: DEFAULT_PEAK_CUTOFF,
            output: OutputRange::default(),
        }
    }
}

/// Smallest intensity whose cumulative count reaches `percentile` percent of
/// the total.
///
/// Empty leading bins are skipped, so 0 yields the lowest populated level and
/// 100 the highest. An empty histogram yields 255.
pub fn bound_by_weighted_percentile(hist: &Histogram, percentile: f64) -> u8 {
    let cdf = hist.cumulative_counts();
    let threshold = hist.total() as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    // cdf is non-decreasing, so the predicate flips exactly once.
    let idx = cdf.partition_point(|&c| c == 0 || (c as f64) < threshold);
    idx.min(cdf.len() - 1) as u8
}

/// Scan outward from the histogram peak for the first levels whose count
/// exceeds `cutoff_fraction` of the peak count.
///
/// `low` is the first such level left of the peak (0 when none), `high` the
/// last such level right of the peak (255 when none).
pub fn bound_by_peak_threshold(hist: &Histogram, cutoff_fraction: f64) -> (u8, u8) {
    let (peak_idx, peak_count) = hist.peak();
    let cutoff = cutoff_fraction * peak_count as f64;
    let counts = hist.counts();
    let peak_idx = peak_idx as usize;

    let low = (0..peak_idx)
        .find(|&i| counts[i] as f64 > cutoff)
        .unwrap_or(0);
    let high = (peak_idx + 1..counts.len())
        .rev()
        .find(|&i| counts[i] as f64 > cutoff)
        .unwrap_or(counts.len() - 1);

    (low as u8, high as u8)
}

/// Affine map of `[low, high]` onto `output`, clamped then truncated.
///
/// `low == high` leaves nothing to stretch and returns the channel unchanged.
pub fn linear_stretch(channel: &Channel, low: u8, high: u8, output: OutputRange) -> Channel {
    if low == high {
        debug!(low, "Zero-width stretch bounds, channel unchanged");
        return channel.clone();
    }

    let out_min = output.min as f64;
    let out_max = output.max as f64;
    let (lo_clamp, hi_clamp) = if out_min <= out_max {
        (out_min, out_max)
    } else {
        (out_max, out_min)
    };
    let span = high as f64 - low as f64;
    let lut: LookupTable = std::array::from_fn(|v| {
        // Multiply before dividing so `high` lands exactly on `out_max`.
        let mapped = (v as f64 - low as f64) * (out_max - out_min) / span + out_min;
        truncate(mapped.clamp(lo_clamp, hi_clamp))
    });
    channel.apply_lut(&lut)
}

/// Percentile-bounded stretch ("variant 1").
pub fn stretch_percentile(
    channel: &Channel,
    hist: &Histogram,
    params: &PercentileStretchParams,
) -> Channel {
    let low = bound_by_weighted_percentile(hist, params.bounds_percent);
    let high = bound_by_weighted_percentile(hist, 100.0 - params.bounds_percent);
    debug!(low, high, "Percentile stretch bounds");
    linear_stretch(channel, low, high, params.output)
}

/// Peak-threshold-bounded stretch ("variant 2").
pub fn stretch_peak(channel: &Channel, hist: &Histogram, params: &PeakStretchParams) -> Channel {
    let (low, high) = bound_by_peak_threshold(hist, params.cutoff_fraction);
    debug!(low, high, "Peak-threshold stretch bounds");
    linear_stretch(channel, low, high, params.output)
}
