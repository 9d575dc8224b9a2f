use ndarray::ArrayView2;
use rayon::prelude::*;
use tracing::debug;

use crate::channel::Channel;
use crate::consts::{HISTOGRAM_BINS, PARALLEL_PIXEL_THRESHOLD};

/// Probability (or cumulative probability) per intensity level.
pub type Distribution = [f64; HISTOGRAM_BINS];

/// 256-bin intensity histogram of a channel or a region of one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; HISTOGRAM_BINS],
}

impl Histogram {
    /// Wrap counts obtained elsewhere, e.g. a histogram cached by the caller.
    pub fn from_counts(counts: [u64; HISTOGRAM_BINS]) -> Self {
        Self { counts }
    }

    /// Count the intensities of an arbitrary 2D view (a whole channel or a tile).
    pub fn of_view(view: ArrayView2<u8>) -> Self {
        let mut counts = [0u64; HISTOGRAM_BINS];
        for &v in view.iter() {
            counts[v as usize] += 1;
        }
        Self { counts }
    }

    pub fn counts(&self) -> &[u64; HISTOGRAM_BINS] {
        &self.counts
    }

    pub fn get(&self, level: u8) -> u64 {
        self.counts[level as usize]
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// First index of the largest count, with that count.
    pub fn peak(&self) -> (u8, u64) {
        let mut best = (0u8, self.counts[0]);
        for (i, &c) in self.counts.iter().enumerate().skip(1) {
            if c > best.1 {
                best = (i as u8, c);
            }
        }
        best
    }

    /// Running sum of the raw counts.
    pub fn cumulative_counts(&self) -> [u64; HISTOGRAM_BINS] {
        let mut acc = 0u64;
        std::array::from_fn(|i| {
            acc += self.counts[i];
            acc
        })
    }

    /// Number of intensity levels with a non-zero count.
    pub fn distinct_levels(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Lowest populated level, `None` for an empty histogram.
    pub fn min_level(&self) -> Option<u8> {
        self.counts.iter().position(|&c| c > 0).map(|i| i as u8)
    }

    /// Highest populated level, `None` for an empty histogram.
    pub fn max_level(&self) -> Option<u8> {
        self.counts.iter().rposition(|&c| c > 0).map(|i| i as u8)
    }
}

/// Exact per-intensity frequency count of a channel.
pub fn histogram(channel: &Channel) -> Histogram {
    let (h, _) = channel.data.dim();
    if channel.len() < PARALLEL_PIXEL_THRESHOLD {
        return Histogram::of_view(channel.data.view());
    }

    let counts = (0..h)
        .into_par_iter()
        .fold(
            || [0u64; HISTOGRAM_BINS],
            |mut acc, row| {
                for &v in channel.data.row(row).iter() {
                    acc[v as usize] += 1;
                }
                acc
            },
        )
        .reduce(
            || [0u64; HISTOGRAM_BINS],
            |mut a, b| {
                for (x, y) in a.iter_mut().zip(b.iter()) {
                    *x += *y;
                }
                a
            },
        );
    Histogram { counts }
}

/// Probability distribution `counts / total`.
///
/// An empty histogram has no defined distribution; the uniform distribution
/// (1/256 per level) is returned instead.
pub fn normalize(hist: &Histogram) -> Distribution {
    let total = hist.total();
    if total == 0 {
        debug!("Empty histogram, falling back to uniform distribution");
        return [1.0 / HISTOGRAM_BINS as f64; HISTOGRAM_BINS];
    }
    let total = total as f64;
    std::array::from_fn(|i| hist.counts[i] as f64 / total)
}

/// Running sum of a distribution.
pub fn cumulative(probs: &Distribution) -> Distribution {
    let mut acc = 0.0;
    std::array::from_fn(|i| {
        acc += probs[i];
        acc
    })
}

/// Sum of a distribution, used when renormalizing derived weights.
pub(crate) fn sum(probs: &Distribution) -> f64 {
    probs.iter().sum()
}

/// Smallest and largest entry of a distribution.
pub(crate) fn extrema(probs: &Distribution) -> (f64, f64) {
    probs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| {
            (lo.min(p), hi.max(p))
        })
}
