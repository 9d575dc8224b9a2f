//! Spatial entropy-based contrast enhancement (SECE), optionally refined by
//! a DCT-domain weighting (SECE+DCT).
//!
//! The image is split into roughly 256 tiles whose aspect ratio follows the
//! image's. Per-tile histograms give a spatial entropy per intensity level,
//! which is turned into a distribution and then a global tone-mapping CDF.

use std::ops::Range;

use ndarray::{s, Array2};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::{quantize, truncate, Channel, LookupTable};
use crate::consts::{
    DEFAULT_DCT_GAMMA, HISTOGRAM_BINS, MAX_INTENSITY, PARALLEL_PIXEL_THRESHOLD,
    PARALLEL_TILE_THRESHOLD, SECE_TARGET_TILES,
};
use crate::error::{LumenError, Result};
use crate::histogram::{cumulative, Distribution, Histogram};

use super::dct::{dct2d, idct2d};

/// Parameters of the DCT refinement step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeceDctParams {
    /// Exponent applied to the entropy of the SECE distribution to get the
    /// high-frequency boost factor.
    pub gamma: f64,
}

impl Default for SeceDctParams {
    fn default() -> Self {
        Self {
            gamma: DEFAULT_DCT_GAMMA,
        }
    }
}

/// A rectangular region of the tile grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl Tile {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    pub fn pixel_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

/// Spatial entropy per intensity level and the grid it was computed on.
#[derive(Clone, Debug)]
pub struct SpatialEntropy {
    pub entropy: Distribution,
    pub rows: usize,
    pub cols: usize,
}

/// Tile grid dimensions `(M, N)` with `M * N ~ 256` and `M / N ~ H / W`.
pub fn tile_grid(height: usize, width: usize) -> Result<(usize, usize)> {
    if height == 0 || width == 0 {
        return Err(LumenError::InvalidDimensions { width, height });
    }
    let ratio = height as f64 / width as f64;
    let rows = (SECE_TARGET_TILES * ratio).sqrt().round_ties_even() as usize;
    let cols = (SECE_TARGET_TILES / ratio).sqrt().round_ties_even() as usize;
    if rows == 0 || cols == 0 {
        return Err(LumenError::TileGrid { width, height });
    }
    Ok((rows, cols))
}

/// Boundaries `round(k * total / count)` for `k = 0..=count`.
///
/// Tile `k` spans `edges[k]..edges[k + 1]`, so neighbouring tiles share one
/// boundary and the tiles cover `0..total` exactly once.
pub fn tile_edges(total: usize, count: usize) -> Vec<usize> {
    (0..=count)
        .map(|k| ((k * total) as f64 / count as f64).round_ties_even() as usize)
        .collect()
}

/// All non-empty tiles of the SECE grid, row-major.
pub fn tiles(height: usize, width: usize) -> Result<Vec<Tile>> {
    let (rows, cols) = tile_grid(height, width)?;
    Ok(grid_tiles(height, width, rows, cols))
}

fn grid_tiles(height: usize, width: usize, rows: usize, cols: usize) -> Vec<Tile> {
    let row_edges = tile_edges(height, rows);
    let col_edges = tile_edges(width, cols);

    let mut out = Vec::with_capacity(rows * cols);
    for r in row_edges.windows(2) {
        for c in col_edges.windows(2) {
            let tile = Tile {
                rows: r[0]..r[1],
                cols: c[0]..c[1],
            };
            if !tile.is_empty() {
                out.push(tile);
            }
        }
    }
    out
}

/// Accumulate `h * log2(h)` over every tile histogram, per intensity level.
///
/// Tile histograms may be computed in parallel; they are summed in tile
/// order so the floating point result does not depend on scheduling.
pub fn spatial_entropy(channel: &Channel) -> Result<SpatialEntropy> {
    let (h, w) = channel.data.dim();
    let (rows, cols) = tile_grid(h, w)?;
    let grid = grid_tiles(h, w, rows, cols);
    debug!(rows, cols, tiles = grid.len(), "SECE tile grid");

    let tile_hist = |tile: &Tile| {
        Histogram::of_view(channel.data.slice(s![tile.rows.clone(), tile.cols.clone()]))
    };
    let histograms: Vec<Histogram> =
        if grid.len() >= PARALLEL_TILE_THRESHOLD && channel.len() >= PARALLEL_PIXEL_THRESHOLD {
            grid.par_iter().map(tile_hist).collect()
        } else {
            grid.iter().map(tile_hist).collect()
        };

    let mut entropy = [0.0f64; HISTOGRAM_BINS];
    for hist in &histograms {
        for (e, &count) in entropy.iter_mut().zip(hist.counts().iter()) {
            if count > 0 {
                let c = count as f64;
                *e += c * c.log2();
            }
        }
    }

    Ok(SpatialEntropy {
        entropy,
        rows,
        cols,
    })
}

/// `f[i] = e[i] / (total - e[i])`, renormalized to sum 1.
///
/// Fails with `DegenerateInput` when the entropy is zero everywhere or sits
/// entirely in one level.
pub fn discrete_distribution(entropy: &Distribution) -> Result<Distribution> {
    let total: f64 = entropy.iter().sum();
    if total <= 0.0 {
        return Err(LumenError::DegenerateInput(
            "spatial entropy is zero at every level".into(),
        ));
    }

    let mut f = [0.0f64; HISTOGRAM_BINS];
    for (level, (out, &e)) in f.iter_mut().zip(entropy.iter()).enumerate() {
        if e <= 0.0 {
            continue;
        }
        let rest = total - e;
        if rest <= 0.0 {
            return Err(LumenError::DegenerateInput(format!(
                "all spatial entropy is at level {level}"
            )));
        }
        *out = e / rest;
    }

    let sum: f64 = f.iter().sum();
    Ok(f.map(|v| v / sum))
}

/// Shannon entropy (bits) of a distribution, skipping empty levels.
pub fn distribution_entropy(f: &Distribution) -> f64 {
    f.iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}

/// Spectral weights `w[k, l] = (1 + t1 * k) * (1 + t2 * l)` that ramp from 1
/// at DC to `alpha^2` at the highest frequency.
///
/// With fewer than two rows or columns there is no ramp and every weight is 1.
pub fn weighting_coefficients(alpha: f64, height: usize, width: usize) -> Array2<f64> {
    if height < 2 || width < 2 {
        return Array2::ones((height, width));
    }
    let t1 = (alpha - 1.0) / (height - 1) as f64;
    let t2 = (alpha - 1.0) / (width - 1) as f64;
    Array2::from_shape_fn((height, width), |(k, l)| {
        (1.0 + t1 * k as f64) * (1.0 + t2 * l as f64)
    })
}

/// SECE distribution of a channel, `None` when the input is degenerate.
fn sece_distribution(channel: &Channel) -> Result<Option<Distribution>> {
    let spatial = spatial_entropy(channel)?;
    match discrete_distribution(&spatial.entropy) {
        Ok(f) => Ok(Some(f)),
        Err(LumenError::DegenerateInput(reason)) => {
            debug!(%reason, "SECE skipped, channel unchanged");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Global SECE tone mapping: `v -> round(255 * cdf[v])`.
pub fn enhance(channel: &Channel) -> Result<Channel> {
    let Some(f) = sece_distribution(channel)? else {
        return Ok(channel.clone());
    };
    let cdf = cumulative(&f);
    let lut: LookupTable = std::array::from_fn(|v| quantize(MAX_INTENSITY * cdf[v]));
    Ok(channel.apply_lut(&lut))
}

/// SECE followed by DCT-domain weighting.
///
/// The SECE mapping is kept in floating point, transformed, weighted by
/// [`weighting_coefficients`] with `alpha = entropy(f) ^ gamma`, and
/// transformed back. The result is clamped and truncated to 8 bits.
/// Single-row or single-column images skip the weighting and return the
/// plain SECE mapping.
pub fn enhance_with_dct(channel: &Channel, params: &SeceDctParams) -> Result<Channel> {
    let Some(f) = sece_distribution(channel)? else {
        return Ok(channel.clone());
    };
    let cdf = cumulative(&f);
    let mapped = channel.data.mapv(|v| MAX_INTENSITY * cdf[v as usize]);

    let (h, w) = mapped.dim();
    if h < 2 || w < 2 {
        debug!(h, w, "Single row or column, DCT weighting skipped");
        return Channel::from_f64_rounded(&mapped);
    }

    let alpha = distribution_entropy(&f).powf(params.gamma);
    debug!(alpha, "SECE+DCT weighting");
    let weights = weighting_coefficients(alpha, h, w);
    let spectrum = dct2d(&mapped) * &weights;
    Channel::new(idct2d(&spectrum).mapv(truncate))
}
