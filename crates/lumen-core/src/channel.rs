use ndarray::{Array2, Zip};

use crate::consts::{HISTOGRAM_BINS, MAX_INTENSITY, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{LumenError, Result};

/// Transfer function from each input intensity to an output intensity.
pub type LookupTable = [u8; HISTOGRAM_BINS];

/// A single 8-bit intensity channel: a grayscale image or the V plane of HSV.
///
/// Both dimensions are at least 1. Transforms take `&Channel` and return a
/// new channel of identical shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Channel {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<u8>,
}

impl Channel {
    pub fn new(data: Array2<u8>) -> Result<Self> {
        let (height, width) = data.dim();
        if height == 0 || width == 0 {
            return Err(LumenError::InvalidDimensions { width, height });
        }
        Ok(Self { data })
    }

    /// Build a channel from a row-major pixel buffer.
    pub fn from_raw(width: usize, height: usize, pixels: Vec<u8>) -> Result<Self> {
        let data = Array2::from_shape_vec((height, width), pixels)
            .map_err(|_| LumenError::InvalidDimensions { width, height })?;
        Self::new(data)
    }

    /// Constant channel, mostly useful for tests and padding.
    pub fn filled(height: usize, width: usize, value: u8) -> Result<Self> {
        Self::new(Array2::from_elem((height, width), value))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    /// Total pixel count (H*W).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Mean intensity in [0, 255].
    pub fn mean(&self) -> f64 {
        let sum: u64 = self.data.iter().map(|&v| v as u64).sum();
        sum as f64 / self.len() as f64
    }

    /// Smallest and largest intensity present.
    pub fn min_max(&self) -> (u8, u8) {
        self.data
            .iter()
            .fold((u8::MAX, u8::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }

    /// Substitute every pixel through `lut`. The input is left untouched.
    pub fn apply_lut(&self, lut: &LookupTable) -> Channel {
        let data = if self.len() >= PARALLEL_PIXEL_THRESHOLD {
            Zip::from(&self.data).par_map_collect(|&v| lut[v as usize])
        } else {
            self.data.mapv(|v| lut[v as usize])
        };
        Channel { data }
    }

    /// Photographic negative: 255 - v.
    pub fn inverted(&self) -> Channel {
        let lut: LookupTable = std::array::from_fn(|i| u8::MAX - i as u8);
        self.apply_lut(&lut)
    }

    pub fn to_f64(&self) -> Array2<f64> {
        self.data.mapv(|v| v as f64)
    }

    /// Round, clamp and cast a floating point plane back into a channel.
    pub fn from_f64_rounded(data: &Array2<f64>) -> Result<Channel> {
        Channel::new(data.mapv(quantize))
    }
}

/// Lookup table mapping every intensity to itself.
pub fn identity_lut() -> LookupTable {
    std::array::from_fn(|i| i as u8)
}

/// Round half to even, clamp to [0, 255], cast.
pub fn quantize(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round_ties_even().clamp(0.0, MAX_INTENSITY) as u8
}

/// Clamp to [0, 255] and cast, dropping the fractional part.
pub fn truncate(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.clamp(0.0, MAX_INTENSITY) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_dimensions() {
        assert!(Channel::new(Array2::zeros((0, 4))).is_err());
        assert!(Channel::from_raw(3, 2, vec![0; 5]).is_err());
    }

    #[test]
    fn quantize_clamps_and_rounds_to_even() {
        assert_eq!(quantize(-3.0), 0);
        assert_eq!(quantize(300.0), 255);
        assert_eq!(quantize(2.5), 2);
        assert_eq!(quantize(3.5), 4);
        assert_eq!(quantize(f64::NAN), 0);
        assert_eq!(truncate(254.9), 254);
    }

    #[test]
    fn inverted_twice_is_identity() {
        let ch = Channel::from_raw(3, 1, vec![0, 100, 255]).unwrap();
        assert_eq!(ch.inverted().data.as_slice().unwrap(), &[255, 155, 0]);
        assert_eq!(ch.inverted().inverted(), ch);
    }
}
