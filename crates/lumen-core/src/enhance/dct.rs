//! Orthonormal 2D discrete cosine transform (DCT-II) and its inverse.
//!
//! Each 1D transform of length `n` runs a `2n`-point FFT over the
//! even-symmetric extension `[x0 .. x(n-1), x(n-1) .. x0]`. The 2D transform
//! is separable: rows first, then columns.

use std::f64::consts::PI;
use std::sync::Arc;

use ndarray::{Array2, ArrayViewMut1, Axis};
use num_complex::Complex;
use rayon::prelude::*;
use rustfft::{Fft, FftPlanner};

use crate::consts::PARALLEL_PIXEL_THRESHOLD;

#[derive(Clone, Copy)]
enum Pass {
    Forward,
    Inverse,
}

/// Planned 1D DCT of a fixed length.
pub struct Dct1d {
    len: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

impl Dct1d {
    pub fn new(planner: &mut FftPlanner<f64>, len: usize) -> Self {
        Self {
            len,
            forward: planner.plan_fft_forward(2 * len),
            inverse: planner.plan_fft_inverse(2 * len),
        }
    }

    /// Orthonormal scale factor of coefficient `k`.
    fn scale(&self, k: usize) -> f64 {
        let n = self.len as f64;
        if k == 0 {
            (1.0 / n).sqrt()
        } else {
            (2.0 / n).sqrt()
        }
    }

    /// DCT-II of `input` into `output`; both have length `len`.
    pub fn forward(&self, input: &[f64], output: &mut [f64]) {
        let n = self.len;
        let mut buf = vec![Complex::new(0.0, 0.0); 2 * n];
        for (i, &x) in input.iter().enumerate() {
            buf[i] = Complex::new(x, 0.0);
            buf[2 * n - 1 - i] = Complex::new(x, 0.0);
        }
        self.forward.process(&mut buf);

        for (k, out) in output.iter_mut().enumerate() {
            let twiddle = Complex::from_polar(1.0, -PI * k as f64 / (2 * n) as f64);
            *out = (buf[k] * twiddle).re * 0.5 * self.scale(k);
        }
    }

    /// DCT-III (inverse of the orthonormal DCT-II) of `input` into `output`.
    pub fn inverse(&self, input: &[f64], output: &mut [f64]) {
        let n = self.len;
        let mut buf = vec![Complex::new(0.0, 0.0); 2 * n];
        for (k, &c) in input.iter().enumerate() {
            let twiddle = Complex::from_polar(1.0, PI * k as f64 / (2 * n) as f64);
            buf[k] = twiddle * (2.0 * c / self.scale(k));
        }
        // Hermitian symmetry of a real signal's spectrum; bin n is zero.
        for k in 1..n {
            buf[2 * n - k] = buf[k].conj();
        }
        self.inverse.process(&mut buf);

        let norm = 1.0 / (2 * n) as f64;
        for (i, out) in output.iter_mut().enumerate() {
            *out = buf[i].re * norm;
        }
    }
}

/// Forward orthonormal 2D DCT.
pub fn dct2d(data: &Array2<f64>) -> Array2<f64> {
    transform2d(data, Pass::Forward)
}

/// Inverse orthonormal 2D DCT.
pub fn idct2d(data: &Array2<f64>) -> Array2<f64> {
    transform2d(data, Pass::Inverse)
}

fn transform2d(data: &Array2<f64>, pass: Pass) -> Array2<f64> {
    let (h, w) = data.dim();
    let mut result = data.to_owned();
    if h == 0 || w == 0 {
        return result;
    }

    let mut planner = FftPlanner::new();
    let row_dct = Dct1d::new(&mut planner, w);
    let col_dct = Dct1d::new(&mut planner, h);

    // Axis(0) yields rows (length w), Axis(1) yields columns (length h).
    transform_axis(&mut result, Axis(0), &row_dct, pass);
    transform_axis(&mut result, Axis(1), &col_dct, pass);
    result
}

fn transform_axis(data: &mut Array2<f64>, axis: Axis, dct: &Dct1d, pass: Pass) {
    if data.len() >= PARALLEL_PIXEL_THRESHOLD {
        data.axis_iter_mut(axis)
            .into_par_iter()
            .for_each(|lane| transform_lane(lane, dct, pass));
    } else {
        for lane in data.axis_iter_mut(axis) {
            transform_lane(lane, dct, pass);
        }
    }
}

fn transform_lane(mut lane: ArrayViewMut1<f64>, dct: &Dct1d, pass: Pass) {
    let input = lane.to_vec();
    let mut output = vec![0.0; input.len()];
    match pass {
        Pass::Forward => dct.forward(&input, &mut output),
        Pass::Inverse => dct.inverse(&input, &mut output),
    }
    for (dst, src) in lane.iter_mut().zip(output) {
        *dst = src;
    }
}
