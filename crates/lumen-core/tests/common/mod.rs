#![allow(dead_code)]

use lumen_core::channel::Channel;
use ndarray::Array2;

/// Build a channel from literal rows.
pub fn channel_from_rows(rows: &[&[u8]]) -> Channel {
    let h = rows.len();
    let w = rows[0].len();
    let pixels: Vec<u8> = rows.iter().flat_map(|r| r.iter().copied()).collect();
    Channel::from_raw(w, h, pixels).expect("valid dimensions")
}

pub fn constant(h: usize, w: usize, value: u8) -> Channel {
    Channel::filled(h, w, value).expect("valid dimensions")
}

/// Smooth diagonal ramp from 0 (top-left) to 255 (bottom-right).
pub fn diagonal_gradient(h: usize, w: usize) -> Channel {
    let span = (h + w - 2).max(1);
    let data = Array2::from_shape_fn((h, w), |(r, c)| ((r + c) * 255 / span) as u8);
    Channel::new(data).expect("valid dimensions")
}

/// Deterministic pseudo-random values in `[lo, hi]` (inclusive).
pub fn pseudo_random(h: usize, w: usize, lo: u8, hi: u8, seed: u64) -> Channel {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let span = (hi - lo) as u64 + 1;
    let data = Array2::from_shape_fn((h, w), |_| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        lo + ((state >> 33) % span) as u8
    });
    Channel::new(data).expect("valid dimensions")
}

/// Blocky texture with values `0..=192` in steps of 3. Neighbouring 2x2
/// tiles of a 32x32 image see different level mixes.
pub fn sece_texture(h: usize, w: usize) -> Channel {
    let data = Array2::from_shape_fn((h, w), |(r, c)| {
        (3 * ((r / 4) * 8 + (c / 8) * 2 + (r + c) % 3)) as u8
    });
    Channel::new(data).expect("valid dimensions")
}

/// True if `out[i] <= out[j]` whenever `input[i] < input[j]`.
pub fn is_order_preserving(input: &Channel, output: &Channel) -> bool {
    let mut map = [None::<u8>; 256];
    for (&a, &b) in input.data.iter().zip(output.data.iter()) {
        match map[a as usize] {
            Some(prev) if prev != b => return false,
            _ => map[a as usize] = Some(b),
        }
    }
    let mapped: Vec<u8> = map.iter().flatten().copied().collect();
    mapped.windows(2).all(|w| w[0] <= w[1])
}

/// Mean absolute per-pixel difference.
pub fn mean_abs_diff(a: &Channel, b: &Channel) -> f64 {
    let total: u64 = a
        .data
        .iter()
        .zip(b.data.iter())
        .map(|(&x, &y)| (x as i32 - y as i32).unsigned_abs() as u64)
        .sum();
    total as f64 / a.len() as f64
}
