//! HSV split of an RGB image so enhancement can run on the value plane
//! while hue and saturation are carried through untouched.

use image::{Rgb, RgbImage};
use ndarray::Array2;

use crate::channel::{quantize, Channel};
use crate::error::{LumenError, Result};

/// An RGB image split into HSV planes.
///
/// Hue (0..1, fraction of a full turn) and saturation (0..1) are kept in
/// floating point; value is the 8-bit intensity channel the enhancement
/// transforms operate on.
#[derive(Clone, Debug)]
pub struct HsvImage {
    pub hue: Array2<f32>,
    pub saturation: Array2<f32>,
    pub value: Channel,
}

impl HsvImage {
    pub fn from_rgb(img: &RgbImage) -> Result<Self> {
        let (w, h) = img.dimensions();
        let (h, w) = (h as usize, w as usize);
        let mut hue = Array2::<f32>::zeros((h, w));
        let mut saturation = Array2::<f32>::zeros((h, w));
        let mut value = Array2::<u8>::zeros((h, w));

        for (x, y, pixel) in img.enumerate_pixels() {
            let [r, g, b] = pixel.0;
            let (hh, ss, vv) = rgb_to_hsv(r, g, b);
            let idx = [y as usize, x as usize];
            hue[idx] = hh;
            saturation[idx] = ss;
            value[idx] = vv;
        }

        Ok(Self {
            hue,
            saturation,
            value: Channel::new(value)?,
        })
    }

    pub fn value_channel(&self) -> &Channel {
        &self.value
    }

    /// Same hue and saturation with a replacement value plane.
    pub fn with_value(&self, value: Channel) -> Result<HsvImage> {
        if value.data.dim() != self.hue.dim() {
            return Err(LumenError::InvalidDimensions {
                width: value.width(),
                height: value.height(),
            });
        }
        Ok(HsvImage {
            hue: self.hue.clone(),
            saturation: self.saturation.clone(),
            value,
        })
    }

    pub fn to_rgb(&self) -> RgbImage {
        let (h, w) = self.hue.dim();
        let mut img = RgbImage::new(w as u32, h as u32);
        for row in 0..h {
            for col in 0..w {
                let rgb = hsv_to_rgb(
                    self.hue[[row, col]],
                    self.saturation[[row, col]],
                    self.value.data[[row, col]],
                );
                img.put_pixel(col as u32, row as u32, Rgb(rgb));
            }
        }
        img
    }
}

/// RGB (8-bit) to (hue 0..1, saturation 0..1, value 0..255).
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, u8) {
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = (v - min) as f32;
    let s = if v == 0 { 0.0 } else { d / v as f32 };
    if v == min {
        return (0.0, s, v);
    }

    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let hue = if v == r {
        let mut h = (gf - bf) / d;
        if h < 0.0 {
            h += 6.0;
        }
        h / 6.0
    } else if v == g {
        ((bf - rf) / d + 2.0) / 6.0
    } else {
        ((rf - gf) / d + 4.0) / 6.0
    };
    (hue, s, v)
}

/// Inverse of [`rgb_to_hsv`].
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: u8) -> [u8; 3] {
    if saturation <= 0.0 {
        return [value; 3];
    }
    let v = value as f64;
    let s = saturation as f64;
    let h6 = (hue as f64).rem_euclid(1.0) * 6.0;
    let i = h6.floor() as i32;
    let f = h6 - i as f64;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match i % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    [quantize(r), quantize(g), quantize(b)]
}
