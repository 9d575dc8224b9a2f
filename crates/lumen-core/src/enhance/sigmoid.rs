use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::channel::{quantize, Channel, LookupTable};
use crate::consts::{DEFAULT_SIGMOID_CUTOFF, DEFAULT_SIGMOID_GAIN, EPSILON, MAX_INTENSITY};

/// Parameters of the logistic tone curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SigmoidParams {
    /// Slope of the curve at the cutoff. Larger values give more contrast.
    pub gain: f64,
    /// Normalized intensity (0..1) of the inflection point.
    pub cutoff: f64,
}

impl Default for SigmoidParams {
    fn default() -> Self {
        Self {
            gain: DEFAULT_SIGMOID_GAIN,
            cutoff: DEFAULT_SIGMOID_CUTOFF,
        }
    }
}

fn logistic(gain: f64, cutoff: f64, z: f64) -> f64 {
    1.0 / (1.0 + (gain * (cutoff - z)).exp())
}

/// Logistic tone curve over the channel's own [min, max] range.
///
/// The curve is rescaled so the darkest pixel lands on 0 and the brightest
/// on 255. A constant channel, or a gain that makes the curve flat, returns
/// the channel unchanged.
pub fn sigmoid_stretch(channel: &Channel, params: &SigmoidParams) -> Channel {
    let (lo, hi) = channel.min_max();
    if lo == hi {
        debug!("Constant channel, sigmoid stretch skipped");
        return channel.clone();
    }

    let a = logistic(params.gain, params.cutoff, 0.0);
    let b = logistic(params.gain, params.cutoff, 1.0) - a;
    if b.abs() <= EPSILON || !b.is_finite() {
        debug!(gain = params.gain, "Flat sigmoid curve, channel unchanged");
        return channel.clone();
    }

    let range = (hi - lo) as f64;
    let lut: LookupTable = std::array::from_fn(|v| {
        let z = (v as f64 - lo as f64) / range;
        quantize((logistic(params.gain, params.cutoff, z) - a) / b * MAX_INTENSITY)
    });
    channel.apply_lut(&lut)
}
