use crate::channel::Channel;
use crate::enhance::agcwd::{agcwd_from_histogram, auto_enhance, enhance_bright, enhance_dimmed};
use crate::enhance::equalize::equalize;
use crate::enhance::sece;
use crate::enhance::sigmoid::sigmoid_stretch;
use crate::enhance::stretch::{stretch_peak, stretch_percentile};
use crate::error::Result;
use crate::histogram::Histogram;

use super::config::Algorithm;

/// Run one algorithm on an intensity channel.
///
/// `hist` is the histogram of `channel`, supplied by the caller so repeated
/// runs over the same source count pixels once.
pub fn apply_algorithm(
    channel: &Channel,
    hist: &Histogram,
    algorithm: &Algorithm,
) -> Result<Channel> {
    algorithm.validate()?;
    let out = match algorithm {
        Algorithm::AgcwdAuto(params) => auto_enhance(channel, params),
        Algorithm::AgcwdBright => enhance_bright(channel),
        Algorithm::AgcwdDimmed => enhance_dimmed(channel),
        Algorithm::AgcwdHistogram(params) => agcwd_from_histogram(channel, hist, params),
        Algorithm::Equalize => equalize(channel, hist),
        Algorithm::StretchPercentile(params) => stretch_percentile(channel, hist, params),
        Algorithm::StretchPeak(params) => stretch_peak(channel, hist, params),
        Algorithm::Sigmoid(params) => sigmoid_stretch(channel, params),
        Algorithm::Sece => sece::enhance(channel)?,
        Algorithm::SeceDct(params) => sece::enhance_with_dct(channel, params)?,
    };
    Ok(out)
}
