use tracing::debug;

use crate::channel::{quantize, Channel, LookupTable};
use crate::consts::MAX_INTENSITY;
use crate::histogram::Histogram;

/// Global histogram equalization.
///
/// The cumulative histogram is rebased on its first populated level so the
/// darkest present intensity maps to 0 and the brightest to 255. A channel
/// with a single intensity is returned unchanged.
pub fn equalize(channel: &Channel, hist: &Histogram) -> Channel {
    let total = hist.total();
    let Some(first) = hist.min_level() else {
        return channel.clone();
    };
    let base = hist.get(first);
    if base == total {
        debug!(level = first, "Single intensity level, equalization skipped");
        return channel.clone();
    }

    let cdf = hist.cumulative_counts();
    let scale = MAX_INTENSITY / (total - base) as f64;
    let lut: LookupTable =
        std::array::from_fn(|v| quantize(cdf[v].saturating_sub(base) as f64 * scale));
    channel.apply_lut(&lut)
}
