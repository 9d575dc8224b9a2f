/// Number of intensity levels in an 8-bit channel.
pub const HISTOGRAM_BINS: usize = 256;

/// Largest representable 8-bit intensity, as a float.
pub const MAX_INTENSITY: f64 = 255.0;

/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Minimum tile count to compute SECE tile histograms in parallel.
pub const PARALLEL_TILE_THRESHOLD: usize = 64;

/// Output span below which a tone curve is treated as flat.
pub const EPSILON: f64 = 1e-12;

/// Relative distance from the target mean beyond which `auto_enhance`
/// treats an image as under- or over-exposed.
pub const DEFAULT_EXPOSURE_THRESHOLD: f64 = 0.3;

/// Mean intensity considered well exposed by `auto_enhance`.
pub const DEFAULT_TARGET_MEAN: f64 = 112.0;

/// AGCWD weighting exponent for over-bright images (applied to the negative).
pub const BRIGHT_ALPHA: f64 = 0.25;

/// AGCWD weighting exponent for under-lit images.
pub const DIMMED_ALPHA: f64 = 0.75;

/// Weighting exponent for the single-pass histogram-driven AGCWD.
pub const DEFAULT_HISTOGRAM_ALPHA: f64 = 0.5;

/// Lower truncation of the inverse CDF used for dimmed images.
pub const TRUNCATED_CDF_FLOOR: f64 = 0.5;

/// Percent of pixel mass clipped at each end by the percentile stretch.
pub const DEFAULT_STRETCH_BOUNDS_PERCENT: f64 = 5.0;

/// Fraction of the histogram peak a bin must exceed to bound the peak stretch.
pub const DEFAULT_PEAK_CUTOFF: f64 = 0.05;

/// Default sigmoid gain (slope at the cutoff).
pub const DEFAULT_SIGMOID_GAIN: f64 = 10.0;

/// Default sigmoid cutoff (normalized intensity of the inflection point).
pub const DEFAULT_SIGMOID_CUTOFF: f64 = 0.5;

/// Target number of SECE tiles (M*N is approximately this).
pub const SECE_TARGET_TILES: f64 = 256.0;

/// Exponent applied to the distribution entropy in the SECE+DCT weighting.
pub const DEFAULT_DCT_GAMMA: f64 = 0.5;

/// Default height in pixels of each cell of a comparison grid.
pub const DEFAULT_GRID_HEIGHT: u32 = 400;
