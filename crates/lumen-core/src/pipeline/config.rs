use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_GRID_HEIGHT;
use crate::enhance::agcwd::{AutoEnhanceParams, HistogramAgcwdParams};
use crate::enhance::sece::SeceDctParams;
use crate::enhance::sigmoid::SigmoidParams;
use crate::enhance::stretch::{PeakStretchParams, PercentileStretchParams};
use crate::error::LumenError;

/// Every enhancement the harness can run, each with its own parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Algorithm {
    /// Brightness-adaptive AGCWD (dimmed / bright / unchanged).
    AgcwdAuto(AutoEnhanceParams),
    /// AGCWD on the negative, for over-bright images.
    AgcwdBright,
    /// AGCWD with a truncated CDF, for under-lit images.
    AgcwdDimmed,
    /// Single-pass AGCWD driven by the source histogram.
    AgcwdHistogram(HistogramAgcwdParams),
    /// Global histogram equalization.
    Equalize,
    /// Linear stretch between weighted percentiles.
    StretchPercentile(PercentileStretchParams),
    /// Linear stretch between peak-threshold bounds.
    StretchPeak(PeakStretchParams),
    /// Logistic tone curve.
    Sigmoid(SigmoidParams),
    /// Spatial entropy-based contrast enhancement.
    Sece,
    /// SECE with DCT-domain weighting.
    SeceDct(SeceDctParams),
}

impl Algorithm {
    /// Every algorithm with default parameters, in display order.
    pub fn all() -> Vec<Algorithm> {
        vec![
            Self::AgcwdAuto(AutoEnhanceParams::default()),
            Self::AgcwdBright,
            Self::AgcwdDimmed,
            Self::AgcwdHistogram(HistogramAgcwdParams::default()),
            Self::Equalize,
            Self::StretchPercentile(PercentileStretchParams::default()),
            Self::StretchPeak(PeakStretchParams::default()),
            Self::Sigmoid(SigmoidParams::default()),
            Self::Sece,
            Self::SeceDct(SeceDctParams::default()),
        ]
    }

    /// Stable short name, used as variant key and in file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AgcwdAuto(_) => "agcwd-auto",
            Self::AgcwdBright => "agcwd-bright",
            Self::AgcwdDimmed => "agcwd-dimmed",
            Self::AgcwdHistogram(_) => "agcwd-histogram",
            Self::Equalize => "equalize",
            Self::StretchPercentile(_) => "stretch-percentile",
            Self::StretchPeak(_) => "stretch-peak",
            Self::Sigmoid(_) => "sigmoid",
            Self::Sece => "sece",
            Self::SeceDct(_) => "sece-dct",
        }
    }

    /// Reject parameter values the transforms cannot honour.
    pub fn validate(&self) -> crate::error::Result<()> {
        let bad = |msg: String| Err(LumenError::Config(format!("{}: {msg}", self.name())));
        match self {
            Self::AgcwdAuto(p) if p.target_mean <= 0.0 => {
                bad(format!("target_mean must be positive, got {}", p.target_mean))
            }
            Self::AgcwdAuto(p) if p.threshold < 0.0 => {
                bad(format!("threshold must be non-negative, got {}", p.threshold))
            }
            Self::AgcwdHistogram(p) if p.alpha <= 0.0 => {
                bad(format!("alpha must be positive, got {}", p.alpha))
            }
            Self::StretchPercentile(p) if !(0.0..=50.0).contains(&p.bounds_percent) => bad(
                format!("bounds_percent must be in [0, 50], got {}", p.bounds_percent),
            ),
            Self::StretchPeak(p) if !(0.0..=1.0).contains(&p.cutoff_fraction) => bad(format!(
                "cutoff_fraction must be in [0, 1], got {}",
                p.cutoff_fraction
            )),
            Self::Sigmoid(p) if !p.gain.is_finite() || !p.cutoff.is_finite() => {
                bad("gain and cutoff must be finite".into())
            }
            Self::SeceDct(p) if !p.gamma.is_finite() => bad("gamma must be finite".into()),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AgcwdAuto(p) => write!(
                f,
                "AGCWD Auto (threshold={}, target={})",
                p.threshold, p.target_mean
            ),
            Self::AgcwdBright => write!(f, "AGCWD Bright"),
            Self::AgcwdDimmed => write!(f, "AGCWD Dimmed"),
            Self::AgcwdHistogram(p) => write!(f, "AGCWD Histogram (alpha={})", p.alpha),
            Self::Equalize => write!(f, "Equalize"),
            Self::StretchPercentile(p) => {
                write!(f, "Percentile Stretch ({}%)", p.bounds_percent)
            }
            Self::StretchPeak(p) => write!(f, "Peak Stretch (cutoff={})", p.cutoff_fraction),
            Self::Sigmoid(p) => write!(f, "Sigmoid (gain={}, cutoff={})", p.gain, p.cutoff),
            Self::Sece => write!(f, "SECE"),
            Self::SeceDct(p) => write!(f, "SECE+DCT (gamma={})", p.gamma),
        }
    }
}

impl FromStr for Algorithm {
    type Err = LumenError;

    /// Parse a short name into the algorithm with default parameters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::all()
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| LumenError::Config(format!("unknown algorithm '{s}'")))
    }
}

fn default_grid_height() -> u32 {
    DEFAULT_GRID_HEIGHT
}

/// Harness configuration, usually read from TOML.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnhanceConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Process the image as grayscale instead of enhancing the HSV value plane.
    #[serde(default)]
    pub gray: bool,
    /// Height of each cell in the comparison grid; 0 disables the grid.
    #[serde(default = "default_grid_height")]
    pub grid_height: u32,
    /// Write a `<variant>.csv` histogram next to each output.
    #[serde(default)]
    pub histograms: bool,
    #[serde(default = "Algorithm::all")]
    pub algorithms: Vec<Algorithm>,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input.png"),
            output_dir: PathBuf::from("enhanced"),
            gray: false,
            grid_height: DEFAULT_GRID_HEIGHT,
            histograms: false,
            algorithms: Algorithm::all(),
        }
    }
}
