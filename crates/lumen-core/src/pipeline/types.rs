use crate::error::LumenError;

use super::config::Algorithm;

/// Result of one algorithm in a multi-algorithm run.
#[derive(Debug)]
pub enum AlgorithmOutcome {
    /// Stored in the variant store under the algorithm's name.
    Stored { name: String, mean: f64 },
    Failed { name: String, error: LumenError },
}

impl AlgorithmOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Stored { name, .. } | Self::Failed { name, .. } => name,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Stored { .. })
    }
}

/// Per-algorithm outcomes of [`run_algorithms`](super::run_algorithms).
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<AlgorithmOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&str, &LumenError)> {
        self.outcomes.iter().filter_map(|o| match o {
            AlgorithmOutcome::Failed { name, error } => Some((name.as_str(), error)),
            AlgorithmOutcome::Stored { .. } => None,
        })
    }
}

/// Thread-safe progress reporting for multi-algorithm runs.
///
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A run over `total` algorithms is starting.
    fn begin(&self, _total: usize) {}

    /// `algorithm` is about to run.
    fn start_algorithm(&self, _algorithm: &Algorithm) {}

    /// `done` algorithms have finished (successfully or not).
    fn advance(&self, _done: usize) {}

    fn finish(&self) {}
}

/// No-op progress reporter.
pub struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
