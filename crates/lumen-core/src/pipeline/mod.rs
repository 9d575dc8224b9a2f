pub mod config;
mod grid;
mod helpers;
mod orchestrator;
mod store;
mod types;

pub use grid::compose_grid;
pub use helpers::apply_algorithm;
pub use orchestrator::{run_algorithms, run_enhance, RunSummary};
pub use store::{Variant, VariantStore, ORIGINAL};
pub use types::{AlgorithmOutcome, NoOpReporter, ProgressReporter, RunReport};
