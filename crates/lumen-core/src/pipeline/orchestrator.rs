use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{LumenError, Result};
use crate::io::image_io::{load_source, save_color, save_source, write_histogram_csv};

use super::config::{Algorithm, EnhanceConfig};
use super::grid::compose_grid;
use super::helpers::apply_algorithm;
use super::store::{VariantStore, ORIGINAL};
use super::types::{AlgorithmOutcome, ProgressReporter, RunReport};

/// Rows in the comparison grid.
const GRID_ROWS: usize = 2;

/// Variant names for a list of algorithms; repeats get a numeric suffix.
fn variant_names(algorithms: &[Algorithm]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    algorithms
        .iter()
        .map(|a| {
            let count = seen.entry(a.name()).or_insert(0);
            *count += 1;
            if *count == 1 {
                a.name().to_string()
            } else {
                format!("{}-{}", a.name(), count)
            }
        })
        .collect()
}

/// Apply each algorithm to the `source` variant and store the results.
///
/// Algorithms run in parallel against the same read-only source. A failing
/// algorithm is recorded in the report and does not stop the others.
pub fn run_algorithms(
    store: &mut VariantStore,
    source: &str,
    algorithms: &[Algorithm],
    reporter: &dyn ProgressReporter,
) -> Result<RunReport> {
    let names = variant_names(algorithms);
    reporter.begin(algorithms.len());
    let done = AtomicUsize::new(0);

    let results: Vec<_> = {
        let variant = store
            .get(source)
            .ok_or_else(|| LumenError::Config(format!("no variant named '{source}'")))?;
        algorithms
            .par_iter()
            .map(|algorithm| {
                reporter.start_algorithm(algorithm);
                let result = apply_algorithm(&variant.channel, &variant.histogram, algorithm);
                reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
                result
            })
            .collect()
    };

    let mut report = RunReport::default();
    for ((name, algorithm), result) in names.into_iter().zip(algorithms).zip(results) {
        match result {
            Ok(channel) => {
                let mean = channel.mean();
                store.insert(&name, channel);
                report.outcomes.push(AlgorithmOutcome::Stored { name, mean });
            }
            Err(error) => {
                warn!(algorithm = %algorithm, %error, "Algorithm failed");
                report.outcomes.push(AlgorithmOutcome::Failed { name, error });
            }
        }
    }
    reporter.finish();

    info!(
        succeeded = report.succeeded(),
        total = algorithms.len(),
        "Enhancement run complete"
    );
    Ok(report)
}

/// Files written by [`run_enhance`].
#[derive(Debug)]
pub struct RunSummary {
    pub report: RunReport,
    pub store: VariantStore,
    pub outputs: Vec<PathBuf>,
    pub grid: Option<PathBuf>,
}

/// Load the configured input, run every configured algorithm on its
/// intensity channel, and write each variant plus a comparison grid.
pub fn run_enhance(config: &EnhanceConfig, reporter: &dyn ProgressReporter) -> Result<RunSummary> {
    let source = load_source(&config.input, config.gray)?;
    let intensity = source.intensity();
    info!(
        width = intensity.width(),
        height = intensity.height(),
        color = source.is_color(),
        "Loaded input"
    );

    let mut store = VariantStore::with_original(intensity.clone());
    let report = run_algorithms(&mut store, ORIGINAL, &config.algorithms, reporter)?;

    std::fs::create_dir_all(&config.output_dir)?;
    let mut outputs = Vec::with_capacity(store.len());
    let mut rendered = Vec::with_capacity(store.len());
    for (name, variant) in store.iter() {
        let image = source.with_intensity(variant.channel.clone())?;
        let path = config.output_dir.join(format!("{name}.png"));
        save_source(&image, &path)?;
        outputs.push(path);

        if config.histograms {
            let csv = config.output_dir.join(format!("{name}.csv"));
            write_histogram_csv(&variant.histogram, &csv)?;
            outputs.push(csv);
        }
        if config.grid_height > 0 {
            rendered.push(image.to_rgb());
        }
    }

    let grid = if config.grid_height > 0 {
        let path = config.output_dir.join("comparison.png");
        save_color(&compose_grid(&rendered, config.grid_height, GRID_ROWS)?, &path)?;
        Some(path)
    } else {
        None
    };

    info!(output = %config.output_dir.display(), files = outputs.len(), "Outputs saved");
    Ok(RunSummary {
        report,
        store,
        outputs,
        grid,
    })
}
