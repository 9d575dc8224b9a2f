use indicatif::{ProgressBar, ProgressStyle};
use lumen_core::pipeline::config::Algorithm;
use lumen_core::pipeline::ProgressReporter;

/// Drives an indicatif bar from a multi-algorithm run.
pub struct BarReporter {
    bar: ProgressBar,
}

impl BarReporter {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:32} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self { bar })
    }
}

impl ProgressReporter for BarReporter {
    fn begin(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn start_algorithm(&self, algorithm: &Algorithm) {
        self.bar.set_message(algorithm.to_string());
    }

    fn advance(&self, done: usize) {
        self.bar.set_position(done as u64);
    }

    fn finish(&self) {
        self.bar.finish_with_message("Done");
    }
}
