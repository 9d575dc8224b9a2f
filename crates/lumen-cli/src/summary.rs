use console::Style;
use lumen_core::pipeline::config::EnhanceConfig;
use lumen_core::pipeline::{AlgorithmOutcome, RunSummary};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    error: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            error: Style::new().red().bold(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_config_summary(config: &EnhanceConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Lumen Enhancement"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output_dir.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Channel"),
        s.value
            .apply_to(if config.gray { "grayscale" } else { "HSV value" })
    );
    if config.grid_height > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Grid"),
            s.value.apply_to(format!("{} px cells", config.grid_height))
        );
    } else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Grid"),
            s.disabled.apply_to("disabled")
        );
    }
    println!();

    println!("  {}", s.header.apply_to("Algorithms"));
    for (i, algorithm) in config.algorithms.iter().enumerate() {
        println!(
            "    {}. {}",
            s.label.apply_to(i + 1),
            s.method.apply_to(algorithm)
        );
    }
    println!();
}

pub fn print_run_report(summary: &RunSummary) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Results"));
    for outcome in &summary.report.outcomes {
        match outcome {
            AlgorithmOutcome::Stored { name, mean } => println!(
                "    {:<22}{}",
                s.method.apply_to(name),
                s.value.apply_to(format!("mean {mean:.1}"))
            ),
            AlgorithmOutcome::Failed { name, error } => println!(
                "    {:<22}{}",
                s.error.apply_to(name),
                s.error.apply_to(error)
            ),
        }
    }
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Files"),
        s.value.apply_to(summary.outputs.len())
    );
    if let Some(ref grid) = summary.grid {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Comparison"),
            s.path.apply_to(grid.display())
        );
    }
    println!();
}
