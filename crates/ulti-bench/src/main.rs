use std::path::PathBuf;

use clap::Parser;

use ulti_bench::config::{BenchConfig, ResolvedOutputs};
use ulti_bench::logging::init_logging;
use ulti_bench::runner::SelfPlayRunner;

/// Self-play harness for two-seat Alsós.
#[derive(Debug, Parser)]
#[command(
    name = "ulti-bench",
    author,
    version,
    about = "Deterministic two-seat Alsós self-play harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of hands to play.
    #[arg(long, value_name = "HANDS")]
    hands: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no hands are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(hands) = cli.hands {
        config.deals.hands = hands;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let hands = config.deals.hands;
    let seat_names: Vec<&str> = config.seats.iter().map(|s| s.name.as_str()).collect();

    println!(
        "Loaded configuration '{run_id}': {} ({hands} hand{})",
        seat_names.join(" vs "),
        if hands == 1 { "" } else { "s" }
    );

    if cli.validate_only {
        println!("Validation-only mode: self-play skipped.");
        return Ok(());
    }

    let logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = SelfPlayRunner::new(config, outputs)?;
    let summary = runner.run()?;

    println!(
        "Run '{run_id}' complete: {} hands, {} events at {}",
        summary.hands_played,
        summary.events_written,
        summary.events_path.display()
    );
    for (index, name) in summary.seat_names.iter().enumerate() {
        println!(
            "  {name}: {} points, {} hands won",
            summary.totals[index], summary.hands_won[index]
        );
    }
    println!("Event digest: {}", summary.digest);
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry log: {}", guard.telemetry_path.display());
    }

    Ok(())
}
