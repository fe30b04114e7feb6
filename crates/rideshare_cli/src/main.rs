//! Command-line front end: load or generate a scenario, run it, print the report.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rideshare_core::monitor::{Activity, Category, Report};
use rideshare_core::scenario::{build_scenario, load_events, ScenarioParams};
use rideshare_core::Simulation;
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rideshare",
    about = "Discrete-event simulation of riders and drivers on a city grid"
)]
struct Cli {
    /// Event file: one `<time> <EventType> <id> <location> <dest-or-speed> [patience]` per line
    #[arg(long, env = "RIDESHARE_EVENTS", conflicts_with = "generate")]
    events: Option<PathBuf>,

    /// Generate a random scenario instead of reading an event file
    #[arg(long)]
    generate: bool,

    /// Seed for the generated scenario
    #[arg(long, env = "RIDESHARE_SEED")]
    seed: Option<u64>,

    /// Riders in the generated scenario
    #[arg(long, env = "RIDESHARE_RIDERS", default_value_t = 50)]
    riders: usize,

    /// Drivers in the generated scenario
    #[arg(long, env = "RIDESHARE_DRIVERS", default_value_t = 10)]
    drivers: usize,

    /// Stop after this many events
    #[arg(long, env = "RIDESHARE_MAX_STEPS")]
    max_steps: Option<usize>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also print every recorded activity
    #[arg(long)]
    activities: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut sim = Simulation::new();

    let events = match (&cli.events, cli.generate) {
        (Some(path), _) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read event file {}", path.display()))?;
            load_events(sim.world_mut(), &text)
                .with_context(|| format!("invalid event file {}", path.display()))?
        }
        (None, true) => {
            let mut params = ScenarioParams {
                num_riders: cli.riders,
                num_drivers: cli.drivers,
                ..Default::default()
            };
            if let Some(seed) = cli.seed {
                params = params.with_seed(seed);
            }
            build_scenario(sim.world_mut(), params).context("failed to build scenario")?
        }
        (None, false) => bail!("either --events <FILE> or --generate is required"),
    };
    info!(events = events.len(), "scenario loaded");

    let report = sim
        .run_with_limit(events, cli.max_steps.unwrap_or(usize::MAX))
        .context("simulation halted")?;

    match cli.format {
        OutputFormat::Text => print_text(&sim, &report, cli.activities),
        OutputFormat::Json => print_json(&sim, &report, cli.activities)?,
    }
    Ok(())
}

fn print_text(sim: &Simulation, report: &Report, with_activities: bool) {
    if with_activities {
        for category in [Category::Driver, Category::Rider] {
            for activity in sim.monitor().iter_category(category) {
                println!("{activity}");
            }
        }
    }
    for (name, value) in report.to_map() {
        println!("{name}: {value:.2}");
    }
}

fn print_json(sim: &Simulation, report: &Report, with_activities: bool) -> Result<()> {
    let output = if with_activities {
        json!({
            "report": report,
            "activities": {
                "drivers": activities(sim, Category::Driver),
                "riders": activities(sim, Category::Rider),
            },
        })
    } else {
        json!({ "report": report })
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("failed to serialize report")?
    );
    Ok(())
}

fn activities(sim: &Simulation, category: Category) -> Vec<&Activity> {
    sim.monitor().iter_category(category).collect()
}
