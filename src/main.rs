//! Fleet dispatch simulator entry point — CLI wiring and run orchestration.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;

use fleet_sim::builder::Builder;
use fleet_sim::config::{
    ConfigError, JsonFileResourceSource, JsonFileScenarioSource, ResourceSource, ScenarioSource,
};
use fleet_sim::driver::ScenarioDriver;
use fleet_sim::io::export::export_csv;
use fleet_sim::sim::Criterion;

/// Runs an electric-vehicle fleet dispatch simulation against a scenario
/// of (timelapse, load) tasks.
#[derive(Parser)]
#[command(name = "fleet-sim")]
struct Args {
    /// JSON file describing the vehicle and charging-station resources.
    #[arg(short, long)]
    resources: PathBuf,

    /// JSON file describing the (timelapse, load) scenario steps.
    #[arg(short, long)]
    scenario: PathBuf,

    /// Vehicle-priority criterion to dispatch with.
    #[arg(short, long, value_enum, default_value_t = CriterionArg::Performant)]
    criterion: CriterionArg,

    /// Optional path to export the resulting time/grade sequences as CSV.
    #[arg(short, long)]
    telemetry_out: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum CriterionArg {
    Performant,
    Medium,
    Poor,
}

impl From<CriterionArg> for Criterion {
    fn from(arg: CriterionArg) -> Self {
        match arg {
            CriterionArg::Performant => Criterion::Performant,
            CriterionArg::Medium => Criterion::Medium,
            CriterionArg::Poor => Criterion::Poor,
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let resources = JsonFileResourceSource::new(&args.resources)
        .load()
        .unwrap_or_else(|e| fail(&e));
    let scenario = JsonFileScenarioSource::new(&args.scenario)
        .load()
        .unwrap_or_else(|e| fail(&e));

    info!(
        "loaded {} vehicles, {} charging stations, {} scenario steps",
        resources.vehicles.len(),
        resources.charging_stations.len(),
        scenario.steps.len()
    );

    let mut fleet = Builder::new().build(&resources);
    let driver = ScenarioDriver::new(&scenario, args.criterion.into());

    let (time, grades) = driver.run(&mut fleet).unwrap_or_else(|e| {
        eprintln!("simulation error: {e}");
        process::exit(1);
    });

    for (t, g) in time.iter().zip(grades.iter()) {
        println!("t={t:.1}s grade={g:.4}");
    }

    if let Some(path) = &args.telemetry_out {
        if let Err(e) = export_csv(&time, &grades, path) {
            eprintln!("failed to write telemetry to {}: {e}", path.display());
            process::exit(1);
        }
        info!("wrote telemetry to {}", path.display());
    }
}

fn fail(error: &ConfigError) -> ! {
    eprintln!("configuration error: {error}");
    process::exit(1);
}
