//! Shared test fixtures for integration tests.

use fleet_sim::builder::Builder;
use fleet_sim::config::{ResourcesConfig, ScenarioConfig, ScenarioStep, VehicleDescriptor};
use fleet_sim::sim::Fleet;

/// A resources descriptor with `n` identical healthy vehicles and `m`
/// identical charging stations.
pub fn resources(n: usize, m: usize) -> ResourcesConfig {
    ResourcesConfig {
        vehicles: vec![VehicleDescriptor(9_360.0, 100, 10, 20_000.0); n],
        charging_stations: vec![100_000.0; m],
    }
}

/// Builds a fleet of `n` identical healthy vehicles and `m` identical
/// charging stations.
pub fn default_fleet(n: usize, m: usize) -> Fleet {
    Builder::new().build(&resources(n, m))
}

/// A scenario with a single step of the given timelapse/load.
pub fn single_step_scenario(timelapse: f64, load: f64) -> ScenarioConfig {
    ScenarioConfig {
        steps: vec![ScenarioStep(timelapse, load)],
    }
}
