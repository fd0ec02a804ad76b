//! Integration tests covering the JSON config boundary and Builder.

use fleet_sim::builder::Builder;
use fleet_sim::config::{
    DirectResourceSource, DirectScenarioSource, ResourceSource, ResourcesConfig, ScenarioConfig,
    ScenarioSource,
};

#[test]
fn resources_file_round_trip_builds_expected_fleet() {
    let json = r#"{
        "vehicles": [[9360.0, 100, 10, 20000.0], [9360.0, 50, 5, 15000.0]],
        "charging_stations": [100000.0, 100000.0, 50000.0]
    }"#;
    let resources = ResourcesConfig::from_json_str(json).expect("valid resources should parse");
    let mut builder = Builder::new();
    let fleet = builder.build(&resources);

    assert_eq!(fleet.vehicles().len(), 2);
    assert_eq!(fleet.stations().len(), 3);
}

#[test]
fn scenario_file_bare_array_and_wrapped_object_are_equivalent() {
    let bare = ScenarioConfig::from_json_str("[[120.0, 0.5], [60.0, 1.0]]").unwrap();
    let wrapped =
        ScenarioConfig::from_json_str(r#"{"scenario": [[120.0, 0.5], [60.0, 1.0]]}"#).unwrap();
    assert_eq!(bare, wrapped);
}

#[test]
fn malformed_resources_json_is_reported_as_configuration_failure() {
    let err = ResourcesConfig::from_json_str("{ not valid json").unwrap_err();
    assert!(err.to_string().contains("config error"));
}

#[test]
fn schema_violation_is_reported_before_simulation_starts() {
    let json = r#"{"vehicles": [[9360.0, 100, 10, -5.0]], "charging_stations": [1.0]}"#;
    let err = ResourcesConfig::from_json_str(json).unwrap_err();
    assert_eq!(err.field, "vehicles[0].power");
}

#[test]
fn direct_sources_feed_the_builder_without_touching_json() {
    let resources = ResourcesConfig {
        vehicles: vec![fleet_sim::config::VehicleDescriptor(9360.0, 10, 2, 5_000.0)],
        charging_stations: vec![1_000.0],
    };
    let scenario = ScenarioConfig {
        steps: vec![fleet_sim::config::ScenarioStep(120.0, 1.0)],
    };

    let resource_source = DirectResourceSource::new(resources);
    let scenario_source = DirectScenarioSource::new(scenario);

    let loaded_resources = resource_source.load().expect("direct source never fails");
    let loaded_scenario = scenario_source.load().expect("direct source never fails");

    let mut builder = Builder::new();
    let fleet = builder.build(&loaded_resources);

    assert_eq!(fleet.vehicles().len(), 1);
    assert_eq!(loaded_scenario.steps.len(), 1);
}
