//! Materializes a [`Fleet`] from a resources descriptor.

use crate::config::ResourcesConfig;
use crate::sim::{Battery, Cell, ChargingStation, Fleet, OcvCurve, Vehicle};

/// Builds Fleets from resource descriptors, owning the monotonic
/// vehicle-id counter for its own lifetime.
///
/// Scoped per-instance rather than process-global, so repeated builds
/// (e.g. across tests) don't leak id state into each other.
#[derive(Debug, Default)]
pub struct Builder {
    next_id: u64,
}

impl Builder {
    pub fn new() -> Self {
        Self { next_id: 0 }
    }

    fn next_vehicle_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Constructs a [`Fleet`] from a resources descriptor: one vehicle per
    /// entry in `resources.vehicles`, one charging station per entry in
    /// `resources.charging_stations`.
    pub fn build(&mut self, resources: &ResourcesConfig) -> Fleet {
        let vehicles = resources
            .vehicles
            .iter()
            .map(|descriptor| {
                let cell = Cell::new(
                    OcvCurve::default(),
                    Cell::DEFAULT_RESISTANCE,
                    descriptor.0,
                    0.0,
                    0.0,
                )
                .expect("default OCV curve is defined at soc=1.0");
                let battery = Battery::new(cell, descriptor.1, descriptor.2);
                Vehicle::new(self.next_vehicle_id(), descriptor.3, battery)
            })
            .collect();

        let stations = resources
            .charging_stations
            .iter()
            .map(|&power| ChargingStation::new(power))
            .collect();

        Fleet::new(vehicles, stations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VehicleDescriptor;

    #[test]
    fn builds_one_vehicle_and_station_per_descriptor() {
        let resources = ResourcesConfig {
            vehicles: vec![
                VehicleDescriptor(9360.0, 100, 10, 20_000.0),
                VehicleDescriptor(9360.0, 50, 5, 15_000.0),
            ],
            charging_stations: vec![100_000.0],
        };
        let mut builder = Builder::new();
        let fleet = builder.build(&resources);

        assert_eq!(fleet.vehicles().len(), 2);
        assert_eq!(fleet.stations().len(), 1);
        assert_eq!(fleet.vehicles()[0].power, 20_000.0);
        assert_eq!(fleet.vehicles()[1].battery.series, 50);
    }

    #[test]
    fn vehicle_ids_are_monotonic_and_scoped_to_the_builder() {
        let resources = ResourcesConfig {
            vehicles: vec![
                VehicleDescriptor(9360.0, 1, 1, 5_000.0),
                VehicleDescriptor(9360.0, 1, 1, 5_000.0),
            ],
            charging_stations: vec![1_000.0],
        };
        let mut builder = Builder::new();
        let fleet = builder.build(&resources);
        assert_eq!(fleet.vehicles()[0].id, 0);
        assert_eq!(fleet.vehicles()[1].id, 1);

        let mut other_builder = Builder::new();
        let other_fleet = other_builder.build(&resources);
        assert_eq!(other_fleet.vehicles()[0].id, 0);
    }
}
