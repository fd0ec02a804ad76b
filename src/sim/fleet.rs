//! Fleet dispatcher: ranks, splits, dispatches, and charges vehicles.

use crate::error::SimError;
use crate::sim::criteria::Criterion;
use crate::sim::station::ChargingStation;
use crate::sim::vehicle::Vehicle;

/// Owns every vehicle and charging station for a scenario run, plus the
/// running `time`/`grades` output sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
    stations: Vec<ChargingStation>,
    time: Vec<f64>,
    grades: Vec<f64>,
}

impl Fleet {
    pub fn new(vehicles: Vec<Vehicle>, stations: Vec<ChargingStation>) -> Self {
        Self {
            vehicles,
            stations,
            time: vec![0.0],
            grades: vec![0.0],
        }
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn stations(&self) -> &[ChargingStation] {
        &self.stations
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn grades(&self) -> &[f64] {
        &self.grades
    }

    pub fn extend_fleet(&mut self, vehicles: impl IntoIterator<Item = Vehicle>) {
        self.vehicles.extend(vehicles);
    }

    pub fn add_charging_stations(&mut self, stations: impl IntoIterator<Item = ChargingStation>) {
        self.stations.extend(stations);
    }

    /// Restores the fleet's output sequences to their initial state and
    /// every vehicle's battery to a deep copy of its current
    /// `needed_battery` template.
    pub fn reset(&mut self) {
        self.time = vec![0.0];
        self.grades = vec![0.0];
        for vehicle in &mut self.vehicles {
            vehicle.battery = vehicle.needed_battery().clone();
        }
    }

    /// Runs one dispatch step: partitions vehicles by `criterion`,
    /// discharges the top fraction, charges the rest (plus failures) at
    /// available stations, and appends to `time`/`grades`.
    ///
    /// `K = round(load * N)` uses round-half-away-from-zero (`f64::round`);
    /// the rounding mode at exact `.5` ties is otherwise unconstrained.
    ///
    /// # Errors
    ///
    /// Propagates any [`SimError`] not explicitly swallowed by this policy
    /// (`EmptyCell` during discharge and `FullCell` during charging are
    /// handled here; everything else is a bug and aborts the step).
    pub fn use_for(
        &mut self,
        timelapse: f64,
        load: f64,
        criterion: Criterion,
    ) -> Result<(), SimError> {
        let n = self.vehicles.len();
        let k = (load * n as f64).round() as usize;

        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            criterion
                .score(&self.vehicles[b])
                .partial_cmp(&criterion.score(&self.vehicles[a]))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut ordered: Vec<Option<Vehicle>> = std::mem::take(&mut self.vehicles)
            .into_iter()
            .map(Some)
            .collect();
        let mut by_rank: Vec<Vehicle> = indices
            .into_iter()
            .map(|i| ordered[i].take().expect("each index visited once"))
            .collect();
        let mut to_charge = by_rank.split_off(k.min(by_rank.len()));
        let mut to_use = by_rank;

        let mut successes = 0usize;
        let mut failed = Vec::new();
        let mut i = 0;
        while i < to_use.len() {
            match to_use[i].use_for(timelapse) {
                Ok(()) => {
                    successes += 1;
                    i += 1;
                }
                Err(SimError::EmptyCell) => {
                    failed.push(to_use.remove(i));
                }
                Err(other) => return Err(other),
            }
        }

        let grade = if k > 0 {
            successes as f64 / k as f64
        } else {
            0.0
        };
        let last_time = *self.time.last().expect("time is never empty");
        let last_grade = *self.grades.last().expect("grades is never empty");
        self.time.push(last_time + timelapse);
        self.grades.push(last_grade + grade);

        let pair_count = (to_charge.len() + failed.len()).min(self.stations.len());
        for idx in 0..pair_count {
            let vehicle = if idx < to_charge.len() {
                &mut to_charge[idx]
            } else {
                &mut failed[idx - to_charge.len()]
            };
            let station = &mut self.stations[idx];
            station.plug_vehicle(vehicle);
            match station.charge(timelapse, vehicle) {
                Ok(()) | Err(SimError::FullCell) => {}
                Err(other) => return Err(other),
            }
        }

        self.vehicles = to_use
            .into_iter()
            .chain(to_charge)
            .chain(failed)
            .collect();
        Ok(())
    }
}
