//! ChargingStation: holds at most one plugged vehicle and delivers power.

use crate::error::SimError;
use crate::sim::vehicle::Vehicle;

/// A charging station with a fixed delivery power.
///
/// A station doesn't own the vehicle plugged into it. Fleet is the actual
/// owner of every vehicle, so here the station only tracks the plugged
/// vehicle's `id` for validation; the vehicle itself is passed into
/// [`charge`] by the caller that owns it.
///
/// [`charge`]: ChargingStation::charge
#[derive(Debug, Clone, PartialEq)]
pub struct ChargingStation {
    pub power: f64,
    plugged_vehicle_id: Option<u64>,
}

impl ChargingStation {
    pub const DEFAULT_POWER: f64 = 100_000.0;

    pub fn new(power: f64) -> Self {
        Self {
            power,
            plugged_vehicle_id: None,
        }
    }

    pub fn plug_vehicle(&mut self, vehicle: &Vehicle) {
        self.plugged_vehicle_id = Some(vehicle.id);
    }

    pub fn plugged_vehicle_id(&self) -> Option<u64> {
        self.plugged_vehicle_id
    }

    /// Charges the plugged vehicle for `timelapse` seconds at this
    /// station's power, clearing the plugged slot before returning — even
    /// if the charge call itself errors.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoPluggedVehicle`] if nothing is plugged, or
    /// returns [`SimError::NoPluggedVehicle`] if `vehicle`'s id doesn't
    /// match what was plugged. Otherwise propagates whatever
    /// [`Vehicle::charge`] returns.
    pub fn charge(&mut self, timelapse: f64, vehicle: &mut Vehicle) -> Result<(), SimError> {
        let expected_id = self.plugged_vehicle_id;
        self.plugged_vehicle_id = None;

        match expected_id {
            Some(id) if id == vehicle.id => vehicle.charge(timelapse, self.power),
            _ => Err(SimError::NoPluggedVehicle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::battery::Battery;
    use crate::sim::cell::Cell;

    fn vehicle(id: u64) -> Vehicle {
        Vehicle::new(id, 5.0, Battery::new(Cell::default(), 1, 1))
    }

    #[test]
    fn charge_without_plugging_fails() {
        let mut station = ChargingStation::new(ChargingStation::DEFAULT_POWER);
        let mut v = vehicle(1);
        let err = station.charge(120.0, &mut v).unwrap_err();
        assert_eq!(err, SimError::NoPluggedVehicle);
    }

    #[test]
    fn charge_with_mismatched_vehicle_fails() {
        let mut station = ChargingStation::new(ChargingStation::DEFAULT_POWER);
        let mut plugged = vehicle(1);
        let mut other = vehicle(2);
        station.plug_vehicle(&plugged);
        let err = station.charge(120.0, &mut other).unwrap_err();
        assert_eq!(err, SimError::NoPluggedVehicle);
        // The plugged slot is already cleared regardless of outcome.
        assert_eq!(station.plugged_vehicle_id(), None);
        let _ = &mut plugged;
    }

    #[test]
    fn slot_clears_even_on_propagated_error() {
        let mut station = ChargingStation::new(1_000_000.0);
        let mut v = vehicle(1);
        station.plug_vehicle(&v);
        let err = station.charge(120.0, &mut v).unwrap_err();
        assert_eq!(err, SimError::FullCell);
        assert_eq!(station.plugged_vehicle_id(), None);
    }

    #[test]
    fn ordinary_charge_succeeds_and_clears_slot() {
        let mut station = ChargingStation::new(ChargingStation::DEFAULT_POWER);
        let mut v = vehicle(1);
        v.battery.cell.current_capacity = 0.0;
        v.battery.current_capacity = 0.0;
        station.plug_vehicle(&v);
        station.charge(120.0, &mut v).expect("charge should succeed");
        assert_eq!(station.plugged_vehicle_id(), None);
    }
}
