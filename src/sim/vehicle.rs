//! Vehicle: drives or charges a battery and self-heals across known faults.

use crate::error::SimError;
use crate::sim::battery::Battery;

/// Upper bound on recursive battery-recovery retries within a single
/// `use`/`charge` call, guarding against an unbounded recursion if a
/// vehicle's faults never stop recurring (see `needed_battery` churn).
pub const MAX_BATTERY_RECOVERY_RETRIES: u32 = 32;

/// An electric vehicle: a power draw attached to a battery, plus a
/// template (`needed_battery`) describing what "a fresh replacement"
/// looks like.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: u64,
    pub power: f64,
    pub battery: Battery,
    needed_battery: Battery,
}

impl Vehicle {
    pub const DEFAULT_POWER: f64 = 20_000.0;

    pub fn new(id: u64, power: f64, battery: Battery) -> Self {
        Self {
            id,
            power,
            needed_battery: battery.clone(),
            battery,
        }
    }

    pub fn needed_battery(&self) -> &Battery {
        &self.needed_battery
    }

    /// Discharges the vehicle's battery for `timelapse` seconds, recovering
    /// from known faults by recursing: end-of-life triggers a battery swap,
    /// over-power triggers a battery upsize. `EmptyCell` is not recovered
    /// here and propagates to the caller (the fleet counts it as a failed
    /// dispatch).
    pub fn use_for(&mut self, timelapse: f64) -> Result<(), SimError> {
        self.use_for_with_budget(timelapse, MAX_BATTERY_RECOVERY_RETRIES)
    }

    fn use_for_with_budget(&mut self, timelapse: f64, retries_left: u32) -> Result<(), SimError> {
        match self.battery.use_for(timelapse, -self.power) {
            Ok(()) => Ok(()),
            Err(SimError::BatteryLifetime) => {
                self.recurse_after_recovery(timelapse, retries_left, Self::change_battery)
            }
            Err(SimError::TooPowerfulDischarge { .. }) => {
                self.recurse_after_recovery(timelapse, retries_left, |v| v.upgrade_battery(1, 2))
            }
            Err(other) => Err(other),
        }
    }

    fn recurse_after_recovery(
        &mut self,
        timelapse: f64,
        retries_left: u32,
        recover: impl FnOnce(&mut Self),
    ) -> Result<(), SimError> {
        if retries_left == 0 {
            return Err(SimError::RetryBudgetExhausted {
                vehicle_id: self.id,
            });
        }
        recover(self);
        self.use_for_with_budget(timelapse, retries_left - 1)
    }

    /// Charges the vehicle's battery for `timelapse` seconds at the given
    /// (positive) power. On end-of-life the battery is swapped once and the
    /// attempt ends, matching the station's single charge call per step;
    /// `FullCell` is not caught and propagates.
    pub fn charge(&mut self, timelapse: f64, power: f64) -> Result<(), SimError> {
        match self.battery.use_for(timelapse, power) {
            Ok(()) => Ok(()),
            Err(SimError::BatteryLifetime) => {
                self.change_battery();
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    fn change_battery(&mut self) {
        self.battery = self.needed_battery.clone();
    }

    fn upgrade_battery(&mut self, series_multiplier: u32, parallel_multiplier: u32) {
        let cell = self.needed_battery.cell.clone();
        let series = self.needed_battery.series * series_multiplier;
        let parallel = self.needed_battery.parallel * parallel_multiplier;
        self.battery = Battery::new(cell, series, parallel);
        self.needed_battery = self.battery.clone();
    }
}
