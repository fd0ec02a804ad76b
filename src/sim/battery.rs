//! Battery pack: a series/parallel scaling of a shared [`Cell`] prototype.

use crate::error::SimError;
use crate::sim::cell::Cell;

/// End-of-life ratio: a pack below this `available/nominal` fraction is
/// considered dead.
pub const RHO_MIN: f64 = 0.3;

/// A pack of `series` cells in series times `parallel` branches, all
/// sharing one prototype [`Cell`].
///
/// The cell is the single source of truth for capacity and tension; the
/// pack's own fields are recomputed from it after every `use`, scaled by
/// `series` (voltage) and `parallel` (current/capacity).
#[derive(Debug, Clone, PartialEq)]
pub struct Battery {
    pub cell: Cell,
    pub series: u32,
    pub parallel: u32,
    pub tension: f64,
    pub available_capacity: f64,
    pub current_capacity: f64,
    pub nominal_capacity: f64,
}

impl Battery {
    pub fn new(cell: Cell, series: u32, parallel: u32) -> Self {
        let mut battery = Self {
            tension: 0.0,
            available_capacity: 0.0,
            current_capacity: 0.0,
            nominal_capacity: 0.0,
            cell,
            series,
            parallel,
        };
        battery.sync_from_cell();
        battery
    }

    fn sync_from_cell(&mut self) {
        let s = f64::from(self.series);
        let p = f64::from(self.parallel);
        self.tension = self.cell.tension * s;
        self.available_capacity = self.cell.available_capacity * p;
        self.current_capacity = self.cell.current_capacity * p;
        self.nominal_capacity = self.cell.nominal_capacity * p;
    }

    /// Uses the pack for `timelapse` seconds at pack-level signed `power`,
    /// splitting it evenly across the `series * parallel` cells.
    ///
    /// # Errors
    ///
    /// Propagates any [`SimError`] raised by the underlying cell, then
    /// additionally returns [`SimError::BatteryLifetime`] if the pack has
    /// dropped to or below [`RHO_MIN`] of its nominal capacity.
    pub fn use_for(&mut self, timelapse: f64, power: f64) -> Result<(), SimError> {
        let per_cell_power = power / (f64::from(self.series) * f64::from(self.parallel));
        self.cell.use_for(timelapse, per_cell_power)?;
        self.sync_from_cell();
        if self.available_capacity / self.nominal_capacity <= RHO_MIN {
            return Err(SimError::BatteryLifetime);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_battery(series: u32, parallel: u32) -> Battery {
        Battery::new(Cell::default(), series, parallel)
    }

    #[test]
    fn aggregate_fields_scale_with_topology() {
        let battery = fresh_battery(4, 2);
        let cell = Cell::default();
        assert!((battery.tension - cell.tension * 4.0).abs() < 1e-9);
        assert!((battery.available_capacity - cell.available_capacity * 2.0).abs() < 1e-9);
        assert!((battery.nominal_capacity - cell.nominal_capacity * 2.0).abs() < 1e-9);
    }

    #[test]
    fn use_for_splits_power_across_topology() {
        let mut battery = fresh_battery(2, 3);
        battery.use_for(120.0, -60.0).expect("should not hit end-of-life");
        let mut reference_cell = Cell::default();
        reference_cell.use_for(120.0, -60.0 / 6.0).unwrap();
        assert!((battery.cell.current_capacity - reference_cell.current_capacity).abs() < 1e-9);
    }

    #[test]
    fn end_of_life_is_detected_after_ageing() {
        let mut battery = Battery::new(
            Cell::new(
                Default::default(),
                Cell::DEFAULT_RESISTANCE,
                Cell::DEFAULT_NOMINAL_CAPACITY_C,
                5e-4,
                0.0,
            )
            .unwrap(),
            1,
            1,
        );
        let mut last_err = None;
        for _ in 0..200 {
            match battery.use_for(120.0, -5.0) {
                Ok(()) => {}
                Err(e) => {
                    last_err = Some(e);
                    break;
                }
            }
        }
        assert_eq!(last_err, Some(SimError::BatteryLifetime));
        assert!(battery.available_capacity / battery.nominal_capacity <= RHO_MIN);
    }

    #[test]
    fn cell_error_propagates_unchanged() {
        let mut battery = fresh_battery(1, 1);
        let err = battery.use_for(120.0, -1000.0).unwrap_err();
        assert_eq!(err, SimError::TooPowerfulDischarge { power_w: -1000.0 });
    }
}
