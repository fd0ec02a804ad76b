//! Electrochemical cell: state of charge, tension under load, and ageing.

use crate::error::SimError;

/// Seconds in an hour, used to convert between Coulombs and watt-hours.
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Fixed simulation sub-step, in seconds.
pub const TIME_INCREMENT_S: f64 = 120.0;

/// Open-circuit-voltage curve: a function of state of charge.
///
/// Evaluation outside `[0, 1]` is an error rather than silent
/// extrapolation — a cell's tension model has no meaning past the physical
/// bounds of the pack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OcvCurve {
    /// Linear interpolation between `(0, v0)` and `(1, v1)`, exact at both
    /// endpoints.
    Linear { v0: f64, v1: f64 },
}

impl OcvCurve {
    pub fn eval(&self, soc: f64) -> Result<f64, SimError> {
        if !(0.0..=1.0).contains(&soc) {
            return Err(SimError::InvalidSoc { soc });
        }
        match *self {
            Self::Linear { v0, v1 } => Ok(v0 + (v1 - v0) * soc),
        }
    }
}

impl Default for OcvCurve {
    fn default() -> Self {
        Self::Linear { v0: 3.0, v1: 4.2 }
    }
}

/// A single electrochemical cell.
///
/// Capacities are stored in Wh internally; the constructor converts its
/// Coulombic `nominal_capacity` input using the initial tension (see
/// [`Cell::c_to_wh`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub ocv: OcvCurve,
    pub resistance: f64,
    pub nominal_capacity: f64,
    pub available_capacity: f64,
    pub current_capacity: f64,
    pub tension: f64,
    pub soc: f64,
    pub alpha: f64,
    pub beta: f64,
}

impl Cell {
    pub const DEFAULT_RESISTANCE: f64 = 0.070;
    /// `2600 mA·h` expressed in Coulombs, the original project's default.
    pub const DEFAULT_NOMINAL_CAPACITY_C: f64 = 2600.0 * 1e-3 * SECONDS_PER_HOUR;

    /// Builds a new cell at full charge.
    ///
    /// `nominal_capacity_c` is the factory-fresh capacity in Coulombs; it
    /// is converted to Wh immediately using `ocv(1.0)`.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidSoc`] if `ocv` cannot be evaluated at
    /// `soc = 1.0` (never the case for [`OcvCurve::Linear`], but kept a
    /// `Result` for curve variants added later).
    pub fn new(
        ocv: OcvCurve,
        resistance: f64,
        nominal_capacity_c: f64,
        alpha: f64,
        beta: f64,
    ) -> Result<Self, SimError> {
        let soc = 1.0;
        let tension = ocv.eval(soc)?;
        let nominal_capacity = Self::c_to_wh(nominal_capacity_c, tension);
        Ok(Self {
            ocv,
            resistance,
            nominal_capacity,
            available_capacity: nominal_capacity,
            current_capacity: nominal_capacity,
            tension,
            soc,
            alpha,
            beta,
        })
    }

    /// Converts a Coulombic capacity to watt-hours at the given tension.
    pub fn c_to_wh(c_capacity: f64, tension: f64) -> f64 {
        c_capacity * tension / SECONDS_PER_HOUR
    }

    /// Computes the terminal voltage under a signed power of use.
    ///
    /// Positive `power` is charging, negative is discharging.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::TooPowerfulDischarge`] if the tension solver's
    /// discriminant goes negative.
    pub fn tension_under_load(&self, power: f64) -> Result<f64, SimError> {
        let ocv_soc = self.ocv.eval(self.soc)?;
        let delta = ocv_soc * ocv_soc + 4.0 * self.resistance * power;
        if delta < 0.0 {
            Err(SimError::TooPowerfulDischarge { power_w: power })
        } else if delta == 0.0 {
            Ok(ocv_soc / 2.0)
        } else {
            Ok((ocv_soc + delta.sqrt()) / 2.0)
        }
    }

    /// Provisional ageing of available capacity and resistance under a
    /// sub-step of the given power. Not committed until the sub-step
    /// succeeds.
    fn age(&self, power: f64) -> (f64, f64) {
        let available = self.available_capacity * (1.0 - self.alpha * TIME_INCREMENT_S * power.abs());
        let resistance = self.resistance * (1.0 + self.beta * TIME_INCREMENT_S * power.abs());
        (available, resistance)
    }

    /// Runs a single `TIME_INCREMENT_S` sub-step at the given power.
    fn step(&mut self, power: f64) -> Result<(), SimError> {
        let tension = self.tension_under_load(power)?;
        let energy_delta_wh = power * TIME_INCREMENT_S / SECONDS_PER_HOUR;
        let (available, resistance) = self.age(power);

        if self.current_capacity + energy_delta_wh < 0.0 {
            return Err(SimError::EmptyCell);
        }
        if self.current_capacity + energy_delta_wh > available {
            return Err(SimError::FullCell);
        }

        self.available_capacity = available;
        self.resistance = resistance;
        self.tension = tension;
        self.current_capacity += energy_delta_wh;
        self.soc = self.current_capacity / self.available_capacity;
        Ok(())
    }

    /// Uses the cell for `timelapse` seconds at the given signed power,
    /// consumed in whole `TIME_INCREMENT_S` sub-steps (so `timelapse = 0`
    /// performs zero sub-steps and any `timelapse <= TIME_INCREMENT_S`
    /// performs exactly one).
    ///
    /// Any sub-step error aborts the remainder and propagates; state from
    /// the failing sub-step is left uncommitted.
    pub fn use_for(&mut self, timelapse: f64, power: f64) -> Result<(), SimError> {
        let mut elapsed = 0.0;
        while elapsed < timelapse {
            elapsed += TIME_INCREMENT_S;
            self.step(power)?;
        }
        Ok(())
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(
            OcvCurve::default(),
            Self::DEFAULT_RESISTANCE,
            Self::DEFAULT_NOMINAL_CAPACITY_C,
            0.0,
            0.0,
        )
        .expect("default OCV curve is defined at soc=1.0")
    }
}
