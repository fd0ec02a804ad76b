//! Simulation-domain error taxonomy.
//!
//! These are the signals the numeric state machine raises internally; each
//! is explicitly caught by the component whose policy it informs (see
//! `sim::vehicle` and `sim::fleet`). Anything that reaches a caller
//! unhandled is a bug, not a transient condition.

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SimError {
    /// The tension solver's discriminant went negative: the requested power
    /// cannot be sustained by the cell at its current state of charge.
    #[error("power {power_w}W exceeds what the cell can sustain at its current state of charge")]
    TooPowerfulDischarge { power_w: f64 },

    /// A sub-step would drive `current_capacity` below zero.
    #[error("cell ran empty before completing the requested sub-step")]
    EmptyCell,

    /// A sub-step would drive `current_capacity` above `available_capacity`.
    #[error("cell is already full")]
    FullCell,

    /// `available_capacity / nominal_capacity` has dropped to or below the
    /// end-of-life ratio.
    #[error("battery available/nominal capacity ratio reached end-of-life")]
    BatteryLifetime,

    /// A charging station was asked to charge with no vehicle plugged in.
    #[error("no vehicle is plugged into this charging station")]
    NoPluggedVehicle,

    /// The open-circuit-voltage curve was evaluated outside its domain.
    #[error("state of charge {soc} is outside the open-circuit-voltage curve's domain [0, 1]")]
    InvalidSoc { soc: f64 },

    /// A vehicle exhausted its battery-recovery retry budget without
    /// finding a battery configuration that can sustain its power draw.
    #[error(
        "vehicle {vehicle_id} exhausted its battery-recovery retry budget without recovering"
    )]
    RetryBudgetExhausted { vehicle_id: u64 },
}
