//! Core numeric simulation: cell, battery, vehicle, station, fleet, criteria.

pub mod battery;
pub mod cell;
pub mod criteria;
pub mod fleet;
pub mod station;
pub mod vehicle;

pub use battery::Battery;
pub use cell::{Cell, OcvCurve};
pub use criteria::Criterion;
pub use fleet::Fleet;
pub use station::ChargingStation;
pub use vehicle::Vehicle;
