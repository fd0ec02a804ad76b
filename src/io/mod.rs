//! Output helpers for the simulation's telemetry.

pub mod export;
