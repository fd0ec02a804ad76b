//! Iterates scenario steps against a [`Fleet`].

use log::debug;

use crate::config::ScenarioConfig;
use crate::error::SimError;
use crate::sim::{Criterion, Fleet};

/// Drives a [`Fleet`] through an ordered sequence of scenario steps.
///
/// Each step is fed to `Fleet::use_for` in order; no step is retried, and
/// a propagated error aborts the run immediately, leaving the fleet's
/// `time`/`grades` sequences as they stood after the last successful step.
pub struct ScenarioDriver<'a> {
    scenario: &'a ScenarioConfig,
    criterion: Criterion,
}

impl<'a> ScenarioDriver<'a> {
    pub fn new(scenario: &'a ScenarioConfig, criterion: Criterion) -> Self {
        Self {
            scenario,
            criterion,
        }
    }

    /// Runs every step in the scenario against `fleet`, returning the
    /// fleet's final `time` and `grades` sequences.
    ///
    /// # Errors
    ///
    /// Returns the first [`SimError`] any step propagates; no later steps
    /// run.
    pub fn run(&self, fleet: &mut Fleet) -> Result<(Vec<f64>, Vec<f64>), SimError> {
        let total_steps = self.scenario.steps.len();
        for (i, step) in self.scenario.steps.iter().enumerate() {
            fleet.use_for(step.0, step.1, self.criterion)?;
            debug!(
                "step {}/{total_steps}: timelapse={}, load={} -> grade={}",
                i + 1,
                step.0,
                step.1,
                fleet.grades().last().copied().unwrap_or(0.0),
            );
        }
        Ok((fleet.time().to_vec(), fleet.grades().to_vec()))
    }
}
