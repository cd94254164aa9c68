//! Simulation Builder
//!
//! Fluent construction of a [`SimulationConfig`]. Unset fields keep the
//! defaults of `SimulationConfig::default()`; `build` validates the result.

use super::{NormalShock, SimulationConfig};
use crate::error::SimulationError;

/// Builder for [`SimulationConfig`]
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    config: SimulationConfig,
}

impl SimulationBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration
    #[must_use]
    pub fn from_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn initial_cash(mut self, cash: f64) -> Self {
        self.config.initial_cash = cash;
        self
    }

    /// Set the horizon in months
    #[must_use]
    pub fn months(mut self, months: u32) -> Self {
        self.config.horizon_months = months;
        self
    }

    /// Set the monthly inflation in percent (5.0 means 5 % per month)
    #[must_use]
    pub fn inflation_pct(mut self, pct: f64) -> Self {
        self.config.monthly_inflation_pct = pct;
        self
    }

    #[must_use]
    pub fn trials(mut self, num_trials: usize) -> Self {
        self.config.num_trials = num_trials;
        self
    }

    #[must_use]
    pub fn revenue(mut self, mean: f64, std_dev: f64) -> Self {
        self.config.revenue = NormalShock::new(mean, std_dev);
        self
    }

    #[must_use]
    pub fn costs(mut self, mean: f64, std_dev: f64) -> Self {
        self.config.costs = NormalShock::new(mean, std_dev);
        self
    }

    /// Validate and return the configuration
    pub fn build(self) -> Result<SimulationConfig, SimulationError> {
        self.config.validate()?;
        Ok(self.config)
    }

    /// Return the configuration without validating it
    #[must_use]
    pub fn build_unchecked(self) -> SimulationConfig {
        self.config
    }
}
