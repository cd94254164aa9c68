//! Forecaster and simulator configuration
//!
//! Both engines take plain value objects. Model order, horizon, trial count
//! and shock distributions are fields here with documented defaults.
//!
//! For the simulator there is also a fluent builder:
//!
//! ```ignore
//! use econosense_core::config::SimulationBuilder;
//!
//! let config = SimulationBuilder::new()
//!     .initial_cash(10_000.0)
//!     .months(6)
//!     .inflation_pct(5.0)
//!     .revenue(5_000.0, 1_000.0)
//!     .costs(3_000.0, 800.0)
//!     .build()?;
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, SimulationError};

pub mod builder;

pub use builder::SimulationBuilder;

// =============================================================================
// Forecaster
// =============================================================================

/// Largest supported AR/MA lag count
pub const MAX_ARMA_ORDER: usize = 5;
/// Largest supported differencing order
pub const MAX_DIFFERENCING: usize = 2;

/// ARIMA (p, d, q) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
}

impl ArimaOrder {
    #[must_use]
    pub const fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Fewest observations that leave at least one conditioned residual
    #[must_use]
    pub fn min_observations(&self) -> usize {
        self.d + self.p.max(self.q) + 1
    }

    pub fn validate(&self) -> Result<(), ForecastError> {
        if self.p > MAX_ARMA_ORDER || self.q > MAX_ARMA_ORDER || self.d > MAX_DIFFERENCING {
            return Err(ForecastError::InvalidOrder {
                p: self.p,
                d: self.d,
                q: self.q,
            });
        }
        Ok(())
    }
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self::new(1, 1, 1)
    }
}

fn default_include_drift() -> bool {
    false
}

fn default_max_iterations() -> usize {
    5_000
}

fn default_tolerance() -> f64 {
    1e-8
}

/// Forecaster settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default)]
    pub order: ArimaOrder,

    /// Estimate an intercept on the differenced scale (a linear trend in levels).
    /// Off by default, so ARIMA(1,1,1) has no trend term.
    #[serde(default = "default_include_drift")]
    pub include_drift: bool,

    /// Simplex iteration budget before the fit is declared non-convergent
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Convergence tolerance on the spread of objective values in the simplex
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            order: ArimaOrder::default(),
            include_drift: default_include_drift(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

impl ForecastConfig {
    /// Check the order and the optimizer settings
    pub fn validate(&self) -> Result<(), ForecastError> {
        self.order.validate()?;
        if self.max_iterations == 0 {
            return Err(ForecastError::InvalidConfig {
                field: "max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ForecastError::InvalidConfig {
                field: "tolerance",
                value: self.tolerance,
                reason: "must be positive and finite",
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_order(mut self, p: usize, d: usize, q: usize) -> Self {
        self.order = ArimaOrder::new(p, d, q);
        self
    }

    #[must_use]
    pub fn with_drift(mut self, include_drift: bool) -> Self {
        self.include_drift = include_drift;
        self
    }
}

// =============================================================================
// Simulator
// =============================================================================

/// Normal distribution parameters for a monthly shock
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalShock {
    pub mean: f64,
    /// Zero gives a constant draw equal to `mean`
    pub std_dev: f64,
}

impl NormalShock {
    #[must_use]
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self::new(value, 0.0)
    }

    fn validate(
        &self,
        mean_field: &'static str,
        std_field: &'static str,
    ) -> Result<(), SimulationError> {
        if !self.mean.is_finite() {
            return Err(SimulationError::InvalidConfig {
                field: mean_field,
                value: self.mean,
                reason: "must be finite",
            });
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(SimulationError::InvalidConfig {
                field: std_field,
                value: self.std_dev,
                reason: "must be non-negative and finite",
            });
        }
        Ok(())
    }
}

fn default_initial_cash() -> f64 {
    10_000.0
}

fn default_horizon_months() -> u32 {
    6
}

fn default_monthly_inflation_pct() -> f64 {
    5.0
}

fn default_num_trials() -> usize {
    1_000
}

fn default_revenue() -> NormalShock {
    NormalShock::new(5_000.0, 1_000.0)
}

fn default_costs() -> NormalShock {
    NormalShock::new(3_000.0, 800.0)
}

/// Cash-flow Monte Carlo configuration
///
/// Each month of each trial: add a revenue draw, subtract a cost draw, then
/// scale the balance by `1 + monthly_inflation_pct / 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_initial_cash")]
    pub initial_cash: f64,

    #[serde(default = "default_horizon_months")]
    pub horizon_months: u32,

    #[serde(default = "default_monthly_inflation_pct")]
    pub monthly_inflation_pct: f64,

    #[serde(default = "default_num_trials")]
    pub num_trials: usize,

    #[serde(default = "default_revenue")]
    pub revenue: NormalShock,

    #[serde(default = "default_costs")]
    pub costs: NormalShock,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_cash: default_initial_cash(),
            horizon_months: default_horizon_months(),
            monthly_inflation_pct: default_monthly_inflation_pct(),
            num_trials: default_num_trials(),
            revenue: default_revenue(),
            costs: default_costs(),
        }
    }
}

impl SimulationConfig {
    /// Check every precondition of the simulator
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.horizon_months == 0 {
            return Err(SimulationError::InvalidConfig {
                field: "horizon_months",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if self.num_trials == 0 {
            return Err(SimulationError::InvalidConfig {
                field: "num_trials",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !self.initial_cash.is_finite() || self.initial_cash < 0.0 {
            return Err(SimulationError::InvalidConfig {
                field: "initial_cash",
                value: self.initial_cash,
                reason: "must be non-negative and finite",
            });
        }
        if !self.monthly_inflation_pct.is_finite() || self.monthly_inflation_pct < 0.0 {
            return Err(SimulationError::InvalidConfig {
                field: "monthly_inflation_pct",
                value: self.monthly_inflation_pct,
                reason: "must be non-negative and finite",
            });
        }
        self.revenue.validate("revenue.mean", "revenue.std_dev")?;
        self.costs.validate("costs.mean", "costs.std_dev")?;
        Ok(())
    }

    /// Multiplier applied to the balance at the end of each month
    #[must_use]
    pub fn inflation_multiplier(&self) -> f64 {
        1.0 + self.monthly_inflation_pct / 100.0
    }

    /// Expected terminal cash: the closed form of the monthly recurrence
    /// with every draw replaced by its mean.
    #[must_use]
    pub fn expected_terminal_cash(&self) -> f64 {
        let m = self.inflation_multiplier();
        let net = self.revenue.mean - self.costs.mean;
        let growth = m.powf(f64::from(self.horizon_months));
        let annuity = if self.monthly_inflation_pct == 0.0 {
            f64::from(self.horizon_months)
        } else {
            // sum_{k=1..n} m^k
            m * (growth - 1.0) / (m - 1.0)
        };
        self.initial_cash * growth + net * annuity
    }

    #[must_use]
    pub fn with_inflation_pct(&self, pct: f64) -> Self {
        Self {
            monthly_inflation_pct: pct,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_trials(&self, num_trials: usize) -> Self {
        Self {
            num_trials,
            ..self.clone()
        }
    }
}
