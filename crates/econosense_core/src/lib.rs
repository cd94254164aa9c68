//! Inflation analytics for small businesses
//!
//! This crate provides the two numerical engines behind EconoSense:
//! - an ARIMA inflation forecaster fitted by conditional sum of squares
//! - a Monte Carlo cash-flow simulator with monthly revenue and cost shocks
//!   compounded by a fixed monthly inflation rate
//!
//! Both are synchronous and free of shared state. Randomness is always
//! injected, either as a seed or as a caller-owned RNG.
//!
//! ```ignore
//! use econosense_core::{SimulationBuilder, TimeSeries, forecast, simulate_seeded};
//!
//! let series = TimeSeries::from_labeled(&[
//!     ("Jan-2023", 25.6),
//!     ("Feb-2023", 27.1),
//!     ("Mar-2023", 28.3),
//! ])?;
//! let next = forecast(&series, 3)?;
//!
//! let config = SimulationBuilder::new().inflation_pct(5.0).build()?;
//! let ensemble = simulate_seeded(&config, 42)?;
//! println!("median: {:?}", ensemble.median());
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod date_math;
pub mod error;
pub mod forecast;
pub mod optimization;
pub mod sample;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{ArimaOrder, ForecastConfig, NormalShock, SimulationBuilder, SimulationConfig};
pub use error::{ForecastError, SeriesError, SimulationError};
pub use forecast::{forecast, forecast_with, forecast_with_intervals};
pub use model::{
    EnsembleStats, FitSummary, ForecastPoint, ForecastResult, Histogram, Observation, Period,
    SimulationEnsemble, SimulationProgress, TimeSeries,
};
pub use sample::sample_series;
pub use simulation::{
    simulate, simulate_paths, simulate_seeded, simulate_with_progress, simulate_with_rng,
};
