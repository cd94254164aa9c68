//! Scenario tests for the econosense engines
//!
//! Tests are organized by topic:
//! - `forecast` - ARIMA fitting, forecasting and prediction intervals
//! - `simulation` - Monte Carlo cash-flow properties
//! - `builder_dsl` - Builder DSL for fluent simulation setup

mod forecast;
mod simulation;

use crate::model::TimeSeries;

pub(crate) use crate::sample::SAMPLE_INFLATION;

pub(crate) fn sample_series() -> TimeSeries {
    crate::sample::sample_series().unwrap()
}
