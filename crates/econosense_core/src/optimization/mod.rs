//! Derivative-free minimization used by the forecaster's estimator
//!
//! The ARIMA conditional sum of squares has no closed-form optimum once an
//! MA term is present, so the coefficients are found with a bounded
//! Nelder-Mead simplex.

mod nelder_mead;
mod result;

pub use nelder_mead::{NelderMeadConfig, ProgressCallback, minimize};
pub use result::{MinimizeResult, TerminationReason};
