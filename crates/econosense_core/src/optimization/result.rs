//! Minimizer result types

use serde::{Deserialize, Serialize};

/// Reason why minimization terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// Simplex collapsed below both tolerances
    Converged,

    /// Iteration budget exhausted without convergence
    MaxIterationsReached,

    /// The best objective value is NaN or infinite
    NonFiniteObjective,
}

/// Outcome of a Nelder-Mead run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinimizeResult {
    /// Best point found
    pub point: Vec<f64>,

    /// Objective value at `point`
    pub objective: f64,

    /// Simplex iterations performed
    pub iterations: usize,

    /// Total objective evaluations
    pub evaluations: usize,

    pub termination_reason: TerminationReason,

    /// Best objective value after each iteration (monotonically non-increasing)
    pub best_values: Vec<f64>,
}

impl MinimizeResult {
    #[must_use]
    pub fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::Converged
    }
}
