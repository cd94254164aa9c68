//! Forecast output types

use serde::{Deserialize, Serialize};

use super::series::Period;
use crate::config::ArimaOrder;

/// One forecast step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period: Period,
    /// Mean of the forecast distribution
    pub value: f64,
}

/// Symmetric prediction interval around a forecast point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInterval {
    pub period: Period,
    pub lower: f64,
    pub upper: f64,
    pub std_error: f64,
}

/// Description of the fitted model behind a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitSummary {
    pub order: ArimaOrder,
    /// Intercept of the differenced series (0 when drift is disabled)
    pub drift: f64,
    pub ar_coefficients: Vec<f64>,
    pub ma_coefficients: Vec<f64>,
    /// Residual variance (CSS divided by the number of conditioned residuals)
    pub sigma2: f64,
    /// Conditional sum of squares at the optimum
    pub css: f64,
    /// Gaussian log-likelihood; `None` when the residual variance is zero
    pub log_likelihood: Option<f64>,
    pub aic: Option<f64>,
    pub bic: Option<f64>,
    /// Number of simplex iterations the optimizer used
    pub iterations: usize,
}

/// Point forecasts plus the fit that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    pub fit: FitSummary,
    /// Present only when intervals were requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intervals: Option<IntervalSet>,
}

/// Prediction intervals at a single confidence level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSet {
    pub level: f64,
    pub bounds: Vec<PredictionInterval>,
}

impl ForecastResult {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Forecast values in period order
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    #[must_use]
    pub fn periods(&self) -> Vec<Period> {
        self.points.iter().map(|p| p.period).collect()
    }
}
