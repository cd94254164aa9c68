use std::fmt;

use crate::model::Period;

/// Errors raised by the inflation forecaster
#[derive(Debug, Clone)]
pub enum ForecastError {
    /// Too few observations for the requested model order
    InsufficientData { required: usize, actual: usize },
    /// The estimator did not converge or the input was degenerate
    ModelFit(String),
    /// Observations are not a contiguous monthly series of finite values
    InvalidSeries(SeriesError),
    /// Model order outside the supported range
    InvalidOrder { p: usize, d: usize, q: usize },
    /// Zero forecast steps requested
    InvalidSteps,
    /// Prediction interval level outside (0, 1)
    InvalidLevel(f64),
    /// An optimizer setting is out of range
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::InsufficientData { required, actual } => write!(
                f,
                "insufficient data: need at least {required} observations, got {actual}"
            ),
            ForecastError::ModelFit(reason) => write!(f, "model fit failed: {reason}"),
            ForecastError::InvalidSeries(e) => write!(f, "invalid series: {e}"),
            ForecastError::InvalidOrder { p, d, q } => {
                write!(f, "unsupported ARIMA order ({p},{d},{q})")
            }
            ForecastError::InvalidSteps => write!(f, "forecast steps must be at least 1"),
            ForecastError::InvalidLevel(level) => {
                write!(f, "interval level {level} must lie strictly between 0 and 1")
            }
            ForecastError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "invalid {field} ({value}): {reason}"),
        }
    }
}

impl std::error::Error for ForecastError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ForecastError::InvalidSeries(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SeriesError> for ForecastError {
    fn from(err: SeriesError) -> Self {
        ForecastError::InvalidSeries(err)
    }
}

/// Errors related to building a monthly time series
#[derive(Debug, Clone)]
pub enum SeriesError {
    /// Period label could not be parsed as a month
    UnparseablePeriod(String),
    /// Two consecutive observations are not one month apart
    NotContiguous { previous: Period, next: Period },
    /// Observation value is NaN or infinite
    NonFiniteValue { period: Period, value: f64 },
    /// Calendar arithmetic left the supported date range
    DateOutOfRange(jiff::Error),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::UnparseablePeriod(label) => {
                write!(f, "cannot parse period label {label:?} as a month")
            }
            SeriesError::NotContiguous { previous, next } => write!(
                f,
                "periods must be consecutive months, found {previous} followed by {next}"
            ),
            SeriesError::NonFiniteValue { period, value } => {
                write!(f, "value {value} at {period} is not finite")
            }
            SeriesError::DateOutOfRange(e) => write!(f, "date calculation error: {e}"),
        }
    }
}

impl std::error::Error for SeriesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SeriesError::DateOutOfRange(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jiff::Error> for SeriesError {
    fn from(err: jiff::Error) -> Self {
        SeriesError::DateOutOfRange(err)
    }
}

/// Errors raised by the cash-flow simulator
#[derive(Debug, Clone)]
pub enum SimulationError {
    /// A configuration field is out of range
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// Simulation was cancelled through its progress handle
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidConfig {
                field,
                value,
                reason,
            } => write!(f, "invalid {field} ({value}): {reason}"),
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {}
