//! Inflation forecaster
//!
//! Fits an ARIMA model to a monthly [`TimeSeries`] and extends it by a number
//! of months. Periods of the forecast continue the series' calendar.

mod arima;

pub use arima::{ArimaModel, difference, integrate};

use statrs::distribution::{ContinuousCDF, Normal};

use crate::config::ForecastConfig;
use crate::error::ForecastError;
use crate::model::{
    ForecastPoint, ForecastResult, IntervalSet, Period, PredictionInterval, TimeSeries,
};

/// Forecast `steps` months with the default ARIMA(1,1,1) configuration, no drift
pub fn forecast(series: &TimeSeries, steps: usize) -> Result<ForecastResult, ForecastError> {
    forecast_with(series, steps, &ForecastConfig::default())
}

/// Forecast `steps` months with an explicit configuration
pub fn forecast_with(
    series: &TimeSeries,
    steps: usize,
    config: &ForecastConfig,
) -> Result<ForecastResult, ForecastError> {
    let (model, last) = fit_series(series, steps, config)?;
    let values = model.predict(steps);
    let points = forecast_points(last, &values)?;

    Ok(ForecastResult {
        points,
        fit: model.summary(),
        intervals: None,
    })
}

/// Forecast with symmetric Gaussian prediction intervals at `level` (e.g. 0.95)
pub fn forecast_with_intervals(
    series: &TimeSeries,
    steps: usize,
    level: f64,
    config: &ForecastConfig,
) -> Result<ForecastResult, ForecastError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(ForecastError::InvalidLevel(level));
    }

    let (model, last) = fit_series(series, steps, config)?;
    let values = model.predict(steps);
    let std_errors = model.forecast_std_errors(steps);
    let points = forecast_points(last, &values)?;

    let z = Normal::standard().inverse_cdf(0.5 + level / 2.0);
    let bounds = points
        .iter()
        .zip(&std_errors)
        .map(|(point, &std_error)| PredictionInterval {
            period: point.period,
            lower: point.value - z * std_error,
            upper: point.value + z * std_error,
            std_error,
        })
        .collect();

    Ok(ForecastResult {
        points,
        fit: model.summary(),
        intervals: Some(IntervalSet { level, bounds }),
    })
}

/// Shared preconditions and the fit itself
fn fit_series(
    series: &TimeSeries,
    steps: usize,
    config: &ForecastConfig,
) -> Result<(ArimaModel, Period), ForecastError> {
    if steps == 0 {
        return Err(ForecastError::InvalidSteps);
    }
    config.validate()?;

    let required = config.order.min_observations();
    let insufficient = ForecastError::InsufficientData {
        required,
        actual: series.len(),
    };
    if series.len() < required {
        return Err(insufficient);
    }
    let Some(last) = series.last_period() else {
        return Err(insufficient);
    };

    let values: Vec<f64> = series.values().collect();
    tracing::debug!(
        observations = values.len(),
        steps,
        last = %last,
        "Fitting forecast model"
    );

    let model = ArimaModel::fit(&values, config)?;
    Ok((model, last))
}

fn forecast_points(last: Period, values: &[f64]) -> Result<Vec<ForecastPoint>, ForecastError> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            Ok(ForecastPoint {
                period: last.offset(i as i32 + 1)?,
                value,
            })
        })
        .collect()
}
