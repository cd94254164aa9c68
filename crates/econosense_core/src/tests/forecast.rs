//! Forecaster scenario tests

use super::{SAMPLE_INFLATION, sample_series};
use crate::config::{ArimaOrder, ForecastConfig};
use crate::error::ForecastError;
use crate::forecast::{forecast, forecast_with, forecast_with_intervals};
use crate::model::{Period, TimeSeries};

fn series_from(values: &[f64]) -> TimeSeries {
    TimeSeries::from_values(Period::new(2023, 1).unwrap(), values).unwrap()
}

#[test]
fn test_sample_forecast_continues_trend() {
    let result = forecast(&sample_series(), 3).unwrap();

    // Default model is ARIMA(1,1,1) with no trend term
    assert_eq!(result.fit.drift, 0.0);
    assert_eq!(result.len(), 3);
    let values = result.values();
    assert!(values.iter().all(|v| *v > 49.9), "forecast {values:?}");
    assert!(
        values.windows(2).all(|w| w[1] > w[0]),
        "forecast not increasing: {values:?}"
    );
}

#[test]
fn test_forecast_periods_follow_last_observation() {
    let result = forecast(&sample_series(), 3).unwrap();
    let labels: Vec<String> = result.periods().iter().map(|p| p.to_string()).collect();
    assert_eq!(labels, vec!["Jan-2024", "Feb-2024", "Mar-2024"]);
}

#[test]
fn test_forecast_is_deterministic() {
    let first = forecast(&sample_series(), 4).unwrap();
    let second = forecast(&sample_series(), 4).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_two_observations_insufficient() {
    let series = series_from(&[25.6, 28.1]);
    match forecast(&series, 3) {
        Err(ForecastError::InsufficientData { required, actual }) => {
            assert_eq!(required, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn test_empty_series_insufficient() {
    let series = TimeSeries::new(vec![]).unwrap();
    assert!(matches!(
        forecast(&series, 1),
        Err(ForecastError::InsufficientData { actual: 0, .. })
    ));
}

#[test]
fn test_three_observations_meet_minimum() {
    let series = series_from(&SAMPLE_INFLATION[..3]);
    let result = forecast(&series, 2).unwrap();

    assert_eq!(result.len(), 2);
    let values = result.values();
    assert!(values.iter().all(|v| *v > 30.5), "forecast {values:?}");
}

#[test]
fn test_constant_series_fails_fit() {
    let series = series_from(&[12.0; 8]);
    assert!(matches!(
        forecast(&series, 3),
        Err(ForecastError::ModelFit(_))
    ));
}

#[test]
fn test_linear_series_fails_fit() {
    // First differences are all 2.0, so the residual variance collapses
    let values: Vec<f64> = (0..8).map(|i| 10.0 + 2.0 * f64::from(i)).collect();
    assert!(matches!(
        forecast(&series_from(&values), 3),
        Err(ForecastError::ModelFit(_))
    ));
}

#[test]
fn test_zero_steps_rejected() {
    assert!(matches!(
        forecast(&sample_series(), 0),
        Err(ForecastError::InvalidSteps)
    ));
}

#[test]
fn test_unsupported_order_rejected() {
    let config = ForecastConfig::default().with_order(1, 3, 1);
    assert!(matches!(
        forecast_with(&sample_series(), 3, &config),
        Err(ForecastError::InvalidOrder { d: 3, .. })
    ));
}

#[test]
fn test_higher_order_needs_more_data() {
    let config = ForecastConfig::default().with_order(3, 1, 0);
    let series = series_from(&SAMPLE_INFLATION[..4]);
    assert!(matches!(
        forecast_with(&series, 3, &config),
        Err(ForecastError::InsufficientData {
            required: 5,
            actual: 4
        })
    ));
}

#[test]
fn test_random_walk_with_drift() {
    let config = ForecastConfig::default().with_order(0, 1, 0).with_drift(true);
    let result = forecast_with(&sample_series(), 3, &config).unwrap();

    let drift = (49.9 - 25.6) / 11.0;
    for (h, value) in result.values().iter().enumerate() {
        let expected = 49.9 + drift * (h + 1) as f64;
        assert!((value - expected).abs() < 1e-2, "step {h}: {value} vs {expected}");
    }
    assert!(result.fit.ar_coefficients.is_empty());
    assert!(result.fit.ma_coefficients.is_empty());
}

#[test]
fn test_fit_summary_describes_model() {
    let result = forecast(&sample_series(), 3).unwrap();
    let fit = &result.fit;

    assert_eq!(fit.order, ArimaOrder::new(1, 1, 1));
    assert_eq!(fit.ar_coefficients.len(), 1);
    assert_eq!(fit.ma_coefficients.len(), 1);
    assert!(fit.ar_coefficients[0].abs() <= 0.99);
    assert!(fit.ma_coefficients[0].abs() <= 0.99);
    assert!(fit.sigma2 > 0.0);
    assert!(fit.css > 0.0);
    assert!(fit.aic.is_some());
    assert!(fit.bic.is_some());
    assert!(result.intervals.is_none());
}

#[test]
fn test_prediction_intervals() {
    let config = ForecastConfig::default();
    let wide = forecast_with_intervals(&sample_series(), 3, 0.95, &config).unwrap();
    let narrow = forecast_with_intervals(&sample_series(), 3, 0.80, &config).unwrap();

    let wide_set = wide.intervals.as_ref().unwrap();
    let narrow_set = narrow.intervals.as_ref().unwrap();
    assert_eq!(wide_set.level, 0.95);
    assert_eq!(wide_set.bounds.len(), 3);

    for ((point, w), n) in wide.points.iter().zip(&wide_set.bounds).zip(&narrow_set.bounds) {
        assert_eq!(point.period, w.period);
        assert!(w.lower < point.value && point.value < w.upper);
        assert!(w.upper - w.lower > n.upper - n.lower);
    }

    // Uncertainty never shrinks with the horizon
    assert!(wide_set.bounds.windows(2).all(|b| b[1].std_error >= b[0].std_error));

    // Point forecasts are unaffected by the interval request
    assert_eq!(wide.points, forecast(&sample_series(), 3).unwrap().points);
}

#[test]
fn test_interval_level_must_be_open_unit() {
    let config = ForecastConfig::default();
    for level in [0.0, 1.0, 1.5, f64::NAN] {
        assert!(matches!(
            forecast_with_intervals(&sample_series(), 3, level, &config),
            Err(ForecastError::InvalidLevel(_))
        ));
    }
}

#[test]
fn test_forecast_with_drift() {
    let config = ForecastConfig::default().with_drift(true);
    let result = forecast_with(&sample_series(), 3, &config).unwrap();

    assert!(result.fit.drift > 0.0, "drift {}", result.fit.drift);
    let values = result.values();
    assert!(values.iter().all(|v| *v > 49.9), "forecast {values:?}");
    assert!(values.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_random_walk_without_drift_repeats_last_value() {
    let config = ForecastConfig::default().with_order(0, 1, 0);
    let result = forecast_with(&sample_series(), 3, &config).unwrap();
    assert!(result.values().iter().all(|v| (v - 49.9).abs() < 1e-9));
}

#[test]
fn test_bad_optimizer_settings_rejected_before_fit() {
    let config = ForecastConfig {
        tolerance: -1.0,
        ..Default::default()
    };
    assert!(matches!(
        forecast_with(&sample_series(), 3, &config),
        Err(ForecastError::InvalidConfig {
            field: "tolerance",
            ..
        })
    ));

    let config = ForecastConfig {
        max_iterations: 0,
        ..Default::default()
    };
    assert!(matches!(
        forecast_with_intervals(&sample_series(), 3, 0.95, &config),
        Err(ForecastError::InvalidConfig {
            field: "max_iterations",
            ..
        })
    ));
}
