//! ARIMA(p, d, q) estimated by conditional sum of squares
//!
//! The series is differenced `d` times. On the differenced scale the model is
//!
//! ```text
//! (x_t - c) = Σ φ_i (x_{t-i} - c) + e_t + Σ θ_j e_{t-j}
//! ```
//!
//! where `c` is the drift (fixed at 0 when drift is disabled). Residuals are
//! conditioned on the first `p` differenced values, with pre-sample
//! innovations set to zero. `(c, φ, θ)` minimize the sum of squared
//! residuals under a bounded Nelder-Mead search; AR and MA coefficients are
//! kept inside (-0.99, 0.99).

use crate::config::{ArimaOrder, ForecastConfig};
use crate::error::ForecastError;
use crate::model::FitSummary;
use crate::optimization::{NelderMeadConfig, TerminationReason, minimize};

/// Bound on |φ| and |θ|
const COEFFICIENT_BOUND: f64 = 0.99;

/// Apply differencing `order` times
pub fn difference(values: &[f64], order: usize) -> Vec<f64> {
    let mut result = values.to_vec();
    for _ in 0..order {
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Undo `order` rounds of differencing for values that follow `original`
pub fn integrate(forecast_diff: &[f64], original: &[f64], order: usize) -> Vec<f64> {
    // Last observed value at every differencing level, from levels up
    let anchors: Vec<f64> = (0..order)
        .filter_map(|k| difference(original, k).last().copied())
        .collect();

    let mut result = forecast_diff.to_vec();
    for anchor in anchors.iter().rev() {
        let mut level = *anchor;
        for value in &mut result {
            level += *value;
            *value = level;
        }
    }
    result
}

/// Layout of the optimizer's parameter vector: `[c?, φ_1..φ_p, θ_1..θ_q]`
#[derive(Debug, Clone, Copy)]
struct ParamLayout {
    drift: bool,
    p: usize,
    q: usize,
}

impl ParamLayout {
    fn len(&self) -> usize {
        usize::from(self.drift) + self.p + self.q
    }

    fn split<'a>(&self, params: &'a [f64]) -> (f64, &'a [f64], &'a [f64]) {
        let offset = usize::from(self.drift);
        let drift = if self.drift { params[0] } else { 0.0 };
        let ar = &params[offset..offset + self.p];
        let ma = &params[offset + self.p..offset + self.p + self.q];
        (drift, ar, ma)
    }
}

/// One-step-ahead residuals of the differenced series for the given parameters
fn residuals(diff: &[f64], drift: f64, ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let n = diff.len();
    let p = ar.len();
    let mut residuals = vec![0.0; n];

    for t in p..n {
        let mut pred = drift;
        for (i, phi) in ar.iter().enumerate() {
            pred += phi * (diff[t - 1 - i] - drift);
        }
        for (j, theta) in ma.iter().enumerate() {
            if t > j {
                pred += theta * residuals[t - 1 - j];
            }
        }
        residuals[t] = diff[t] - pred;
    }

    residuals
}

fn conditional_sum_of_squares(diff: &[f64], drift: f64, ar: &[f64], ma: &[f64]) -> f64 {
    residuals(diff, drift, ar, ma)
        .iter()
        .skip(ar.len())
        .map(|e| e * e)
        .sum()
}

/// A fitted ARIMA model
#[derive(Debug, Clone)]
pub struct ArimaModel {
    order: ArimaOrder,
    drift: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    original: Vec<f64>,
    differenced: Vec<f64>,
    residuals: Vec<f64>,
    css: f64,
    sigma2: f64,
    num_params: usize,
    iterations: usize,
}

impl ArimaModel {
    /// Fit the configured order to `values`
    ///
    /// The caller is expected to have checked the minimum length; a series
    /// that is too short for the order is still rejected here.
    pub fn fit(values: &[f64], config: &ForecastConfig) -> Result<Self, ForecastError> {
        let order = config.order;
        config.validate()?;

        let required = order.min_observations();
        if values.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                actual: values.len(),
            });
        }

        let differenced = difference(values, order.d);
        let first = differenced[0];
        if differenced.iter().all(|v| (v - first).abs() <= f64::EPSILON * first.abs().max(1.0)) {
            return Err(ForecastError::ModelFit(format!(
                "series is degenerate: after {} differencing round(s) every value equals {first}",
                order.d
            )));
        }

        let layout = ParamLayout {
            drift: config.include_drift,
            p: order.p,
            q: order.q,
        };

        let mean = differenced.iter().sum::<f64>() / differenced.len() as f64;
        let mut initial = Vec::with_capacity(layout.len());
        let mut bounds = Vec::with_capacity(layout.len());
        if layout.drift {
            initial.push(mean);
            bounds.push((f64::NEG_INFINITY, f64::INFINITY));
        }
        for i in 0..order.p + order.q {
            let lag = if i < order.p { i } else { i - order.p };
            initial.push(0.1 / (lag + 1) as f64);
            bounds.push((-COEFFICIENT_BOUND, COEFFICIENT_BOUND));
        }

        let (params, iterations) = if initial.is_empty() {
            (Vec::new(), 0)
        } else {
            let nm_config = NelderMeadConfig {
                max_iterations: config.max_iterations,
                f_tolerance: config.tolerance,
                x_tolerance: config.tolerance.sqrt(),
            };
            let result = minimize(
                |params| {
                    let (drift, ar, ma) = layout.split(params);
                    conditional_sum_of_squares(&differenced, drift, ar, ma)
                },
                &initial,
                &bounds,
                &nm_config,
                None,
            );

            match result.termination_reason {
                TerminationReason::Converged => {}
                TerminationReason::MaxIterationsReached => {
                    return Err(ForecastError::ModelFit(format!(
                        "optimizer did not converge within {} iterations",
                        result.iterations
                    )));
                }
                TerminationReason::NonFiniteObjective => {
                    return Err(ForecastError::ModelFit(
                        "conditional sum of squares is not finite".to_string(),
                    ));
                }
            }
            (result.point, result.iterations)
        };

        let (drift, ar, ma) = layout.split(&params);
        let residuals = residuals(&differenced, drift, ar, ma);
        let css: f64 = residuals.iter().skip(order.p).map(|e| e * e).sum();
        let conditioned = differenced.len() - order.p;
        let sigma2 = css / conditioned as f64;

        tracing::debug!(
            p = order.p,
            d = order.d,
            q = order.q,
            drift,
            css,
            iterations,
            "ARIMA fit converged"
        );

        Ok(Self {
            order,
            drift,
            ar: ar.to_vec(),
            ma: ma.to_vec(),
            original: values.to_vec(),
            differenced,
            residuals,
            css,
            sigma2,
            num_params: layout.len(),
            iterations,
        })
    }

    #[must_use]
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    #[must_use]
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar
    }

    #[must_use]
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma
    }

    #[must_use]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    #[must_use]
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// In-sample one-step residuals on the differenced scale
    #[must_use]
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Point forecasts for the next `steps` periods on the original scale
    #[must_use]
    pub fn predict(&self, steps: usize) -> Vec<f64> {
        let mut extended = self.differenced.clone();
        let mut extended_residuals = self.residuals.clone();

        for _ in 0..steps {
            let t = extended.len();
            let mut pred = self.drift;

            for (i, phi) in self.ar.iter().enumerate() {
                pred += phi * (extended[t - 1 - i] - self.drift);
            }
            // Future innovations have zero mean
            for (j, theta) in self.ma.iter().enumerate() {
                if t > j {
                    pred += theta * extended_residuals[t - 1 - j];
                }
            }

            extended.push(pred);
            extended_residuals.push(0.0);
        }

        let forecast_diff = &extended[self.differenced.len()..];
        integrate(forecast_diff, &self.original, self.order.d)
    }

    /// Psi weights of the integrated model, `Ψ_0 .. Ψ_{steps-1}`
    fn psi_weights(&self, steps: usize) -> Vec<f64> {
        let mut psi = vec![0.0; steps];
        if steps == 0 {
            return psi;
        }
        psi[0] = 1.0;
        for j in 1..steps {
            let mut value = self.ma.get(j - 1).copied().unwrap_or(0.0);
            for (i, phi) in self.ar.iter().enumerate() {
                if j > i {
                    value += phi * psi[j - 1 - i];
                }
            }
            psi[j] = value;
        }

        // Each differencing round accumulates the weights once more
        for _ in 0..self.order.d {
            let mut running = 0.0;
            for weight in &mut psi {
                running += *weight;
                *weight = running;
            }
        }
        psi
    }

    /// Standard error of each forecast step
    #[must_use]
    pub fn forecast_std_errors(&self, steps: usize) -> Vec<f64> {
        let mut cumulative = 0.0;
        self.psi_weights(steps)
            .into_iter()
            .map(|psi| {
                cumulative += psi * psi;
                (self.sigma2 * cumulative).sqrt()
            })
            .collect()
    }

    /// Gaussian log-likelihood implied by the CSS residual variance
    #[must_use]
    pub fn log_likelihood(&self) -> Option<f64> {
        if self.sigma2 <= 0.0 {
            return None;
        }
        let m = (self.differenced.len() - self.order.p) as f64;
        Some(-0.5 * m * ((2.0 * std::f64::consts::PI * self.sigma2).ln() + 1.0))
    }

    #[must_use]
    pub fn summary(&self) -> FitSummary {
        let m = (self.differenced.len() - self.order.p) as f64;
        // Coefficients plus the innovation variance
        let k = (self.num_params + 1) as f64;
        let log_likelihood = self.log_likelihood();

        FitSummary {
            order: self.order,
            drift: self.drift,
            ar_coefficients: self.ar.clone(),
            ma_coefficients: self.ma.clone(),
            sigma2: self.sigma2,
            css: self.css,
            log_likelihood,
            aic: log_likelihood.map(|ll| -2.0 * ll + 2.0 * k),
            bic: log_likelihood.map(|ll| -2.0 * ll + k * m.ln()),
            iterations: self.iterations,
        }
    }
}
