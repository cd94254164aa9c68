//! Nelder-Mead simplex minimization
//!
//! The Nelder-Mead algorithm is a derivative-free optimization method that
//! works well for continuous, low-dimensional problems. It maintains a
//! simplex of N+1 points in N-dimensional space and iteratively transforms
//! the simplex toward the minimum. Points are clamped to per-dimension
//! bounds after every move.

use super::result::{MinimizeResult, TerminationReason};

/// Progress callback for Nelder-Mead minimization
///
/// Arguments: (iteration, best_objective, current_simplex_size)
pub type ProgressCallback = Box<dyn Fn(usize, f64, f64) + Send + Sync>;

/// Standard Nelder-Mead coefficients
const REFLECTION_COEF: f64 = 1.0;
const EXPANSION_COEF: f64 = 2.0;
const CONTRACTION_COEF: f64 = 0.5;
const SHRINK_COEF: f64 = 0.5;

/// Minimizer settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NelderMeadConfig {
    pub max_iterations: usize,
    /// Converged once the objective spread is below `f_tolerance * (1 + |best|)`
    pub f_tolerance: f64,
    /// ...and the simplex radius is below `x_tolerance`
    pub x_tolerance: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 5_000,
            f_tolerance: 1e-8,
            x_tolerance: 1e-4,
        }
    }
}

/// A point in parameter space with its evaluation
#[derive(Debug, Clone)]
struct SimplexVertex {
    values: Vec<f64>,
    objective: f64,
}

/// Counts evaluations and maps NaN to +inf so sorting stays total
struct Objective<F> {
    f: F,
    evaluations: usize,
}

impl<F: Fn(&[f64]) -> f64> Objective<F> {
    fn eval(&mut self, point: &[f64]) -> f64 {
        self.evaluations += 1;
        let value = (self.f)(point);
        if value.is_nan() {
            f64::INFINITY
        } else {
            value
        }
    }

    fn vertex(&mut self, values: Vec<f64>) -> SimplexVertex {
        let objective = self.eval(&values);
        SimplexVertex { values, objective }
    }
}

/// Initial step for one dimension
fn initial_step(x: f64, (min, max): (f64, f64)) -> f64 {
    if min.is_finite() && max.is_finite() {
        0.1 * (max - min)
    } else if x != 0.0 {
        0.05 * x.abs()
    } else {
        0.1
    }
}

/// Initialize the simplex with N+1 points around `initial`
fn initialize_simplex<F: Fn(&[f64]) -> f64>(
    objective: &mut Objective<F>,
    initial: &[f64],
    bounds: &[(f64, f64)],
) -> Vec<SimplexVertex> {
    let n = initial.len();
    let mut simplex = Vec::with_capacity(n + 1);

    let mut start = initial.to_vec();
    clamp_to_bounds(&mut start, bounds);
    simplex.push(objective.vertex(start.clone()));

    // Perturb each dimension, stepping down instead when the step would leave the bounds
    for i in 0..n {
        let mut point = start.clone();
        let step = initial_step(point[i], bounds[i]);
        if point[i] + step <= bounds[i].1 {
            point[i] += step;
        } else {
            point[i] -= step;
        }
        clamp_to_bounds(&mut point, bounds);
        simplex.push(objective.vertex(point));
    }

    simplex
}

/// Calculate the centroid of all points except the worst
fn centroid(simplex: &[SimplexVertex]) -> Vec<f64> {
    let n = simplex[0].values.len();
    let mut center = vec![0.0; n];

    // Exclude the last (worst) point
    for vertex in simplex.iter().take(simplex.len() - 1) {
        for (i, val) in vertex.values.iter().enumerate() {
            center[i] += val;
        }
    }

    let count = (simplex.len() - 1) as f64;
    for val in &mut center {
        *val /= count;
    }

    center
}

/// Reflect a point through the centroid
fn reflect(point: &[f64], centroid: &[f64], coef: f64) -> Vec<f64> {
    point
        .iter()
        .zip(centroid.iter())
        .map(|(p, c)| c + coef * (c - p))
        .collect()
}

/// Clamp values to bounds
fn clamp_to_bounds(values: &mut [f64], bounds: &[(f64, f64)]) {
    for (val, (min, max)) in values.iter_mut().zip(bounds.iter()) {
        *val = val.clamp(*min, *max);
    }
}

/// Calculate simplex size (max distance from centroid)
fn simplex_size(simplex: &[SimplexVertex], centroid: &[f64]) -> f64 {
    simplex
        .iter()
        .map(|v| {
            v.values
                .iter()
                .zip(centroid.iter())
                .map(|(a, b)| (a - b).powi(2))
                .sum::<f64>()
                .sqrt()
        })
        .fold(0.0_f64, |a, b| a.max(b))
}

fn sort_simplex(simplex: &mut [SimplexVertex]) {
    simplex.sort_by(|a, b| a.objective.total_cmp(&b.objective));
}

/// Minimize `f` starting from `initial`
///
/// # Arguments
/// * `f` - Objective to minimize
/// * `initial` - Starting point
/// * `bounds` - (min, max) per dimension; use infinities for unbounded
/// * `config` - Iteration budget and tolerances
/// * `progress_callback` - Optional callback for progress updates
///
/// # Panics
/// Panics if `initial` is empty or `bounds` has a different length.
pub fn minimize<F: Fn(&[f64]) -> f64>(
    f: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    config: &NelderMeadConfig,
    progress_callback: Option<&ProgressCallback>,
) -> MinimizeResult {
    assert!(!initial.is_empty(), "cannot minimize over zero parameters");
    assert_eq!(initial.len(), bounds.len(), "one bound per parameter");

    let mut objective = Objective { f, evaluations: 0 };
    let mut simplex = initialize_simplex(&mut objective, initial, bounds);
    let mut best_values = Vec::new();
    let mut iteration = 0;
    let mut termination_reason = TerminationReason::MaxIterationsReached;

    loop {
        // Sort simplex by objective (best first, worst last)
        sort_simplex(&mut simplex);

        let best_objective = simplex[0].objective;
        let worst_idx = simplex.len() - 1;
        let worst_objective = simplex[worst_idx].objective;
        best_values.push(best_objective);

        let cent = centroid(&simplex);
        let size = simplex_size(&simplex, &cent);

        // Check convergence
        let spread = (worst_objective - best_objective).abs();
        if best_objective.is_finite()
            && spread <= config.f_tolerance * (1.0 + best_objective.abs())
            && size <= config.x_tolerance
        {
            termination_reason = TerminationReason::Converged;
            break;
        }

        if iteration >= config.max_iterations {
            break;
        }
        iteration += 1;

        if let Some(callback) = progress_callback {
            callback(iteration, best_objective, size);
        }

        let second_worst_objective = simplex[worst_idx - 1].objective;
        let worst_values = simplex[worst_idx].values.clone();

        // Try reflection
        let mut reflected = reflect(&worst_values, &cent, REFLECTION_COEF);
        clamp_to_bounds(&mut reflected, bounds);
        let reflected = objective.vertex(reflected);

        if reflected.objective < best_objective {
            // Reflected is best so far - try expansion
            let mut expanded = reflect(&worst_values, &cent, EXPANSION_COEF);
            clamp_to_bounds(&mut expanded, bounds);
            let expanded = objective.vertex(expanded);

            simplex[worst_idx] = if expanded.objective < reflected.objective {
                expanded
            } else {
                reflected
            };
        } else if reflected.objective < second_worst_objective {
            // Reflected is better than second worst - accept it
            simplex[worst_idx] = reflected;
        } else {
            // Try contraction toward whichever of reflected/worst is better
            let contract_point = if reflected.objective < worst_objective {
                &reflected.values
            } else {
                &worst_values
            };

            let mut contracted: Vec<f64> = cent
                .iter()
                .zip(contract_point.iter())
                .map(|(c, p)| c + CONTRACTION_COEF * (p - c))
                .collect();
            clamp_to_bounds(&mut contracted, bounds);
            let contracted = objective.vertex(contracted);

            if contracted.objective < worst_objective.min(reflected.objective) {
                simplex[worst_idx] = contracted;
            } else {
                // Shrink the simplex toward the best point
                let best_point = simplex[0].values.clone();
                for vertex in simplex.iter_mut().skip(1) {
                    let mut shrunk: Vec<f64> = best_point
                        .iter()
                        .zip(vertex.values.iter())
                        .map(|(b, v)| b + SHRINK_COEF * (v - b))
                        .collect();
                    clamp_to_bounds(&mut shrunk, bounds);
                    *vertex = objective.vertex(shrunk);
                }
            }
        }
    }

    let best = &simplex[0];
    if !best.objective.is_finite() {
        termination_reason = TerminationReason::NonFiniteObjective;
    }

    MinimizeResult {
        point: best.values.clone(),
        objective: best.objective,
        iterations: iteration,
        evaluations: objective.evaluations,
        termination_reason,
        best_values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unbounded(n: usize) -> Vec<(f64, f64)> {
        vec![(f64::NEG_INFINITY, f64::INFINITY); n]
    }

    #[test]
    fn test_reflect() {
        let point = vec![0.0, 0.0];
        let centroid = vec![1.0, 1.0];

        let reflected = reflect(&point, &centroid, 1.0);
        assert!((reflected[0] - 2.0).abs() < 0.001);
        assert!((reflected[1] - 2.0).abs() < 0.001);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let mut values = vec![-5.0, 15.0, 5.0];
        let bounds = vec![(0.0, 10.0), (0.0, 10.0), (0.0, 10.0)];

        clamp_to_bounds(&mut values, &bounds);

        assert!((values[0] - 0.0).abs() < 0.001);
        assert!((values[1] - 10.0).abs() < 0.001);
        assert!((values[2] - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_centroid() {
        let simplex = vec![
            SimplexVertex {
                values: vec![0.0, 0.0],
                objective: 0.0,
            },
            SimplexVertex {
                values: vec![2.0, 0.0],
                objective: 0.0,
            },
            SimplexVertex {
                values: vec![1.0, 2.0], // This is the worst (last), excluded
                objective: 1.0,
            },
        ];

        let cent = centroid(&simplex);
        // Centroid of (0,0) and (2,0) = (1, 0)
        assert!((cent[0] - 1.0).abs() < 0.001);
        assert!((cent[1] - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_minimize_quadratic() {
        let result = minimize(
            |x| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2),
            &[0.0, 0.0],
            &unbounded(2),
            &NelderMeadConfig::default(),
            None,
        );

        assert!(result.converged());
        assert!((result.point[0] - 3.0).abs() < 1e-3);
        assert!((result.point[1] + 1.0).abs() < 1e-3);
        assert!(result.objective < 1e-6);
    }

    #[test]
    fn test_minimize_rosenbrock() {
        let config = NelderMeadConfig {
            max_iterations: 10_000,
            f_tolerance: 1e-12,
            x_tolerance: 1e-6,
        };
        let result = minimize(
            |x| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2),
            &[-1.2, 1.0],
            &unbounded(2),
            &config,
            None,
        );

        assert!(result.converged());
        assert!((result.point[0] - 1.0).abs() < 1e-2);
        assert!((result.point[1] - 1.0).abs() < 1e-2);
    }

    #[test]
    fn test_minimize_respects_bounds() {
        // Unconstrained optimum at 2.0, bound caps it at 0.5
        let result = minimize(
            |x| (x[0] - 2.0).powi(2),
            &[0.0],
            &[(-0.5, 0.5)],
            &NelderMeadConfig::default(),
            None,
        );

        assert!(result.point[0] <= 0.5);
        assert!((result.point[0] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_best_values_non_increasing() {
        let result = minimize(
            |x| x[0].powi(2) + x[1].powi(4),
            &[2.0, -1.5],
            &unbounded(2),
            &NelderMeadConfig::default(),
            None,
        );

        assert!(result.best_values.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_iteration_budget() {
        let config = NelderMeadConfig {
            max_iterations: 3,
            f_tolerance: 0.0,
            x_tolerance: 0.0,
        };
        let result = minimize(
            |x| (x[0] - 10.0).powi(2),
            &[0.0],
            &unbounded(1),
            &config,
            None,
        );

        assert_eq!(result.termination_reason, TerminationReason::MaxIterationsReached);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_nan_objective_reported() {
        let result = minimize(
            |_| f64::NAN,
            &[1.0],
            &unbounded(1),
            &NelderMeadConfig {
                max_iterations: 10,
                ..Default::default()
            },
            None,
        );

        assert_eq!(result.termination_reason, TerminationReason::NonFiniteObjective);
        assert!(!result.converged());
    }
}
