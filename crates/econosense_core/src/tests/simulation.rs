//! Cash-flow simulator scenario tests

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::{NormalShock, SimulationConfig};
use crate::error::SimulationError;
use crate::model::SimulationProgress;
use crate::simulation::{
    simulate, simulate_paths, simulate_seeded, simulate_with_progress, simulate_with_rng,
};

fn baseline_config() -> SimulationConfig {
    SimulationConfig {
        initial_cash: 10_000.0,
        horizon_months: 6,
        monthly_inflation_pct: 5.0,
        num_trials: 1_000,
        revenue: NormalShock::new(5_000.0, 1_000.0),
        costs: NormalShock::new(3_000.0, 800.0),
    }
}

#[test]
fn test_baseline_median_above_initial_cash() {
    let ensemble = simulate_seeded(&baseline_config(), 42).unwrap();

    assert_eq!(ensemble.len(), 1_000);
    let median = ensemble.median().unwrap();
    assert!(median > 10_000.0, "median {median}");
}

#[test]
fn test_unseeded_run_has_every_trial() {
    let config = baseline_config().with_trials(250);
    let ensemble = simulate(&config).unwrap();
    assert_eq!(ensemble.len(), 250);
    assert!(ensemble.values().iter().all(|v| v.is_finite()));
}

#[test]
fn test_cardinality() {
    for trials in [1, 99, 100, 101, 1_234] {
        let config = baseline_config().with_trials(trials);
        assert_eq!(simulate_seeded(&config, 7).unwrap().len(), trials);
    }
}

#[test]
fn test_seeded_runs_are_identical() {
    let config = baseline_config().with_trials(2_500);
    let a = simulate_seeded(&config, 2024).unwrap();
    let b = simulate_seeded(&config, 2024).unwrap();
    assert_eq!(a, b);

    let c = simulate_seeded(&config, 2025).unwrap();
    assert_ne!(a, c);
}

#[test]
fn test_injected_rng_is_reproducible() {
    let config = baseline_config().with_trials(300);
    let a = simulate_with_rng(&config, &mut SmallRng::seed_from_u64(5)).unwrap();
    let b = simulate_with_rng(&config, &mut SmallRng::seed_from_u64(5)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 300);
}

#[test]
fn test_monotone_in_inflation() {
    // Same seed means the same revenue and cost draws; only compounding differs
    let base = baseline_config();
    let low = simulate_seeded(&base.with_inflation_pct(1.0), 11).unwrap();
    let high = simulate_seeded(&base.with_inflation_pct(8.0), 11).unwrap();

    let low_median = low.median().unwrap();
    let high_median = high.median().unwrap();
    assert!(high_median > low_median, "{high_median} <= {low_median}");
}

#[test]
fn test_zero_inflation_mean() {
    let config = SimulationConfig {
        monthly_inflation_pct: 0.0,
        num_trials: 20_000,
        ..baseline_config()
    };
    let ensemble = simulate_seeded(&config, 99).unwrap();

    // 10_000 + 6 * (5_000 - 3_000); per-trial sd = sqrt(6 * (1000^2 + 800^2)) ~ 3137
    let expected = 22_000.0;
    let mean = ensemble.mean().unwrap();
    assert!((mean - expected).abs() < 100.0, "mean {mean}");
    assert!((config.expected_terminal_cash() - expected).abs() < 1e-9);
}

#[test]
fn test_zero_std_dev_is_deterministic() {
    let config = SimulationConfig {
        revenue: NormalShock::constant(5_000.0),
        costs: NormalShock::constant(3_000.0),
        num_trials: 50,
        ..baseline_config()
    };
    let ensemble = simulate_seeded(&config, 1).unwrap();
    let expected = config.expected_terminal_cash();

    assert!(
        ensemble
            .values()
            .iter()
            .all(|v| (v - expected).abs() < 1e-6 * expected)
    );
}

#[test]
fn test_terminal_cash_may_go_negative() {
    let config = SimulationConfig {
        initial_cash: 0.0,
        revenue: NormalShock::constant(1_000.0),
        costs: NormalShock::constant(2_000.0),
        num_trials: 10,
        ..baseline_config()
    };
    let ensemble = simulate_seeded(&config, 3).unwrap();
    assert!(ensemble.values().iter().all(|v| *v < 0.0));
}

#[test]
fn test_invalid_config_rejected_before_running() {
    let config = SimulationConfig {
        horizon_months: 0,
        ..baseline_config()
    };
    assert!(matches!(
        simulate_seeded(&config, 1),
        Err(SimulationError::InvalidConfig {
            field: "horizon_months",
            ..
        })
    ));

    let config = SimulationConfig {
        revenue: NormalShock::new(5_000.0, f64::INFINITY),
        ..baseline_config()
    };
    assert!(matches!(
        simulate_seeded(&config, 1),
        Err(SimulationError::InvalidConfig {
            field: "revenue.std_dev",
            ..
        })
    ));
}

#[test]
fn test_progress_matches_seeded_run() {
    let config = baseline_config().with_trials(450);
    let progress = SimulationProgress::new();

    let tracked = simulate_with_progress(&config, 8, &progress).unwrap();
    assert_eq!(progress.completed(), 450);
    assert_eq!(tracked, simulate_seeded(&config, 8).unwrap());
}

#[test]
fn test_cancelled_run_returns_error() {
    let progress = SimulationProgress::new();
    progress.cancel();

    let result = simulate_with_progress(&baseline_config(), 8, &progress);
    assert!(matches!(result, Err(SimulationError::Cancelled)));
    assert_eq!(progress.completed(), 0);
}

#[test]
fn test_paths_end_at_terminal_cash() {
    let config = SimulationConfig {
        revenue: NormalShock::constant(500.0),
        costs: NormalShock::constant(200.0),
        ..baseline_config()
    };
    let paths = simulate_paths(&config, 4, 3).unwrap();
    let expected = config.expected_terminal_cash();

    assert_eq!(paths.len(), 3);
    for path in paths {
        assert_eq!(path.len(), 7);
        assert!((path[6] - expected).abs() < 1e-6);
        assert!(path.windows(2).all(|w| w[1] > w[0]));
    }
}
