//! Simulation results and progress tracking
//!
//! `SimulationEnsemble` holds the terminal cash of every trial. The summary
//! helpers sort a private copy, so the ensemble itself is never reordered.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

/// Percentiles reported by [`SimulationEnsemble::stats`]
pub const STANDARD_PERCENTILES: [f64; 5] = [0.05, 0.25, 0.50, 0.75, 0.95];

/// Terminal cash values of every trial, in no meaningful order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEnsemble {
    pub terminal_cash: Vec<f64>,
}

/// Summary statistics over an ensemble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleStats {
    pub num_trials: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    /// (percentile as 0-1, value)
    pub percentile_values: Vec<(f64, f64)>,
}

/// Equal-width histogram of terminal cash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// `counts.len() + 1` bin edges, ascending
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// (lower edge, upper edge, count) per bin
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

/// Linear-interpolated percentile of an ascending slice
fn percentile_of_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

impl SimulationEnsemble {
    #[must_use]
    pub fn new(terminal_cash: Vec<f64>) -> Self {
        Self { terminal_cash }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terminal_cash.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terminal_cash.is_empty()
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.terminal_cash
    }

    fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.terminal_cash.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    /// Percentile with linear interpolation, `p` in [0, 1]
    #[must_use]
    pub fn percentile(&self, p: f64) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(percentile_of_sorted(&self.sorted(), p))
    }

    #[must_use]
    pub fn median(&self) -> Option<f64> {
        self.percentile(0.5)
    }

    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        Some(self.terminal_cash.iter().sum::<f64>() / self.len() as f64)
    }

    /// Population standard deviation
    #[must_use]
    pub fn std_dev(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self
            .terminal_cash
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f64>()
            / self.len() as f64;
        Some(variance.sqrt())
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.terminal_cash.iter().copied().min_by(f64::total_cmp)
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.terminal_cash.iter().copied().max_by(f64::total_cmp)
    }

    /// Fraction of trials ending strictly below `threshold`
    #[must_use]
    pub fn probability_below(&self, threshold: f64) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let below = self.terminal_cash.iter().filter(|&&v| v < threshold).count();
        below as f64 / self.len() as f64
    }

    /// All summary statistics from a single sort
    #[must_use]
    pub fn stats(&self) -> Option<EnsembleStats> {
        let mean = self.mean()?;
        let std_dev = self.std_dev()?;
        let sorted = self.sorted();

        let percentile_values = STANDARD_PERCENTILES
            .iter()
            .map(|&p| (p, percentile_of_sorted(&sorted, p)))
            .collect();

        Some(EnsembleStats {
            num_trials: sorted.len(),
            mean,
            median: percentile_of_sorted(&sorted, 0.5),
            std_dev,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            percentile_values,
        })
    }

    /// Equal-width histogram over [min, max]; the last bin is closed.
    ///
    /// A zero-width range is widened by 0.5 on each side so a deterministic
    /// ensemble still yields `bins` buckets.
    #[must_use]
    pub fn histogram(&self, bins: usize) -> Option<Histogram> {
        if bins == 0 {
            return None;
        }
        let (mut lo, mut hi) = (self.min()?, self.max()?);
        if hi - lo <= f64::EPSILON * lo.abs().max(1.0) {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0usize; bins];

        for &v in &self.terminal_cash {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Histogram { edges, counts })
    }
}

/// Shared progress and cancellation handle for a running simulation
#[derive(Debug, Clone)]
pub struct SimulationProgress {
    completed: Arc<AtomicUsize>,
    cancelled: Arc<AtomicBool>,
}

impl SimulationProgress {
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: Arc::new(AtomicUsize::new(0)),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Create from existing atomics (for front-end integration)
    pub fn from_atomics(completed: Arc<AtomicUsize>, cancelled: Arc<AtomicBool>) -> Self {
        Self {
            completed,
            cancelled,
        }
    }

    /// Trials finished so far
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn increment(&self) {
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn reset(&self) {
        self.completed.store(0, Ordering::Relaxed);
        self.cancelled.store(false, Ordering::Relaxed);
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl Default for SimulationProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolates() {
        let ensemble = SimulationEnsemble::new(vec![4.0, 1.0, 3.0, 2.0]);
        assert_eq!(ensemble.percentile(0.0), Some(1.0));
        assert_eq!(ensemble.percentile(1.0), Some(4.0));
        assert!((ensemble.median().unwrap() - 2.5).abs() < 1e-12);
        // rank = 0.25 * 3 = 0.75 -> 1 + 0.75
        assert!((ensemble.percentile(0.25).unwrap() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_summary_on_empty_ensemble() {
        let ensemble = SimulationEnsemble::new(vec![]);
        assert!(ensemble.median().is_none());
        assert!(ensemble.stats().is_none());
        assert!(ensemble.histogram(10).is_none());
        assert_eq!(ensemble.probability_below(0.0), 0.0);
    }

    #[test]
    fn test_stats_bundle() {
        let ensemble = SimulationEnsemble::new(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let stats = ensemble.stats().unwrap();

        assert_eq!(stats.num_trials, 8);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 9.0);
        assert!((stats.median - 4.5).abs() < 1e-12);
        assert_eq!(stats.percentile_values.len(), STANDARD_PERCENTILES.len());
    }

    #[test]
    fn test_ensemble_not_reordered_by_stats() {
        let ensemble = SimulationEnsemble::new(vec![3.0, 1.0, 2.0]);
        let _ = ensemble.stats();
        assert_eq!(ensemble.values(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_histogram_counts_everything() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let histogram = SimulationEnsemble::new(values).histogram(10).unwrap();

        assert_eq!(histogram.counts.len(), 10);
        assert_eq!(histogram.edges.len(), 11);
        assert_eq!(histogram.counts.iter().sum::<usize>(), 100);
        assert!(histogram.counts.iter().all(|&c| c == 10));
    }

    #[test]
    fn test_histogram_degenerate_range() {
        let histogram = SimulationEnsemble::new(vec![7.0; 5]).histogram(3).unwrap();
        assert_eq!(histogram.counts.iter().sum::<usize>(), 5);
        assert_eq!(histogram.bins().count(), 3);
    }

    #[test]
    fn test_probability_below() {
        let ensemble = SimulationEnsemble::new(vec![-1.0, 0.5, 2.0, 3.0]);
        assert!((ensemble.probability_below(1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_progress_cancel_and_reset() {
        let progress = SimulationProgress::new();
        progress.increment();
        progress.increment();
        progress.cancel();
        assert_eq!(progress.completed(), 2);
        assert!(progress.is_cancelled());

        progress.reset();
        assert_eq!(progress.completed(), 0);
        assert!(!progress.is_cancelled());
    }
}
