//! Monte Carlo cash-flow simulator
//!
//! Every trial starts from `initial_cash` and, for each month, adds a revenue
//! draw, subtracts a cost draw and compounds the balance by the monthly
//! inflation rate. Trials are grouped into batches of at most
//! [`MAX_BATCH_SIZE`]; each batch owns a `SmallRng` whose seed is drawn in
//! order from the master seed, so a seeded run produces the same ensemble no
//! matter how batches are scheduled across threads.

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::config::{NormalShock, SimulationConfig};
use crate::error::SimulationError;
use crate::model::{SimulationEnsemble, SimulationProgress};

/// Largest number of trials sharing one RNG stream
pub const MAX_BATCH_SIZE: usize = 100;

/// Pre-built distributions for one validated configuration
#[derive(Debug, Clone)]
struct TrialSampler {
    initial_cash: f64,
    months: u32,
    multiplier: f64,
    revenue: Normal<f64>,
    costs: Normal<f64>,
}

fn normal(shock: NormalShock, field: &'static str) -> Result<Normal<f64>, SimulationError> {
    Normal::new(shock.mean, shock.std_dev).map_err(|_| SimulationError::InvalidConfig {
        field,
        value: shock.std_dev,
        reason: "is not a valid normal standard deviation",
    })
}

impl TrialSampler {
    fn new(config: &SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            initial_cash: config.initial_cash,
            months: config.horizon_months,
            multiplier: config.inflation_multiplier(),
            revenue: normal(config.revenue, "revenue.std_dev")?,
            costs: normal(config.costs, "costs.std_dev")?,
        })
    }

    /// Advance one month
    #[inline]
    fn step<R: Rng + ?Sized>(&self, cash: f64, rng: &mut R) -> f64 {
        let revenue = self.revenue.sample(rng);
        let costs = self.costs.sample(rng);
        (cash + revenue - costs) * self.multiplier
    }

    /// Terminal cash of a single trial
    fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        (0..self.months).fold(self.initial_cash, |cash, _| self.step(cash, rng))
    }

    /// Balance at month 0 (the initial cash) through the horizon
    fn run_path<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let mut path = Vec::with_capacity(self.months as usize + 1);
        let mut cash = self.initial_cash;
        path.push(cash);
        for _ in 0..self.months {
            cash = self.step(cash, rng);
            path.push(cash);
        }
        path
    }
}

/// Size of each batch for `num_trials` trials
fn batch_sizes(num_trials: usize) -> Vec<usize> {
    let num_batches = num_trials.div_ceil(MAX_BATCH_SIZE);
    (0..num_batches)
        .map(|i| {
            if i == num_batches - 1 {
                num_trials - i * MAX_BATCH_SIZE
            } else {
                MAX_BATCH_SIZE
            }
        })
        .collect()
}

fn run_batch(
    sampler: &TrialSampler,
    seed: u64,
    size: usize,
    progress: Option<&SimulationProgress>,
) -> Result<Vec<f64>, SimulationError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut terminal = Vec::with_capacity(size);

    for _ in 0..size {
        if let Some(progress) = progress {
            if progress.is_cancelled() {
                return Err(SimulationError::Cancelled);
            }
        }
        terminal.push(sampler.run(&mut rng));
        if let Some(progress) = progress {
            progress.increment();
        }
    }

    Ok(terminal)
}

fn run_batches(
    config: &SimulationConfig,
    seed: u64,
    progress: Option<&SimulationProgress>,
) -> Result<SimulationEnsemble, SimulationError> {
    let sampler = TrialSampler::new(config)?;

    let mut master = SmallRng::seed_from_u64(seed);
    let jobs: Vec<(u64, usize)> = batch_sizes(config.num_trials)
        .into_iter()
        .map(|size| (master.next_u64(), size))
        .collect();

    tracing::debug!(
        trials = config.num_trials,
        batches = jobs.len(),
        months = config.horizon_months,
        "Running cash-flow simulation"
    );

    #[cfg(feature = "parallel")]
    let batches: Vec<Vec<f64>> = jobs
        .into_par_iter()
        .map(|(batch_seed, size)| run_batch(&sampler, batch_seed, size, progress))
        .collect::<Result<Vec<_>, SimulationError>>()?;

    #[cfg(not(feature = "parallel"))]
    let batches: Vec<Vec<f64>> = jobs
        .into_iter()
        .map(|(batch_seed, size)| run_batch(&sampler, batch_seed, size, progress))
        .collect::<Result<Vec<_>, SimulationError>>()?;

    Ok(SimulationEnsemble::new(batches.into_iter().flatten().collect()))
}

/// Run the simulation seeded from OS entropy
pub fn simulate(config: &SimulationConfig) -> Result<SimulationEnsemble, SimulationError> {
    simulate_seeded(config, rand::random())
}

/// Run the simulation deterministically for `seed`
pub fn simulate_seeded(
    config: &SimulationConfig,
    seed: u64,
) -> Result<SimulationEnsemble, SimulationError> {
    run_batches(config, seed, None)
}

/// Run every trial sequentially on a caller-owned random source
pub fn simulate_with_rng<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationEnsemble, SimulationError> {
    let sampler = TrialSampler::new(config)?;
    let terminal = (0..config.num_trials).map(|_| sampler.run(rng)).collect();
    Ok(SimulationEnsemble::new(terminal))
}

/// Seeded run that reports completed trials and honours cancellation
///
/// Produces the same ensemble as [`simulate_seeded`] for the same seed.
/// Cancellation is checked before each trial; a cancelled run returns
/// [`SimulationError::Cancelled`] and discards partial results.
pub fn simulate_with_progress(
    config: &SimulationConfig,
    seed: u64,
    progress: &SimulationProgress,
) -> Result<SimulationEnsemble, SimulationError> {
    let result = run_batches(config, seed, Some(progress));
    if matches!(result, Err(SimulationError::Cancelled)) {
        tracing::debug!(completed = progress.completed(), "Simulation cancelled");
    }
    result
}

/// Month-by-month balances for `trials` trajectories
///
/// Each path has `horizon_months + 1` entries, the first being the initial
/// cash. `config.num_trials` is ignored.
pub fn simulate_paths(
    config: &SimulationConfig,
    seed: u64,
    trials: usize,
) -> Result<Vec<Vec<f64>>, SimulationError> {
    let sampler = TrialSampler::new(config)?;
    let mut rng = SmallRng::seed_from_u64(seed);
    Ok((0..trials).map(|_| sampler.run_path(&mut rng)).collect())
}
