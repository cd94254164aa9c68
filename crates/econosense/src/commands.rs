//! Subcommand execution
//!
//! Each command returns its rendered output so `main` only has to print it.

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use econosense_core::{
    SimulationConfig, forecast_with, forecast_with_intervals, simulate, simulate_seeded,
};

use crate::cli::{Cli, Command, ForecastArgs, SimulateArgs};
use crate::data::{load_scenario, load_series, sample_series};
use crate::report::{SimulationReport, forecast_text, simulation_text};

pub fn run(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Forecast(args) => run_forecast(args),
        Command::Simulate(args) => run_simulate(args),
    }
}

pub fn run_forecast(args: &ForecastArgs) -> Result<String> {
    let series = match &args.input {
        Some(path) => load_series(path)
            .wrap_err_with(|| format!("Failed to load series from {}", path.display()))?,
        None => sample_series().wrap_err("Failed to build the bundled sample series")?,
    };

    let config = args.forecast_config();
    let result = match args.level {
        Some(level) => forecast_with_intervals(&series, args.steps, level, &config)?,
        None => forecast_with(&series, args.steps, &config)?,
    };

    tracing::info!(
        steps = result.len(),
        iterations = result.fit.iterations,
        "Forecast complete"
    );

    if args.json {
        Ok(serde_json::to_string_pretty(&result)?)
    } else {
        Ok(forecast_text(&series, &result))
    }
}

pub fn run_simulate(args: &SimulateArgs) -> Result<String> {
    let base = match &args.config {
        Some(path) => load_scenario(path)
            .wrap_err_with(|| format!("Failed to load scenario from {}", path.display()))?,
        None => SimulationConfig::default(),
    };
    let config = args.apply_overrides(base).build()?;

    let ensemble = match args.seed {
        Some(seed) => simulate_seeded(&config, seed)?,
        None => simulate(&config)?,
    };

    let report = SimulationReport::new(config, args.seed, &ensemble, args.bins)
        .ok_or_else(|| eyre!("Simulation produced no trials"))?;

    tracing::info!(
        trials = report.stats.num_trials,
        median = report.stats.median,
        "Simulation complete"
    );

    if args.json {
        Ok(serde_json::to_string_pretty(&report)?)
    } else {
        Ok(simulation_text(&report))
    }
}
