//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use econosense_core::{ArimaOrder, ForecastConfig, SimulationBuilder, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "econosense")]
#[command(about = "Inflation forecasting and cash-flow simulation for small businesses")]
pub struct Cli {
    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forecast monthly inflation with an ARIMA model
    Forecast(ForecastArgs),
    /// Run a Monte Carlo projection of cash under inflation
    Simulate(SimulateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// YAML list of {period, value} observations (default: bundled 2023 sample)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Number of months to forecast
    #[arg(short, long, default_value_t = 3)]
    pub steps: usize,

    /// Add prediction intervals at this level, e.g. 0.95
    #[arg(long)]
    pub level: Option<f64>,

    /// Model order as P,D,Q
    #[arg(long, default_value = "1,1,1", value_parser = parse_order)]
    pub order: ArimaOrder,

    /// Estimate a drift term (linear trend) alongside the ARMA coefficients
    #[arg(long)]
    pub drift: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ForecastArgs {
    pub fn forecast_config(&self) -> ForecastConfig {
        ForecastConfig {
            order: self.order,
            include_drift: self.drift,
            ..Default::default()
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// YAML scenario file; flags below override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Starting cash balance
    #[arg(long)]
    pub initial_cash: Option<f64>,

    /// Horizon in months
    #[arg(long)]
    pub months: Option<u32>,

    /// Monthly inflation in percent (5.0 means 5% per month)
    #[arg(long)]
    pub inflation: Option<f64>,

    /// Number of Monte Carlo trials
    #[arg(long)]
    pub trials: Option<usize>,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Histogram bins in the text report
    #[arg(long, default_value_t = 30)]
    pub bins: usize,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl SimulateArgs {
    /// Apply the command-line overrides on top of `base`
    pub fn apply_overrides(&self, base: SimulationConfig) -> SimulationBuilder {
        let mut builder = SimulationBuilder::from_config(base);
        if let Some(cash) = self.initial_cash {
            builder = builder.initial_cash(cash);
        }
        if let Some(months) = self.months {
            builder = builder.months(months);
        }
        if let Some(pct) = self.inflation {
            builder = builder.inflation_pct(pct);
        }
        if let Some(trials) = self.trials {
            builder = builder.trials(trials);
        }
        builder
    }
}

/// Parse `P,D,Q` into an order
fn parse_order(s: &str) -> Result<ArimaOrder, String> {
    let parts = s
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid order {s:?}: {e}"))?;

    match parts.as_slice() {
        [p, d, q] => Ok(ArimaOrder::new(*p, *d, *q)),
        _ => Err(format!("order must have three parts (P,D,Q), got {s:?}")),
    }
}
