//! Text and JSON summaries of engine results

use std::fmt::Write;

use econosense_core::model::STANDARD_PERCENTILES;
use econosense_core::{
    EnsembleStats, ForecastResult, Histogram, SimulationConfig, SimulationEnsemble, TimeSeries,
};
use serde::Serialize;

use crate::util::format::{
    format_currency, format_currency_short, format_percent, format_probability,
};

/// Everything the `simulate` command reports
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub config: SimulationConfig,
    /// Present when the run was seeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub stats: EnsembleStats,
    /// Share of trials that end below the initial cash
    pub probability_below_initial: f64,
    pub histogram: Option<Histogram>,
}

impl SimulationReport {
    /// `None` only for an empty ensemble
    pub fn new(
        config: SimulationConfig,
        seed: Option<u64>,
        ensemble: &SimulationEnsemble,
        bins: usize,
    ) -> Option<Self> {
        let stats = ensemble.stats()?;
        Some(Self {
            probability_below_initial: ensemble.probability_below(config.initial_cash),
            histogram: ensemble.histogram(bins),
            config,
            seed,
            stats,
        })
    }
}

/// Text forecast summary ending in the `Next N Months Forecast` line
pub fn forecast_text(series: &TimeSeries, result: &ForecastResult) -> String {
    let mut out = String::new();
    let order = result.fit.order;

    let span = match (series.first_period(), series.last_period()) {
        (Some(first), Some(last)) => format!(" ({first} to {last})"),
        _ => String::new(),
    };
    let _ = writeln!(
        out,
        "Inflation Forecast: ARIMA({},{},{}) fitted to {} months{span}",
        order.p,
        order.d,
        order.q,
        series.len()
    );
    let _ = writeln!(out);

    match &result.intervals {
        Some(intervals) => {
            let label = format!("{:.0}% interval", intervals.level * 100.0);
            let _ = writeln!(out, "  {:<10} {:>10}   {label}", "Month", "Forecast");
            for (point, bound) in result.points.iter().zip(&intervals.bounds) {
                let _ = writeln!(
                    out,
                    "  {:<10} {:>10}   {} to {}",
                    point.period.to_string(),
                    format_percent(point.value),
                    format_percent(bound.lower),
                    format_percent(bound.upper)
                );
            }
        }
        None => {
            let _ = writeln!(out, "  {:<10} {:>10}", "Month", "Forecast");
            for point in &result.points {
                let _ = writeln!(
                    out,
                    "  {:<10} {:>10}",
                    point.period.to_string(),
                    format_percent(point.value)
                );
            }
        }
    }

    let rounded: Vec<String> = result.values().iter().map(|v| format!("{v:.1}")).collect();
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Next {} Months Forecast: [{}]%",
        result.len(),
        rounded.join(", ")
    );

    out
}

fn percentile_label(p: f64) -> String {
    format!("P{:.0}", p * 100.0)
}

/// Text simulation summary with a percentile list and bucket table
pub fn simulation_text(report: &SimulationReport) -> String {
    let mut out = String::new();
    let config = &report.config;
    let stats = &report.stats;

    let _ = writeln!(
        out,
        "Cash Flow Simulation: {} trials over {} months at {} monthly inflation",
        stats.num_trials,
        config.horizon_months,
        format_percent(config.monthly_inflation_pct)
    );
    let _ = writeln!(out, "Initial cash: {}", format_currency(config.initial_cash));
    if let Some(seed) = report.seed {
        let _ = writeln!(out, "Seed: {seed}");
    }
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "Median Cash After {} Months: {}",
        config.horizon_months,
        format_currency(stats.median)
    );
    let _ = writeln!(
        out,
        "Mean: {}   Std dev: {}",
        format_currency(stats.mean),
        format_currency(stats.std_dev)
    );
    let _ = writeln!(
        out,
        "Range: {} to {}",
        format_currency(stats.min),
        format_currency(stats.max)
    );
    let _ = writeln!(
        out,
        "Chance of ending below initial cash: {}",
        format_probability(report.probability_below_initial)
    );

    let _ = writeln!(out);
    let _ = writeln!(out, "Percentiles:");
    for p in STANDARD_PERCENTILES {
        if let Some((_, value)) = stats
            .percentile_values
            .iter()
            .find(|(q, _)| (q - p).abs() < 1e-9)
        {
            let _ = writeln!(
                out,
                "  {:<4} {:>16}",
                percentile_label(p),
                format_currency(*value)
            );
        }
    }

    if let Some(histogram) = &report.histogram {
        let _ = writeln!(out);
        let _ = writeln!(out, "Distribution ({} bins):", histogram.counts.len());
        for (lower, upper, count) in histogram.bins() {
            let _ = writeln!(
                out,
                "  {:>12} to {:>12}  {:>6}",
                format_currency_short(lower),
                format_currency_short(upper),
                count
            );
        }
    }

    out
}
