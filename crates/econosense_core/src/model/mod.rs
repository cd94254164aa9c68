mod forecast;
mod results;
mod series;

pub use forecast::{FitSummary, ForecastPoint, ForecastResult, IntervalSet, PredictionInterval};
pub use results::{
    EnsembleStats, Histogram, STANDARD_PERCENTILES, SimulationEnsemble, SimulationProgress,
};
pub use series::{Observation, Period, TimeSeries};
